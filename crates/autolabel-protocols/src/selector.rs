//! Interactive-element selector grammar.
//!
//! A selector is a comma-separated list of compound selectors. Each compound
//! is an optional tag name (or `*`) followed by any number of attribute tests
//! (`[name]`, `[name="value"]`, `[name='value']`, `[name=value]`) and class
//! tests (`.name`). Combinators are not supported.

use std::fmt;

use crate::error::SelectorError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Test {
    Exists(String),
    Equals(String, String),
    Class(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    tests: Vec<Test>,
}

impl Compound {
    fn matches<'a, F>(&self, tag: &str, attr: &F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        if let Some(ref expected) = self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        self.tests.iter().all(|test| match test {
            Test::Exists(name) => attr(name).is_some(),
            Test::Equals(name, value) => attr(name) == Some(value.as_str()),
            Test::Class(name) => attr("class")
                .map(|classes| classes.split_whitespace().any(|c| c == name))
                .unwrap_or(false),
        })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Compound>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut cursor = Cursor::new(input);
        let mut alternatives = vec![];

        loop {
            cursor.skip_whitespace();
            alternatives.push(cursor.compound()?);
            cursor.skip_whitespace();

            match cursor.bump() {
                None => break,
                Some(',') => continue,
                Some(c) => {
                    return Err(cursor.error(format!("unexpected '{}', combinators are not supported", c)));
                }
            }
        }

        Ok(Self {
            source: input.trim().to_string(),
            alternatives,
        })
    }

    /// Selector matching elements that carry the class `name`.
    ///
    /// `name` must be a single class token, so `"a.b"` or `"a b"` is rejected
    /// rather than read as several class tests.
    pub fn class(name: &str) -> Result<Self, SelectorError> {
        if let Some(position) = name.find(|c: char| !is_ident_char(c)) {
            return Err(SelectorError::new(name, position, "class name must be a single identifier"));
        }
        Self::parse(&format!(".{}", name))
    }

    /// Selector matching elements that carry any of the given attributes.
    pub fn any_attribute(names: &[&str]) -> Result<Self, SelectorError> {
        let list: Vec<String> = names.iter().map(|name| format!("[{}]", name)).collect();
        Self::parse(&list.join(", "))
    }

    /// Check an element against the selector.
    ///
    /// `tag` is the element's tag name and `attr` looks up an attribute by its
    /// lower-cased name.
    pub fn matches<'a, F>(&self, tag: &str, attr: F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        self.alternatives.iter().any(|compound| compound.matches(tag, &attr))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_ident_char(c)) {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    fn error(&self, message: impl Into<String>) -> SelectorError {
        SelectorError::new(self.input, self.pos, message)
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut universal = false;
        let tag = match self.peek() {
            Some('*') => {
                self.bump();
                universal = true;
                None
            }
            Some(c) if is_ident_char(c) => Some(self.ident().to_ascii_lowercase()),
            _ => None,
        };

        let mut tests = vec![];
        loop {
            match self.peek() {
                Some('[') => {
                    self.bump();
                    tests.push(self.attribute_test()?);
                }
                Some('.') => {
                    self.bump();
                    let name = self.ident();
                    if name.is_empty() {
                        return Err(self.error("expected class name"));
                    }
                    tests.push(Test::Class(name.to_string()));
                }
                _ => break,
            }
        }

        if tag.is_none() && !universal && tests.is_empty() {
            return Err(self.error("expected tag name, '*', '[' or '.'"));
        }

        Ok(Compound { tag, tests })
    }

    fn attribute_test(&mut self) -> Result<Test, SelectorError> {
        self.skip_whitespace();
        let name = self.ident().to_ascii_lowercase();
        if name.is_empty() {
            return Err(self.error("expected attribute name"));
        }
        self.skip_whitespace();

        match self.bump() {
            Some(']') => Ok(Test::Exists(name)),
            Some('=') => {
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.bump();
                        let start = self.pos;
                        loop {
                            match self.bump() {
                                Some(c) if c == quote => break,
                                Some(_) => {}
                                None => return Err(self.error("unterminated string")),
                            }
                        }
                        self.input[start..self.pos - quote.len_utf8()].to_string()
                    }
                    _ => {
                        let value = self.ident();
                        if value.is_empty() {
                            return Err(self.error("expected attribute value"));
                        }
                        value.to_string()
                    }
                };
                self.skip_whitespace();
                match self.bump() {
                    Some(']') => Ok(Test::Equals(name, value)),
                    _ => Err(self.error("expected ']'")),
                }
            }
            None => Err(self.error("unterminated attribute selector")),
            Some(c) => Err(self.error(format!("unsupported attribute operator '{}'", c))),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
