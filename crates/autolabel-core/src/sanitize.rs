//! Symbol sanitizer.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a letter, number, punctuation mark or space separator,
/// in any script. `^`, `$` and newline are kept as structural characters.
static DECORATIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\p{P}\p{Z}^$\n]").expect("sanitizer pattern is valid"));

/// Strip decorative glyphs (emoji, pictographs, box drawing, control
/// characters) and trim surrounding whitespace.
pub fn sanitize(text: &str) -> String {
    DECORATIVE.replace_all(text, "").trim().to_string()
}
