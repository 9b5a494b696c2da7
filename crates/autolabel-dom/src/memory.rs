//! Arena-backed document.

use std::collections::BTreeMap;

use autolabel_protocols::{
    ComputedStyle, Document, DocumentError, NodeId, NodeKind, Rect, Selector, Viewport,
};

/// One node of the arena. Text nodes leave the element fields at their defaults.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    /// Tag name (lowercase); empty for text nodes.
    pub(crate) tag: String,
    /// Raw text of a text node.
    pub(crate) text: String,
    /// Attributes keyed by lower-cased name.
    pub(crate) attributes: BTreeMap<String, String>,
    /// Current form-control value when it differs from the `value` attribute.
    pub(crate) value: Option<String>,
    pub(crate) style: ComputedStyle,
    /// Bounding box in viewport coordinates.
    pub(crate) rect: Rect,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl NodeData {
    pub(crate) fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element,
            tag: tag.to_ascii_lowercase(),
            text: String::new(),
            attributes: BTreeMap::new(),
            value: None,
            style: ComputedStyle::default(),
            rect: Rect::default(),
            parent: None,
            children: vec![],
        }
    }

    pub(crate) fn text(text: &str) -> Self {
        Self {
            kind: NodeKind::Text,
            text: text.to_string(),
            ..Self::element("")
        }
    }
}

/// In-memory document.
///
/// Node identities are arena indices. Removed nodes stay in the arena,
/// detached, so their identities are never reused.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: NodeId,
    pub(crate) viewport: Viewport,
}

impl MemoryDocument {
    /// Create a document with `<html>`, `<head>` and a full-viewport `<body>`.
    pub fn new(viewport: Viewport) -> Self {
        let mut doc = Self::with_root("html", viewport);
        let page = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        doc.nodes[doc.root.0].rect = page;

        let head = doc.create_element("head");
        doc.nodes[head.0].style = ComputedStyle::hidden();
        let body = doc.create_element("body");
        doc.nodes[body.0].rect = page;

        let root = doc.root;
        for child in [head, body] {
            doc.nodes[child.0].parent = Some(root);
            doc.nodes[root.0].children.push(child);
        }
        doc
    }

    pub(crate) fn with_root(tag: &str, viewport: Viewport) -> Self {
        Self {
            nodes: vec![NodeData::element(tag)],
            root: NodeId(0),
            viewport,
        }
    }

    pub(crate) fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(data);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    fn element(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id).filter(|n| n.kind == NodeKind::Element)
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DocumentError> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(DocumentError::NodeNotFound(id))?;
        if node.kind != NodeKind::Element {
            return Err(DocumentError::NotAnElement(id));
        }
        Ok(node)
    }

    /// Create an element and append it to `parent`.
    pub fn add_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DocumentError> {
        let id = self.create_element(tag);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Create a text node and append it to `parent`.
    pub fn add_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DocumentError> {
        let id = self.create_text(text);
        self.append_child(parent, id)?;
        Ok(id)
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) -> Result<(), DocumentError> {
        self.element_mut(node)?.rect = rect;
        Ok(())
    }

    pub fn set_style(&mut self, node: NodeId, style: ComputedStyle) -> Result<(), DocumentError> {
        self.element_mut(node)?.style = style;
        Ok(())
    }

    /// Set the live value of a form control.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<(), DocumentError> {
        self.element_mut(node)?.value = Some(value.to_string());
        Ok(())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Number of nodes ever created, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order walk of the subtree rooted at `from`, including `from`.
    pub(crate) fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = vec![];
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                out.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn child_with_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.node(parent)?
            .children
            .iter()
            .copied()
            .find(|&c| self.tag_name(c) == Some(tag))
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> NodeId {
        self.root
    }

    fn head(&self) -> Option<NodeId> {
        self.child_with_tag(self.root, "head")
    }

    fn body(&self) -> Option<NodeId> {
        self.child_with_tag(self.root, "body")
    }

    fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.node(node).map(|n| n.kind)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|n| n.tag.as_str())
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node)
            .filter(|n| n.kind == NodeKind::Text)
            .map(|n| n.text.as_str())
    }

    fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .into_iter()
            .filter_map(|id| self.text(id))
            .collect()
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn value(&self, node: NodeId) -> Option<&str> {
        let element = self.element(node)?;
        element
            .value
            .as_deref()
            .or_else(|| element.attributes.get("value").map(String::as_str))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&node| self.attribute(node, "id") == Some(id))
    }

    fn computed_style(&self, node: NodeId) -> Option<ComputedStyle> {
        self.element(node).map(|n| n.style.clone())
    }

    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        self.element(node).map(|n| n.rect)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| match self.element(id) {
                Some(element) => selector.matches(&element.tag, |name| {
                    element.attributes.get(name).map(String::as_str)
                }),
                None => false,
            })
            .collect()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DocumentError> {
        self.element_mut(node)?
            .attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DocumentError> {
        self.element_mut(node)?
            .attributes
            .remove(&name.to_ascii_lowercase());
        Ok(())
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::element(tag))
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::text(text))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        self.element_mut(parent)?;
        if self.node(child).is_none() {
            return Err(DocumentError::NodeNotFound(child));
        }

        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(DocumentError::HierarchyRequest { parent, child });
            }
            ancestor = self.parent(id);
        }

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    fn remove(&mut self, node: NodeId) -> Result<(), DocumentError> {
        if node == self.root {
            return Err(DocumentError::CannotRemoveRoot);
        }
        if self.node(node).is_none() {
            return Err(DocumentError::NodeNotFound(node));
        }
        self.detach(node);
        Ok(())
    }
}
