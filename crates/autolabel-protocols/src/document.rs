//! Document trait definition.

use crate::error::DocumentError;
use crate::selector::Selector;
use crate::types::{ComputedStyle, NodeId, NodeKind, Rect, Viewport};

/// Core trait over the document being labeled.
///
/// The labeling engine only ever mutates a document through attribute writes
/// and by appending nodes it created itself. Reads return `None` for unknown
/// nodes, writes return an error.
pub trait Document {
    /// The `<html>` element.
    fn root(&self) -> NodeId;

    fn head(&self) -> Option<NodeId>;

    fn body(&self) -> Option<NodeId>;

    fn kind(&self, node: NodeId) -> Option<NodeKind>;

    /// Lower-cased tag name of an element.
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    /// Raw text of a text node.
    fn text(&self, node: NodeId) -> Option<&str>;

    /// Concatenated text of every descendant text node, regardless of visibility.
    fn text_content(&self, node: NodeId) -> String;

    /// Child nodes in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Current value of a form control, which may differ from its `value` attribute.
    fn value(&self, node: NodeId) -> Option<&str>;

    /// First attached element in document order whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    fn computed_style(&self, node: NodeId) -> Option<ComputedStyle>;

    /// Rendered box in viewport coordinates.
    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;

    fn viewport(&self) -> Viewport;

    /// All attached elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DocumentError>;

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DocumentError>;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Create a detached text node.
    fn create_text(&mut self, text: &str) -> NodeId;

    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError>;

    /// Detach `node` (and its subtree) from the tree.
    fn remove(&mut self, node: NodeId) -> Result<(), DocumentError>;
}
