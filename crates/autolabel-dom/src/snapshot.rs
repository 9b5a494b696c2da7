//! JSON page snapshots.
//!
//! A snapshot is the serialized form of a document: the viewport plus a tree
//! of elements and text nodes. Elements carry their attributes, live value,
//! resolved style and viewport-relative rectangle, which is everything the
//! labeling engine reads.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use autolabel_protocols::{ComputedStyle, NodeId, NodeKind, Rect, Viewport};

use crate::error::SnapshotError;
use crate::memory::{MemoryDocument, NodeData};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub viewport: Viewport,
    pub root: SnapshotNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotNode {
    Text { text: String },
    Element(SnapshotElement),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotElement {
    pub tag: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default)]
    pub style: ComputedStyle,

    #[serde(default)]
    pub rect: Rect,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,
}

impl PageSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        debug!("Loaded snapshot from {}", path.display());
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

impl MemoryDocument {
    /// Build a document from a snapshot.
    pub fn from_snapshot(snapshot: &PageSnapshot) -> Result<Self, SnapshotError> {
        let SnapshotNode::Element(root) = &snapshot.root else {
            return Err(SnapshotError::TextRoot);
        };

        let mut doc = MemoryDocument::with_root(&root.tag, snapshot.viewport);
        let root_id = doc.root;
        fill_element(&mut doc.nodes[root_id.0], root);
        for child in &root.children {
            doc.insert_snapshot(root_id, child)?;
        }
        debug!("Built document with {} nodes", doc.len());
        Ok(doc)
    }

    fn insert_snapshot(&mut self, parent: NodeId, node: &SnapshotNode) -> Result<(), SnapshotError> {
        match node {
            SnapshotNode::Text { text } => {
                self.add_text(parent, text)?;
            }
            SnapshotNode::Element(element) => {
                let mut data = NodeData::element(&element.tag);
                fill_element(&mut data, element);
                let id = self.push(data);
                autolabel_protocols::Document::append_child(self, parent, id)?;
                for child in &element.children {
                    self.insert_snapshot(id, child)?;
                }
            }
        }
        Ok(())
    }

    /// Serialize the attached tree.
    pub fn to_snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            viewport: self.viewport,
            root: self.snapshot_node(self.root),
        }
    }

    fn snapshot_node(&self, id: NodeId) -> SnapshotNode {
        let node = &self.nodes[id.0];
        match node.kind {
            NodeKind::Text => SnapshotNode::Text {
                text: node.text.clone(),
            },
            NodeKind::Element => SnapshotNode::Element(SnapshotElement {
                tag: node.tag.clone(),
                attributes: node.attributes.clone(),
                value: node.value.clone(),
                style: node.style.clone(),
                rect: node.rect,
                children: node.children.iter().map(|&c| self.snapshot_node(c)).collect(),
            }),
        }
    }
}

fn fill_element(data: &mut NodeData, element: &SnapshotElement) {
    data.attributes = element
        .attributes
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
        .collect();
    data.value = element.value.clone();
    data.style = element.style.clone();
    data.rect = element.rect;
}
