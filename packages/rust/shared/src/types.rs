//! Design tree types mirroring the Figma REST API `nodes` endpoint.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FigmaCopyError, Result};

// ---------------------------------------------------------------------------
// NodeType
// ---------------------------------------------------------------------------

/// Type tag of a design node. Only [`NodeType::Text`] carries copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    /// `"TEXT"` — a node whose `characters` holds literal text.
    Text,
    /// Any other tag (`FRAME`, `GROUP`, `VECTOR`, ...), kept verbatim.
    Other(String),
}

impl From<String> for NodeType {
    fn from(tag: String) -> Self {
        if tag == "TEXT" {
            Self::Text
        } else {
            Self::Other(tag)
        }
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Text => "TEXT".into(),
            NodeType::Other(tag) => tag,
        }
    }
}

// ---------------------------------------------------------------------------
// DesignNode
// ---------------------------------------------------------------------------

/// One element of the design document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignNode {
    /// Figma node id (`<major>:<minor>`).
    pub id: String,
    /// Layer name as shown in the editor.
    #[serde(default)]
    pub name: String,
    /// Type tag.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Text payload, present only on text nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    /// Visibility flag; absent means visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Child nodes in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DesignNode>,
}

impl DesignNode {
    /// Whether the node is hidden. Only an explicit `false` hides it.
    pub fn is_hidden(&self) -> bool {
        self.visible == Some(false)
    }

    /// The text payload if this is a text node with non-empty characters.
    pub fn text(&self) -> Option<&str> {
        match (&self.node_type, self.characters.as_deref()) {
            (NodeType::Text, Some(chars)) if !chars.is_empty() => Some(chars),
            _ => None,
        }
    }
}

// Flattens children onto a heap stack; a derived drop recurses once per level.
impl Drop for DesignNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

// ---------------------------------------------------------------------------
// API response
// ---------------------------------------------------------------------------

/// Wrapper around a node subtree in the `nodes` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEntry {
    pub document: DesignNode,
}

/// Body of `GET /v1/files/:key/nodes?ids=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodesResponse {
    /// File name.
    #[serde(default)]
    pub name: String,
    /// When the file was last edited.
    #[serde(rename = "lastModified", default)]
    pub last_modified: Option<DateTime<Utc>>,
    /// Requested nodes by id. Figma answers `null` for ids it cannot resolve.
    #[serde(default)]
    pub nodes: HashMap<String, Option<NodeEntry>>,
}

impl NodesResponse {
    /// Sorted list of node ids that actually resolved to a document.
    pub fn available_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .nodes
            .iter()
            .filter(|(_, entry)| entry.is_some())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Take ownership of the document for `node_id`.
    pub fn into_document(mut self, node_id: &str) -> Result<DesignNode> {
        match self.nodes.remove(node_id) {
            Some(Some(entry)) => Ok(entry.document),
            _ => Err(FigmaCopyError::NodeNotFound {
                node_id: node_id.to_string(),
                available: self.available_ids(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// FigmaRef
// ---------------------------------------------------------------------------

/// File key and optional node id parsed from a Figma URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigmaRef {
    pub file_key: String,
    pub node_id: Option<String>,
}

impl FigmaRef {
    /// The node id, or [`FigmaCopyError::MissingNodeId`] when the URL had none.
    pub fn require_node_id(&self) -> Result<&str> {
        self.node_id
            .as_deref()
            .ok_or(FigmaCopyError::MissingNodeId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_type_deserializes_text_and_others() {
        let node: DesignNode =
            serde_json::from_str(r#"{"id":"1:1","name":"Title","type":"TEXT","characters":"Hi"}"#)
                .unwrap();
        assert_eq!(node.node_type, NodeType::Text);
        assert_eq!(node.text(), Some("Hi"));
        assert!(node.children.is_empty());
        assert!(!node.is_hidden());

        let node: DesignNode =
            serde_json::from_str(r#"{"id":"1:2","name":"Card","type":"FRAME"}"#).unwrap();
        assert_eq!(node.node_type, NodeType::Other("FRAME".into()));
        assert_eq!(node.text(), None);
    }

    #[test]
    fn empty_characters_is_not_text() {
        let node: DesignNode =
            serde_json::from_str(r#"{"id":"1:1","name":"","type":"TEXT","characters":""}"#)
                .unwrap();
        assert_eq!(node.text(), None);
    }

    #[test]
    fn characters_on_non_text_node_are_ignored() {
        let node: DesignNode = serde_json::from_str(
            r#"{"id":"1:1","name":"","type":"RECTANGLE","characters":"stray"}"#,
        )
        .unwrap();
        assert_eq!(node.text(), None);
    }

    #[test]
    fn only_explicit_false_hides() {
        let hidden: DesignNode =
            serde_json::from_str(r#"{"id":"1","name":"","type":"GROUP","visible":false}"#).unwrap();
        let shown: DesignNode =
            serde_json::from_str(r#"{"id":"2","name":"","type":"GROUP","visible":true}"#).unwrap();
        assert!(hidden.is_hidden());
        assert!(!shown.is_hidden());
    }

    #[test]
    fn into_document_reports_available_ids() {
        let body = r#"{
            "name": "Pricing",
            "lastModified": "2024-03-01T12:00:00Z",
            "nodes": {
                "9:9": null,
                "2:1": {"document": {"id":"2:1","name":"","type":"FRAME"}},
                "1:1": {"document": {"id":"1:1","name":"","type":"FRAME"}}
            }
        }"#;
        let response: NodesResponse = serde_json::from_str(body).unwrap();
        assert!(response.last_modified.is_some());

        match response.clone().into_document("9:9") {
            Err(FigmaCopyError::NodeNotFound { node_id, available }) => {
                assert_eq!(node_id, "9:9");
                assert_eq!(available, vec!["1:1".to_string(), "2:1".to_string()]);
            }
            other => panic!("expected NodeNotFound, got {other:?}"),
        }

        let doc = response.into_document("2:1").unwrap();
        assert_eq!(doc.id, "2:1");
    }

    #[test]
    fn dropping_a_very_deep_tree_does_not_overflow() {
        let mut node: DesignNode =
            serde_json::from_str(r#"{"id":"leaf","type":"TEXT","characters":"x"}"#).unwrap();
        for i in 0..200_000 {
            node = DesignNode {
                id: i.to_string(),
                name: String::new(),
                node_type: NodeType::Other("FRAME".into()),
                characters: None,
                visible: None,
                children: vec![node],
            };
        }
        drop(node);
    }

    #[test]
    fn require_node_id() {
        let with = FigmaRef {
            file_key: "ABC".into(),
            node_id: Some("1:2".into()),
        };
        assert_eq!(with.require_node_id().unwrap(), "1:2");

        let without = FigmaRef {
            file_key: "ABC".into(),
            node_id: None,
        };
        assert!(matches!(
            without.require_node_id(),
            Err(FigmaCopyError::MissingNodeId)
        ));
    }
}
