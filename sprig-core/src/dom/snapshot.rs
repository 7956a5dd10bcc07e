//! Serializable tree snapshots.
//!
//! A snapshot is a plain-data copy of a subtree, used to compare trees in
//! tests and to dump a tree for inspection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::node::{Node, NodeType};

/// Plain-data copy of a node and its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeSnapshot {
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<NodeSnapshot>,
    },
    Text {
        data: String,
    },
    Fragment {
        #[serde(default)]
        children: Vec<NodeSnapshot>,
    },
}

impl NodeSnapshot {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Node {
    /// Take a snapshot of this node's current subtree.
    pub fn snapshot(&self) -> NodeSnapshot {
        let children = || -> Vec<NodeSnapshot> {
            self.child_nodes().iter().map(Node::snapshot).collect()
        };
        match self.node_type() {
            NodeType::Element => NodeSnapshot::Element {
                tag: self.local_name().unwrap_or_default().to_string(),
                attributes: self.attributes().into_iter().collect(),
                children: children(),
            },
            NodeType::Text => NodeSnapshot::Text {
                data: self.data().unwrap_or_default(),
            },
            NodeType::Fragment => NodeSnapshot::Fragment {
                children: children(),
            },
        }
    }
}
