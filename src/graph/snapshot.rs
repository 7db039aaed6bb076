use std::collections::HashSet;

use log::warn;
use serde::Deserialize;

use super::kinds::{EdgeType, KnowledgeType, NodeType};

const DEFAULT_WEIGHT: f32 = 0.5;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub id: String,
    #[serde(default)]
    pub node_id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub knowledge_type: Option<KnowledgeType>,
    #[serde(default)]
    pub project_code: Option<String>,
}

impl NodeDescriptor {
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDescriptor {
    pub id: String,
    pub source: String,
    pub target: String,
    pub edge_type: EdgeType,
    #[serde(default = "default_weight")]
    pub strength: f32,
    #[serde(default = "default_weight")]
    pub confidence: f32,
    #[serde(default)]
    pub reasoning: String,
}

fn default_weight() -> f32 {
    DEFAULT_WEIGHT
}

fn sanitize_weight(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        DEFAULT_WEIGHT
    }
}

/// One complete node/edge set handed over by the data supplier.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
    #[serde(default)]
    pub edges: Vec<EdgeDescriptor>,
}

impl GraphSnapshot {
    /// Drops unusable nodes and forces edge weights into `[0, 1]`.
    ///
    /// Edges are never dropped here; endpoint resolution happens when the
    /// live graph is built.
    pub fn sanitized(mut self) -> Self {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes.retain(|node| {
            if node.id.trim().is_empty() {
                warn!("dropping node with empty id (label {:?})", node.label);
                return false;
            }
            if !seen.insert(node.id.clone()) {
                warn!("dropping duplicate node id {}", node.id);
                return false;
            }
            true
        });

        for edge in &mut self.edges {
            let strength = sanitize_weight(edge.strength);
            let confidence = sanitize_weight(edge.confidence);
            if !edge.strength.is_finite() || !edge.confidence.is_finite() {
                warn!(
                    "edge {} carried non-finite weights (strength {}, confidence {})",
                    edge.id, edge.strength, edge.confidence
                );
            }
            edge.strength = strength;
            edge.confidence = confidence;
        }

        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn node(id: &str) -> NodeDescriptor {
        NodeDescriptor {
            id: id.to_owned(),
            node_id: format!("ext-{id}"),
            node_type: NodeType::Knowledge,
            label: format!("Node {id}"),
            knowledge_type: None,
            project_code: None,
        }
    }

    pub(crate) fn edge(id: &str, source: &str, target: &str, kind: &str) -> EdgeDescriptor {
        EdgeDescriptor {
            id: id.to_owned(),
            source: source.to_owned(),
            target: target.to_owned(),
            edge_type: EdgeType::from(kind),
            strength: 0.5,
            confidence: 0.5,
            reasoning: String::new(),
        }
    }
}
