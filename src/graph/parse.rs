use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::snapshot::GraphSnapshot;

/// Accepts either a bare `{nodes, edges}` object or the API envelope
/// `{data: {nodes, edges}}`.
pub(super) fn parse_snapshot(raw: &str) -> Result<GraphSnapshot> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in graph snapshot")?;
    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("graph snapshot must be a JSON object"))?;

    let body = match object.get("data") {
        Some(data) if !object.contains_key("nodes") => data,
        _ => &parsed,
    };

    if !body.get("nodes").is_some_and(Value::is_array) {
        return Err(anyhow!("graph snapshot has no `nodes` array"));
    }

    let snapshot =
        GraphSnapshot::deserialize(body).context("graph snapshot has malformed nodes or edges")?;
    Ok(snapshot.sanitized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeType, KnowledgeType, NodeType};

    const BARE: &str = r#"{
        "nodes": [
            {"id": "1", "nodeId": "k-1", "type": "knowledge", "label": "Pricing decision",
             "knowledgeType": "decision", "projectCode": "ACT-01"},
            {"id": "2", "nodeId": "p-9", "type": "project", "label": "Website"}
        ],
        "edges": [
            {"id": "e1", "source": "1", "target": "2", "edgeType": "supports",
             "strength": 0.8, "confidence": 0.9, "reasoning": "cited in brief"}
        ]
    }"#;

    #[test]
    fn parses_bare_snapshot() {
        let snapshot = parse_snapshot(BARE).unwrap();
        assert_eq!(snapshot.node_count(), 2);
        assert_eq!(snapshot.nodes[0].node_type, NodeType::Knowledge);
        assert_eq!(
            snapshot.nodes[0].knowledge_type,
            Some(KnowledgeType::Decision)
        );
        assert_eq!(snapshot.nodes[0].project_code.as_deref(), Some("ACT-01"));
        assert_eq!(snapshot.nodes[1].knowledge_type, None);
        assert_eq!(snapshot.edges[0].edge_type, EdgeType::Supports);
        assert_eq!(snapshot.edges[0].reasoning, "cited in brief");
    }

    #[test]
    fn parses_api_envelope() {
        let wrapped = format!(r#"{{"success": true, "data": {BARE}}}"#);
        let snapshot = parse_snapshot(&wrapped).unwrap();
        assert_eq!(snapshot.node_count(), 2);
        assert_eq!(snapshot.edge_count(), 1);
    }

    #[test]
    fn missing_edges_default_to_empty() {
        let snapshot =
            parse_snapshot(r#"{"nodes": [{"id": "a", "type": "topic"}]}"#).unwrap();
        assert_eq!(snapshot.node_count(), 1);
        assert_eq!(snapshot.edge_count(), 0);
        assert_eq!(snapshot.nodes[0].display_label(), "a");
    }

    #[test]
    fn edge_weights_default_when_absent() {
        let snapshot = parse_snapshot(
            r#"{"nodes": [], "edges": [{"id": "e", "source": "a", "target": "b", "edgeType": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.edges[0].strength, 0.5);
        assert_eq!(snapshot.edges[0].confidence, 0.5);
    }

    #[test]
    fn rejects_non_objects_and_missing_nodes() {
        assert!(parse_snapshot("[]").is_err());
        assert!(parse_snapshot(r#"{"edges": []}"#).is_err());
        assert!(parse_snapshot("not json").is_err());
    }
}
