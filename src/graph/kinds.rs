//! Closed vocabularies for the free-form type strings carried by snapshots.
//!
//! Unknown strings are preserved in an `Other` variant so they still group,
//! filter and count correctly; they only lose their dedicated color.

use serde::Deserialize;

fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| match ch {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum NodeType {
    Project,
    Knowledge,
    Person,
    Organization,
    Document,
    Topic,
    Other(String),
}

impl From<String> for NodeType {
    fn from(raw: String) -> Self {
        match normalize(&raw).as_str() {
            "project" => Self::Project,
            "knowledge" => Self::Knowledge,
            "person" | "contact" => Self::Person,
            "organization" | "organisation" => Self::Organization,
            "document" | "doc" => Self::Document,
            "topic" => Self::Topic,
            _ => Self::Other(raw),
        }
    }
}

impl NodeType {
    pub fn label(&self) -> &str {
        match self {
            Self::Project => "project",
            Self::Knowledge => "knowledge",
            Self::Person => "person",
            Self::Organization => "organization",
            Self::Document => "document",
            Self::Topic => "topic",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub const KNOWN: [NodeType; 6] = [
        Self::Project,
        Self::Knowledge,
        Self::Person,
        Self::Organization,
        Self::Document,
        Self::Topic,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum KnowledgeType {
    Decision,
    Insight,
    Process,
    Meeting,
    Research,
    Principle,
    Other(String),
}

impl From<String> for KnowledgeType {
    fn from(raw: String) -> Self {
        match normalize(&raw).as_str() {
            "decision" => Self::Decision,
            "insight" => Self::Insight,
            "process" | "procedure" => Self::Process,
            "meeting" => Self::Meeting,
            "research" => Self::Research,
            "principle" => Self::Principle,
            _ => Self::Other(raw),
        }
    }
}

impl KnowledgeType {
    pub fn label(&self) -> &str {
        match self {
            Self::Decision => "decision",
            Self::Insight => "insight",
            Self::Process => "process",
            Self::Meeting => "meeting",
            Self::Research => "research",
            Self::Principle => "principle",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub const KNOWN: [KnowledgeType; 6] = [
        Self::Decision,
        Self::Insight,
        Self::Process,
        Self::Meeting,
        Self::Research,
        Self::Principle,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum EdgeType {
    RelatesTo,
    DependsOn,
    Supports,
    Contradicts,
    DerivedFrom,
    Mentions,
    PartOf,
    Other(String),
}

impl From<String> for EdgeType {
    fn from(raw: String) -> Self {
        match normalize(&raw).as_str() {
            "relates_to" | "related" | "related_to" => Self::RelatesTo,
            "depends_on" => Self::DependsOn,
            "supports" => Self::Supports,
            "contradicts" => Self::Contradicts,
            "derived_from" => Self::DerivedFrom,
            "mentions" => Self::Mentions,
            "part_of" => Self::PartOf,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for EdgeType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl EdgeType {
    pub fn label(&self) -> &str {
        match self {
            Self::RelatesTo => "relates to",
            Self::DependsOn => "depends on",
            Self::Supports => "supports",
            Self::Contradicts => "contradicts",
            Self::DerivedFrom => "derived from",
            Self::Mentions => "mentions",
            Self::PartOf => "part of",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds_loosely() {
        assert_eq!(EdgeType::from("Depends-On"), EdgeType::DependsOn);
        assert_eq!(EdgeType::from(" part of "), EdgeType::PartOf);
        assert_eq!(NodeType::from("Organisation".to_owned()), NodeType::Organization);
        assert_eq!(
            KnowledgeType::from("RESEARCH".to_owned()),
            KnowledgeType::Research
        );
    }

    #[test]
    fn unknown_kinds_fall_back_and_keep_their_text() {
        let kind = EdgeType::from("inspired_by");
        assert_eq!(kind, EdgeType::Other("inspired_by".to_owned()));
        assert_eq!(kind.label(), "inspired_by");
        assert_eq!(kind, EdgeType::from("inspired_by"));
    }

    #[test]
    fn deserializes_from_plain_strings() {
        let kinds: Vec<EdgeType> =
            serde_json::from_str(r#"["supports", "mentions", "weird"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                EdgeType::Supports,
                EdgeType::Mentions,
                EdgeType::Other("weird".to_owned())
            ]
        );
    }
}
