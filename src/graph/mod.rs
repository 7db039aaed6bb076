mod kinds;
mod load;
mod parse;
mod snapshot;

pub use kinds::{EdgeType, KnowledgeType, NodeType};
pub use load::load_snapshot;
pub use snapshot::{EdgeDescriptor, GraphSnapshot, NodeDescriptor};

#[cfg(test)]
pub(crate) use snapshot::fixtures as snapshot_fixtures;
