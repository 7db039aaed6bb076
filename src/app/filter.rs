use std::collections::HashMap;

use log::debug;

use crate::graph::EdgeType;

use super::{SimEdge, SimGraph, ViewModel};

/// Indices of the edges matching `selection`; `None` selects every edge.
pub(super) fn filter_edges(edges: &[SimEdge], selection: Option<&EdgeType>) -> Vec<usize> {
    edges
        .iter()
        .enumerate()
        .filter(|(_, edge)| selection.is_none_or(|kind| edge.descriptor.edge_type == *kind))
        .map(|(index, _)| index)
        .collect()
}

/// Edge totals per type, most common first.
pub(super) fn edge_type_counts<'a>(
    kinds: impl IntoIterator<Item = &'a EdgeType>,
) -> Vec<(EdgeType, usize)> {
    let mut counts: HashMap<&EdgeType, usize> = HashMap::new();
    for kind in kinds {
        *counts.entry(kind).or_default() += 1;
    }

    let mut counts = counts
        .into_iter()
        .map(|(kind, count)| (kind.clone(), count))
        .collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.label().cmp(b.0.label())));
    counts
}

impl SimGraph {
    pub(in crate::app) fn set_edge_filter(&mut self, selection: Option<&EdgeType>) {
        self.active_edges = filter_edges(&self.edges, selection);
    }
}

impl ViewModel {
    pub(in crate::app) fn set_edge_filter(&mut self, selection: Option<EdgeType>) {
        if self.selected_edge_type == selection {
            return;
        }

        debug!(
            "edge filter set to {}",
            selection.as_ref().map_or("all", EdgeType::label)
        );
        self.selected_edge_type = selection;

        if let Some(graph) = self.sim.as_mut() {
            graph.set_edge_filter(self.selected_edge_type.as_ref());
            // Off by default: filtering keeps the current layout energy.
            if self.physics.reheat_on_filter_change {
                graph.reheat(self.physics.reheat_alpha);
            }
        }
    }
}
