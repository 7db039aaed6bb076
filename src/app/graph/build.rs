use std::collections::HashMap;

use eframe::egui::Vec2;
use log::{debug, info};
use rand::Rng;

use crate::graph::{EdgeType, GraphSnapshot};
use crate::layout::{Surface, initial_positions};

use super::super::filter::filter_edges;
use super::super::{FrameScratch, SimEdge, SimGraph, SimNode, ViewModel};

impl SimGraph {
    /// Builds live state for `snapshot`, resolving edge endpoints to node
    /// indices once and laying nodes out on `surface`.
    pub(in crate::app) fn build<R: Rng + ?Sized>(
        snapshot: &GraphSnapshot,
        surface: Surface,
        selection: Option<&EdgeType>,
        rng: &mut R,
    ) -> Self {
        let index_by_id = snapshot
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.as_str(), index))
            .collect::<HashMap<_, _>>();

        let nodes = snapshot
            .nodes
            .iter()
            .map(|descriptor| SimNode {
                descriptor: descriptor.clone(),
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
                pin: None,
            })
            .collect::<Vec<_>>();

        let mut dangling = 0usize;
        let edges = snapshot
            .edges
            .iter()
            .map(|descriptor| {
                let endpoints = index_by_id
                    .get(descriptor.source.as_str())
                    .zip(index_by_id.get(descriptor.target.as_str()))
                    .map(|(&source, &target)| (source, target));
                if endpoints.is_none() {
                    dangling += 1;
                    debug!(
                        "edge {} ({} -> {}) has no matching endpoint",
                        descriptor.id, descriptor.source, descriptor.target
                    );
                }
                SimEdge {
                    descriptor: descriptor.clone(),
                    endpoints,
                }
            })
            .collect::<Vec<_>>();

        if dangling > 0 {
            info!("{dangling} of {} edges reference unknown nodes", edges.len());
        }

        let active_edges = filter_edges(&edges, selection);
        let mut graph = Self {
            nodes,
            edges,
            active_edges,
            alpha: 1.0,
            surface,
            scratch: FrameScratch::default(),
        };
        graph.relayout(surface, rng);
        graph
    }

    /// Places every node from scratch and restarts the simulation at full
    /// energy. Pins do not survive.
    pub(in crate::app) fn relayout<R: Rng + ?Sized>(&mut self, surface: Surface, rng: &mut R) {
        let positions = initial_positions(self.nodes.len(), &surface, rng);
        for (node, position) in self.nodes.iter_mut().zip(positions) {
            node.position = position;
            node.velocity = Vec2::ZERO;
            node.pin = None;
        }
        self.surface = surface;
        self.alpha = 1.0;
        debug!(
            "laid out {} nodes on {:.0}x{:.0}",
            self.nodes.len(),
            surface.width(),
            surface.height()
        );
    }

    /// Active edges whose endpoints both resolved, as `(edge, source, target)`.
    pub(in crate::app) fn drawable_edges(&self) -> impl Iterator<Item = (&SimEdge, usize, usize)> {
        self.active_edges.iter().filter_map(|&index| {
            let edge = self.edges.get(index)?;
            let (source, target) = edge.endpoints?;
            Some((edge, source, target))
        })
    }

    /// Recounts node degrees over the active edge subset.
    pub(in crate::app) fn update_degrees(&mut self) {
        let mut degrees = std::mem::take(&mut self.scratch.degrees);
        degrees.clear();
        degrees.resize(self.nodes.len(), 0);

        for (_, source, target) in self.drawable_edges() {
            if let Some(degree) = degrees.get_mut(source) {
                *degree += 1;
            }
            if source != target
                && let Some(degree) = degrees.get_mut(target)
            {
                *degree += 1;
            }
        }

        self.scratch.degrees = degrees;
    }

    pub(in crate::app) fn degree(&self, index: usize) -> usize {
        self.scratch.degrees.get(index).copied().unwrap_or(0)
    }
}

impl ViewModel {
    /// Keeps the simulation laid out for the current drawing surface.
    pub(in crate::app) fn ensure_layout(&mut self, surface: Surface) {
        match self.sim.as_mut() {
            Some(graph) if graph.surface.same_size(&surface) => {}
            Some(graph) => {
                graph.relayout(surface, &mut self.rng);
                self.interaction.reset();
            }
            None => {
                self.sim = Some(SimGraph::build(
                    &self.snapshot,
                    surface,
                    self.selected_edge_type.as_ref(),
                    &mut self.rng,
                ));
                self.sim_revision = self.sim_revision.wrapping_add(1);
                self.search_match_cache = None;
                self.interaction.reset();
            }
        }
    }
}

#[cfg(test)]
pub(in crate::app) mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::graph::{EdgeDescriptor, NodeDescriptor};
    use crate::graph::snapshot_fixtures::{edge, node};

    pub(in crate::app) fn surface() -> Surface {
        Surface::new(800.0, 600.0, 20.0).unwrap()
    }

    pub(in crate::app) fn build_graph(
        nodes: Vec<NodeDescriptor>,
        edges: Vec<EdgeDescriptor>,
    ) -> SimGraph {
        let snapshot = GraphSnapshot { nodes, edges };
        SimGraph::build(&snapshot, surface(), None, &mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn resolves_edges_to_indices_and_keeps_dangling_ones() {
        let graph = build_graph(
            vec![node("a"), node("b"), node("c")],
            vec![
                edge("e1", "a", "c", "supports"),
                edge("e2", "b", "ghost", "supports"),
            ],
        );

        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].endpoints, Some((0, 2)));
        assert_eq!(graph.edges[1].endpoints, None);
        assert_eq!(graph.active_edges, vec![0, 1]);
        assert_eq!(graph.drawable_edges().count(), 1);
    }

    #[test]
    fn build_starts_hot_and_inside_bounds() {
        let graph = build_graph(vec![node("a"), node("b"), node("c"), node("d")], vec![]);
        assert_eq!(graph.alpha, 1.0);
        for sim_node in &graph.nodes {
            assert!(graph.surface.contains(sim_node.position));
            assert_eq!(sim_node.velocity, Vec2::ZERO);
            assert!(sim_node.pin.is_none());
        }
    }

    #[test]
    fn relayout_resets_alpha_pins_and_velocity() {
        let mut graph = build_graph(vec![node("a"), node("b")], vec![]);
        graph.alpha = 0.01;
        graph.nodes[0].pin = Some(Vec2::new(50.0, 50.0));
        graph.nodes[1].velocity = Vec2::new(3.0, 4.0);

        let smaller = Surface::new(400.0, 300.0, 20.0).unwrap();
        graph.relayout(smaller, &mut StdRng::seed_from_u64(9));

        assert_eq!(graph.alpha, 1.0);
        assert!(graph.nodes.iter().all(|node| node.pin.is_none()));
        assert!(graph.nodes.iter().all(|node| node.velocity == Vec2::ZERO));
        assert!(graph.nodes.iter().all(|node| smaller.contains(node.position)));
    }

    #[test]
    fn degrees_count_only_active_resolved_edges() {
        let mut graph = build_graph(
            vec![node("a"), node("b"), node("c")],
            vec![
                edge("e1", "a", "b", "supports"),
                edge("e2", "a", "c", "mentions"),
                edge("e3", "a", "nowhere", "supports"),
            ],
        );
        graph.update_degrees();
        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.degree(2), 1);

        graph.set_edge_filter(Some(&EdgeType::Supports));
        graph.update_degrees();
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.degree(2), 0);
    }
}
