mod forces;

use eframe::egui::Vec2;

use crate::config::PhysicsConfig;
use crate::layout::Surface;

use super::{SimGraph, SimNode};
use forces::{apply_center_gravity, apply_repulsion, apply_springs};

/// Advances the layout by one tick and cools it.
///
/// Returns `true` when forces were applied. Once alpha has dropped below
/// `alpha_min` only integration runs, which keeps pins honored and lets
/// leftover velocity die out until something reheats the graph.
pub(super) fn step_physics(graph: &mut SimGraph, config: &PhysicsConfig) -> bool {
    let alpha = graph.alpha;
    let hot = alpha >= config.alpha_min;

    if hot {
        apply_repulsion(&mut graph.nodes, config.repulsion * alpha);
        apply_springs(
            &mut graph.nodes,
            &graph.edges,
            &graph.active_edges,
            config.spring * alpha,
            config.rest_length,
        );
        apply_center_gravity(
            &mut graph.nodes,
            graph.surface.center(),
            config.gravity * alpha,
        );
    }

    integrate(&mut graph.nodes, &graph.surface, config.damping);
    graph.alpha *= config.alpha_decay;
    hot
}

fn integrate(nodes: &mut [SimNode], surface: &Surface, damping: f32) {
    for node in nodes {
        if let Some(pin) = node.pin {
            node.position = pin;
            node.velocity = Vec2::ZERO;
            continue;
        }

        node.velocity *= damping;
        node.position = surface.clamp(node.position + node.velocity);
        debug_assert!(surface.contains(node.position));
    }
}

/// Snaps pinned nodes without running a step, for when live physics is
/// paused.
pub(super) fn enforce_pins(graph: &mut SimGraph) {
    for node in &mut graph.nodes {
        if let Some(pin) = node.pin {
            node.position = pin;
            node.velocity = Vec2::ZERO;
        }
    }
}

impl SimGraph {
    pub(in crate::app) fn reheat(&mut self, floor: f32) {
        if self.alpha < floor {
            self.alpha = floor;
        }
    }

    pub(in crate::app) fn is_cooled(&self, config: &PhysicsConfig) -> bool {
        self.alpha < config.alpha_min
    }
}
