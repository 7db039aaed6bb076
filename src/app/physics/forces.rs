use eframe::egui::{Vec2, vec2};

use super::super::{SimEdge, SimNode};

/// Distances below this count as this for force magnitudes.
const MIN_DISTANCE: f32 = 1.0;

fn repulsion_between(delta: Vec2, first: usize, second: usize, strength: f32) -> Vec2 {
    let distance = delta.length();
    let direction = if distance > 0.0001 {
        delta / distance
    } else {
        // Coincident nodes still need a direction to separate along.
        let angle = ((first as f32) * 0.618_034 + (second as f32) * 0.414_214)
            * std::f32::consts::TAU;
        vec2(angle.cos(), angle.sin())
    };

    let distance = distance.max(MIN_DISTANCE);
    direction * (strength / (distance * distance))
}

/// All-pairs inverse-square repulsion. Quadratic in the node count.
pub(super) fn apply_repulsion(nodes: &mut [SimNode], strength: f32) {
    if strength <= 0.0 {
        return;
    }

    let node_count = nodes.len();
    for first in 0..node_count {
        for second in (first + 1)..node_count {
            let delta = nodes[first].position - nodes[second].position;
            let push = repulsion_between(delta, first, second, strength);
            nodes[first].velocity += push;
            nodes[second].velocity -= push;
        }
    }
}

/// Hooke springs along the active edges, pulling endpoints toward
/// `rest_length` apart. Edge `strength` plays no part here.
pub(super) fn apply_springs(
    nodes: &mut [SimNode],
    edges: &[SimEdge],
    active_edges: &[usize],
    stiffness: f32,
    rest_length: f32,
) {
    let node_count = nodes.len();
    for &edge_index in active_edges {
        let Some((source, target)) = edges.get(edge_index).and_then(|edge| edge.endpoints) else {
            continue;
        };
        if source >= node_count || target >= node_count || source == target {
            continue;
        }

        let delta = nodes[target].position - nodes[source].position;
        let distance = delta.length();
        if distance <= 0.0001 {
            continue;
        }

        let pull = (delta / distance) * ((distance - rest_length) * stiffness);
        nodes[source].velocity += pull;
        nodes[target].velocity -= pull;
    }
}

pub(super) fn apply_center_gravity(nodes: &mut [SimNode], center: Vec2, strength: f32) {
    for node in nodes {
        node.velocity += (center - node.position) * strength;
    }
}
