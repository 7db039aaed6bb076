use eframe::egui::{Pos2, Rect, Ui, Vec2};
use log::debug;

use crate::config::PhysicsConfig;

use super::super::{SimGraph, SimNode, ViewModel};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::app) enum InteractionState {
    #[default]
    Idle,
    Hovering(usize),
    Dragging(usize),
}

/// Pointer state machine. Owns at most one user pin at a time.
pub(in crate::app) struct InteractionController {
    state: InteractionState,
    hit_radius: f32,
    reheat_alpha: f32,
}

/// Topmost node within `radius` of `pointer`. Nodes are drawn in index
/// order, so the search runs back to front.
pub(in crate::app) fn hit_test(nodes: &[SimNode], pointer: Vec2, radius: f32) -> Option<usize> {
    let radius_sq = radius * radius;
    nodes
        .iter()
        .enumerate()
        .rev()
        .find(|(_, node)| (node.position - pointer).length_sq() <= radius_sq)
        .map(|(index, _)| index)
}

impl InteractionController {
    pub(in crate::app) fn new(config: &PhysicsConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            hit_radius: config.hit_radius,
            reheat_alpha: config.reheat_alpha,
        }
    }

    #[cfg(test)]
    pub(in crate::app) fn state(&self) -> InteractionState {
        self.state
    }

    /// The node that gets the halo and the tooltip.
    pub(in crate::app) fn focused(&self) -> Option<usize> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Hovering(index) | InteractionState::Dragging(index) => Some(index),
        }
    }

    pub(in crate::app) fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    /// Forgets all pointer state. Used when the node set is replaced, so no
    /// pin needs clearing.
    pub(in crate::app) fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    pub(in crate::app) fn pointer_moved(&mut self, graph: &mut SimGraph, pointer: Vec2) {
        match self.state {
            InteractionState::Dragging(index) => {
                let Some(node) = graph.nodes.get_mut(index) else {
                    self.state = InteractionState::Idle;
                    return;
                };
                // A held pointer is reported every frame; only real motion reheats.
                let pin = graph.surface.clamp(pointer);
                if node.pin == Some(pin) {
                    return;
                }
                node.pin = Some(pin);
                graph.reheat(self.reheat_alpha);
            }
            InteractionState::Idle | InteractionState::Hovering(_) => {
                self.state = match hit_test(&graph.nodes, pointer, self.hit_radius) {
                    Some(index) => InteractionState::Hovering(index),
                    None => InteractionState::Idle,
                };
            }
        }
    }

    pub(in crate::app) fn pointer_pressed(&mut self, graph: &mut SimGraph, pointer: Vec2) {
        if self.is_dragging() {
            return;
        }

        let Some(index) = hit_test(&graph.nodes, pointer, self.hit_radius) else {
            return;
        };

        let node = &mut graph.nodes[index];
        node.pin = Some(node.position);
        graph.reheat(self.reheat_alpha);
        self.state = InteractionState::Dragging(index);
        debug!("drag start on node {}", graph.nodes[index].descriptor.id);
    }

    pub(in crate::app) fn pointer_released(&mut self, graph: &mut SimGraph) {
        self.end_drag(graph);
    }

    pub(in crate::app) fn pointer_left(&mut self, graph: &mut SimGraph) {
        self.end_drag(graph);
        self.state = InteractionState::Idle;
    }

    fn end_drag(&mut self, graph: &mut SimGraph) {
        let InteractionState::Dragging(index) = self.state else {
            return;
        };

        if let Some(node) = graph.nodes.get_mut(index) {
            node.pin = None;
            debug!("drag end on node {}", node.descriptor.id);
        }
        self.state = InteractionState::Idle;
    }
}

impl ViewModel {
    /// Feeds this frame's pointer input into the interaction controller.
    pub(in crate::app) fn handle_pointer(&mut self, ui: &Ui, rect: Rect) {
        let Some(graph) = self.sim.as_mut() else {
            return;
        };

        let (hover, pressed, released, primary_down) = ui.input(|input| {
            (
                input.pointer.hover_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.primary_down(),
            )
        });
        let local = |position: Pos2| position - rect.min;
        let inside = hover.filter(|position| rect.contains(*position));

        if self.interaction.is_dragging() && (released || !primary_down) {
            self.interaction.pointer_released(graph);
        }

        match inside {
            Some(position) => self.interaction.pointer_moved(graph, local(position)),
            None => self.interaction.pointer_left(graph),
        }

        if pressed && let Some(position) = inside {
            self.interaction.pointer_pressed(graph, local(position));
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::super::super::physics::step_physics;
    use super::super::tests::build_graph;
    use super::*;
    use crate::graph::snapshot_fixtures::node;

    fn controller() -> InteractionController {
        InteractionController::new(&PhysicsConfig::default())
    }

    fn graph_at(points: &[(f32, f32)]) -> SimGraph {
        let nodes = (0..points.len())
            .map(|index| node(&format!("n{index}")))
            .collect();
        let mut graph = build_graph(nodes, vec![]);
        for (sim_node, &(x, y)) in graph.nodes.iter_mut().zip(points) {
            sim_node.position = vec2(x, y);
        }
        graph
    }

    #[test]
    fn hit_test_prefers_the_topmost_node() {
        let graph = graph_at(&[(100.0, 100.0), (106.0, 100.0)]);
        assert_eq!(hit_test(&graph.nodes, vec2(103.0, 100.0), 12.0), Some(1));
        assert_eq!(hit_test(&graph.nodes, vec2(91.0, 100.0), 12.0), Some(0));
        assert_eq!(hit_test(&graph.nodes, vec2(300.0, 300.0), 12.0), None);
    }

    #[test]
    fn hovering_follows_the_pointer() {
        let mut graph = graph_at(&[(100.0, 100.0), (400.0, 300.0)]);
        let mut interaction = controller();

        interaction.pointer_moved(&mut graph, vec2(105.0, 104.0));
        assert_eq!(interaction.state(), InteractionState::Hovering(0));
        interaction.pointer_moved(&mut graph, vec2(398.0, 300.0));
        assert_eq!(interaction.state(), InteractionState::Hovering(1));
        interaction.pointer_moved(&mut graph, vec2(250.0, 200.0));
        assert_eq!(interaction.state(), InteractionState::Idle);
        assert_eq!(interaction.focused(), None);
    }

    #[test]
    fn pressing_empty_space_does_nothing() {
        let mut graph = graph_at(&[(100.0, 100.0)]);
        graph.alpha = 0.01;
        let mut interaction = controller();

        interaction.pointer_pressed(&mut graph, vec2(500.0, 500.0));
        assert_eq!(interaction.state(), InteractionState::Idle);
        assert!(graph.nodes[0].pin.is_none());
        assert_eq!(graph.alpha, 0.01);
    }

    #[test]
    fn press_pins_in_place_and_reheats() {
        let mut graph = graph_at(&[(100.0, 100.0)]);
        graph.alpha = 0.01;
        let mut interaction = controller();

        interaction.pointer_pressed(&mut graph, vec2(108.0, 100.0));
        assert_eq!(interaction.state(), InteractionState::Dragging(0));
        assert_eq!(graph.nodes[0].pin, Some(vec2(100.0, 100.0)));
        assert_eq!(graph.alpha, 0.3);
    }

    #[test]
    fn moving_a_dragged_node_reheats() {
        let mut graph = graph_at(&[(100.0, 100.0)]);
        let mut interaction = controller();

        interaction.pointer_pressed(&mut graph, vec2(100.0, 100.0));
        graph.alpha = 0.01;
        interaction.pointer_moved(&mut graph, vec2(140.0, 120.0));
        assert_eq!(graph.nodes[0].pin, Some(vec2(140.0, 120.0)));
        assert_eq!(graph.alpha, 0.3);
    }

    #[test]
    fn holding_a_drag_still_lets_the_layout_cool() {
        let config = PhysicsConfig::default();
        let mut graph = graph_at(&[(50.0, 50.0), (400.0, 300.0)]);
        let mut interaction = InteractionController::new(&config);

        interaction.pointer_pressed(&mut graph, vec2(50.0, 50.0));
        interaction.pointer_moved(&mut graph, vec2(90.0, 70.0));
        let mut previous = graph.alpha;
        for _ in 0..1_000 {
            interaction.pointer_moved(&mut graph, vec2(90.0, 70.0));
            step_physics(&mut graph, &config);
            assert!(graph.alpha < previous);
            previous = graph.alpha;
        }

        assert!(interaction.is_dragging());
        assert!(graph.alpha < 0.3 * 0.1);
        assert_eq!(graph.nodes[0].position, vec2(90.0, 70.0));
    }

    #[test]
    fn focus_tracks_the_hovered_or_dragged_node() {
        let mut graph = graph_at(&[(100.0, 100.0), (400.0, 300.0)]);
        let mut interaction = controller();

        interaction.pointer_moved(&mut graph, vec2(400.0, 300.0));
        assert_eq!(interaction.focused(), Some(1));
        interaction.pointer_pressed(&mut graph, vec2(400.0, 300.0));
        interaction.pointer_moved(&mut graph, vec2(120.0, 100.0));
        assert_eq!(interaction.focused(), Some(1));
        interaction.pointer_released(&mut graph);
        assert_eq!(interaction.focused(), None);
    }

    #[test]
    fn drag_pin_is_clamped_into_bounds() {
        let mut graph = graph_at(&[(100.0, 100.0)]);
        let mut interaction = controller();

        interaction.pointer_pressed(&mut graph, vec2(100.0, 100.0));
        interaction.pointer_moved(&mut graph, vec2(-50.0, 900.0));
        assert_eq!(graph.nodes[0].pin, Some(vec2(20.0, 580.0)));
    }

    #[test]
    fn leaving_the_surface_ends_the_drag() {
        let mut graph = graph_at(&[(100.0, 100.0)]);
        let mut interaction = controller();

        interaction.pointer_pressed(&mut graph, vec2(100.0, 100.0));
        interaction.pointer_left(&mut graph);
        assert_eq!(interaction.state(), InteractionState::Idle);
        assert!(graph.nodes[0].pin.is_none());
    }

    #[test]
    fn drag_scenario_pins_then_releases() {
        let config = PhysicsConfig::default();
        let mut graph = graph_at(&[(50.0, 50.0), (400.0, 300.0), (600.0, 450.0)]);
        let mut interaction = InteractionController::new(&config);

        interaction.pointer_moved(&mut graph, vec2(50.0, 50.0));
        interaction.pointer_pressed(&mut graph, vec2(50.0, 50.0));
        assert!(interaction.is_dragging());

        for step in 1..=10 {
            let t = step as f32 / 10.0;
            let pointer = vec2(50.0 + 70.0 * t, 50.0 + 30.0 * t);
            interaction.pointer_moved(&mut graph, pointer);
            step_physics(&mut graph, &config);
            assert_eq!(graph.nodes[0].position, pointer);
        }

        for _ in 0..5 {
            step_physics(&mut graph, &config);
            assert_eq!(graph.nodes[0].position, vec2(120.0, 80.0));
            assert_eq!(graph.nodes[0].velocity, Vec2::ZERO);
        }

        interaction.pointer_released(&mut graph);
        assert_eq!(interaction.state(), InteractionState::Idle);
        assert!(graph.nodes[0].pin.is_none());

        step_physics(&mut graph, &config);
        assert_ne!(graph.nodes[0].position, vec2(120.0, 80.0));
    }
}
