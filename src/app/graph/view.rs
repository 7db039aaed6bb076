use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use log::debug;

use crate::layout::Surface;
use crate::util::truncate_label;

use super::super::physics::{enforce_pins, step_physics};
use super::super::render_utils::{
    draw_background, edge_stroke, node_color, node_radius, shows_label, surface_to_screen,
    with_alpha,
};
use super::super::{SearchMatchCache, ViewModel};

const HALO_SCALE: f32 = 2.2;

impl ViewModel {
    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.sim_revision == self.sim_revision
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let graph = self.sim.as_ref()?;
        let matcher = SkimMatcherV2::default();
        let matches = graph
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                matcher
                    .fuzzy_match(node.descriptor.display_label(), query)
                    .is_some()
            })
            .map(|(index, _)| index)
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            sim_revision: self.sim_revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    /// One frame: step the simulation once, then repaint everything.
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, _response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        let surface = match Surface::new(rect.width(), rect.height(), self.physics.padding) {
            Ok(surface) => surface,
            Err(error) => {
                debug!("skipping frame: {error}");
                return;
            }
        };

        self.ensure_layout(surface);
        self.handle_pointer(ui, rect);
        let search_matches = self.cached_search_matches();

        let physics = self.physics;
        let live_physics = self.live_physics;
        let focused = self.interaction.focused();
        let dragging = self.interaction.is_dragging();

        let Some(graph) = self.sim.as_mut() else {
            return;
        };

        if live_physics {
            step_physics(graph, &physics);
        } else {
            enforce_pins(graph);
        }

        // Once cooled, egui repaints on input only.
        if dragging || (live_physics && !graph.is_cooled(&physics)) {
            ui.ctx().request_repaint();
        }

        graph.update_degrees();

        for (edge, source, target) in graph.drawable_edges() {
            if source == target {
                continue;
            }
            let start = surface_to_screen(rect, graph.nodes[source].position);
            let end = surface_to_screen(rect, graph.nodes[target].position);
            let (width, color) = edge_stroke(&edge.descriptor.edge_type, edge.descriptor.strength);
            painter.line_segment([start, end], Stroke::new(width, color));
        }

        if let Some(index) = focused
            && let Some(node) = graph.nodes.get(index)
        {
            let color = node_color(
                &node.descriptor.node_type,
                node.descriptor.knowledge_type.as_ref(),
            );
            painter.circle_filled(
                surface_to_screen(rect, node.position),
                node_radius(graph.degree(index)) * HALO_SCALE + 4.0,
                with_alpha(color, 70),
            );
        }

        for (index, node) in graph.nodes.iter().enumerate() {
            let position = surface_to_screen(rect, node.position);
            let degree = graph.degree(index);
            let radius = node_radius(degree);
            let color = node_color(
                &node.descriptor.node_type,
                node.descriptor.knowledge_type.as_ref(),
            );

            painter.circle_filled(position, radius, color);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
            );

            let is_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));
            if is_match {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.6, Color32::from_rgb(103, 196, 255)),
                );
            }

            let is_focused = focused == Some(index);
            if shows_label(degree, is_focused, is_match, physics.label_degree_threshold) {
                painter.text(
                    position - vec2(0.0, radius + 4.0),
                    Align2::CENTER_BOTTOM,
                    truncate_label(node.descriptor.display_label(), physics.label_max_chars),
                    FontId::proportional(11.0),
                    Color32::from_gray(if is_focused { 255 } else { 220 }),
                );
            }
        }

        if let Some(index) = focused {
            Self::draw_hover_details(&painter, rect, graph, index);
        }

        if focused.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = if dragging {
                    egui::CursorIcon::Grabbing
                } else {
                    egui::CursorIcon::Grab
                };
            });
        }
    }
}
