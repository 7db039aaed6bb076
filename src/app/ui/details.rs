use eframe::egui::{Align2, Color32, FontId, Painter, Rect, Shape, Stroke, StrokeKind, vec2};

use crate::util::truncate_label;

use super::super::{SimGraph, ViewModel};

const MAX_REASONS: usize = 3;

impl ViewModel {
    /// Detail card for the hovered or dragged node, pinned to the top-left
    /// corner of the graph area.
    pub(in crate::app) fn draw_hover_details(
        painter: &Painter,
        rect: Rect,
        graph: &SimGraph,
        index: usize,
    ) {
        let Some(node) = graph.nodes.get(index) else {
            return;
        };
        let descriptor = &node.descriptor;

        let mut lines = vec![descriptor.display_label().to_owned()];
        let mut kind = format!("type: {}", descriptor.node_type.label());
        if let Some(knowledge) = &descriptor.knowledge_type {
            kind.push_str(&format!("  |  knowledge: {}", knowledge.label()));
        }
        lines.push(kind);
        if let Some(project) = &descriptor.project_code {
            lines.push(format!("project: {project}"));
        }
        lines.push(format!(
            "connections: {}  |  id: {}",
            graph.degree(index),
            descriptor.node_id
        ));

        let reasons = graph
            .drawable_edges()
            .filter(|(edge, source, target)| {
                (*source == index || *target == index) && !edge.descriptor.reasoning.is_empty()
            })
            .take(MAX_REASONS)
            .map(|(edge, _, _)| {
                format!(
                    "{} ({:.0}%): {}",
                    edge.descriptor.edge_type.label(),
                    edge.descriptor.confidence * 100.0,
                    truncate_label(&edge.descriptor.reasoning, 60)
                )
            })
            .collect::<Vec<_>>();
        lines.extend(reasons);

        // Reserve the slot under the text, then fill it once the text size
        // is known.
        let background = painter.add(Shape::Noop);
        let text_rect = painter.text(
            rect.left_top() + vec2(12.0, 12.0),
            Align2::LEFT_TOP,
            lines.join("\n"),
            FontId::proportional(13.0),
            Color32::from_gray(240),
        );
        painter.set(
            background,
            Shape::rect_filled(
                text_rect.expand(8.0),
                4.0,
                Color32::from_rgba_unmultiplied(12, 15, 20, 225),
            ),
        );
        painter.rect_stroke(
            text_rect.expand(8.0),
            4.0,
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(120, 130, 145, 160)),
            StrokeKind::Outside,
        );
    }
}
