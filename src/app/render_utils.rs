use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2};

use crate::graph::{EdgeType, KnowledgeType, NodeType};

const FALLBACK_COLOR: Color32 = Color32::from_rgb(148, 156, 168);

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));
}

pub(super) fn surface_to_screen(rect: Rect, position: Vec2) -> Pos2 {
    rect.min + position
}

pub(super) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(super) fn node_type_color(kind: &NodeType) -> Color32 {
    match kind {
        NodeType::Project => Color32::from_rgb(96, 165, 250),
        NodeType::Knowledge => Color32::from_rgb(167, 139, 250),
        NodeType::Person => Color32::from_rgb(52, 211, 153),
        NodeType::Organization => Color32::from_rgb(251, 191, 36),
        NodeType::Document => Color32::from_rgb(244, 114, 182),
        NodeType::Topic => Color32::from_rgb(45, 212, 191),
        NodeType::Other(_) => FALLBACK_COLOR,
    }
}

pub(super) fn knowledge_type_color(kind: &KnowledgeType) -> Color32 {
    match kind {
        KnowledgeType::Decision => Color32::from_rgb(239, 68, 68),
        KnowledgeType::Insight => Color32::from_rgb(250, 204, 21),
        KnowledgeType::Process => Color32::from_rgb(59, 130, 246),
        KnowledgeType::Meeting => Color32::from_rgb(16, 185, 129),
        KnowledgeType::Research => Color32::from_rgb(168, 85, 247),
        KnowledgeType::Principle => Color32::from_rgb(249, 115, 22),
        KnowledgeType::Other(_) => FALLBACK_COLOR,
    }
}

/// Knowledge type wins over the coarser node type when both are present.
pub(super) fn node_color(kind: &NodeType, knowledge: Option<&KnowledgeType>) -> Color32 {
    match knowledge {
        Some(knowledge) if !matches!(knowledge, KnowledgeType::Other(_)) => {
            knowledge_type_color(knowledge)
        }
        _ => node_type_color(kind),
    }
}

pub(super) fn edge_type_color(kind: &EdgeType) -> Color32 {
    match kind {
        EdgeType::RelatesTo => Color32::from_rgb(148, 163, 184),
        EdgeType::DependsOn => Color32::from_rgb(96, 165, 250),
        EdgeType::Supports => Color32::from_rgb(74, 222, 128),
        EdgeType::Contradicts => Color32::from_rgb(248, 113, 113),
        EdgeType::DerivedFrom => Color32::from_rgb(192, 132, 252),
        EdgeType::Mentions => Color32::from_rgb(253, 224, 71),
        EdgeType::PartOf => Color32::from_rgb(45, 212, 191),
        EdgeType::Other(_) => FALLBACK_COLOR,
    }
}

/// Stroke width and color for an edge; stronger edges are wider and more
/// opaque.
pub(super) fn edge_stroke(kind: &EdgeType, strength: f32) -> (f32, Color32) {
    let strength = strength.clamp(0.0, 1.0);
    let width = 0.6 + strength * 2.4;
    let alpha = (60.0 + strength * 160.0) as u8;
    (width, with_alpha(edge_type_color(kind), alpha))
}

pub(super) fn node_radius(degree: usize) -> f32 {
    (3.0 + degree as f32 * 0.8).clamp(3.0, 12.0)
}

/// Labels are reserved for hubs, the focused node and search hits.
pub(super) fn shows_label(degree: usize, focused: bool, is_match: bool, threshold: usize) -> bool {
    focused || is_match || degree >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_grows_with_degree_within_limits() {
        assert_eq!(node_radius(0), 3.0);
        assert!((node_radius(5) - 7.0).abs() < 1e-5);
        assert!((node_radius(11) - 11.8).abs() < 1e-5);
        assert_eq!(node_radius(40), 12.0);
    }

    #[test]
    fn stronger_edges_are_wider_and_more_opaque() {
        let (weak_width, weak_color) = edge_stroke(&EdgeType::Supports, 0.1);
        let (strong_width, strong_color) = edge_stroke(&EdgeType::Supports, 0.9);
        assert!(strong_width > weak_width);
        assert!(strong_color.a() > weak_color.a());
    }

    #[test]
    fn unknown_kinds_share_the_fallback_color() {
        assert_eq!(
            edge_type_color(&EdgeType::from("whatever")),
            node_type_color(&NodeType::from("other".to_owned()))
        );
        assert_eq!(
            node_color(
                &NodeType::Project,
                Some(&KnowledgeType::from("unknown".to_owned()))
            ),
            node_type_color(&NodeType::Project)
        );
        assert_eq!(
            node_color(&NodeType::Knowledge, Some(&KnowledgeType::Decision)),
            knowledge_type_color(&KnowledgeType::Decision)
        );
    }

    #[test]
    fn labels_start_at_the_degree_threshold() {
        assert!(!shows_label(5, false, false, 6));
        assert!(shows_label(6, false, false, 6));
        assert!(shows_label(0, true, false, 6));
        assert!(shows_label(0, false, true, 6));
    }
}
