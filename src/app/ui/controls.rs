use eframe::egui::{self, Color32, RichText, Sense, Ui, vec2};
use log::info;

use crate::graph::{EdgeType, KnowledgeType, NodeType};

use super::super::ViewModel;
use super::super::render_utils::{edge_type_color, knowledge_type_color, node_type_color};

fn legend_row(ui: &mut Ui, color: Color32, label: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
        ui.painter().circle_filled(rect.center(), 5.0, color);
        ui.label(label);
    });
}

impl ViewModel {
    fn edge_type_count(&self, kind: &EdgeType) -> usize {
        self.edge_type_counts
            .iter()
            .find(|(candidate, _)| candidate == kind)
            .map_or(0, |(_, count)| *count)
    }

    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search labels")
            .on_hover_text("Outline and label nodes whose label fuzzy-matches the query.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();
        self.draw_edge_filter(ui);

        ui.separator();
        self.draw_physics_controls(ui);

        ui.separator();
        egui::ScrollArea::vertical()
            .id_salt("legend_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| self.draw_legend(ui));
    }

    fn draw_edge_filter(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Edge type").strong());

        let total = self.snapshot.edge_count();
        let mut selection = self.selected_edge_type.clone();
        let selected_text = match &selection {
            None => format!("All ({total})"),
            Some(kind) => format!("{} ({})", kind.label(), self.edge_type_count(kind)),
        };

        egui::ComboBox::from_id_salt("edge_type_filter")
            .selected_text(selected_text)
            .width(220.0)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selection, None, format!("All ({total})"));
                for (kind, count) in &self.edge_type_counts {
                    ui.selectable_value(
                        &mut selection,
                        Some(kind.clone()),
                        format!("{} ({count})", kind.label()),
                    );
                }
            });

        if selection != self.selected_edge_type {
            self.set_edge_filter(selection);
        }

        if self.selected_edge_type.is_some() && !self.physics.reheat_on_filter_change {
            ui.small("Filter changes keep the current layout energy.");
        }
    }

    fn draw_physics_controls(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Simulation").strong());
        ui.checkbox(&mut self.live_physics, "Live physics")
            .on_hover_text("Pause to freeze the layout; dragging still moves nodes.");

        ui.horizontal(|ui| {
            let Some(graph) = self.sim.as_mut() else {
                ui.label("Waiting for layout...");
                return;
            };

            if ui
                .button("Reheat")
                .on_hover_text("Give the layout enough energy to move again.")
                .clicked()
            {
                graph.reheat(self.physics.reheat_alpha);
                info!("manual reheat to alpha {:.3}", graph.alpha);
            }

            if ui
                .button("Restart layout")
                .on_hover_text("Scatter nodes on the starting ring and run from full energy.")
                .clicked()
            {
                let surface = graph.surface;
                graph.relayout(surface, &mut self.rng);
                self.interaction.reset();
            }
        });
    }

    fn draw_legend(&self, ui: &mut Ui) {
        ui.label(RichText::new("Node types").strong());
        for kind in &NodeType::KNOWN {
            legend_row(ui, node_type_color(kind), kind.label());
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Knowledge types").strong());
        for kind in &KnowledgeType::KNOWN {
            legend_row(ui, knowledge_type_color(kind), kind.label());
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Edge types").strong());
        if self.edge_type_counts.is_empty() {
            ui.label("No edges in this graph.");
        }
        for (kind, count) in &self.edge_type_counts {
            let label = format!("{} ({count})", kind.label());
            legend_row(ui, edge_type_color(kind), &label);
        }
    }
}
