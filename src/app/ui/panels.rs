use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};
use rand::rngs::StdRng;

use crate::config::PhysicsConfig;
use crate::graph::GraphSnapshot;

use super::super::filter::edge_type_counts;
use super::super::graph::InteractionController;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(snapshot: GraphSnapshot, physics: PhysicsConfig, rng: StdRng) -> Self {
        let edge_type_counts =
            edge_type_counts(snapshot.edges.iter().map(|edge| &edge.edge_type));

        Self {
            interaction: InteractionController::new(&physics),
            snapshot,
            physics,
            rng,
            selected_edge_type: None,
            edge_type_counts,
            search: String::new(),
            live_physics: true,
            sim: None,
            sim_revision: 0,
            search_match_cache: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        graph_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Knowledge Atlas");
                    ui.separator();
                    ui.label(format!("source: {}", graph_path.display()));
                    ui.label(format!("nodes: {}", self.snapshot.node_count()));
                    ui.label(format!("edges: {}", self.snapshot.edge_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload graph"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(status) = self.simulation_status_text() {
                            ui.label(status);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }

    fn simulation_status_text(&self) -> Option<String> {
        self.sim.as_ref().map(|graph| {
            let state = if !self.live_physics {
                "paused"
            } else if graph.is_cooled(&self.physics) {
                "settled"
            } else {
                "running"
            };
            format!(
                "active edges: {}  |  alpha {:.3} ({state})",
                graph.active_edges.len(),
                graph.alpha
            )
        })
    }
}
