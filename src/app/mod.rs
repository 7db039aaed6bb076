use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::PhysicsConfig;
use crate::graph::{EdgeDescriptor, EdgeType, GraphSnapshot, NodeDescriptor, load_snapshot};
use crate::layout::Surface;

mod filter;
mod graph;
mod physics;
mod render_utils;
mod ui;

use graph::InteractionController;

/// Everything the app needs from the command line.
pub struct LaunchOptions {
    pub graph_path: PathBuf,
    pub physics: PhysicsConfig,
    pub seed: Option<u64>,
}

pub struct KnowledgeAtlasApp {
    options: LaunchOptions,
    state: AppState,
    reload_rx: Option<Receiver<Result<GraphSnapshot, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<GraphSnapshot, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    snapshot: GraphSnapshot,
    physics: PhysicsConfig,
    rng: StdRng,
    selected_edge_type: Option<EdgeType>,
    edge_type_counts: Vec<(EdgeType, usize)>,
    search: String,
    live_physics: bool,
    sim: Option<SimGraph>,
    sim_revision: u64,
    interaction: InteractionController,
    search_match_cache: Option<SearchMatchCache>,
}

struct SearchMatchCache {
    query: String,
    sim_revision: u64,
    matches: Arc<HashSet<usize>>,
}

/// Live simulation state for one snapshot. Owned by exactly one view and
/// replaced wholesale on reload.
struct SimGraph {
    nodes: Vec<SimNode>,
    edges: Vec<SimEdge>,
    active_edges: Vec<usize>,
    alpha: f32,
    surface: Surface,
    scratch: FrameScratch,
}

struct SimNode {
    descriptor: NodeDescriptor,
    position: Vec2,
    velocity: Vec2,
    pin: Option<Vec2>,
}

struct SimEdge {
    descriptor: EdgeDescriptor,
    /// `None` when either endpoint id is missing from the node set.
    endpoints: Option<(usize, usize)>,
}

#[derive(Default)]
struct FrameScratch {
    degrees: Vec<usize>,
}

impl KnowledgeAtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: LaunchOptions) -> Self {
        let state = Self::start_load(options.graph_path.clone());
        Self {
            options,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(graph_path: PathBuf) -> Receiver<Result<GraphSnapshot, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_snapshot(&graph_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(graph_path: PathBuf) -> AppState {
        info!("loading graph snapshot from {}", graph_path.display());
        AppState::Loading {
            rx: Self::spawn_load(graph_path),
        }
    }

    fn ready_state(&self, snapshot: GraphSnapshot) -> AppState {
        let rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        AppState::Ready(Box::new(ViewModel::new(snapshot, self.options.physics, rng)))
    }

    fn failed_state(message: String) -> AppState {
        error!("graph snapshot unavailable: {message}");
        AppState::Error(message)
    }
}

impl eframe::App for KnowledgeAtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut retry = false;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(result);
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading knowledge graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the knowledge graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(
                    ctx,
                    &self.options.graph_path,
                    &mut reload_requested,
                    is_reloading,
                );

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.options.graph_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if retry {
            self.state = Self::start_load(self.options.graph_path.clone());
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            // Replacing the state drops the previous view and its simulation.
            self.state = match result {
                Ok(snapshot) => self.ready_state(snapshot),
                Err(message) => Self::failed_state(message),
            };
        }
    }
}
