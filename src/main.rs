mod app;
mod config;
mod graph;
mod layout;
mod util;

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use config::{PhysicsConfig, load_physics_config};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph snapshot JSON with `nodes` and `edges`.
    #[arg(long, default_value = "graph.json")]
    graph: PathBuf,

    /// Optional JSON file overriding simulation constants.
    #[arg(long)]
    physics: Option<PathBuf>,

    /// Seed for the initial layout jitter.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 820.0)]
    height: f32,
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let physics = match &args.physics {
        Some(path) => load_physics_config(path).unwrap_or_else(|error| {
            warn!("{error:#}; using default physics");
            PhysicsConfig::default()
        }),
        None => PhysicsConfig::default(),
    };
    info!("starting with {physics:?}");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width.max(320.0), args.height.max(240.0)]),
        ..Default::default()
    };

    let launch = app::LaunchOptions {
        graph_path: args.graph,
        physics,
        seed: args.seed,
    };

    eframe::run_native(
        "Knowledge Atlas",
        options,
        Box::new(move |cc| Ok(Box::new(app::KnowledgeAtlasApp::new(cc, launch)))),
    )
}
