// main.rs - Bootstrap: logging, arguments, eframe window

use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use life_viewer::app::LifeViewer;

#[derive(Parser)]
#[command(about = "Viewer/controller for a remote Game of Life service")]
struct Args {
    /// Base URL of the simulation service.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let viewer = LifeViewer::new(args.server)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Remote Game of Life",
        options,
        Box::new(move |_cc| Box::new(viewer)),
    )
    .map_err(|err| anyhow::anyhow!("eframe failed: {err}"))
}
