// src/main.rs
use anyhow::Context;
use clap::Parser;
use eframe::egui;
use tracing::info;

use hand_hud::app::HandHudApp;
use hand_hud::args::Args;
use hand_hud::config::HudConfig;
use hand_hud::pipeline::FramePipeline;
use hand_hud::video::{list_cameras, CameraSource};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if args.list_cameras {
        let cameras = list_cameras().context("querying cameras")?;
        println!("Found {} camera(s):", cameras.len());
        for camera in cameras {
            println!("  [{}] {}", camera.index, camera.name);
        }
        return Ok(());
    }

    let mut config = HudConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(index) = args.camera {
        config.camera.index = index;
    }
    if let Some(model) = args.model {
        config.detector.model_path = Some(model);
    }
    config.detector.simulate |= args.simulate;
    config.show_skeleton |= args.skeleton;

    let camera = CameraSource::new(config.camera.index).context("opening camera")?;
    let pipeline = FramePipeline::from_config(&config);
    info!("Landmarks from: {}", pipeline.landmarker_name());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height]),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        &config.window.title,
        options,
        Box::new(move |cc| Box::new(HandHudApp::new(cc, Box::new(camera), pipeline))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))?;

    info!("Shut down");
    Ok(())
}
