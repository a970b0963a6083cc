// src/app.rs
use eframe::egui;
use tracing::{error, info};

use crate::gesture::GestureReading;
use crate::pipeline::FramePipeline;
use crate::ui::{self, Theme, VideoWidget};
use crate::video::FrameSource;

pub struct HandHudApp {
    source: Option<Box<dyn FrameSource>>,
    pipeline: FramePipeline,
    video: VideoWidget,
    theme: Theme,
    readings: Vec<GestureReading>,
}

impl HandHudApp {
    pub fn new(cc: &eframe::CreationContext<'_>, source: Box<dyn FrameSource>, pipeline: FramePipeline) -> Self {
        let app = Self::with_source(source, pipeline);
        cc.egui_ctx.set_visuals(app.theme.visuals());
        app
    }

    pub fn with_source(source: Box<dyn FrameSource>, pipeline: FramePipeline) -> Self {
        Self {
            source: Some(source),
            pipeline,
            video: VideoWidget::new(),
            theme: Theme::default(),
            readings: Vec::new(),
        }
    }

    /// Captures and annotates one frame. A failed capture drops the source
    /// for good; returns false once it is gone.
    fn step(&mut self, ctx: &egui::Context) -> bool {
        let Some(source) = self.source.as_mut() else {
            return false;
        };

        let frame = match source.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                error!("Stopping: {e}");
                self.source = None;
                return false;
            }
        };

        match self.pipeline.process(&frame) {
            Ok(annotated) => {
                self.video.update_frame(ctx, &annotated.image);
                self.readings = annotated.readings;
            }
            Err(e) => error!("Failed to annotate frame: {e}"),
        }
        true
    }

    fn draw(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui::status_bar(
                ui,
                &self.theme,
                &self.readings,
                self.pipeline.landmarker_name(),
                self.pipeline.metrics(),
            );
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.video.show(ui);
        });
    }

    /// Keeps the loop going while frames arrive and Escape is up. Otherwise
    /// the source is dropped, which releases the device, and the window closes.
    fn finish(&mut self, ctx: &egui::Context, capturing: bool, escape: bool) -> bool {
        if escape {
            info!("Escape pressed, exiting");
        }
        if capturing && !escape {
            ctx.request_repaint();
            return true;
        }

        self.source = None;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        false
    }
}

impl eframe::App for HandHudApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let capturing = self.step(ctx);
        self.draw(ctx);
        let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        self.finish(ctx, capturing, escape);
    }
}
