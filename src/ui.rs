// src/ui.rs - Window widgets around the annotated video
use eframe::egui::{self, Color32, Pos2, Rect, Vec2};
use image::RgbImage;

use crate::gesture::{Gesture, GestureReading};
use crate::pipeline::PerformanceMetrics;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color32,
    pub surface: Color32,
    pub open: Color32,
    pub pinch: Color32,
    pub fist: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(20, 20, 25),
            surface: Color32::from_rgb(30, 30, 35),
            open: Color32::from_rgb(0, 255, 255),
            pinch: Color32::from_rgb(255, 180, 0),
            fist: Color32::from_rgb(244, 67, 54),
            text_primary: Color32::WHITE,
            text_secondary: Color32::from_rgb(200, 200, 200),
        }
    }
}

impl Theme {
    pub fn gesture_color(&self, gesture: Gesture) -> Color32 {
        match gesture {
            Gesture::Open => self.open,
            Gesture::Pinch => self.pinch,
            Gesture::Fist => self.fist,
        }
    }

    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.background;
        visuals.window_fill = self.surface;
        visuals.extreme_bg_color = self.background;
        visuals.override_text_color = Some(self.text_primary);
        visuals
    }
}

/// Displays the latest frame, letterboxed to the available space.
pub struct VideoWidget {
    texture: Option<egui::TextureHandle>,
    aspect_ratio: f32,
}

impl VideoWidget {
    pub fn new() -> Self {
        Self {
            texture: None,
            aspect_ratio: 4.0 / 3.0,
        }
    }

    pub fn update_frame(&mut self, ctx: &egui::Context, frame: &RgbImage) {
        let size = [frame.width() as usize, frame.height() as usize];
        let color_image = egui::ColorImage::from_rgb(size, frame.as_raw());
        if frame.height() > 0 {
            self.aspect_ratio = frame.width() as f32 / frame.height() as f32;
        }

        match &mut self.texture {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("video_frame", color_image, egui::TextureOptions::LINEAR));
            }
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let size = fit_to(available, self.aspect_ratio);
        let (outer, _response) = ui.allocate_exact_size(available, egui::Sense::hover());
        let rect = Rect::from_center_size(outer.center(), size);

        if let Some(texture) = &self.texture {
            ui.painter().image(
                texture.id(),
                rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        } else {
            ui.painter().rect_filled(rect, egui::Rounding::same(4.0), Color32::from_rgb(50, 50, 55));
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No Video Signal",
                egui::FontId::proportional(16.0),
                Color32::from_rgb(150, 150, 155),
            );
        }
    }
}

impl Default for VideoWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Largest size with the given aspect ratio that fits in `available`.
fn fit_to(available: Vec2, aspect_ratio: f32) -> Vec2 {
    if available.x <= 0.0 || available.y <= 0.0 || aspect_ratio <= 0.0 {
        return Vec2::ZERO;
    }
    if available.x / available.y > aspect_ratio {
        Vec2::new(available.y * aspect_ratio, available.y)
    } else {
        Vec2::new(available.x, available.x / aspect_ratio)
    }
}

pub fn status_bar(
    ui: &mut egui::Ui,
    theme: &Theme,
    readings: &[GestureReading],
    landmarker: &str,
    metrics: &PerformanceMetrics,
) {
    ui.horizontal(|ui| {
        if readings.is_empty() {
            ui.colored_label(theme.text_secondary, "No hand");
        }
        for (i, reading) in readings.iter().enumerate() {
            ui.colored_label(
                theme.gesture_color(reading.gesture),
                format!("Hand {}: {}", i + 1, reading.gesture.label()),
            );
            ui.label(format!("Pinch {}", reading.pinch));
            ui.separator();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.colored_label(
                theme.text_secondary,
                format!(
                    "{:.1} FPS ({:.1} ms)",
                    metrics.avg_fps,
                    metrics.avg_processing_time * 1000.0
                ),
            );
            ui.separator();
            ui.colored_label(theme.text_secondary, landmarker);
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_space_is_pillarboxed() {
        let size = fit_to(Vec2::new(1600.0, 600.0), 4.0 / 3.0);
        assert_eq!(size, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn tall_space_is_letterboxed() {
        let size = fit_to(Vec2::new(800.0, 1000.0), 2.0);
        assert_eq!(size, Vec2::new(800.0, 400.0));
    }

    #[test]
    fn empty_space_collapses() {
        assert_eq!(fit_to(Vec2::new(0.0, 500.0), 1.5), Vec2::ZERO);
    }
}
