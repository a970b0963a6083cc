// src/hud/canvas.rs - Drawing surface the HUD paints through
use image::RgbImage;
use nalgebra::Point2;
use resvg::tiny_skia::{
    FillRule, IntSize, LineCap, Paint, Path, PathBuilder, Pixmap, Stroke, Transform,
};

use crate::config::Color;
use crate::error::{HudError, Result};
use crate::hud::text::Typeface;

/// Colour plus opacity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ink {
    pub color: Color,
    pub alpha: f32,
}

impl Ink {
    pub fn solid(color: Color) -> Self {
        Self { color, alpha: 1.0 }
    }

    pub fn translucent(color: Color, alpha: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(
            self.color.r,
            self.color.g,
            self.color.b,
            (self.alpha * 255.0).round() as u8,
        );
        paint.anti_alias = true;
        paint
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub ink: Ink,
    pub thickness: f32,
}

impl Line {
    pub fn new(color: Color, thickness: f32) -> Self {
        Self {
            ink: Ink::solid(color),
            thickness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// Multiple of the base 30px glyph height.
    pub scale: f32,
    pub thickness: u32,
}

/// Anything the HUD routines can draw on. Coordinates are frame pixels with
/// y pointing down; angles are degrees, clockwise from +x.
pub trait Canvas {
    fn stroke_circle(&mut self, center: Point2<f32>, radius: f32, line: Line);
    fn fill_circle(&mut self, center: Point2<f32>, radius: f32, ink: Ink);
    fn line(&mut self, from: Point2<f32>, to: Point2<f32>, line: Line);
    fn stroke_rect(&mut self, min: Point2<f32>, max: Point2<f32>, line: Line);
    fn stroke_arc(&mut self, center: Point2<f32>, radius: f32, start_deg: f32, end_deg: f32, line: Line);
    /// `origin` is the left end of the baseline.
    fn text(&mut self, text: &str, origin: Point2<f32>, style: TextStyle);
}

/// A video frame being annotated in place.
pub struct Frame<'a> {
    pixmap: Pixmap,
    typeface: &'a Typeface,
}

impl<'a> Frame<'a> {
    pub fn from_rgb(image: &RgbImage, typeface: &'a Typeface) -> Result<Self> {
        let (width, height) = image.dimensions();
        let size = IntSize::from_wh(width, height).ok_or(HudError::FrameAlloc { width, height })?;

        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for chunk in image.as_raw().chunks_exact(3) {
            rgba.extend_from_slice(&[chunk[0], chunk[1], chunk[2], 255]);
        }

        let pixmap = Pixmap::from_vec(rgba, size).ok_or(HudError::FrameAlloc { width, height })?;
        Ok(Self { pixmap, typeface })
    }

    /// Frames stay opaque, so premultiplied and straight RGB coincide.
    pub fn into_rgb(self) -> RgbImage {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        for chunk in self.pixmap.data().chunks_exact(4) {
            rgb.extend_from_slice(&chunk[..3]);
        }
        RgbImage::from_raw(width, height, rgb).unwrap_or_else(|| RgbImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn stroke(&mut self, path: &Path, line: Line) {
        let stroke = Stroke {
            width: line.thickness.max(1.0),
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &line.ink.paint(), &stroke, Transform::identity(), None);
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let idx = ((y as u32 * self.width() + x as u32) * 4) as usize;
        let a = coverage.clamp(0.0, 1.0);
        let data = self.pixmap.data_mut();
        for (channel, value) in [color.r, color.g, color.b].into_iter().enumerate() {
            let dst = data[idx + channel] as f32;
            data[idx + channel] = (value as f32 * a + dst * (1.0 - a)).round() as u8;
        }
    }
}

/// Points along a circular arc; the step count follows the sweep length.
pub fn arc_points(center: Point2<f32>, radius: f32, start_deg: f32, end_deg: f32) -> Vec<Point2<f32>> {
    let sweep = (end_deg - start_deg).to_radians();
    let points_count = ((sweep.abs() * 50.0) as usize).max(1);

    (0..=points_count)
        .map(|i| {
            let t = i as f32 / points_count as f32;
            let angle = start_deg.to_radians() + sweep * t;
            Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

impl Canvas for Frame<'_> {
    fn stroke_circle(&mut self, center: Point2<f32>, radius: f32, line: Line) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius.max(0.5)) {
            self.stroke(&path, line);
        }
    }

    fn fill_circle(&mut self, center: Point2<f32>, radius: f32, ink: Ink) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius.max(0.5)) {
            self.pixmap
                .fill_path(&path, &ink.paint(), FillRule::Winding, Transform::identity(), None);
        }
    }

    fn line(&mut self, from: Point2<f32>, to: Point2<f32>, line: Line) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        if let Some(path) = pb.finish() {
            self.stroke(&path, line);
        }
    }

    fn stroke_rect(&mut self, min: Point2<f32>, max: Point2<f32>, line: Line) {
        let mut pb = PathBuilder::new();
        pb.move_to(min.x, min.y);
        pb.line_to(max.x, min.y);
        pb.line_to(max.x, max.y);
        pb.line_to(min.x, max.y);
        pb.close();
        if let Some(path) = pb.finish() {
            self.stroke(&path, line);
        }
    }

    fn stroke_arc(&mut self, center: Point2<f32>, radius: f32, start_deg: f32, end_deg: f32, line: Line) {
        let points = arc_points(center, radius, start_deg, end_deg);
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            pb.line_to(p.x, p.y);
        }
        if let Some(path) = pb.finish() {
            self.stroke(&path, line);
        }
    }

    fn text(&mut self, text: &str, origin: Point2<f32>, style: TextStyle) {
        let coverage = self.typeface.rasterize(text, origin, style.scale * 30.0);
        // Bolder text is stamped again one pixel to the right per step.
        let passes = style.thickness.max(1).div_ceil(2) as i32;
        for (x, y, v) in coverage {
            for dx in 0..passes {
                self.blend_pixel(x + dx, y, style.color, v);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const RED: Color = Color::rgb(255, 0, 0);

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([10, 20, 30]))
    }

    #[test]
    fn untouched_frame_converts_back_unchanged() {
        let typeface = Typeface::Bitmap;
        let mut image = blank(8, 6);
        image.put_pixel(3, 2, Rgb([200, 100, 50]));

        let frame = Frame::from_rgb(&image, &typeface).unwrap();
        assert_eq!(frame.into_rgb(), image);
    }

    #[test]
    fn filled_circle_paints_its_center() {
        let typeface = Typeface::Bitmap;
        let mut frame = Frame::from_rgb(&blank(64, 64), &typeface).unwrap();
        frame.fill_circle(Point2::new(32.0, 32.0), 10.0, Ink::solid(RED));

        let out = frame.into_rgb();
        let center = out.get_pixel(32, 32);
        assert!(center[0] >= 250 && center[1] <= 5, "center is {:?}", center);
        assert_eq!(out.get_pixel(2, 2), &Rgb([10, 20, 30]));
    }

    #[test]
    fn translucent_ink_blends_with_the_frame() {
        let typeface = Typeface::Bitmap;
        let mut frame = Frame::from_rgb(&blank(64, 64), &typeface).unwrap();
        frame.fill_circle(Point2::new(32.0, 32.0), 10.0, Ink::translucent(RED, 0.2));

        let px = *frame.into_rgb().get_pixel(32, 32);
        assert!(px[0] > 10 && px[0] < 255, "red channel {} not blended", px[0]);
        assert!(px[2] < 30);
    }

    #[test]
    fn drawing_off_frame_is_clipped() {
        let typeface = Typeface::Bitmap;
        let mut frame = Frame::from_rgb(&blank(16, 16), &typeface).unwrap();
        frame.stroke_circle(Point2::new(-100.0, -100.0), 20.0, Line::new(RED, 3.0));
        frame.line(Point2::new(-50.0, 8.0), Point2::new(500.0, 8.0), Line::new(RED, 2.0));
        frame.text(
            "FIST",
            Point2::new(-5.0, 400.0),
            TextStyle { color: RED, scale: 1.0, thickness: 3 },
        );

        let out = frame.into_rgb();
        assert!(out.get_pixel(8, 8)[0] >= 250);
        assert_eq!(out.get_pixel(8, 2), &Rgb([10, 20, 30]));
    }

    #[test]
    fn arc_points_span_the_sweep() {
        let points = arc_points(Point2::new(0.0, 0.0), 10.0, 180.0, 270.0);
        let first = points.first().unwrap();
        let last = points.last().unwrap();
        assert!((first.x + 10.0).abs() < 1e-4 && first.y.abs() < 1e-4);
        assert!(last.x.abs() < 1e-4 && (last.y + 10.0).abs() < 1e-4);
        assert!(points.len() > 2);

        // A zero sweep still yields a drawable segment.
        assert_eq!(arc_points(Point2::new(0.0, 0.0), 5.0, 30.0, 30.0).len(), 2);
    }
}
