// src/hud/text.rs - Glyph rasterization for HUD labels
use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::Point2;
use rusttype::{point, Font, Scale};
use tracing::{debug, info, warn};

/// Fonts tried when none is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

const GLYPH_COLUMNS: usize = 5;
const GLYPH_ROWS: usize = 7;

/// A coverage sample: pixel x, pixel y, coverage in [0, 1].
pub type Coverage = (i32, i32, f32);

pub enum Typeface {
    Outline(Font<'static>),
    /// Built-in 5x7 font, used when no TrueType font can be loaded.
    Bitmap,
}

impl Typeface {
    pub fn load(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            match Self::from_file(path) {
                Some(face) => return face,
                None => warn!("Could not load font {}, searching system fonts", path.display()),
            }
        }

        for candidate in SYSTEM_FONTS.iter().map(PathBuf::from) {
            if candidate.exists() {
                if let Some(face) = Self::from_file(&candidate) {
                    return face;
                }
            }
        }

        info!("No TrueType font found, HUD text uses the bitmap font");
        Typeface::Bitmap
    }

    fn from_file(path: &Path) -> Option<Self> {
        let data = fs::read(path).ok()?;
        let font = Font::try_from_vec(data)?;
        debug!("Loaded font from {}", path.display());
        Some(Typeface::Outline(font))
    }

    /// Coverage for `text` with its baseline starting at `origin`.
    pub fn rasterize(&self, text: &str, origin: Point2<f32>, pixel_height: f32) -> Vec<Coverage> {
        match self {
            Typeface::Outline(font) => rasterize_outline(font, text, origin, pixel_height),
            Typeface::Bitmap => rasterize_bitmap(text, origin, pixel_height),
        }
    }
}

fn rasterize_outline(font: &Font<'static>, text: &str, origin: Point2<f32>, pixel_height: f32) -> Vec<Coverage> {
    let scale = Scale::uniform(pixel_height);
    let mut coverage = Vec::new();

    for glyph in font.layout(text, scale, point(origin.x, origin.y)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                if v > 0.0 {
                    coverage.push((bb.min.x + gx as i32, bb.min.y + gy as i32, v));
                }
            });
        }
    }
    coverage
}

fn rasterize_bitmap(text: &str, origin: Point2<f32>, pixel_height: f32) -> Vec<Coverage> {
    // Glyph cells are 7 rows tall plus a blank row above.
    let block = ((pixel_height / (GLYPH_ROWS + 1) as f32).round() as i32).max(1);
    let advance = (GLYPH_COLUMNS as i32 + 1) * block;
    let top = origin.y as i32 - GLYPH_ROWS as i32 * block;

    let mut coverage = Vec::new();
    let mut pen_x = origin.x as i32;
    for c in text.chars() {
        let rows = glyph_rows(c);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_COLUMNS {
                if (bits >> (GLYPH_COLUMNS - 1 - col)) & 1 == 0 {
                    continue;
                }
                let x0 = pen_x + col as i32 * block;
                let y0 = top + row as i32 * block;
                for dy in 0..block {
                    for dx in 0..block {
                        coverage.push((x0 + dx, y0 + dy, 1.0));
                    }
                }
            }
        }
        pen_x += advance;
    }
    coverage
}

fn glyph_rows(c: char) -> [u8; GLYPH_ROWS] {
    match c.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '°' => [0b01100, 0b10010, 0b10010, 0b01100, 0b00000, 0b00000, 0b00000],
        ' ' => [0; GLYPH_ROWS],
        _ => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
    }
}
