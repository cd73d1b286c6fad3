use ab_glyph::{FontVec, PxScale};
use anyhow::Context;
use embedded_graphics::{
    geometry::Point,
    mono_font::{ascii::FONT_10X20, MonoFont, MonoTextStyle},
    pixelcolor::{Rgb888, RgbColor},
    text::{renderer::TextRenderer, Baseline, Text},
    Drawable,
};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fs;
use std::path::Path;

use crate::canvas::{to_rgb888, ImageTarget};

/// Font used when the preferred font file can't be loaded.
pub const BUILTIN_FONT: &MonoFont<'static> = &FONT_10X20;

/// The fonts used for one run: either the preferred TrueType face at two
/// pixel sizes, or the built-in mono font for everything.
pub struct FontSet {
    preferred: Option<FontVec>,
    title_scale: PxScale,
    subtitle_scale: PxScale,
}

/// A font at a fixed size, ready to measure and draw labels.
#[derive(Clone, Copy)]
pub enum LabelFont<'a> {
    TrueType { font: &'a FontVec, scale: PxScale },
    Mono(&'static MonoFont<'static>),
}

impl FontSet {
    /// Load the preferred font from `path`, falling back to the built-in
    /// font if the file is missing or unreadable. Never fails.
    pub fn load(path: &Path, title_px: f32, subtitle_px: f32) -> Self {
        let preferred = match load_font_file(path) {
            Ok(font) => {
                log::debug!("Using font {}", path.display());
                Some(font)
            }
            Err(e) => {
                log::warn!("Falling back to built-in font: {:#}", e);
                None
            }
        };

        FontSet {
            preferred,
            title_scale: PxScale::from(title_px),
            subtitle_scale: PxScale::from(subtitle_px),
        }
    }

    /// A font set that only uses the built-in font.
    pub fn builtin() -> Self {
        FontSet {
            preferred: None,
            title_scale: PxScale::from(0.0),
            subtitle_scale: PxScale::from(0.0),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.preferred.is_none()
    }

    pub fn title(&self) -> LabelFont<'_> {
        self.at_scale(self.title_scale)
    }

    pub fn subtitle(&self) -> LabelFont<'_> {
        self.at_scale(self.subtitle_scale)
    }

    fn at_scale(&self, scale: PxScale) -> LabelFont<'_> {
        match &self.preferred {
            Some(font) => LabelFont::TrueType { font, scale },
            None => LabelFont::Mono(BUILTIN_FONT),
        }
    }
}

/// Reads a font file or collection (first face of a `.ttc`).
fn load_font_file(path: &Path) -> anyhow::Result<FontVec> {
    let data = fs::read(path)
        .with_context(|| format!("Failed to read font file {}", path.display()))?;
    FontVec::try_from_vec_and_index(data, 0)
        .with_context(|| format!("Failed to parse font file {}", path.display()))
}

impl LabelFont<'_> {
    /// Width and height of the rendered text's bounding box.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match *self {
            LabelFont::TrueType { font, scale } => text_size(scale, font, text),
            LabelFont::Mono(mono) => {
                let style = MonoTextStyle::new(mono, Rgb888::WHITE);
                let size = style
                    .measure_string(text, Point::zero(), Baseline::Top)
                    .bounding_box
                    .size;
                (size.width, size.height)
            }
        }
    }

    /// Draws `text` with its top-left corner at (`x`, `y`).
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match *self {
            LabelFont::TrueType { font, scale } => {
                draw_text_mut(canvas, color, x, y, scale, font, text);
            }
            LabelFont::Mono(mono) => {
                let style = MonoTextStyle::new(mono, to_rgb888(color));
                let mut target = ImageTarget::new(canvas);
                // Infallible target
                let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
                    .draw(&mut target);
            }
        }
    }
}

/// First TrueType font found in the usual system locations.
#[cfg(test)]
pub(crate) fn find_system_font() -> Option<std::path::PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
        "/System/Library/Fonts/Helvetica.ttc",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    CANDIDATES
        .iter()
        .map(Path::new)
        .find(|path| load_font_file(path).is_ok())
        .map(Path::to_path_buf)
}
