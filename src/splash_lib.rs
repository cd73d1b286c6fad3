use anyhow::Context;
use embedded_graphics::{
    geometry::{Point, Size},
    primitives::{Primitive, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment},
    Drawable,
};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};

use crate::canvas::{to_rgb888, ImageTarget};
use crate::fonts::{FontSet, LabelFont};

pub const SPLASH_WIDTH: u32 = 1920;
pub const SPLASH_HEIGHT: u32 = 1080;
pub const SPLASH_FILENAME: &str = "splash.png";

pub const BACKGROUND: Rgb<u8> = Rgb([0x1a, 0x1a, 0x2e]);
pub const ACCENT: Rgb<u8> = Rgb([0x4f, 0x46, 0xe5]);
pub const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
pub const GRAY: Rgb<u8> = Rgb([0x94, 0xa3, 0xb8]);

// Logo frame, centered and lifted above the middle of the canvas
pub const FRAME_WIDTH: u32 = 420;
pub const FRAME_HEIGHT: u32 = 180;
pub const FRAME_LIFT: i32 = 80;
pub const FRAME_RADIUS: u32 = 12;
pub const FRAME_OUTLINE: u32 = 2;

pub const TITLE_PX: f32 = 56.0;
pub const SUBTITLE_PX: f32 = 32.0;

pub const TITLE: &str = "MenuSlide";
pub const SUBTITLE: &str = "Digital Signage";
pub const INSTRUCTION: &str = "Press OK";

const TITLE_RAISE: i32 = 10;
const SUBTITLE_MARGIN: i32 = 20;
const INSTRUCTION_FROM_BOTTOM: i32 = 120;

pub trait SplashConfig {
    fn images_dir(&self) -> &Path;
    fn font_path(&self) -> &Path;
}

/// Inclusive pixel bounds of the logo frame: `(x0, y0, x1, y1)`.
pub fn frame_bounds() -> (i32, i32, i32, i32) {
    let x0 = (SPLASH_WIDTH as i32 - FRAME_WIDTH as i32).div_euclid(2);
    let y0 = (SPLASH_HEIGHT as i32 - FRAME_HEIGHT as i32).div_euclid(2) - FRAME_LIFT;
    (x0, y0, x0 + FRAME_WIDTH as i32, y0 + FRAME_HEIGHT as i32)
}

/// Draw the splash screen onto a fresh canvas.
pub fn render_splash(fonts: &FontSet) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(SPLASH_WIDTH, SPLASH_HEIGHT, BACKGROUND);

    let (x0, y0, x1, y1) = frame_bounds();
    draw_rounded_rect_outline(&mut canvas, (x0, y0, x1, y1), FRAME_RADIUS, FRAME_OUTLINE, ACCENT);

    let frame_h = FRAME_HEIGHT as i32;

    let title = fonts.title();
    let (_, title_h) = title.measure(TITLE);
    let title_y = y0 + (frame_h - title_h as i32).div_euclid(2) - TITLE_RAISE;
    draw_centered(&mut canvas, title, WHITE, title_y, TITLE);

    let subtitle = fonts.subtitle();
    let (_, sub_h) = subtitle.measure(SUBTITLE);
    let sub_y = y0 + frame_h - sub_h as i32 - SUBTITLE_MARGIN;
    draw_centered(&mut canvas, subtitle, GRAY, sub_y, SUBTITLE);

    let inst_y = SPLASH_HEIGHT as i32 - INSTRUCTION_FROM_BOTTOM;
    draw_centered(&mut canvas, subtitle, GRAY, inst_y, INSTRUCTION);

    canvas
}

/// Horizontally center `text` on the canvas with its top at `y`.
fn draw_centered(canvas: &mut RgbImage, font: LabelFont<'_>, color: Rgb<u8>, y: i32, text: &str) {
    let (text_w, _) = font.measure(text);
    let x = (canvas.width() as i32 - text_w as i32).div_euclid(2);
    font.draw(canvas, color, x, y, text);
}

/// Outline a rounded rectangle with inclusive bounds; the outline grows inward.
pub fn draw_rounded_rect_outline(
    canvas: &mut RgbImage,
    bounds: (i32, i32, i32, i32),
    radius: u32,
    width: u32,
    color: Rgb<u8>,
) {
    let (x0, y0, x1, y1) = bounds;
    let area = Rectangle::new(
        Point::new(x0, y0),
        Size::new((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32),
    );
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(to_rgb888(color))
        .stroke_width(width)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();

    let mut target = ImageTarget::new(canvas);
    // Infallible target
    let _ = RoundedRectangle::with_equal_corners(area, Size::new(radius, radius))
        .into_styled(style)
        .draw(&mut target);
}

/// Render the splash and write it as PNG into the configured images directory.
pub fn create_splash<T: SplashConfig>(config: &T) -> anyhow::Result<PathBuf> {
    let fonts = FontSet::load(config.font_path(), TITLE_PX, SUBTITLE_PX);
    let canvas = render_splash(&fonts);

    let output_path = config.images_dir().join(SPLASH_FILENAME);
    save_png(&canvas, &output_path)?;

    println!("Created: {}", output_path.display());
    Ok(output_path)
}

fn save_png(canvas: &RgbImage, output_path: &Path) -> anyhow::Result<()> {
    canvas
        .save_with_format(output_path, ImageFormat::Png)
        .with_context(|| format!("Failed to save splash to {}", output_path.display()))
}
