use anyhow::Context;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, Rgba32FImage, RgbaImage};
use std::path::{Path, PathBuf};

use crate::ensure_dir;

/// One output of the resizer: a filename and either a target box or
/// `None` to keep the source size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    pub filename: &'static str,
    pub target: Option<(u32, u32)>,
}

pub const SIZES: &[SizeSpec] = &[
    SizeSpec {
        filename: "logo-menuslide-canada.png",
        target: None,
    },
    SizeSpec {
        filename: "icon-focus.png",
        target: Some((290, 218)),
    },
    SizeSpec {
        filename: "icon-focus-fhd.png",
        target: Some((540, 405)),
    },
    SizeSpec {
        filename: "icon-side.png",
        target: Some((214, 144)),
    },
    SizeSpec {
        filename: "splash.png",
        target: Some((1920, 1080)),
    },
];

pub const LETTERBOX_FILL: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub trait ResizerConfig {
    fn asset_path(&self) -> &Path;
    fn images_dir(&self) -> &Path;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedAsset {
    pub path: PathBuf,
    pub dimensions: (u32, u32),
}

#[derive(Debug)]
pub enum ResizeStatus {
    Completed(Vec<SavedAsset>),
    AssetNotFound(PathBuf),
}

impl ResizeStatus {
    pub fn exit_code(&self) -> u8 {
        match self {
            ResizeStatus::Completed(_) => 0,
            ResizeStatus::AssetNotFound(_) => 1,
        }
    }
}

/// Uniform scale that fits `src` entirely inside `target`.
pub fn fit_scale(src: (u32, u32), target: (u32, u32)) -> f64 {
    let scale_w = target.0 as f64 / src.0 as f64;
    let scale_h = target.1 as f64 / src.1 as f64;
    scale_w.min(scale_h)
}

/// Size of `src` after scaling by [`fit_scale`], truncated to whole pixels.
///
/// Computed in integers so the limiting axis lands exactly on the target
/// instead of one pixel short from float rounding.
pub fn scaled_dimensions(src: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = (src.0 as u64, src.1 as u64);
    let (tw, th) = (target.0 as u64, target.1 as u64);

    let (w, h) = if tw * sh <= th * sw {
        (tw, sh * tw / sw)
    } else {
        (sw * th / sh, th)
    };

    ((w as u32).max(1), (h as u32).max(1))
}

/// Scale `img` to fit `target` and center it on an opaque black canvas of
/// exactly that size. Transparent source pixels let the black show through.
pub fn letterbox(img: &RgbaImage, target: (u32, u32)) -> RgbaImage {
    let (new_w, new_h) = scaled_dimensions(img.dimensions(), target);
    log::debug!(
        "Scaling {}x{} by {:.4} to {}x{} inside {}x{}",
        img.width(),
        img.height(),
        fit_scale(img.dimensions(), target),
        new_w,
        new_h,
        target.0,
        target.1
    );

    // Filter premultiplied colour so hidden RGB under transparent pixels
    // can't bleed into the edges
    let resized = imageops::resize(&premultiply(img), new_w, new_h, FilterType::Lanczos3);

    let mut canvas = RgbaImage::from_pixel(target.0, target.1, LETTERBOX_FILL);
    let offset_x = (target.0 - new_w) / 2;
    let offset_y = (target.1 - new_h) / 2;

    // Over opaque black, a premultiplied colour is already the composited colour
    for (x, y, pixel) in resized.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        canvas.put_pixel(
            x + offset_x,
            y + offset_y,
            Rgba([unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), 255]),
        );
    }

    canvas
}

fn premultiply(img: &RgbaImage) -> Rgba32FImage {
    Rgba32FImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        let alpha = a as f32 / 255.0;
        Rgba([
            r as f32 / 255.0 * alpha,
            g as f32 / 255.0 * alpha,
            b as f32 / 255.0 * alpha,
            alpha,
        ])
    })
}

fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Produce every entry of [`SIZES`] from the configured asset.
pub fn resize_assets<T: ResizerConfig>(config: &T) -> anyhow::Result<ResizeStatus> {
    resize_assets_with(config, SIZES)
}

pub fn resize_assets_with<T: ResizerConfig>(
    config: &T,
    sizes: &[SizeSpec],
) -> anyhow::Result<ResizeStatus> {
    let asset_path = config.asset_path();
    if !asset_path.is_file() {
        println!("Asset not found: {}", asset_path.display());
        return Ok(ResizeStatus::AssetNotFound(asset_path.to_path_buf()));
    }

    let img = image::open(asset_path)
        .with_context(|| format!("Failed to load asset {}", asset_path.display()))?
        .to_rgba8();

    ensure_dir(config.images_dir())?;

    let mut saved = Vec::with_capacity(sizes.len());
    for spec in sizes {
        let output_path = config.images_dir().join(spec.filename);

        let dimensions = match spec.target {
            None => {
                save_png(&img, &output_path)?;
                println!("Saved {} (original)", spec.filename);
                img.dimensions()
            }
            Some(target) => {
                let boxed = letterbox(&img, target);
                save_png(&boxed, &output_path)?;
                println!("Saved {} ({}x{})", spec.filename, target.0, target.1);
                target
            }
        };

        saved.push(SavedAsset { path: output_path, dimensions });
    }

    Ok(ResizeStatus::Completed(saved))
}

fn save_png(img: &RgbaImage, output_path: &Path) -> anyhow::Result<()> {
    img.save_with_format(output_path, ImageFormat::Png)
        .with_context(|| format!("Failed to save {}", output_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_aspect_fills_target() {
        assert_eq!(scaled_dimensions((800, 600), (400, 300)), (400, 300));
        assert_eq!(fit_scale((800, 600), (400, 300)), 0.5);
    }

    #[test]
    fn test_width_limited_scale_truncates_height() {
        let scale = fit_scale((800, 600), (290, 218));
        assert!((scale - 0.3625).abs() < 1e-12);
        assert_eq!(scaled_dimensions((800, 600), (290, 218)), (290, 217));
    }

    #[test]
    fn test_height_limited_scale() {
        // Tall source into a wide box
        assert_eq!(scaled_dimensions((600, 1200), (1920, 1080)), (540, 1080));
    }

    #[test]
    fn test_upscales_small_sources() {
        assert_eq!(scaled_dimensions((100, 50), (540, 405)), (540, 270));
    }

    #[test]
    fn test_extreme_aspect_keeps_one_pixel() {
        assert_eq!(scaled_dimensions((10000, 1), (214, 144)), (214, 1));
    }

    #[test]
    fn test_letterbox_centers_with_black_bars() {
        let src = RgbaImage::from_pixel(100, 100, Rgba([255, 0, 0, 255]));
        let out = letterbox(&src, (300, 100));

        assert_eq!(out.dimensions(), (300, 100));
        assert_eq!(*out.get_pixel(0, 50), LETTERBOX_FILL);
        assert_eq!(*out.get_pixel(99, 50), LETTERBOX_FILL);
        assert_eq!(*out.get_pixel(299, 50), LETTERBOX_FILL);
        assert_eq!(*out.get_pixel(150, 50), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_letterbox_transparent_source_shows_black() {
        let src = RgbaImage::from_pixel(40, 20, Rgba([255, 255, 255, 0]));
        let out = letterbox(&src, (80, 80));

        assert!(out.pixels().all(|p| *p == LETTERBOX_FILL));
    }

    #[test]
    fn test_letterbox_is_fully_opaque() {
        // Green square on a transparent margin, upscaled onto the splash size
        let mut src = RgbaImage::from_pixel(400, 400, Rgba([255, 255, 255, 0]));
        for y in 150..250 {
            for x in 150..250 {
                src.put_pixel(x, y, Rgba([0, 255, 0, 255]));
            }
        }
        let out = letterbox(&src, (1920, 1080));

        assert!(out.pixels().all(|p| p[3] == 255));
        assert_eq!(*out.get_pixel(960, 540), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_hidden_colour_does_not_bleed() {
        // Black square on transparent white: nothing but black may come out
        let mut src = RgbaImage::from_pixel(400, 400, Rgba([255, 255, 255, 0]));
        for y in 100..300 {
            for x in 100..300 {
                src.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        let out = letterbox(&src, (214, 144));

        assert!(out.pixels().all(|p| *p == LETTERBOX_FILL));
    }

    #[test]
    fn test_edge_pixels_keep_source_hue() {
        let mut src = RgbaImage::from_pixel(400, 400, Rgba([255, 0, 255, 0]));
        for y in 150..250 {
            for x in 150..250 {
                src.put_pixel(x, y, Rgba([0, 255, 0, 255]));
            }
        }
        let out = letterbox(&src, (1920, 1080));

        // Magenta under the transparent margin must not tint the square's edges
        assert!(out.pixels().all(|p| p[0] == 0 && p[2] == 0));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ResizeStatus::Completed(Vec::new()).exit_code(), 0);
        assert_eq!(ResizeStatus::AssetNotFound(PathBuf::from("x.png")).exit_code(), 1);
    }
}
