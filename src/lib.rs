use anyhow::Context;
use std::fs;
use std::path::Path;

mod canvas;
pub mod fonts;
pub mod resizer_lib;
pub mod splash_lib;

pub use fonts::{FontSet, LabelFont};
pub use resizer_lib::{
    fit_scale, letterbox, resize_assets, resize_assets_with, scaled_dimensions, ResizeStatus,
    ResizerConfig, SavedAsset, SizeSpec, SIZES,
};
pub use splash_lib::{create_splash, render_splash, SplashConfig};

/// Where generated images go unless told otherwise: `images/` in this
/// crate's source tree. The absolute path is fixed when the binaries are built.
pub const DEFAULT_IMAGES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/images");

/// Preferred font for the splash text.
pub const DEFAULT_FONT_PATH: &str = "/System/Library/Fonts/Helvetica.ttc";

/// Create `dir` (and parents) if it doesn't exist yet.
pub fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    if !dir.exists() {
        log::debug!("Creating directory {}", dir.display());
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    Ok(())
}
