use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use signage_assets_lib::{resize_assets, ResizerConfig, DEFAULT_IMAGES_DIR};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Resize the logo asset to icon and splash sizes",
    long_about = None
)]
struct Args {
    /// Source logo image
    #[arg(long, env("MENUSLIDE_LOGO_ASSET"))]
    asset: PathBuf,

    /// Directory to write the resized images into; the default is this crate's
    /// images/ dir, fixed at build time
    #[arg(long, env("SIGNAGE_IMAGES_DIR"), default_value = DEFAULT_IMAGES_DIR)]
    images_dir: PathBuf,
}

impl ResizerConfig for Args {
    fn asset_path(&self) -> &Path {
        &self.asset
    }

    fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}

fn main() -> Result<ExitCode> {
    // Load environment variables from .env file if present
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    log::debug!("Args: {:?}", args);

    let status = resize_assets(&args)?;

    Ok(ExitCode::from(status.exit_code()))
}
