use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use signage_assets_lib::{create_splash, SplashConfig, DEFAULT_FONT_PATH, DEFAULT_IMAGES_DIR};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Draw the 1920x1080 splash screen", long_about = None)]
struct Args {
    /// Directory to write splash.png into; the default is this crate's images/ dir,
    /// fixed at build time
    #[arg(long, env("SIGNAGE_IMAGES_DIR"), default_value = DEFAULT_IMAGES_DIR)]
    images_dir: PathBuf,

    /// Font for the title and subtitle; the built-in font is used if it can't be loaded
    #[arg(long, env("SPLASH_FONT"), default_value = DEFAULT_FONT_PATH)]
    font: PathBuf,
}

impl SplashConfig for Args {
    fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    fn font_path(&self) -> &Path {
        &self.font
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    log::debug!("Args: {:?}", args);

    create_splash(&args)?;

    Ok(())
}
