use anyhow::Result;
use image::{GenericImageView, Rgba, RgbaImage};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_resize_logo_missing_asset_exits_with_one() -> Result<()> {
    let test_dir = TempDir::new()?;
    let images_dir = test_dir.path().join("images");
    let asset = test_dir.path().join("missing.png");

    let output = Command::new(env!("CARGO_BIN_EXE_resize-logo"))
        .arg("--asset")
        .arg(&asset)
        .arg("--images-dir")
        .arg(&images_dir)
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Asset not found"), "stdout was: {}", stdout);
    assert!(!images_dir.exists());

    Ok(())
}

#[test]
fn test_resize_logo_reports_each_file() -> Result<()> {
    let test_dir = TempDir::new()?;
    let images_dir = test_dir.path().join("images");
    let asset = test_dir.path().join("logo.png");
    RgbaImage::from_pixel(64, 48, Rgba([10, 20, 30, 255])).save(&asset)?;

    let output = Command::new(env!("CARGO_BIN_EXE_resize-logo"))
        .arg("--asset")
        .arg(&asset)
        .arg("--images-dir")
        .arg(&images_dir)
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Saved logo-menuslide-canada.png (original)"));
    assert!(stdout.contains("Saved icon-focus.png (290x218)"));
    assert!(stdout.contains("Saved icon-focus-fhd.png (540x405)"));
    assert!(stdout.contains("Saved icon-side.png (214x144)"));
    assert!(stdout.contains("Saved splash.png (1920x1080)"));
    assert_eq!(fs::read_dir(&images_dir)?.count(), 5);

    Ok(())
}

#[test]
fn test_create_splash_with_fallback_font() -> Result<()> {
    let test_dir = TempDir::new()?;

    let output = Command::new(env!("CARGO_BIN_EXE_create-splash"))
        .arg("--images-dir")
        .arg(test_dir.path())
        .arg("--font")
        .arg(test_dir.path().join("missing.ttf"))
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created:"), "stdout was: {}", stdout);

    let splash = image::open(test_dir.path().join("splash.png"))?;
    assert_eq!(splash.dimensions(), (1920, 1080));

    Ok(())
}

#[test]
fn test_help_explains_default_images_dir() -> Result<()> {
    for bin in [env!("CARGO_BIN_EXE_create-splash"), env!("CARGO_BIN_EXE_resize-logo")] {
        let output = Command::new(bin).arg("--help").output()?;

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("fixed at build time"), "help was: {}", stdout);
        assert!(stdout.contains(env!("CARGO_MANIFEST_DIR")), "help was: {}", stdout);
    }

    Ok(())
}
