use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lupa_core::image_io::load_color_image;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file (PNG/JPEG/BMP)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = load_color_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let gray = image.luminance();
    let n = gray.data.len().max(1);
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut sum = 0.0f64;
    for &v in gray.data.iter() {
        min = min.min(v);
        max = max.max(v);
        sum += v as f64;
    }

    let bytes = std::fs::metadata(&args.file)?.len();

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", image.width(), image.height());
    println!("Channels:    3 (RGB)");
    println!("Mean level:  {:.3}", sum / n as f64);
    println!("Range:       [{:.3}, {:.3}]", min, max);
    println!("File size:   {:.1} KB", bytes as f64 / 1024.0);

    Ok(())
}
