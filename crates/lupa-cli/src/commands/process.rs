use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lupa_core::analyze::{analyze, DEFAULT_PEAK_MIN_DISTANCE};
use lupa_core::geometry::SourceRect;
use lupa_core::image_io::{load_color_image, save_color_png};
use lupa_core::params::{FilterKind, ProcessingParams, ThresholdPolarity};
use lupa_core::pipeline::{apply_global, apply_local, zoomed_base};

use crate::summary;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input image file (PNG/JPEG/BMP)
    pub file: PathBuf,

    /// TOML preset with processing parameters; flags override it
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Brightness offset (-1.0 to 1.0)
    #[arg(long)]
    pub brightness: Option<f32>,

    /// Contrast factor (1.0 = no change)
    #[arg(long)]
    pub contrast: Option<f32>,

    /// Apply grayscale histogram equalization
    #[arg(long)]
    pub equalize: bool,

    /// Spatial filter: none, grayscale, box, laplacian, gaussian, edges
    #[arg(long)]
    pub filter: Option<String>,

    /// Digital zoom factor (>= 1.0)
    #[arg(long)]
    pub zoom: Option<f32>,

    /// Activate binary threshold at this level (0-255)
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Invert the threshold polarity
    #[arg(long)]
    pub invert_threshold: bool,

    /// Erosion iterations after thresholding
    #[arg(long)]
    pub erode: Option<usize>,

    /// Dilation iterations after erosion
    #[arg(long)]
    pub dilate: Option<usize>,

    /// Region of interest as "x1,y1,x2,y2" in source pixels
    #[arg(long)]
    pub roi: Option<String>,

    /// Minimum column distance between reported peaks
    #[arg(long, default_value_t = DEFAULT_PEAK_MIN_DISTANCE)]
    pub min_distance: usize,

    /// Output file for the processed full frame
    #[arg(short, long, default_value = "processed.png")]
    pub output: PathBuf,

    /// Output file for the annotated ROI image
    #[arg(long)]
    pub roi_output: Option<PathBuf>,

    /// Write the ROI intensity profile as CSV
    #[arg(long)]
    pub profile_csv: Option<PathBuf>,
}

pub fn run(args: &ProcessArgs) -> Result<()> {
    let source = load_color_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let params = build_params(args)?;
    tracing::debug!("resolved parameters: {params:?}");
    summary::print_process_summary(&args.file, &params);

    let base = zoomed_base(&source, params.zoom);
    let global = apply_global(&base, &params)
        .context("Input image has no pixels")?;

    save_color_png(&global.to_color(), &args.output)?;
    println!("Saved processed frame to {}", args.output.display());

    let Some(ref roi_str) = args.roi else {
        return Ok(());
    };
    let roi = parse_roi(roi_str)?;

    let local = apply_local(&base, &roi, &params).with_context(|| {
        format!(
            "ROI ({},{})-({},{}) does not fit a {}x{} frame",
            roi.x1,
            roi.y1,
            roi.x2,
            roi.y2,
            base.width(),
            base.height()
        )
    })?;

    let analysis = analyze(&local, args.min_distance)
        .context("ROI produced an empty image")?;
    summary::print_peak_summary(&roi, &analysis);

    if let Some(ref path) = args.roi_output {
        save_color_png(&analysis.annotated, path)?;
        println!("Saved annotated ROI to {}", path.display());
    }

    if let Some(ref path) = args.profile_csv {
        let mut csv = String::from("column,intensity\n");
        for (col, value) in analysis.profile.iter().enumerate() {
            csv.push_str(&format!("{col},{value}\n"));
        }
        std::fs::write(path, csv)
            .with_context(|| format!("Failed to write profile to {}", path.display()))?;
        println!("Saved intensity profile to {}", path.display());
    }

    Ok(())
}

fn build_params(args: &ProcessArgs) -> Result<ProcessingParams> {
    let mut params = match args.preset {
        Some(ref path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read preset {}", path.display()))?;
            toml::from_str::<ProcessingParams>(&text)
                .with_context(|| format!("Invalid preset {}", path.display()))?
        }
        None => ProcessingParams::default(),
    };

    if let Some(b) = args.brightness {
        params.brightness = b;
    }
    if let Some(c) = args.contrast {
        params.contrast = c;
    }
    if args.equalize {
        params.equalize = true;
    }
    if let Some(ref name) = args.filter {
        params.filter = parse_filter(name)?;
    }
    if let Some(z) = args.zoom {
        params.zoom = z;
    }
    if let Some(level) = args.threshold {
        params.threshold.active = true;
        params.threshold.value = level;
    }
    if args.invert_threshold {
        params.threshold.polarity = ThresholdPolarity::BinaryInverted;
    }
    if let Some(n) = args.erode {
        params.threshold.erode_iterations = n;
    }
    if let Some(n) = args.dilate {
        params.threshold.dilate_iterations = n;
    }

    Ok(params.sanitized())
}

fn parse_filter(name: &str) -> Result<FilterKind> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "none" => FilterKind::None,
        "grayscale" | "gray" => FilterKind::Grayscale,
        "box" | "box-blur" => FilterKind::BoxBlur,
        "laplacian" => FilterKind::LaplacianSharpen,
        "gaussian" => FilterKind::GaussianBlur,
        "edges" | "edge" => FilterKind::EdgeDetect,
        other => anyhow::bail!(
            "Unknown filter '{other}' (expected none, grayscale, box, laplacian, gaussian, edges)"
        ),
    })
}

fn parse_roi(text: &str) -> Result<SourceRect> {
    let parts: Vec<u32> = text
        .split(',')
        .map(|s| s.trim().parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .context("Invalid ROI format (expected 'x1,y1,x2,y2')")?;
    if parts.len() != 4 {
        anyhow::bail!("ROI requires exactly 4 values: x1,y1,x2,y2");
    }
    SourceRect::from_corners([parts[0], parts[1]], [parts[2], parts[3]])
        .context("ROI is too small (each side must exceed the minimum extent)")
}
