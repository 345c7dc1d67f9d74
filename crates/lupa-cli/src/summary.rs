use std::path::Path;

use console::Style;
use lupa_core::analyze::RoiAnalysis;
use lupa_core::geometry::SourceRect;
use lupa_core::params::{ProcessingParams, ThresholdPolarity};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_process_summary(input: &Path, params: &ProcessingParams) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Lupa Pipeline"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Brightness"),
        s.value.apply_to(format!("{:+.2}", params.brightness))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Contrast"),
        s.value.apply_to(format!("{:.2}", params.contrast))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Zoom"),
        s.value.apply_to(format!("{:.1}x", params.zoom))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Equalize"),
        if params.equalize {
            s.method.apply_to("on".to_string())
        } else {
            s.disabled.apply_to("off".to_string())
        }
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Filter"),
        s.method.apply_to(params.filter.label())
    );

    if params.threshold.active {
        println!("  {}", s.header.apply_to("Threshold"));
        println!(
            "    {:<12}{}",
            s.label.apply_to("Level"),
            s.value.apply_to(params.threshold.value)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Polarity"),
            s.value.apply_to(match params.threshold.polarity {
                ThresholdPolarity::Binary => "binary",
                ThresholdPolarity::BinaryInverted => "inverted",
            })
        );
        println!(
            "    {:<12}{} / {}",
            s.label.apply_to("Erode/Dilate"),
            s.value.apply_to(params.threshold.erode_iterations),
            s.value.apply_to(params.threshold.dilate_iterations)
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Threshold"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();
}

pub fn print_peak_summary(roi: &SourceRect, analysis: &RoiAnalysis) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("ROI Analysis"));
    println!(
        "    {:<12}({},{}) - ({},{})",
        s.label.apply_to("Region"),
        roi.x1,
        roi.y1,
        roi.x2,
        roi.y2
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Columns"),
        s.value.apply_to(analysis.profile.len())
    );

    if analysis.peaks.is_empty() {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Peaks"),
            s.disabled.apply_to("none detected")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Peaks"),
            s.value.apply_to(analysis.peaks.len())
        );
        for &col in &analysis.peaks {
            println!(
                "      {:<10}{}",
                s.label.apply_to(format!("col {col}")),
                s.method.apply_to(format!("{:.2}", analysis.profile[col]))
            );
        }
    }
    println!();
}
