use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use ropekit::{
    compute_plan, export_file_name, init_logging, ExportSnapshot, GridSpacing, LoadedFont, Offset,
    PlanConfig, SessionSettings,
};
use ropekit_core::units::format_length;

/// Plan a rope-light letter installation on a 72 x 96 in mounting grid.
#[derive(Debug, Parser)]
#[command(name = "ropekit", version, about)]
struct Cli {
    /// Font file (.ttf or .otf), or a system font family name
    #[arg(long)]
    font: String,

    /// Character to plan
    #[arg(long = "char", value_name = "CHAR")]
    character: char,

    /// Glyph height as a percentage of the grid height
    #[arg(long, default_value_t = 80.0)]
    scale: f64,

    /// Grid column spacing in inches
    #[arg(long, default_value_t = 2.0)]
    grid_x: f64,

    /// Grid row spacing in inches
    #[arg(long, default_value_t = 4.0)]
    grid_y: f64,

    /// Grid-fit straightening tolerance in inches (0 disables)
    #[arg(long, default_value_t = 0.75)]
    tolerance: f64,

    /// Manual horizontal offset in inches
    #[arg(long, default_value_t = 0.0)]
    offset_x: f64,

    /// Manual vertical offset in inches
    #[arg(long, default_value_t = 0.0)]
    offset_y: f64,

    /// Place by manual offset alone; skip grid-fit, snap, and clamp
    #[arg(long)]
    strict_manual: bool,

    /// Allow the glyph to extend past the grid edges
    #[arg(long)]
    no_keep_in_bounds: bool,

    /// Rope thickness recorded in the export, in inches
    #[arg(long, default_value_t = 0.5)]
    rope_thickness: f64,

    /// Write the plan snapshot JSON here (a directory gets a derived name)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_font(spec: &str) -> anyhow::Result<LoadedFont> {
    let path = PathBuf::from(spec);
    if path.is_file() {
        return LoadedFont::from_file(&path)
            .with_context(|| format!("failed to load font file {}", path.display()));
    }
    ropekit::load_system_font(spec)
        .with_context(|| format!("failed to load system font '{spec}'"))
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let font = load_font(&cli.font)?;
    let outline = font.glyph_outline(cli.character)?;

    let config = PlanConfig {
        text: cli.character.to_string(),
        font_name: font.name().to_string(),
        scale_percent: cli.scale,
        grid_spacing: GridSpacing::new(cli.grid_x, cli.grid_y),
        snap_tolerance: cli.tolerance,
        strict_manual: cli.strict_manual,
        keep_in_bounds: !cli.no_keep_in_bounds,
        manual_offset: Offset::new(cli.offset_x, cli.offset_y),
    };
    let plan = compute_plan(&config, &outline)?;

    println!(
        "Plan for '{}' in {} ({} segments, {} tie points)",
        cli.character,
        font.name(),
        plan.segments.len(),
        plan.tie_points.len()
    );
    for letter in &plan.letters {
        println!(
            "  {}: lit {}, blackout {}",
            letter.ch,
            format_length(letter.lit_length),
            format_length(letter.blackout_length)
        );
    }
    println!(
        "Totals: lit {}, blackout {}, overall {}",
        format_length(plan.metrics.total_lit),
        format_length(plan.metrics.total_blackout),
        format_length(plan.metrics.total_overall)
    );

    if let Some(output) = cli.output {
        let path = if output.is_dir() {
            output.join(export_file_name(&config.text))
        } else {
            output
        };
        let session = SessionSettings {
            rope_thickness_in: cli.rope_thickness,
            strict_manual: cli.strict_manual,
            zoom: 1.0,
        };
        let snapshot = ExportSnapshot::new(plan, Vec::new(), session);
        snapshot
            .write_file(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}
