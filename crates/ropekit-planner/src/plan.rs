//! Plan assembly: the full pipeline from raw glyph outline to routed,
//! tied, measured plan.
//!
//! The pipeline is synchronous and recomputes everything from scratch on
//! each invocation; there is no partial plan on error. Configuration is an
//! owned value per call, never shared state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use ropekit_core::constants::{
    entry_point, EPSILON, GRID_HEIGHT_IN, GRID_WIDTH_IN, LETTER_AREA_SCALE, WORK_HEIGHT_IN,
    WORK_WIDTH_IN,
};
use ropekit_core::error::{PlanError, Result};
use ropekit_core::geometry::{Bounds, Point};
use ropekit_core::path::GlyphOutline;

use crate::contour::{combined_bounds, GlyphPlan};
use crate::path::{measure_commands_bounds, transform_commands};
use crate::placement::{clamp_translation, grid_fit_commands, snap_translation, GridSpacing};
use crate::routing::{build_routing, LetterMetrics, PlanMetrics, Segment};
use crate::ties::{compute_tie_points, TiePoint};

/// Manual placement offset, in grid inches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Everything one plan computation needs, owned and immutable for the
/// duration of the call.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Text to plan; the first non-whitespace character is used.
    pub text: String,
    /// Display name recorded in the plan metadata.
    pub font_name: String,
    /// Glyph height as a percentage of the grid height.
    pub scale_percent: f64,
    pub grid_spacing: GridSpacing,
    /// Grid-fit stroke straightening tolerance, in inches.
    pub snap_tolerance: f64,
    /// Disables grid-fit, grid snap, and the bounds clamp; the manual
    /// offset alone decides placement.
    pub strict_manual: bool,
    pub keep_in_bounds: bool,
    pub manual_offset: Offset,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            text: "A".to_string(),
            font_name: String::new(),
            scale_percent: 100.0 * LETTER_AREA_SCALE,
            grid_spacing: GridSpacing::default(),
            snap_tolerance: 0.75,
            strict_manual: false,
            keep_in_bounds: true,
            manual_offset: Offset::default(),
        }
    }
}

/// Axis-aligned rectangle, used for the working letter area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Geometry of the plan's placement on the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLayout {
    /// Centered working area the initial fit targets.
    pub letter_area: Rect,
    /// Grid Y of the font baseline after all placement shifts.
    pub baseline: f64,
    /// Font size in grid inches (units-per-em times the unit scale).
    pub font_size: f64,
    /// Grid inches per font unit.
    pub unit_scale: f64,
    /// Applied glyph width after scaling, before placement shifts.
    pub target_width: f64,
    /// Applied glyph height after scaling, before placement shifts.
    pub target_height: f64,
    /// Measured bounds of the placed glyph, absent for empty outlines.
    pub bounds: Option<Bounds>,
}

/// Provenance and configuration echo stored with every plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub text: String,
    pub font_name: String,
    pub generated_at: DateTime<Utc>,
    /// Requested manual offset plus any clamp correction, so replaying the
    /// offset reproduces the final placement exactly.
    pub manual_offset_in: Offset,
    /// Shift contributed by the grid-snap stage.
    pub snap_offset_in: Offset,
    pub grid_spacing_in: GridSpacing,
    pub keep_in_bounds: bool,
    pub snap_tolerance_in: f64,
}

/// The complete planning result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub layout: PlanLayout,
    pub glyphs: Vec<GlyphPlan>,
    pub segments: Vec<Segment>,
    pub letters: Vec<LetterMetrics>,
    pub metrics: PlanMetrics,
    pub entry_point: Point,
    pub tie_points: Vec<TiePoint>,
    pub metadata: PlanMetadata,
}

/// The centered working area: the grid rectangle scaled by the letter-area
/// factor around its center.
pub fn letter_area() -> Rect {
    Rect {
        x: (GRID_WIDTH_IN - WORK_WIDTH_IN) / 2.0,
        y: (GRID_HEIGHT_IN - WORK_HEIGHT_IN) / 2.0,
        width: WORK_WIDTH_IN,
        height: WORK_HEIGHT_IN,
    }
}

/// Runs the full pipeline: fit, grid-fit, snap, manual offset, clamp,
/// routing, tie sampling, metrics.
pub fn compute_plan(config: &PlanConfig, outline: &GlyphOutline) -> Result<Plan> {
    let ch = config
        .text
        .chars()
        .find(|c| !c.is_whitespace())
        .ok_or(PlanError::EmptyInput)?;

    let raw_bounds =
        measure_commands_bounds(&outline.commands).ok_or(PlanError::InvalidGlyphBounds)?;
    if raw_bounds.width < EPSILON || raw_bounds.height < EPSILON {
        return Err(PlanError::DegenerateGlyphBounds {
            width: raw_bounds.width,
            height: raw_bounds.height,
        });
    }

    let target_height = GRID_HEIGHT_IN * config.scale_percent / 100.0;
    let target_width = GRID_WIDTH_IN;
    let scale = (target_height / raw_bounds.height).min(target_width / raw_bounds.width);
    let center_x = (raw_bounds.min_x + raw_bounds.max_x) / 2.0;
    let center_y = (raw_bounds.min_y + raw_bounds.max_y) / 2.0;

    // The glyph centers on the grid center; Y inverts relative to the font's
    // coordinate direction while X carries straight through.
    let fit_x = |v: f64| (v - center_x) * scale + GRID_WIDTH_IN / 2.0;
    let fit_y = |v: f64| (center_y - v) * scale + GRID_HEIGHT_IN / 2.0;
    let fitted = transform_commands(&outline.commands, fit_x, fit_y);
    debug!(
        ch = %ch,
        scale,
        raw_width = raw_bounds.width,
        raw_height = raw_bounds.height,
        "fitted glyph onto grid"
    );

    let mut glyphs = vec![GlyphPlan::new(ch, fitted)];

    if !config.strict_manual && config.snap_tolerance > EPSILON {
        for glyph in &mut glyphs {
            let fitted = grid_fit_commands(
                &glyph.path_commands,
                config.snap_tolerance,
                config.grid_spacing,
            );
            glyph.set_commands(fitted);
        }
        debug!(tolerance = config.snap_tolerance, "grid-fit applied");
    }

    let mut snap_shift = Offset::default();
    if !config.strict_manual {
        if let Some(bounds) = combined_bounds(&glyphs) {
            if let Some((dx, dy)) = snap_translation(&bounds, config.grid_spacing) {
                for glyph in &mut glyphs {
                    glyph.translate(dx, dy);
                }
                snap_shift = Offset::new(dx, dy);
                debug!(dx, dy, "snapped to grid intersection");
            }
        }
    }

    let mut manual_shift = config.manual_offset;
    if manual_shift.x.abs() > EPSILON || manual_shift.y.abs() > EPSILON {
        for glyph in &mut glyphs {
            glyph.translate(manual_shift.x, manual_shift.y);
        }
    }

    if config.keep_in_bounds && !config.strict_manual {
        if let Some(bounds) = combined_bounds(&glyphs) {
            if let Some((dx, dy)) = clamp_translation(&bounds) {
                for glyph in &mut glyphs {
                    glyph.translate(dx, dy);
                }
                manual_shift.x += dx;
                manual_shift.y += dy;
                debug!(dx, dy, "clamped back inside grid");
            }
        }
    }

    let routing = build_routing(&mut glyphs);
    let tie_points = compute_tie_points(&routing.segments, config.grid_spacing);
    let bounds = combined_bounds(&glyphs);
    debug!(
        segments = routing.segments.len(),
        ties = tie_points.len(),
        total = routing.metrics.total_overall,
        "plan assembled"
    );

    let baseline = fit_y(0.0) + snap_shift.y + manual_shift.y;
    let layout = PlanLayout {
        letter_area: letter_area(),
        baseline,
        font_size: f64::from(outline.units_per_em) * scale,
        unit_scale: scale,
        target_width: raw_bounds.width * scale,
        target_height: raw_bounds.height * scale,
        bounds,
    };

    Ok(Plan {
        layout,
        glyphs,
        segments: routing.segments,
        letters: routing.letters,
        metrics: routing.metrics,
        entry_point: entry_point(),
        tie_points,
        metadata: PlanMetadata {
            text: config.text.clone(),
            font_name: config.font_name.clone(),
            generated_at: Utc::now(),
            manual_offset_in: manual_shift,
            snap_offset_in: snap_shift,
            grid_spacing_in: config.grid_spacing,
            keep_in_bounds: config.keep_in_bounds,
            snap_tolerance_in: config.snap_tolerance,
        },
    })
}
