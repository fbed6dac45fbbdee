//! Tie-point sampling against the mounting grid.
//!
//! Walks each lit segment's polyline and emits discrete mounting locations:
//! at fixed intervals along horizontal and vertical runs (one tie roughly
//! every foot of grid), a midpoint tie for runs too short to cross a grid
//! line, and exact grid-line intersections for oblique and curved runs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use ropekit_core::constants::{
    AXIS_ALIGN_THRESHOLD, EPSILON, GRID_HEIGHT_IN, GRID_WIDTH_IN, MAJOR_GRID_PITCH_IN,
};
use ropekit_core::geometry::Point;

use crate::placement::GridSpacing;
use crate::routing::Segment;
use crate::sample::SampledPath;

/// Why a tie point was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieSource {
    /// Sampled start of a lit segment.
    Start,
    /// Sampled end of a lit segment.
    End,
    /// Grid-line crossing on a horizontal run.
    Horizontal,
    /// Horizontal run too short to cross a grid line; tied at its midpoint.
    HorizontalShort,
    /// Grid-line crossing on a vertical run.
    Vertical,
    /// Vertical run too short to cross a grid line; tied at its midpoint.
    VerticalShort,
    /// Exact intersection of an oblique/curved run with a grid line.
    Curve,
}

/// A deduplicated physical mounting location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiePoint {
    pub x: f64,
    pub y: f64,
    pub source: TieSource,
}

/// Collects tie points, deduplicating on coordinates rounded to 0.01 in and
/// discarding anything outside the grid rectangle.
struct TieCollector {
    ties: Vec<TiePoint>,
    seen: HashSet<(i64, i64)>,
}

impl TieCollector {
    fn new() -> Self {
        Self {
            ties: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn add(&mut self, x: f64, y: f64, source: TieSource) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        if x < -EPSILON || x > GRID_WIDTH_IN + EPSILON {
            return;
        }
        if y < -EPSILON || y > GRID_HEIGHT_IN + EPSILON {
            return;
        }
        let snapped_x = (x * 100.0).round() / 100.0;
        let snapped_y = (y * 100.0).round() / 100.0;
        let key = ((snapped_x * 100.0).round() as i64, (snapped_y * 100.0).round() as i64);
        if !self.seen.insert(key) {
            return;
        }
        self.ties.push(TiePoint {
            x: snapped_x,
            y: snapped_y,
            source,
        });
    }
}

/// Samples tie points for every lit segment of a wiring sequence.
pub fn compute_tie_points(segments: &[Segment], spacing: GridSpacing) -> Vec<TiePoint> {
    let spacing_x = spacing.x.max(EPSILON);
    let spacing_y = spacing.y.max(EPSILON);
    let min_spacing = spacing_x.min(spacing_y);
    // Full-pitch ties roughly every foot of grid.
    let step_count_x = ((MAJOR_GRID_PITCH_IN / spacing_x).round() as usize).max(1);
    let step_count_y = ((MAJOR_GRID_PITCH_IN / spacing_y).round() as usize).max(1);

    let mut collector = TieCollector::new();

    for segment in segments {
        let Segment::Lit {
            path_commands,
            length,
            ..
        } = segment
        else {
            continue;
        };

        let sampled = SampledPath::from_commands(path_commands);
        let length = if *length > 0.0 {
            *length
        } else {
            sampled.length()
        };
        let samples = ((length / (min_spacing / 2.0).max(0.25)).ceil() as usize).max(32);
        let points = sampled.sample_evenly(samples);

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            collector.add(first.x, first.y, TieSource::Start);
            collector.add(last.x, last.y, TieSource::End);
        }

        for pair in points.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            let dx = p2.x - p1.x;
            let dy = p2.y - p1.y;
            let is_horizontal = dy.abs() < AXIS_ALIGN_THRESHOLD && dx.abs() > dy.abs();
            let is_vertical = dx.abs() < AXIS_ALIGN_THRESHOLD && dy.abs() > dx.abs();

            if is_horizontal {
                horizontal_run_ties(&mut collector, p1, p2, spacing_x, step_count_x);
                continue;
            }
            if is_vertical {
                vertical_run_ties(&mut collector, p1, p2, spacing_y, step_count_y);
                continue;
            }
            oblique_run_ties(&mut collector, p1, p2, spacing_x, spacing_y);
        }
    }

    collector.ties
}

fn horizontal_run_ties(
    collector: &mut TieCollector,
    p1: Point,
    p2: Point,
    spacing: f64,
    step_count: usize,
) {
    let y = (p1.y + p2.y) / 2.0;
    let start = p1.x.min(p2.x);
    let end = p1.x.max(p2.x);
    let first_wire = ((start - EPSILON) / spacing).ceil() * spacing;
    if first_wire > end + EPSILON {
        collector.add((start + end) / 2.0, y, TieSource::HorizontalShort);
        return;
    }
    let mut idx = 0usize;
    let mut x = first_wire;
    while x <= end + EPSILON {
        if idx % step_count == 0 {
            collector.add(x, y, TieSource::Horizontal);
        }
        x += spacing;
        idx += 1;
    }
}

fn vertical_run_ties(
    collector: &mut TieCollector,
    p1: Point,
    p2: Point,
    spacing: f64,
    step_count: usize,
) {
    let x = (p1.x + p2.x) / 2.0;
    let start = p1.y.min(p2.y);
    let end = p1.y.max(p2.y);
    let first_wire = ((start - EPSILON) / spacing).ceil() * spacing;
    if first_wire > end + EPSILON {
        collector.add(x, (start + end) / 2.0, TieSource::VerticalShort);
        return;
    }
    let mut idx = 0usize;
    let mut y = first_wire;
    while y <= end + EPSILON {
        if idx % step_count == 0 {
            collector.add(x, y, TieSource::Vertical);
        }
        y += spacing;
        idx += 1;
    }
}

/// Exact parametric intersections of an oblique micro-segment with every
/// grid line crossing its bounding box. Near-zero denominators skip the
/// contribution rather than erroring.
fn oblique_run_ties(
    collector: &mut TieCollector,
    p1: Point,
    p2: Point,
    spacing_x: f64,
    spacing_y: f64,
) {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let min_x = p1.x.min(p2.x);
    let max_x = p1.x.max(p2.x);
    let min_y = p1.y.min(p2.y);
    let max_y = p1.y.max(p2.y);

    let k_start_x = ((min_x - EPSILON) / spacing_x).ceil() as i64;
    let k_end_x = ((max_x + EPSILON) / spacing_x).floor() as i64;
    for k in k_start_x..=k_end_x {
        let x_line = k as f64 * spacing_x;
        if dx.abs() < EPSILON {
            continue;
        }
        let t = (x_line - p1.x) / dx;
        if (0.0..=1.0).contains(&t) {
            collector.add(x_line, p1.y + t * dy, TieSource::Curve);
        }
    }

    let k_start_y = ((min_y - EPSILON) / spacing_y).ceil() as i64;
    let k_end_y = ((max_y + EPSILON) / spacing_y).floor() as i64;
    for k in k_start_y..=k_end_y {
        let y_line = k as f64 * spacing_y;
        if dy.abs() < EPSILON {
            continue;
        }
        let t = (y_line - p1.y) / dy;
        if (0.0..=1.0).contains(&t) {
            collector.add(p1.x + t * dx, y_line, TieSource::Curve);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ropekit_core::path::PathCommand;

    fn lit_segment(commands: Vec<PathCommand>) -> Segment {
        let contour = crate::contour::analyze_contour(commands, 0);
        Segment::Lit {
            ch: 'T',
            glyph_index: 0,
            contour_index: 0,
            length: contour.length,
            path_commands: contour.commands.clone(),
            path_string: contour.path_string.clone(),
            classification: crate::routing::LitClass::Outer,
            points: contour.points.clone(),
            bounds: contour.bounds,
            start_point: contour.start,
        }
    }

    #[test]
    fn test_ties_contained_and_deduplicated() {
        let segment = lit_segment(vec![
            PathCommand::MoveTo { x: 10.0, y: 20.0 },
            PathCommand::LineTo { x: 40.0, y: 20.0 },
            PathCommand::LineTo { x: 40.0, y: 60.0 },
            PathCommand::LineTo { x: 10.0, y: 60.0 },
            PathCommand::Close,
        ]);
        let ties = compute_tie_points(&[segment], GridSpacing::new(2.0, 4.0));
        assert!(!ties.is_empty());

        let mut seen = HashSet::new();
        for tie in &ties {
            assert!(tie.x >= -EPSILON && tie.x <= GRID_WIDTH_IN + EPSILON);
            assert!(tie.y >= -EPSILON && tie.y <= GRID_HEIGHT_IN + EPSILON);
            let key = (
                (tie.x * 100.0).round() as i64,
                (tie.y * 100.0).round() as i64,
            );
            assert!(seen.insert(key), "duplicate tie at ({}, {})", tie.x, tie.y);
        }
    }

    #[test]
    fn test_horizontal_run_foot_interval() {
        // 2 in column spacing: every 6th crossing gets a tie, i.e. one per
        // foot along the run (plus start/end ties).
        let segment = lit_segment(vec![
            PathCommand::MoveTo { x: 0.0, y: 8.0 },
            PathCommand::LineTo { x: 36.0, y: 8.0 },
        ]);
        let ties = compute_tie_points(&[segment], GridSpacing::new(2.0, 4.0));
        let horizontal: Vec<&TiePoint> = ties
            .iter()
            .filter(|t| t.source == TieSource::Horizontal)
            .collect();
        for tie in &horizontal {
            assert!((tie.x / 12.0 - (tie.x / 12.0).round()).abs() < 0.01);
        }
        assert!(horizontal.len() >= 3);
    }

    #[test]
    fn test_short_run_gets_midpoint_tie() {
        // A vertical run spanning no grid row (rows every 4 in, run from
        // 9.0 to 10.5) gets exactly one midpoint tie.
        let segment = lit_segment(vec![
            PathCommand::MoveTo { x: 7.0, y: 9.0 },
            PathCommand::LineTo { x: 7.0, y: 10.5 },
        ]);
        let ties = compute_tie_points(&[segment], GridSpacing::new(2.0, 4.0));
        assert!(ties
            .iter()
            .any(|t| t.source == TieSource::VerticalShort && (t.y - 9.75).abs() < 0.3));
    }

    #[test]
    fn test_oblique_run_crosses_grid_lines() {
        let segment = lit_segment(vec![
            PathCommand::MoveTo { x: 1.0, y: 1.0 },
            PathCommand::LineTo { x: 9.0, y: 13.0 },
        ]);
        let ties = compute_tie_points(&[segment], GridSpacing::new(2.0, 4.0));
        let crossings: Vec<&TiePoint> = ties
            .iter()
            .filter(|t| t.source == TieSource::Curve)
            .collect();
        assert!(!crossings.is_empty());
        for tie in &crossings {
            let on_column = (tie.x / 2.0 - (tie.x / 2.0).round()).abs() < 0.01;
            let on_row = (tie.y / 4.0 - (tie.y / 4.0).round()).abs() < 0.01;
            assert!(on_column || on_row);
        }
    }

    #[test]
    fn test_outside_grid_discarded() {
        let segment = lit_segment(vec![
            PathCommand::MoveTo { x: -20.0, y: 50.0 },
            PathCommand::LineTo { x: -5.0, y: 50.0 },
        ]);
        let ties = compute_tie_points(&[segment], GridSpacing::new(2.0, 4.0));
        assert!(ties.is_empty());
    }
}
