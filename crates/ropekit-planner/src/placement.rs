//! Placement on the physical mounting grid.
//!
//! Three concerns, applied in fixed order by the pipeline and each followed
//! by contour re-extraction:
//!
//! 1. Grid-fit: straighten near-axis-aligned strokes onto grid lines.
//! 2. Grid snap: land the combined bounding box's lower-left corner on the
//!    nearest grid intersection without leaving the grid.
//! 3. Bounds clamp: minimal translation back inside the full grid rectangle.

use tracing::debug;

use ropekit_core::constants::{EPSILON, GRID_HEIGHT_IN, GRID_WIDTH_IN};
use ropekit_core::geometry::{Bounds, Point};
use ropekit_core::path::PathCommand;

/// Grid pitch along each axis, in inches. The planner enforces a 0.5 in
/// minimum at the configuration boundary.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridSpacing {
    pub x: f64,
    pub y: f64,
}

impl GridSpacing {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.max(0.5),
            y: y.max(0.5),
        }
    }
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self { x: 2.0, y: 4.0 }
    }
}

/// Snaps a scalar to the nearest grid line if it lies within tolerance.
pub fn snap_value(value: f64, spacing: f64, tolerance: f64) -> Option<f64> {
    if spacing < EPSILON {
        return None;
    }
    let snapped = (value / spacing).round() * spacing;
    if (snapped - value).abs() <= tolerance {
        Some(snapped)
    } else {
        None
    }
}

/// Chooses the snapped coordinate for a near-axis-aligned stroke from the
/// two endpoints' independent snaps: their average when both snap and agree
/// within one grid spacing, otherwise the start's snap, otherwise whichever
/// snapped.
fn combine_snaps(start: Option<f64>, end: Option<f64>, spacing: f64) -> Option<f64> {
    match (start, end) {
        (Some(a), Some(b)) => Some(if (a - b).abs() <= spacing { (a + b) / 2.0 } else { a }),
        (a, b) => a.or(b),
    }
}

/// Straightens near-axis-aligned line strokes onto the grid.
///
/// A line whose endpoints differ by at most `tolerance` along one axis (and
/// by more along the other) has its constant-axis coordinate snapped to the
/// nearest grid line within tolerance. The snap rewrites both the stroke's
/// endpoint and the previous command's endpoint, so consecutive strokes stay
/// connected; when the previous endpoint is the contour's `MoveTo`, the
/// recorded start a later `Close` returns to moves with it. Curves and true
/// diagonals pass through untouched.
///
/// Pure: returns a new command list; snapped predecessors are patched
/// through explicit indices into the output buffer.
pub fn grid_fit_commands(
    commands: &[PathCommand],
    tolerance: f64,
    spacing: GridSpacing,
) -> Vec<PathCommand> {
    let spacing_x = spacing.x.max(EPSILON);
    let spacing_y = spacing.y.max(EPSILON);

    let mut out: Vec<PathCommand> = Vec::with_capacity(commands.len());
    let mut current = Point::new(0.0, 0.0);
    let mut prev_idx: Option<usize> = None;
    let mut start_idx: Option<usize> = None;
    let mut contour_start = Point::new(0.0, 0.0);

    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                out.push(*cmd);
                current = Point::new(x, y);
                prev_idx = Some(out.len() - 1);
                start_idx = prev_idx;
                contour_start = current;
            }
            PathCommand::LineTo { x, y } => {
                let start = current;
                let mut end = Point::new(x, y);
                let dx = end.x - start.x;
                let dy = end.y - start.y;

                if dy.abs() <= tolerance && dx.abs() > tolerance {
                    let snapped = combine_snaps(
                        snap_value(start.y, spacing_y, tolerance),
                        snap_value(end.y, spacing_y, tolerance),
                        spacing_y,
                    );
                    if let Some(snapped_y) = snapped {
                        if let Some(idx) = prev_idx {
                            out[idx].set_end(None, Some(snapped_y));
                        }
                        end.y = snapped_y;
                        if prev_idx == start_idx {
                            contour_start.y = snapped_y;
                        }
                    }
                } else if dx.abs() <= tolerance && dy.abs() > tolerance {
                    let snapped = combine_snaps(
                        snap_value(start.x, spacing_x, tolerance),
                        snap_value(end.x, spacing_x, tolerance),
                        spacing_x,
                    );
                    if let Some(snapped_x) = snapped {
                        if let Some(idx) = prev_idx {
                            out[idx].set_end(Some(snapped_x), None);
                        }
                        end.x = snapped_x;
                        if prev_idx == start_idx {
                            contour_start.x = snapped_x;
                        }
                    }
                }

                out.push(PathCommand::LineTo { x: end.x, y: end.y });
                current = end;
                prev_idx = Some(out.len() - 1);
            }
            PathCommand::CurveTo { x, y, .. } | PathCommand::QuadTo { x, y, .. } => {
                out.push(*cmd);
                current = Point::new(x, y);
                prev_idx = Some(out.len() - 1);
            }
            PathCommand::Close => {
                out.push(*cmd);
                if start_idx.is_some() {
                    current = contour_start;
                    prev_idx = start_idx;
                }
            }
        }
    }

    out
}

/// Translation landing the bounding box's lower-left corner on the nearest
/// grid intersection, shrunk so the box never crosses the grid boundary.
/// `None` when the shift is negligible.
pub fn snap_translation(bounds: &Bounds, spacing: GridSpacing) -> Option<(f64, f64)> {
    let spacing_x = spacing.x.max(EPSILON);
    let spacing_y = spacing.y.max(EPSILON);

    let snapped_min_x = (bounds.min_x / spacing_x).round() * spacing_x;
    let snapped_min_y = (bounds.min_y / spacing_y).round() * spacing_y;

    let mut dx = snapped_min_x - bounds.min_x;
    let mut dy = snapped_min_y - bounds.min_y;

    let new_min_x = bounds.min_x + dx;
    let new_max_x = bounds.max_x + dx;
    if new_min_x < 0.0 {
        dx += -new_min_x;
    }
    if new_max_x > GRID_WIDTH_IN {
        dx -= new_max_x - GRID_WIDTH_IN;
    }

    let new_min_y = bounds.min_y + dy;
    if new_min_y < 0.0 {
        dy += -new_min_y;
    }
    let new_max_y = bounds.max_y + dy;
    if new_max_y > GRID_HEIGHT_IN {
        dy -= new_max_y - GRID_HEIGHT_IN;
    }

    if dx.abs() < EPSILON && dy.abs() < EPSILON {
        return None;
    }
    debug!(dx, dy, "grid snap shift");
    Some((dx, dy))
}

/// Minimal translation bringing the bounding box fully inside the grid
/// rectangle, correcting each overflowing edge independently. `None` when
/// already inside (or the correction is negligible).
pub fn clamp_translation(bounds: &Bounds) -> Option<(f64, f64)> {
    let mut dx = 0.0;
    let mut dy = 0.0;

    if bounds.min_x < 0.0 {
        dx += -bounds.min_x;
    }
    if bounds.max_x > GRID_WIDTH_IN {
        dx -= bounds.max_x - GRID_WIDTH_IN;
    }
    if bounds.min_y < 0.0 {
        dy += -bounds.min_y;
    }
    if bounds.max_y > GRID_HEIGHT_IN {
        dy -= bounds.max_y - GRID_HEIGHT_IN;
    }

    if dx.abs() < EPSILON && dy.abs() < EPSILON {
        return None;
    }
    debug!(dx, dy, "bounds clamp shift");
    Some((dx, dy))
}
