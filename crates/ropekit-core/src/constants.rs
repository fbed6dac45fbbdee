//! Physical grid constants for rope-light planning.
//!
//! All lengths are inches. The mounting grid is a 6 ft by 8 ft panel; letters
//! are laid out in a centered working area covering 80% of the panel and may
//! be clamped back to the full panel afterwards.

use crate::geometry::Point;

/// Full mounting grid width in inches.
pub const GRID_WIDTH_IN: f64 = 72.0;
/// Full mounting grid height in inches.
pub const GRID_HEIGHT_IN: f64 = 96.0;

/// Fraction of the grid reserved as the centered letter working area.
pub const LETTER_AREA_SCALE: f64 = 0.8;
/// Working area width in inches.
pub const WORK_WIDTH_IN: f64 = GRID_WIDTH_IN * LETTER_AREA_SCALE;
/// Working area height in inches.
pub const WORK_HEIGHT_IN: f64 = GRID_HEIGHT_IN * LETTER_AREA_SCALE;

/// Spacing between major grid members, one foot.
pub const MAJOR_GRID_PITCH_IN: f64 = 12.0;

/// Geometric coincidence tolerance.
pub const EPSILON: f64 = 1e-4;
/// Threshold below which a micro-segment delta counts as axis-aligned.
pub const AXIS_ALIGN_THRESHOLD: f64 = 0.05;

/// Power feed location, centered on the grid edge at y = `GRID_HEIGHT_IN`.
pub fn entry_point() -> Point {
    Point::new(GRID_WIDTH_IN / 2.0, GRID_HEIGHT_IN)
}
