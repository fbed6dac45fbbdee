//! # RopeKit Core
//!
//! Core types shared across the RopeKit workspace: 2D geometry primitives,
//! glyph path commands, grid constants, unit formatting, and error types.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod path;
pub mod units;

pub use error::{PlanError, Result};
pub use geometry::{Bounds, Point};
pub use path::{GlyphOutline, PathCommand};
