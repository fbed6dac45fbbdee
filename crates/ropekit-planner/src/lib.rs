//! Geometry and routing pipeline for rope-light letter plans.
//!
//! The pipeline turns a raw glyph outline into a fabrication plan in fixed
//! stages: scale-to-fit onto the mounting grid, grid-fit stroke
//! straightening, grid snap, manual offset, bounds clamp, contour routing,
//! and tie-point sampling. Every stage is a pure transform over the command
//! stream followed by contour re-extraction; nothing mutates in place across
//! stage boundaries.

pub mod contour;
pub mod export;
pub mod path;
pub mod placement;
pub mod plan;
pub mod routing;
pub mod sample;
pub mod ties;

pub use contour::{Contour, GlyphPlan};
pub use export::{export_file_name, ExportSnapshot, RecordedPoint, SessionSettings};
pub use placement::GridSpacing;
pub use plan::{compute_plan, Offset, Plan, PlanConfig};
pub use routing::{LetterMetrics, PlanMetrics, Segment};
pub use ties::{TiePoint, TieSource};
