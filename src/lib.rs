//! # RopeKit
//!
//! Plans physical rope-light letter installations. Given a character from an
//! outline font, RopeKit fits the glyph onto a 72 x 96 in mounting grid,
//! decomposes it into lit contours and blackout connector jumps, and reports
//! everything a fabricator needs: wiring order, rope lengths, and tie-point
//! positions.
//!
//! The workspace is organized as:
//!
//! 1. **ropekit-core** - geometry primitives, path commands, units, errors
//! 2. **ropekit-planner** - the planning pipeline and export snapshot
//! 3. **ropekit-fonts** - font loading and glyph outline extraction
//! 4. **ropekit** - the command-line binary

pub use ropekit_core::{Bounds, GlyphOutline, PathCommand, PlanError, Point};
pub use ropekit_fonts::{find_system_font, load_system_font, FontError, LoadedFont};
pub use ropekit_planner::{
    compute_plan, export_file_name, ExportSnapshot, GridSpacing, Offset, Plan, PlanConfig,
    RecordedPoint, Segment, SessionSettings, TiePoint,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output with pretty formatting and RUST_LOG environment variable
/// support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
