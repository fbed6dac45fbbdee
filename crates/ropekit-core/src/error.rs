//! Error types for plan computation.
//!
//! All pipeline failures are detected synchronously and reported as a single
//! terminal error per invocation; no partial plan is ever produced. Numeric
//! edge cases inside the pipeline (near-zero denominators, coincident
//! points) are handled by epsilon-gated branches and never surface here.

use thiserror::Error;

/// Errors that can abort a plan computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The glyph outline's bounding box contains non-finite coordinates.
    #[error("Invalid glyph bounds")]
    InvalidGlyphBounds,

    /// The glyph outline's bounding box is too small to lay out.
    #[error("Glyph bounds are too small ({width} x {height})")]
    DegenerateGlyphBounds {
        /// Raw outline width in font units.
        width: f64,
        /// Raw outline height in font units.
        height: f64,
    },

    /// There is no text to plan. A precondition, not a failure: the caller
    /// should treat "no plan" as the idle state.
    #[error("No text to plan")]
    EmptyInput,
}

/// Result type alias for plan operations.
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(PlanError::InvalidGlyphBounds.to_string(), "Invalid glyph bounds");
        assert_eq!(
            PlanError::DegenerateGlyphBounds {
                width: 0.0,
                height: 700.0
            }
            .to_string(),
            "Glyph bounds are too small (0 x 700)"
        );
        assert_eq!(PlanError::EmptyInput.to_string(), "No text to plan");
    }
}
