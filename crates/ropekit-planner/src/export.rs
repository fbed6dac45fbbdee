//! Export snapshot: the plan plus session state, serialized as a single
//! JSON document a fabricator (or a later session) can reload.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use tracing::info;

use ropekit_core::geometry::Point;
use ropekit_core::units::format_feet_inches;

use crate::placement::GridSpacing;
use crate::plan::{Offset, Plan, PlanLayout};
use crate::routing::{LetterMetrics, PlanMetrics, Segment};
use crate::ties::TiePoint;

/// A user-recorded reference point on the grid, labeled in feet-and-inches
/// from the top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedPoint {
    pub x_in: f64,
    pub y_in: f64,
    pub label: String,
}

impl RecordedPoint {
    pub fn new(x_in: f64, y_in: f64) -> Self {
        let label = format!(
            "{} right, {} down",
            format_feet_inches(x_in),
            format_feet_inches(y_in)
        );
        Self { x_in, y_in, label }
    }
}

/// Session state that is not part of the plan itself but travels with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    pub rope_thickness_in: f64,
    pub strict_manual: bool,
    pub zoom: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            rope_thickness_in: 0.5,
            strict_manual: false,
            zoom: 1.0,
        }
    }
}

/// Flat metadata block of the snapshot: plan provenance merged with the
/// session settings, every field explicit so nothing collides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub text: String,
    pub font_name: String,
    pub generated_at: DateTime<Utc>,
    pub manual_offset_in: Offset,
    pub snap_offset_in: Offset,
    pub grid_spacing_in: GridSpacing,
    pub keep_in_bounds: bool,
    pub snap_tolerance_in: f64,
    pub rope_thickness_in: f64,
    pub strict_manual: bool,
    pub zoom: f64,
}

/// The complete exported document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub layout: PlanLayout,
    pub glyphs: Vec<crate::contour::GlyphPlan>,
    pub segments: Vec<Segment>,
    pub letters: Vec<LetterMetrics>,
    pub metrics: PlanMetrics,
    pub entry_point: Point,
    pub tie_points: Vec<TiePoint>,
    pub recorded_points: Vec<RecordedPoint>,
    pub metadata: ExportMetadata,
}

impl ExportSnapshot {
    pub fn new(plan: Plan, recorded_points: Vec<RecordedPoint>, session: SessionSettings) -> Self {
        let metadata = ExportMetadata {
            text: plan.metadata.text,
            font_name: plan.metadata.font_name,
            generated_at: plan.metadata.generated_at,
            manual_offset_in: plan.metadata.manual_offset_in,
            snap_offset_in: plan.metadata.snap_offset_in,
            grid_spacing_in: plan.metadata.grid_spacing_in,
            keep_in_bounds: plan.metadata.keep_in_bounds,
            snap_tolerance_in: plan.metadata.snap_tolerance_in,
            rope_thickness_in: session.rope_thickness_in,
            strict_manual: session.strict_manual,
            zoom: session.zoom,
        };
        Self {
            layout: plan.layout,
            glyphs: plan.glyphs,
            segments: plan.segments,
            letters: plan.letters,
            metrics: plan.metrics,
            entry_point: plan.entry_point,
            tie_points: plan.tie_points,
            recorded_points,
            metadata,
        }
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, JsonError> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json_pretty().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "wrote plan snapshot");
        Ok(())
    }
}

/// Derives a filesystem-safe snapshot file name from the planned text.
/// Non-alphanumeric runs collapse to single dashes; an empty result falls
/// back to `layout`.
pub fn export_file_name(text: &str) -> String {
    let mut safe = String::with_capacity(text.len());
    let mut last_dash = true;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            safe.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            safe.push('-');
            last_dash = true;
        }
    }
    while safe.ends_with('-') {
        safe.pop();
    }
    if safe.is_empty() {
        safe.push_str("layout");
    }
    format!("rope-plan-{safe}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{compute_plan, PlanConfig};
    use ropekit_core::path::{GlyphOutline, PathCommand};

    fn sample_plan() -> Plan {
        let outline = GlyphOutline {
            commands: vec![
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::LineTo { x: 400.0, y: 0.0 },
                PathCommand::LineTo { x: 400.0, y: -600.0 },
                PathCommand::LineTo { x: 0.0, y: -600.0 },
                PathCommand::Close,
            ],
            units_per_em: 1000,
            advance_width: 450.0,
        };
        compute_plan(&PlanConfig::default(), &outline).unwrap()
    }

    #[test]
    fn test_file_name_sanitizing() {
        assert_eq!(export_file_name("A"), "rope-plan-a.json");
        assert_eq!(export_file_name("B & C"), "rope-plan-b-c.json");
        assert_eq!(export_file_name("!!!"), "rope-plan-layout.json");
        assert_eq!(export_file_name(""), "rope-plan-layout.json");
    }

    #[test]
    fn test_recorded_point_label() {
        let p = RecordedPoint::new(36.0, 13.0);
        assert_eq!(p.label, "3' right, 1' 1\" down");
    }

    #[test]
    fn test_snapshot_round_trips_json() {
        let snapshot = ExportSnapshot::new(
            sample_plan(),
            vec![RecordedPoint::new(12.0, 24.0)],
            SessionSettings::default(),
        );
        let json = snapshot.to_json_pretty().unwrap();
        assert!(json.contains("\"tiePoints\""));
        assert!(json.contains("\"manualOffsetIn\""));
        assert!(json.contains("\"ropeThicknessIn\""));
        let back: ExportSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.segments.len(), snapshot.segments.len());
        assert_eq!(back.recorded_points.len(), 1);
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export_file_name("A"));
        let snapshot =
            ExportSnapshot::new(sample_plan(), Vec::new(), SessionSettings::default());
        snapshot.write_file(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"entryPoint\""));
    }
}
