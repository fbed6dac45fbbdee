//! Glyph outline path commands.
//!
//! A glyph outline is a flat sequence of [`PathCommand`]s in the order the
//! font emits them. Transforms never mutate a command list in place; they
//! always produce a new sequence.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// One command of a glyph outline path.
///
/// The serialized form uses the single-letter `type` tags of SVG path data
/// (`M`, `L`, `C`, `Q`, `Z`) so exported plans keep the conventional shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PathCommand {
    #[serde(rename = "M")]
    MoveTo { x: f64, y: f64 },
    #[serde(rename = "L")]
    LineTo { x: f64, y: f64 },
    #[serde(rename = "C")]
    CurveTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    #[serde(rename = "Q")]
    QuadTo { x1: f64, y1: f64, x: f64, y: f64 },
    #[serde(rename = "Z")]
    Close,
}

impl PathCommand {
    /// The command's endpoint, if it has one (`Close` does not).
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo { x, y }
            | PathCommand::LineTo { x, y }
            | PathCommand::CurveTo { x, y, .. }
            | PathCommand::QuadTo { x, y, .. } => Some(Point::new(x, y)),
            PathCommand::Close => None,
        }
    }

    /// Applies independent X and Y maps to every coordinate field, endpoint
    /// and control points alike.
    pub fn map<FX, FY>(&self, fx: &FX, fy: &FY) -> PathCommand
    where
        FX: Fn(f64) -> f64,
        FY: Fn(f64) -> f64,
    {
        match *self {
            PathCommand::MoveTo { x, y } => PathCommand::MoveTo { x: fx(x), y: fy(y) },
            PathCommand::LineTo { x, y } => PathCommand::LineTo { x: fx(x), y: fy(y) },
            PathCommand::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => PathCommand::CurveTo {
                x1: fx(x1),
                y1: fy(y1),
                x2: fx(x2),
                y2: fy(y2),
                x: fx(x),
                y: fy(y),
            },
            PathCommand::QuadTo { x1, y1, x, y } => PathCommand::QuadTo {
                x1: fx(x1),
                y1: fy(y1),
                x: fx(x),
                y: fy(y),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }

    /// The command shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> PathCommand {
        self.map(&|x| x + dx, &|y| y + dy)
    }

    /// Overwrites the endpoint coordinates that are given. Control points
    /// are left untouched; `Close` has no endpoint and ignores the call.
    pub fn set_end(&mut self, new_x: Option<f64>, new_y: Option<f64>) {
        match self {
            PathCommand::MoveTo { x, y }
            | PathCommand::LineTo { x, y }
            | PathCommand::CurveTo { x, y, .. }
            | PathCommand::QuadTo { x, y, .. } => {
                if let Some(v) = new_x {
                    *x = v;
                }
                if let Some(v) = new_y {
                    *y = v;
                }
            }
            PathCommand::Close => {}
        }
    }
}

/// A glyph outline as produced by the font collaborator: decomposed path
/// commands in font units (Y increasing downward, as fonts rasterize), plus
/// the font's unit scale and the glyph's advance width.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphOutline {
    pub commands: Vec<PathCommand>,
    pub units_per_em: u16,
    pub advance_width: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_applies_to_control_points() {
        let cmd = PathCommand::CurveTo {
            x1: 1.0,
            y1: 2.0,
            x2: 3.0,
            y2: 4.0,
            x: 5.0,
            y: 6.0,
        };
        let mapped = cmd.map(&|x| x * 2.0, &|y| -y);
        assert_eq!(
            mapped,
            PathCommand::CurveTo {
                x1: 2.0,
                y1: -2.0,
                x2: 6.0,
                y2: -4.0,
                x: 10.0,
                y: -6.0,
            }
        );
    }

    #[test]
    fn test_set_end_leaves_controls() {
        let mut cmd = PathCommand::QuadTo {
            x1: 1.0,
            y1: 1.0,
            x: 2.0,
            y: 2.0,
        };
        cmd.set_end(None, Some(4.0));
        assert_eq!(
            cmd,
            PathCommand::QuadTo {
                x1: 1.0,
                y1: 1.0,
                x: 2.0,
                y: 4.0,
            }
        );
    }

    #[test]
    fn test_serde_type_tags() {
        let json = serde_json::to_value(PathCommand::MoveTo { x: 1.0, y: 2.0 }).unwrap();
        assert_eq!(json["type"], "M");
        let json = serde_json::to_value(PathCommand::Close).unwrap();
        assert_eq!(json["type"], "Z");
    }
}
