//! Contour extraction and analysis.
//!
//! A contour is one closed sub-path of a glyph outline. Every geometric
//! change invalidates all derived contour data, so [`GlyphPlan::refresh`]
//! recomputes the full contour list from the command stream; nothing is
//! patched incrementally.

use serde::{Deserialize, Serialize};
use tracing::trace;

use ropekit_core::geometry::{Bounds, Point};
use ropekit_core::path::PathCommand;

use crate::path::commands_to_path_string;
use crate::sample::SampledPath;

/// Samples per unit of arc length when polygonizing a contour.
const SAMPLES_PER_INCH: f64 = 8.0;
/// Floor on the polyline sample count so tiny contours stay well-formed.
const MIN_SAMPLES: usize = 16;

/// One closed sub-path with its derived routing data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contour {
    /// Sequential index within the glyph's command stream.
    pub index: usize,
    /// The contour's slice of the command stream.
    pub commands: Vec<PathCommand>,
    /// Ready-to-stroke SVG path data.
    pub path_string: String,
    /// Arc length of the contour.
    pub length: f64,
    /// Shoelace area over the closed sample polyline. The sign encodes
    /// winding direction; the magnitude ranks outer boundaries over holes.
    pub signed_area: f64,
    /// First `MoveTo` of the contour.
    pub start: Point,
    /// Assigned by the routing builder once the glyph's reference winding is
    /// known; always `false` straight out of extraction.
    pub is_hole: bool,
    /// Bounding box of the sample polyline, absent for empty contours.
    pub bounds: Option<Bounds>,
    /// Closed sample polyline: evenly spaced by arc length, first point
    /// repeated at the end.
    pub points: Vec<Point>,
}

impl Contour {
    /// A contour the routing builder can traverse: finite, non-negligible
    /// arc length.
    pub fn is_routable(&self) -> bool {
        self.length.is_finite() && self.length >= ropekit_core::constants::EPSILON
    }
}

/// Splits a command stream into contours. A new contour starts at each
/// `MoveTo`; a contour closes at `Close` or implicitly at the next `MoveTo`.
pub fn split_contours(commands: &[PathCommand]) -> Vec<Vec<PathCommand>> {
    let mut contours = Vec::new();
    let mut current: Vec<PathCommand> = Vec::new();
    for cmd in commands {
        match cmd {
            PathCommand::MoveTo { .. } => {
                if !current.is_empty() {
                    contours.push(std::mem::take(&mut current));
                }
                current.push(*cmd);
            }
            PathCommand::Close => {
                current.push(*cmd);
                contours.push(std::mem::take(&mut current));
            }
            _ => current.push(*cmd),
        }
    }
    if !current.is_empty() {
        contours.push(current);
    }
    contours
}

/// Analyzes one contour: renders its path string, polygonizes it, and
/// derives length, bounds, and signed area.
pub fn analyze_contour(commands: Vec<PathCommand>, index: usize) -> Contour {
    let path_string = commands_to_path_string(&commands);
    if path_string.is_empty() {
        return Contour {
            index,
            commands,
            path_string,
            length: 0.0,
            signed_area: 0.0,
            start: Point::new(0.0, 0.0),
            is_hole: false,
            bounds: None,
            points: Vec::new(),
        };
    }

    let sampled = SampledPath::from_commands(&commands);
    let length = sampled.length();
    let sample_count = ((length * SAMPLES_PER_INCH).ceil() as usize).max(MIN_SAMPLES);
    let mut points = sampled.sample_evenly(sample_count);
    let bounds = Bounds::from_points(&points);
    if let Some(first) = points.first().copied() {
        points.push(first);
    }

    let signed_area = signed_polygon_area(&points);
    let start = commands
        .iter()
        .find_map(|cmd| match *cmd {
            PathCommand::MoveTo { x, y } => Some(Point::new(x, y)),
            _ => None,
        })
        .or_else(|| points.first().copied())
        .unwrap_or(Point::new(0.0, 0.0));

    trace!(index, length, signed_area, "analyzed contour");

    Contour {
        index,
        commands,
        path_string,
        length,
        signed_area,
        start,
        is_hole: false,
        bounds,
        points,
    }
}

/// Extracts and analyzes all contours of a command stream.
pub fn extract_contours(commands: &[PathCommand]) -> Vec<Contour> {
    split_contours(commands)
        .into_iter()
        .enumerate()
        .map(|(index, contour_commands)| analyze_contour(contour_commands, index))
        .collect()
}

/// Shoelace formula over a closed polyline (last point repeats the first).
pub fn signed_polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for pair in points.windows(2) {
        area += pair[0].x * pair[1].y - pair[1].x * pair[0].y;
    }
    area / 2.0
}

/// One character's working state within a plan computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphPlan {
    #[serde(rename = "char")]
    pub ch: char,
    pub path_commands: Vec<PathCommand>,
    pub contours: Vec<Contour>,
}

impl GlyphPlan {
    pub fn new(ch: char, path_commands: Vec<PathCommand>) -> Self {
        let mut plan = Self {
            ch,
            path_commands,
            contours: Vec::new(),
        };
        plan.refresh();
        plan
    }

    /// Rebuilds all derived contour data from the current commands. Must be
    /// called after every geometric change.
    pub fn refresh(&mut self) {
        self.contours = extract_contours(&self.path_commands);
    }

    /// Replaces the commands and refreshes derived data.
    pub fn set_commands(&mut self, commands: Vec<PathCommand>) {
        self.path_commands = commands;
        self.refresh();
    }

    /// Translates the glyph and refreshes derived data.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if dx.abs() < ropekit_core::constants::EPSILON
            && dy.abs() < ropekit_core::constants::EPSILON
        {
            return;
        }
        self.path_commands = crate::path::translate_commands(&self.path_commands, dx, dy);
        self.refresh();
    }
}

/// Combined bounding box over every contour of every glyph.
pub fn combined_bounds(glyphs: &[GlyphPlan]) -> Option<Bounds> {
    let mut acc: Option<Bounds> = None;
    for glyph in glyphs {
        for contour in &glyph.contours {
            let Some(b) = contour.bounds else { continue };
            if !b.is_finite() {
                continue;
            }
            acc = Some(match acc {
                Some(existing) => existing.union(&b),
                None => b,
            });
        }
    }
    acc
}
