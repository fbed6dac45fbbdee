//! Pen routing over lit contours and blackout connectors.
//!
//! A single virtual pen starts at the power entry point, traverses every
//! routable contour of each glyph (outer boundaries first, then holes, each
//! group largest area first), and returns to the entry point. The emitted
//! segment order is the physical wiring sequence.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ropekit_core::constants::{entry_point, EPSILON};
use ropekit_core::geometry::{polyline_length, Bounds, Point};
use ropekit_core::path::PathCommand;

use crate::contour::{Contour, GlyphPlan};

/// Role of a lit segment within its glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LitClass {
    /// Outer boundary traversal.
    Outer,
    /// Hole traversal.
    Inner,
}

/// Role of a blackout connector within the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlackoutClass {
    /// First connector of the route, leaving the power feed.
    Entry,
    /// Jump between outer contours.
    Travel,
    /// Jump into a hole.
    InnerJump,
    /// Final connector back to the power feed.
    Return,
}

/// One element of the wiring sequence: either a lit contour traversal or a
/// dark connector between two points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Segment {
    #[serde(rename = "lit", rename_all = "camelCase")]
    Lit {
        #[serde(rename = "char")]
        ch: char,
        glyph_index: usize,
        contour_index: usize,
        length: f64,
        path_commands: Vec<PathCommand>,
        path_string: String,
        classification: LitClass,
        points: Vec<Point>,
        bounds: Option<Bounds>,
        start_point: Point,
    },
    #[serde(rename = "blackout", rename_all = "camelCase")]
    Blackout {
        #[serde(rename = "char")]
        ch: char,
        glyph_index: usize,
        contour_index: Option<usize>,
        length: f64,
        points: Vec<Point>,
        from: Point,
        to: Point,
        classification: BlackoutClass,
        target: Point,
    },
}

impl Segment {
    pub fn length(&self) -> f64 {
        match self {
            Segment::Lit { length, .. } | Segment::Blackout { length, .. } => *length,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Segment::Lit { .. })
    }
}

/// Per-letter rope accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterMetrics {
    #[serde(rename = "char")]
    pub ch: char,
    pub lit_length: f64,
    pub blackout_length: f64,
    pub segment_count: usize,
}

/// Whole-plan rope accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetrics {
    pub total_lit: f64,
    pub total_blackout: f64,
    pub total_overall: f64,
}

/// Result of routing all glyphs.
#[derive(Debug, Clone)]
pub struct Routing {
    pub segments: Vec<Segment>,
    pub letters: Vec<LetterMetrics>,
    pub metrics: PlanMetrics,
}

/// A straight or one-bend blackout polyline between two points.
#[derive(Debug, Clone)]
pub struct Connector {
    pub from: Point,
    pub to: Point,
    pub points: Vec<Point>,
    pub length: f64,
}

/// Builds a connector between two points, or `None` when they coincide.
/// Points sharing an X or Y coordinate (within epsilon) connect straight;
/// anything else takes an axis-aligned dog-leg bending at `(from.x, to.y)`.
pub fn build_connector(from: Point, to: Point) -> Option<Connector> {
    if from.almost_eq(&to) {
        return None;
    }
    let mut points = vec![from];
    if !ropekit_core::geometry::nearly_equal(from.x, to.x)
        && !ropekit_core::geometry::nearly_equal(from.y, to.y)
    {
        points.push(Point::new(from.x, to.y));
    }
    points.push(to);
    let length = polyline_length(&points);
    Some(Connector {
        from,
        to,
        points,
        length,
    })
}

/// Chooses where the pen enters a contour: the topmost sample point, ties
/// broken by horizontal proximity to the pen's current X. Deterministic
/// regardless of the contour's orientation in the source outline.
pub fn choose_start_point(contour: &Contour, preferred_x: f64) -> Point {
    let points = &contour.points;
    if points.is_empty() {
        return contour.start;
    }
    // Skip the closing duplicate so it cannot win the tie-break twice.
    let limit = if points.len() > 1 {
        points.len() - 1
    } else {
        points.len()
    };
    let mut best_index = 0;
    let mut best_y = f64::NEG_INFINITY;
    let mut best_distance = f64::INFINITY;
    for (i, pt) in points[..limit].iter().enumerate() {
        if !pt.y.is_finite() {
            continue;
        }
        if pt.y > best_y + EPSILON {
            best_y = pt.y;
            best_index = i;
            best_distance = (pt.x - preferred_x).abs();
        } else if (pt.y - best_y).abs() <= EPSILON {
            let dist = (pt.x - preferred_x).abs();
            if dist < best_distance {
                best_index = i;
                best_distance = dist;
            }
        }
    }
    points[best_index]
}

/// Routes every glyph into one continuous wiring sequence.
///
/// Hole classification happens here: the contour with the largest `|area|`
/// sets the reference winding sign for its glyph, and contours winding the
/// other way are holes. The flags are written back onto the glyph's contours
/// so serialized plans carry them.
pub fn build_routing(glyphs: &mut [GlyphPlan]) -> Routing {
    let entry = entry_point();
    let mut segments: Vec<Segment> = Vec::new();
    let mut letters: Vec<LetterMetrics> = Vec::new();
    let mut pen = entry;
    let mut total_lit = 0.0;
    let mut total_blackout = 0.0;

    for (glyph_index, glyph) in glyphs.iter_mut().enumerate() {
        if glyph.contours.is_empty() {
            letters.push(LetterMetrics {
                ch: glyph.ch,
                lit_length: 0.0,
                blackout_length: 0.0,
                segment_count: 0,
            });
            continue;
        }

        // Rank by |area| descending; the biggest contour defines the
        // reference winding.
        let mut order: Vec<usize> = (0..glyph.contours.len()).collect();
        order.sort_by(|&a, &b| {
            glyph.contours[b]
                .signed_area
                .abs()
                .partial_cmp(&glyph.contours[a].signed_area.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let reference_sign = sign_or_positive(glyph.contours[order[0]].signed_area);
        for idx in &order {
            let contour = &mut glyph.contours[*idx];
            contour.is_hole = sign_or_zero(contour.signed_area) != reference_sign;
        }

        let outer: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&i| !glyph.contours[i].is_hole)
            .collect();
        let inner: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&i| glyph.contours[i].is_hole)
            .collect();

        let mut lit_length = 0.0;
        let mut blackout_length = 0.0;
        let mut segment_count = 0;

        for &idx in outer.iter().chain(inner.iter()) {
            let contour = &glyph.contours[idx];
            let start_point = choose_start_point(contour, pen.x);
            if !contour.is_routable() {
                continue;
            }

            if let Some(connector) = build_connector(pen, start_point) {
                let classification = if segments.is_empty() {
                    BlackoutClass::Entry
                } else if contour.is_hole {
                    BlackoutClass::InnerJump
                } else {
                    BlackoutClass::Travel
                };
                blackout_length += connector.length;
                total_blackout += connector.length;
                segment_count += 1;
                pen = connector.to;
                segments.push(Segment::Blackout {
                    ch: glyph.ch,
                    glyph_index,
                    contour_index: Some(idx),
                    length: connector.length,
                    points: connector.points,
                    from: connector.from,
                    to: connector.to,
                    classification,
                    target: start_point,
                });
            }

            lit_length += contour.length;
            total_lit += contour.length;
            segment_count += 1;
            segments.push(Segment::Lit {
                ch: glyph.ch,
                glyph_index,
                contour_index: idx,
                length: contour.length,
                path_commands: contour.commands.clone(),
                path_string: contour.path_string.clone(),
                classification: if contour.is_hole {
                    LitClass::Inner
                } else {
                    LitClass::Outer
                },
                points: contour.points.clone(),
                bounds: contour.bounds,
                start_point,
            });
            // The contour is closed; traversing it brings the pen back to
            // where it entered.
            pen = start_point;
        }

        if !pen.almost_eq(&entry) {
            if let Some(connector) = build_connector(pen, entry) {
                blackout_length += connector.length;
                total_blackout += connector.length;
                segment_count += 1;
                pen = connector.to;
                segments.push(Segment::Blackout {
                    ch: glyph.ch,
                    glyph_index,
                    contour_index: None,
                    length: connector.length,
                    points: connector.points,
                    from: connector.from,
                    to: connector.to,
                    classification: BlackoutClass::Return,
                    target: entry,
                });
            }
        }

        letters.push(LetterMetrics {
            ch: glyph.ch,
            lit_length,
            blackout_length,
            segment_count,
        });
    }

    debug!(
        segments = segments.len(),
        total_lit, total_blackout, "routing built"
    );

    Routing {
        segments,
        letters,
        metrics: PlanMetrics {
            total_lit,
            total_blackout,
            total_overall: total_lit + total_blackout,
        },
    }
}

fn sign_or_positive(value: f64) -> i8 {
    if value < 0.0 {
        -1
    } else {
        1
    }
}

fn sign_or_zero(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
