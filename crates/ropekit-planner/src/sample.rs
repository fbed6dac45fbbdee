//! Arc-length sampling of outline paths.
//!
//! Lines contribute their exact length; quadratic and cubic Bezier segments
//! are flattened by fixed-step De Casteljau evaluation. The flattened
//! polyline with cumulative lengths supports point-at-length queries and
//! uniform re-sampling, which is all the rest of the pipeline needs.

use ropekit_core::geometry::Point;
use ropekit_core::path::PathCommand;

/// Parameter steps used to flatten one Bezier segment.
const CURVE_STEPS: usize = 32;

/// A path flattened to a polyline with cumulative arc lengths.
#[derive(Debug, Clone)]
pub struct SampledPath {
    points: Vec<Point>,
    cumulative: Vec<f64>,
    length: f64,
}

impl SampledPath {
    /// Flattens a command sequence. `Close` returns to the start of the
    /// current sub-path; a `MoveTo` mid-sequence simply jumps the cursor
    /// (the contour extractor splits sub-paths before sampling, so one
    /// `SampledPath` normally covers a single contour).
    pub fn from_commands(commands: &[PathCommand]) -> Self {
        let mut points: Vec<Point> = Vec::new();
        let mut current = Point::new(0.0, 0.0);
        let mut sub_path_start = Point::new(0.0, 0.0);

        for cmd in commands {
            match *cmd {
                PathCommand::MoveTo { x, y } => {
                    current = Point::new(x, y);
                    sub_path_start = current;
                    if points.is_empty() {
                        points.push(current);
                    }
                }
                PathCommand::LineTo { x, y } => {
                    let p = Point::new(x, y);
                    push_point(&mut points, current, p);
                    current = p;
                }
                PathCommand::QuadTo { x1, y1, x, y } => {
                    let c = Point::new(x1, y1);
                    let end = Point::new(x, y);
                    for i in 1..=CURVE_STEPS {
                        let t = i as f64 / CURVE_STEPS as f64;
                        let p = quad_point(current, c, end, t);
                        push_point(&mut points, current, p);
                    }
                    current = end;
                }
                PathCommand::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    let c1 = Point::new(x1, y1);
                    let c2 = Point::new(x2, y2);
                    let end = Point::new(x, y);
                    for i in 1..=CURVE_STEPS {
                        let t = i as f64 / CURVE_STEPS as f64;
                        let p = cubic_point(current, c1, c2, end, t);
                        push_point(&mut points, current, p);
                    }
                    current = end;
                }
                PathCommand::Close => {
                    push_point(&mut points, current, sub_path_start);
                    current = sub_path_start;
                }
            }
        }

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        let mut prev: Option<Point> = None;
        for p in &points {
            if let Some(q) = prev {
                total += q.distance_to(p);
            }
            cumulative.push(total);
            prev = Some(*p);
        }

        Self {
            points,
            cumulative,
            length: total,
        }
    }

    /// Total arc length of the flattened path.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Point at the given arc length, clamped to `[0, length]`.
    pub fn point_at_length(&self, s: f64) -> Point {
        if self.points.is_empty() {
            return Point::new(0.0, 0.0);
        }
        if self.points.len() == 1 || self.length <= 0.0 {
            return self.points[0];
        }
        let s = s.clamp(0.0, self.length);
        // First index whose cumulative length reaches s.
        let idx = self.cumulative.partition_point(|&c| c < s);
        if idx == 0 {
            return self.points[0];
        }
        let (a, b) = (self.points[idx - 1], self.points[idx]);
        let (ca, cb) = (self.cumulative[idx - 1], self.cumulative[idx]);
        let span = cb - ca;
        if span <= 0.0 {
            return b;
        }
        let t = (s - ca) / span;
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }

    /// `n + 1` points evenly spaced by arc length from start to end.
    pub fn sample_evenly(&self, n: usize) -> Vec<Point> {
        let n = n.max(1);
        (0..=n)
            .map(|i| self.point_at_length(i as f64 / n as f64 * self.length))
            .collect()
    }
}

fn push_point(points: &mut Vec<Point>, from: Point, to: Point) {
    if points.is_empty() {
        points.push(from);
    }
    points.push(to);
}

/// De Casteljau evaluation of a quadratic Bezier at parameter `t`.
pub fn quad_point(p0: Point, c: Point, p1: Point, t: f64) -> Point {
    let a = lerp(p0, c, t);
    let b = lerp(c, p1, t);
    lerp(a, b, t)
}

/// De Casteljau evaluation of a cubic Bezier at parameter `t`.
pub fn cubic_point(p0: Point, c1: Point, c2: Point, p1: Point, t: f64) -> Point {
    let a = lerp(p0, c1, t);
    let b = lerp(c1, c2, t);
    let c = lerp(c2, p1, t);
    let d = lerp(a, b, t);
    let e = lerp(b, c, t);
    lerp(d, e, t)
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}
