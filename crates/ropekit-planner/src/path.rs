//! Pure transforms over command sequences.

use ropekit_core::geometry::Bounds;
use ropekit_core::path::PathCommand;

use crate::contour::split_contours;
use crate::sample::SampledPath;

/// Applies independent X and Y coordinate maps to every command, preserving
/// command kinds and order.
pub fn transform_commands<FX, FY>(commands: &[PathCommand], fx: FX, fy: FY) -> Vec<PathCommand>
where
    FX: Fn(f64) -> f64,
    FY: Fn(f64) -> f64,
{
    commands.iter().map(|cmd| cmd.map(&fx, &fy)).collect()
}

/// Shifts every command by `(dx, dy)`.
pub fn translate_commands(commands: &[PathCommand], dx: f64, dy: f64) -> Vec<PathCommand> {
    commands.iter().map(|cmd| cmd.translated(dx, dy)).collect()
}

/// Measures the bounding box of a command sequence by flattening each
/// sub-path, so curve extrema are captured rather than control-point hulls.
/// Returns `None` for an empty or non-finite outline.
pub fn measure_commands_bounds(commands: &[PathCommand]) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for contour in split_contours(commands) {
        let sampled = SampledPath::from_commands(&contour);
        let n = ((sampled.length() * 8.0).ceil() as usize).max(16);
        let points = sampled.sample_evenly(n);
        if let Some(b) = Bounds::from_points(&points) {
            bounds = Some(match bounds {
                Some(acc) => acc.union(&b),
                None => b,
            });
        }
    }
    bounds.filter(Bounds::is_finite)
}

/// Renders commands as SVG path data with coordinates trimmed to at most
/// five decimals. This is the ready-to-stroke form handed to renderers.
pub fn commands_to_path_string(commands: &[PathCommand]) -> String {
    let mut parts = Vec::with_capacity(commands.len());
    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                parts.push(format!("M {} {}", format_coord(x), format_coord(y)));
            }
            PathCommand::LineTo { x, y } => {
                parts.push(format!("L {} {}", format_coord(x), format_coord(y)));
            }
            PathCommand::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                parts.push(format!(
                    "C {} {} {} {} {} {}",
                    format_coord(x1),
                    format_coord(y1),
                    format_coord(x2),
                    format_coord(y2),
                    format_coord(x),
                    format_coord(y)
                ));
            }
            PathCommand::QuadTo { x1, y1, x, y } => {
                parts.push(format!(
                    "Q {} {} {} {}",
                    format_coord(x1),
                    format_coord(y1),
                    format_coord(x),
                    format_coord(y)
                ));
            }
            PathCommand::Close => parts.push("Z".to_string()),
        }
    }
    parts.join(" ")
}

fn format_coord(value: f64) -> String {
    let mut s = format!("{:.5}", value);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_round_trip() {
        let cmds = vec![
            PathCommand::MoveTo { x: 1.5, y: 2.5 },
            PathCommand::QuadTo {
                x1: 2.0,
                y1: 3.0,
                x: 4.0,
                y: 5.0,
            },
            PathCommand::Close,
        ];
        let shifted = translate_commands(&cmds, 3.25, -1.75);
        let back = translate_commands(&shifted, -3.25, 1.75);
        for (a, b) in cmds.iter().zip(back.iter()) {
            match (a.end_point(), b.end_point()) {
                (Some(pa), Some(pb)) => assert!(pa.distance_to(&pb) < 1e-9),
                (None, None) => {}
                _ => panic!("command kinds diverged"),
            }
        }
    }

    #[test]
    fn test_transform_preserves_order_and_kind() {
        let cmds = vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::LineTo { x: 1.0, y: 0.0 },
            PathCommand::Close,
        ];
        let out = transform_commands(&cmds, |x| x * 2.0, |y| y + 1.0);
        assert_eq!(out[0], PathCommand::MoveTo { x: 0.0, y: 1.0 });
        assert_eq!(out[1], PathCommand::LineTo { x: 2.0, y: 1.0 });
        assert_eq!(out[2], PathCommand::Close);
    }

    #[test]
    fn test_measure_bounds_catches_curve_extrema() {
        // Quadratic bulging above its endpoints: the apex at t=0.5 sits at
        // y = 5, well above the endpoint hull.
        let cmds = vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::QuadTo {
                x1: 5.0,
                y1: 10.0,
                x: 10.0,
                y: 0.0,
            },
            PathCommand::Close,
        ];
        let b = measure_commands_bounds(&cmds).unwrap();
        assert!(b.max_y > 4.5 && b.max_y <= 5.0 + 1e-6);
        assert!((b.width - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_path_string_trims_decimals() {
        let cmds = vec![
            PathCommand::MoveTo { x: 1.0, y: 2.5 },
            PathCommand::LineTo {
                x: 3.123456,
                y: 0.0,
            },
            PathCommand::Close,
        ];
        assert_eq!(commands_to_path_string(&cmds), "M 1 2.5 L 3.12346 0 Z");
    }

    #[test]
    fn test_measure_bounds_empty() {
        assert!(measure_commands_bounds(&[]).is_none());
    }
}
