//! Glyph outline recording.

use rusttype::OutlineBuilder;

use ropekit_core::path::PathCommand;

/// Records the outline callbacks of a positioned glyph as a command
/// sequence. Coordinates arrive already scaled and positioned, y-down.
pub struct OutlineRecorder {
    commands: Vec<PathCommand>,
}

impl OutlineRecorder {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn into_commands(self) -> Vec<PathCommand> {
        self.commands
    }
}

impl Default for OutlineRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineBuilder for OutlineRecorder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::MoveTo {
            x: f64::from(x),
            y: f64::from(y),
        });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo {
            x: f64::from(x),
            y: f64::from(y),
        });
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::QuadTo {
            x1: f64::from(x1),
            y1: f64::from(y1),
            x: f64::from(x),
            y: f64::from(y),
        });
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::CurveTo {
            x1: f64::from(x1),
            y1: f64::from(y1),
            x2: f64::from(x2),
            y2: f64::from(y2),
            x: f64::from(x),
            y: f64::from(y),
        });
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_preserves_callback_order() {
        let mut recorder = OutlineRecorder::new();
        recorder.move_to(1.0, 2.0);
        recorder.line_to(3.0, 2.0);
        recorder.quad_to(4.0, 2.0, 4.0, 4.0);
        recorder.curve_to(4.0, 5.0, 3.0, 6.0, 1.0, 6.0);
        recorder.close();

        let commands = recorder.into_commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], PathCommand::MoveTo { x: 1.0, y: 2.0 });
        assert!(matches!(commands[2], PathCommand::QuadTo { .. }));
        assert!(matches!(commands[3], PathCommand::CurveTo { .. }));
        assert_eq!(commands[4], PathCommand::Close);
    }
}
