//! Pure gameplay logic: one `GameplaySession` per episode, advanced once per
//! rendered frame. The session never touches engine objects; it consumes a
//! polled `FrameInput` and returns the commands (velocity writes, message
//! changes) the caller applies to the world. This keeps the whole state
//! machine testable without a graphics context.

/// Vertical speed applied by a flap, and reapplied every tick before the game
/// starts. World units per second, positive is up.
pub const FLAP_SPEED: f32 = 160.0;

/// Constant forward speed while airborne.
pub const FORWARD_SPEED: f32 = 50.0;

/// Downward drift applied while the bird is past the finish line.
pub const WIN_SINK_SPEED: f32 = -40.0;

/// Screen-space x (0 at the left edge of the play field) past which the run
/// counts as won.
pub const WIN_LINE_X: f32 = 750.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlightPhase {
    /// Waiting for the start key, gently floating.
    #[default]
    Idle,
    /// Airborne and under player control.
    Flying,
    /// Touched the ground or a column. Terminal.
    Crashed,
}

/// Everything the session needs to know about one frame, polled up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub start_pressed: bool,
    pub flap_pressed: bool,
    /// The bird overlapped the floor group this frame.
    pub touched_floor: bool,
    /// The bird overlapped the column group this frame.
    pub touched_column: bool,
    /// Bird position in screen space, 0 at the left edge.
    pub bird_x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    PreStart,
    InFlight,
    Crashed,
    Won,
}

impl StatusMessage {
    pub const fn text(self) -> &'static str {
        match self {
            Self::PreStart => "Instructions: Press space bar to start",
            Self::InFlight => {
                "Instructions: Press the \"^\" button to stay upright\nAnd don't hit the columns or ground"
            }
            Self::Crashed => "Oh no! You crashed!",
            Self::Won => "Congrats! You won!",
        }
    }

    /// Horizontal offset of the message box, in logical pixels from the left
    /// edge of the canvas.
    pub const fn left_offset(self) -> f32 {
        match self {
            Self::PreStart => 250.0,
            Self::InFlight => 170.0,
            Self::Crashed | Self::Won => 320.0,
        }
    }
}

/// A side effect requested by [`GameplaySession::step`]. Commands are applied
/// in order; when two messages are emitted in the same frame the later one
/// ends up on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Overwrite the bird's vertical speed (world units, positive up).
    SetVerticalSpeed(f32),
    /// Overwrite the bird's forward speed.
    SetForwardSpeed(f32),
    /// Replace the status message text and reposition it.
    ShowMessage(StatusMessage),
}

#[derive(Debug, Default)]
pub struct GameplaySession {
    phase: FlightPhase,
    has_landed: bool,
    has_bumped: bool,
    won: bool,
}

impl GameplaySession {
    pub const fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub const fn is_won(&self) -> bool {
        self.won
    }

    /// Advances the session by one frame and returns the commands to apply.
    ///
    /// The evaluation order matters and is part of the contract:
    /// start check, idle float, flap, forward speed, crash handling, finish
    /// line. In particular the finish-line message is emitted after the crash
    /// message, so a frame where both fire leaves the win text on screen.
    pub fn step(&mut self, input: FrameInput) -> Vec<Command> {
        let mut commands = Vec::new();

        // Collision flags latch for the rest of the episode.
        self.has_landed |= input.touched_floor;
        self.has_bumped |= input.touched_column;
        let crashed = self.has_landed || self.has_bumped;

        if self.phase == FlightPhase::Idle && input.start_pressed {
            self.phase = FlightPhase::Flying;
            commands.push(Command::ShowMessage(StatusMessage::InFlight));
        }

        if self.phase == FlightPhase::Idle {
            // Pre-start float: the flap impulse reapplied every tick keeps the
            // bird drifting upward against gravity until the game starts.
            commands.push(Command::SetVerticalSpeed(FLAP_SPEED));
        }

        if input.flap_pressed && !crashed {
            commands.push(Command::SetVerticalSpeed(FLAP_SPEED));
        }

        if crashed || self.phase == FlightPhase::Idle {
            commands.push(Command::SetForwardSpeed(0.0));
        } else {
            commands.push(Command::SetForwardSpeed(FORWARD_SPEED));
        }

        if crashed {
            self.phase = FlightPhase::Crashed;
            commands.push(Command::ShowMessage(StatusMessage::Crashed));
        }

        // The finish line is checked regardless of phase, crashed included.
        if input.bird_x > WIN_LINE_X {
            self.won = true;
            commands.push(Command::SetVerticalSpeed(WIN_SINK_SPEED));
            commands.push(Command::ShowMessage(StatusMessage::Won));
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_message(commands: &[Command]) -> Option<StatusMessage> {
        commands.iter().rev().find_map(|command| match command {
            Command::ShowMessage(message) => Some(*message),
            _ => None,
        })
    }

    fn forward_speed(commands: &[Command]) -> Option<f32> {
        commands.iter().rev().find_map(|command| match command {
            Command::SetForwardSpeed(speed) => Some(*speed),
            _ => None,
        })
    }

    #[test]
    fn start_press_transitions_to_flying_exactly_once() {
        let mut session = GameplaySession::default();
        assert_eq!(session.phase(), FlightPhase::Idle);

        let commands = session.step(FrameInput {
            start_pressed: true,
            ..FrameInput::default()
        });
        assert_eq!(session.phase(), FlightPhase::Flying);
        assert_eq!(last_message(&commands), Some(StatusMessage::InFlight));

        // Releasing the key must not drop back to Idle.
        let commands = session.step(FrameInput::default());
        assert_eq!(session.phase(), FlightPhase::Flying);
        assert_eq!(last_message(&commands), None);
    }

    #[test]
    fn idle_floats_upward_every_tick() {
        let mut session = GameplaySession::default();
        for _ in 0..3 {
            let commands = session.step(FrameInput::default());
            assert!(
                commands.contains(&Command::SetVerticalSpeed(FLAP_SPEED)),
                "idle frames must keep reapplying the lift impulse"
            );
            assert_eq!(forward_speed(&commands), Some(0.0));
        }
        assert_eq!(session.phase(), FlightPhase::Idle);
    }

    #[test]
    fn flying_holds_forward_speed_and_flaps_on_input() {
        let mut session = GameplaySession::default();
        session.step(FrameInput {
            start_pressed: true,
            ..FrameInput::default()
        });

        let coasting = session.step(FrameInput::default());
        assert_eq!(forward_speed(&coasting), Some(FORWARD_SPEED));
        assert!(!coasting.contains(&Command::SetVerticalSpeed(FLAP_SPEED)));

        let flapping = session.step(FrameInput {
            flap_pressed: true,
            ..FrameInput::default()
        });
        assert_eq!(forward_speed(&flapping), Some(FORWARD_SPEED));
        assert!(flapping.contains(&Command::SetVerticalSpeed(FLAP_SPEED)));
    }

    #[test]
    fn crash_zeroes_forward_speed_on_every_later_frame() {
        let mut session = GameplaySession::default();
        session.step(FrameInput {
            start_pressed: true,
            ..FrameInput::default()
        });
        session.step(FrameInput {
            touched_column: true,
            ..FrameInput::default()
        });
        assert_eq!(session.phase(), FlightPhase::Crashed);

        // The flag latched; further input must be ignored.
        for _ in 0..3 {
            let commands = session.step(FrameInput {
                flap_pressed: true,
                ..FrameInput::default()
            });
            assert_eq!(forward_speed(&commands), Some(0.0));
            assert!(!commands.contains(&Command::SetVerticalSpeed(FLAP_SPEED)));
            assert_eq!(last_message(&commands), Some(StatusMessage::Crashed));
        }
    }

    #[test]
    fn landing_latches_like_bumping() {
        let mut session = GameplaySession::default();
        session.step(FrameInput {
            start_pressed: true,
            ..FrameInput::default()
        });
        session.step(FrameInput {
            touched_floor: true,
            ..FrameInput::default()
        });
        assert_eq!(session.phase(), FlightPhase::Crashed);
    }

    #[test]
    fn finish_line_nudges_bird_down_and_shows_win_text() {
        let mut session = GameplaySession::default();
        session.step(FrameInput {
            start_pressed: true,
            ..FrameInput::default()
        });
        let commands = session.step(FrameInput {
            bird_x: WIN_LINE_X + 1.0,
            ..FrameInput::default()
        });
        assert!(session.is_won());
        assert!(commands.contains(&Command::SetVerticalSpeed(WIN_SINK_SPEED)));
        assert_eq!(last_message(&commands), Some(StatusMessage::Won));
    }

    #[test]
    fn crash_and_win_in_the_same_frame_leaves_win_text_on_screen() {
        let mut session = GameplaySession::default();
        session.step(FrameInput {
            start_pressed: true,
            ..FrameInput::default()
        });
        let commands = session.step(FrameInput {
            touched_column: true,
            bird_x: WIN_LINE_X + 1.0,
            ..FrameInput::default()
        });

        // Both messages run; command order makes the win text the last
        // writer, deliberately.
        let messages: Vec<_> = commands
            .iter()
            .filter_map(|command| match command {
                Command::ShowMessage(message) => Some(*message),
                _ => None,
            })
            .collect();
        assert_eq!(messages, vec![StatusMessage::Crashed, StatusMessage::Won]);
        assert_eq!(session.phase(), FlightPhase::Crashed);
        assert!(session.is_won());
    }
}
