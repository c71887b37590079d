//! Conversions between core types and wire messages

use game_core::{Command, PowerUpKind, Side, Snapshot};
use proto::{BallState, FrameState, PaddleState, PowerUpState, ToCore};

/// Turn an incoming message into a core command
///
/// Messages naming an unknown side are dropped.
pub fn command_from_message(msg: ToCore) -> Option<Command> {
    match msg {
        ToCore::SetPaddleVelocity { side, dy } => {
            Side::from_index(side).map(|side| Command::SetPaddleVelocity { side, dy })
        }
        ToCore::Restart => Some(Command::Restart),
        ToCore::TogglePowerUps { enabled } => Some(Command::TogglePowerUps { enabled }),
        ToCore::ClickAt { x, y } => Some(Command::ClickAt { x, y }),
    }
}

pub fn power_up_kind_id(kind: PowerUpKind) -> u8 {
    match kind {
        PowerUpKind::SpeedBoost => 0,
        PowerUpKind::Disappear => 1,
    }
}

/// Flatten a snapshot into its wire form
pub fn frame_state(snapshot: &Snapshot) -> FrameState {
    let paddle = |side| {
        let p = snapshot.paddle(side);
        PaddleState {
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
        }
    };
    FrameState {
        tick: snapshot.tick as u32,
        ball: BallState {
            x: snapshot.ball.x,
            y: snapshot.ball.y,
            radius: snapshot.ball.radius,
        },
        paddle_left: paddle(Side::Left),
        paddle_right: paddle(Side::Right),
        score_left: snapshot.score_left,
        score_right: snapshot.score_right,
        power_up: snapshot.power_up.map(|p| PowerUpState {
            x: p.x,
            y: p.y,
            radius: p.radius,
            kind: power_up_kind_id(p.kind),
        }),
        game_over: snapshot.game_over,
        winner: snapshot.winner.map(Side::index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Game;

    #[test]
    fn test_unknown_side_is_dropped() {
        assert_eq!(
            command_from_message(ToCore::SetPaddleVelocity { side: 7, dy: 5.0 }),
            None
        );
        assert_eq!(
            command_from_message(ToCore::SetPaddleVelocity { side: 1, dy: 5.0 }),
            Some(Command::SetPaddleVelocity {
                side: Side::Right,
                dy: 5.0
            })
        );
    }

    #[test]
    fn test_frame_state_from_new_game() {
        let game = Game::new(5);
        let frame = frame_state(&game.snapshot());

        assert_eq!(frame.tick, 0);
        assert_eq!(frame.ball.x, 400.0);
        assert_eq!(frame.paddle_right.x, 780.0);
        assert_eq!(frame.paddle_left.height, 100.0);
        assert_eq!(frame.power_up, None);
        assert_eq!(frame.winner, None);
    }
}
