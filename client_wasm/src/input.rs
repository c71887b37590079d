//! Keyboard input handling

use game_core::{Command, Side};

/// Paddle driven by a key, if any
pub fn paddle_key(key: &str) -> Option<(Side, f32)> {
    match key {
        "w" | "W" => Some((Side::Left, -1.0)),
        "s" | "S" => Some((Side::Left, 1.0)),
        "ArrowUp" => Some((Side::Right, -1.0)),
        "ArrowDown" => Some((Side::Right, 1.0)),
        _ => None,
    }
}

/// Handle key down event
///
/// `r` only restarts a finished match.
pub fn handle_key_down(key: &str, key_speed: f32, game_over: bool) -> Option<Command> {
    if let Some((side, dir)) = paddle_key(key) {
        return Some(Command::SetPaddleVelocity {
            side,
            dy: dir * key_speed,
        });
    }
    match key {
        "r" | "R" if game_over => Some(Command::Restart),
        _ => None,
    }
}

/// Handle key up event
pub fn handle_key_up(key: &str) -> Option<Command> {
    paddle_key(key).map(|(side, _)| Command::SetPaddleVelocity { side, dy: 0.0 })
}
