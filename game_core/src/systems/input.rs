use hecs::World;

use crate::components::*;

/// Discrete input delivered by the host between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Set a paddle's velocity command (pixels per tick, negative is up)
    SetPaddleVelocity { side: Side, dy: f32 },
    /// Zero the scores and serve again
    Restart,
    /// Enable or disable power-up spawning
    TogglePowerUps { enabled: bool },
    /// Pointer click in field coordinates
    ClickAt { x: f32, y: f32 },
}

/// Apply a velocity command to the human-controlled paddle on `side`
///
/// Commands for AI-controlled paddles are ignored. Returns whether a paddle took it.
pub fn set_paddle_velocity(world: &mut World, side: Side, dy: f32) -> bool {
    let mut applied = false;
    for (_entity, paddle) in world
        .query_mut::<&mut Paddle>()
        .without::<&AiControlled>()
    {
        if paddle.side == side {
            paddle.dy = dy;
            applied = true;
        }
    }
    applied
}
