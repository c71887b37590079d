use crate::{Ball, Config, Paddle};
use hecs::World;

/// Apply paddle velocity commands and keep paddles on the field
pub fn move_paddles(world: &mut World, config: &Config) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.y += paddle.dy;
        paddle.y = config.clamp_paddle_y(paddle.y, paddle.height);
    }
}

/// Move ball based on velocity (one tick)
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos += ball.vel;
    }
}
