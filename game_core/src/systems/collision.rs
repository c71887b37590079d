use crate::{Ball, Config, Events, GameEvent, Paddle, Side};
use hecs::World;

/// Reflect the ball off the top and bottom walls
///
/// Only the sign of `dy` changes; the ball is not pushed back inside.
pub fn bounce_walls(world: &mut World, config: &Config) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.top() < 0.0 || ball.bottom() > config.field_height {
            ball.vel.y = -ball.vel.y;
        }
    }
}

/// Deflect the ball off paddles
///
/// A hit sets the horizontal velocity to exactly `speed` pointing away from the
/// paddle, whatever the incoming direction.
pub fn check_paddle_hits(world: &mut World, events: &mut Events) {
    // Collect paddle data without holding borrows
    let paddles: Vec<Paddle> = world.query::<&Paddle>().iter().map(|(_e, p)| *p).collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        for paddle in &paddles {
            if !paddle.spans_y(ball.pos.y) {
                continue;
            }
            let hit = match paddle.side {
                Side::Left => ball.left() < paddle.x + paddle.width,
                Side::Right => ball.right() > paddle.x,
            };
            if !hit {
                continue;
            }

            ball.vel.x = match paddle.side {
                Side::Left => ball.speed,
                Side::Right => -ball.speed,
            };
            log::trace!("ball hit {:?} paddle at y={}", paddle.side, ball.pos.y);
            events.push(GameEvent::PaddleHit { side: paddle.side });
        }
    }
}
