use crate::{AiControlled, Ball, Config, Paddle};
use hecs::World;

/// Steer AI paddles toward the ball's height
///
/// Purely reactive: up if the ball is above the paddle centre, down if below,
/// still on an exact match. There is no dead-zone, so the paddle jitters when
/// the two are within one step of each other.
pub fn update_ai(world: &mut World, config: &Config) {
    let ball_y = match world.query::<&Ball>().iter().next() {
        Some((_e, ball)) => ball.pos.y,
        None => return, // No ball in world
    };

    for (_entity, (paddle, _)) in world.query_mut::<(&mut Paddle, &AiControlled)>() {
        paddle.dy = ai_velocity(ball_y, paddle.center_y(), config.ai_paddle_speed);
    }
}

/// Velocity command for a paddle centred at `paddle_center` chasing `ball_y`
pub fn ai_velocity(ball_y: f32, paddle_center: f32, speed: f32) -> f32 {
    if ball_y < paddle_center {
        -speed
    } else if ball_y > paddle_center {
        speed
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, Side};
    use glam::Vec2;

    #[test]
    fn test_ai_velocity_three_way() {
        assert_eq!(ai_velocity(100.0, 200.0, 2.0), -2.0);
        assert_eq!(ai_velocity(300.0, 200.0, 2.0), 2.0);
        assert_eq!(ai_velocity(200.0, 200.0, 2.0), 0.0);
    }

    #[test]
    fn test_only_ai_paddles_are_steered() {
        let mut world = World::new();
        let config = Config::new();
        let human = create_paddle(&mut world, &config, Side::Left, false);
        let ai = create_paddle(&mut world, &config, Side::Right, true);
        create_ball(&mut world, &config, Vec2::new(400.0, 20.0), Vec2::new(2.0, 2.0));

        update_ai(&mut world, &config);

        assert_eq!(world.get::<&Paddle>(ai).unwrap().dy, -config.ai_paddle_speed);
        assert_eq!(world.get::<&Paddle>(human).unwrap().dy, 0.0);
    }

    #[test]
    fn test_ai_holds_when_aligned() {
        let mut world = World::new();
        let config = Config::new();
        let ai = create_paddle(&mut world, &config, Side::Right, true);
        world.get::<&mut Paddle>(ai).unwrap().dy = 2.0;
        create_ball(&mut world, &config, Vec2::new(400.0, 200.0), Vec2::new(2.0, 2.0));

        update_ai(&mut world, &config);

        assert_eq!(world.get::<&Paddle>(ai).unwrap().dy, 0.0);
    }
}
