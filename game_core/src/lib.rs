pub mod components;
pub mod config;
pub mod driver;
pub mod game;
pub mod geometry;
pub mod params;
pub mod resources;
pub mod snapshot;
pub mod systems;
pub mod timers;

pub use components::*;
pub use config::*;
pub use driver::*;
pub use game::Game;
pub use geometry::*;
pub use params::*;
pub use resources::*;
pub use snapshot::*;
pub use systems::input::Command;
pub use timers::{Scheduler, TimerAction, TimerToken};

use glam::Vec2;
use hecs::World;
use systems::*;

/// Run one deterministic tick of the Pong simulation
///
/// Nothing moves once the match is over; the tick that ends the match stops
/// right after scoring.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    config: &Config,
    score: &mut Score,
    state: &mut MatchState,
    events: &mut Events,
    rng: &mut GameRng,
    timers: &mut Scheduler,
    power_ups_enabled: bool,
) {
    if state.is_game_over() {
        return;
    }
    time.advance();

    // 1. Deferred actions that came due (power-up expiry, paddle restore)
    fire_timers(world, timers, events);

    // 2. Ball flight and wall bounce
    move_ball(world);
    bounce_walls(world, config);

    // 3. Paddle deflection
    check_paddle_hits(world, events);

    // 4. Ball left the field
    check_scoring(world, config, score, state, events, rng);
    if state.is_game_over() {
        return;
    }

    // 5. Paddles follow their velocity, then the AI picks the next one
    move_paddles(world, config);
    update_ai(world, config);

    // 6. Power-ups
    check_power_up_contact(world, config, timers, events);
    try_spawn_power_up(world, config, power_ups_enabled, rng, timers, events);
}

/// Helper to create a paddle entity at its side's spawn position
pub fn create_paddle(world: &mut World, config: &Config, side: Side, ai: bool) -> hecs::Entity {
    let paddle = Paddle::new(
        side,
        config.paddle_x(side),
        config.paddle_spawn_y(),
        config.paddle_width,
        config.paddle_height,
    );
    if ai {
        world.spawn((paddle, AiControlled))
    } else {
        world.spawn((paddle,))
    }
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, config: &Config, pos: Vec2, vel: Vec2) -> hecs::Entity {
    world.spawn((Ball::new(
        pos,
        vel,
        config.ball_radius,
        config.ball_speed_initial,
    ),))
}
