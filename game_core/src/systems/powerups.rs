use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use crate::components::*;
use crate::geometry::circle_contains;
use crate::resources::*;
use crate::timers::{Scheduler, TimerAction};
use crate::Config;

/// Clicks come from the human player on the left; Disappear hides their opponent.
const CLICKER: Side = Side::Left;

/// The active power-up, if any
pub fn active_power_up(world: &World) -> Option<(Entity, PowerUp)> {
    world.query::<&PowerUp>().iter().next().map(|(e, p)| (e, *p))
}

/// Roll for a spawn this tick
pub fn try_spawn_power_up(
    world: &mut World,
    config: &Config,
    enabled: bool,
    rng: &mut GameRng,
    timers: &mut Scheduler,
    events: &mut Events,
) {
    let roll: f32 = rng.0.gen();
    if roll < config.power_up_spawn_chance && enabled {
        spawn_power_up(world, config, rng, timers, events);
    }
}

/// Place a power-up at a random spot and arm its expiry
///
/// Does nothing while another power-up is active.
pub fn spawn_power_up(
    world: &mut World,
    config: &Config,
    rng: &mut GameRng,
    timers: &mut Scheduler,
    events: &mut Events,
) -> Option<Entity> {
    if active_power_up(world).is_some() {
        return None;
    }

    let r = config.power_up_radius;
    let x = rng.0.gen::<f32>() * (config.field_width - r * 2.0) + r;
    let y = rng.0.gen::<f32>() * (config.field_height - r * 2.0) + r;
    let kind = if rng.0.gen_bool(0.5) {
        PowerUpKind::SpeedBoost
    } else {
        PowerUpKind::Disappear
    };
    let expiry = timers.schedule(
        config.ticks_for(config.power_up_lifetime),
        TimerAction::ExpirePowerUp,
    );

    let pos = Vec2::new(x, y);
    let entity = world.spawn((PowerUp {
        pos,
        radius: r,
        kind,
        expiry,
    },));
    log::debug!("power-up {:?} spawned at ({:.1}, {:.1})", kind, x, y);
    events.push(GameEvent::PowerUpSpawned { kind, pos });
    Some(entity)
}

/// Remove the power-up and cancel its expiry. Returns None if it was already gone.
fn deactivate(world: &mut World, timers: &mut Scheduler, entity: Entity) -> Option<PowerUp> {
    let power_up = *world.get::<&PowerUp>(entity).ok()?;
    world.despawn(entity).ok()?;
    timers.cancel(power_up.expiry);
    Some(power_up)
}

/// Take any active power-up off the field without applying it
pub fn clear_power_up(world: &mut World, timers: &mut Scheduler) -> bool {
    match active_power_up(world) {
        Some((entity, _)) => deactivate(world, timers, entity).is_some(),
        None => false,
    }
}

/// Paddles touching the power-up consume it for a flat speed boost
///
/// The boost ignores the power-up's kind; only clicks apply the kind. Hidden
/// paddles touch nothing.
pub fn check_power_up_contact(
    world: &mut World,
    config: &Config,
    timers: &mut Scheduler,
    events: &mut Events,
) {
    let Some((entity, power_up)) = active_power_up(world) else {
        return;
    };
    let bounds = power_up.bounds();
    let toucher = world
        .query::<&Paddle>()
        .iter()
        .find(|(_e, p)| !p.is_hidden() && p.bounds().intersects(&bounds))
        .map(|(_e, p)| p.side);

    if let Some(side) = toucher {
        if let Some(power_up) = deactivate(world, timers, entity) {
            boost_ball(world, config.speed_boost);
            log::debug!("{:?} paddle picked up power-up", side);
            events.push(GameEvent::PowerUpConsumed {
                kind: power_up.kind,
                by: Collector::Paddle(side),
            });
        }
    }
}

/// Collect the power-up if `point` is on it, applying its effect
///
/// Returns true if something was collected.
pub fn collect_at(
    world: &mut World,
    config: &Config,
    point: Vec2,
    timers: &mut Scheduler,
    events: &mut Events,
) -> bool {
    let Some((entity, power_up)) = active_power_up(world) else {
        return false;
    };
    if !circle_contains(power_up.pos, power_up.radius, point) {
        return false;
    }
    let Some(power_up) = deactivate(world, timers, entity) else {
        return false;
    };

    match power_up.kind {
        PowerUpKind::SpeedBoost => boost_ball(world, config.speed_boost),
        PowerUpKind::Disappear => hide_paddle(world, config, CLICKER.opponent(), timers, events),
    }
    log::debug!("power-up {:?} collected by click", power_up.kind);
    events.push(GameEvent::PowerUpConsumed {
        kind: power_up.kind,
        by: Collector::Click,
    });
    true
}

/// Raise the ball's base speed; the current velocity is left as is
fn boost_ball(world: &mut World, amount: f32) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.speed += amount;
    }
}

/// Collapse a paddle to zero height and schedule its restoration
fn hide_paddle(
    world: &mut World,
    config: &Config,
    side: Side,
    timers: &mut Scheduler,
    events: &mut Events,
) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side != side {
            continue;
        }
        // A newer hide supersedes the older restoration
        if let Some(previous) = paddle.restore.take() {
            timers.cancel(previous);
        }
        paddle.height = 0.0;
        paddle.restore = Some(timers.schedule(
            config.ticks_for(config.disappear_duration),
            TimerAction::RestorePaddle {
                side,
                height: config.paddle_height,
            },
        ));
        log::debug!("{:?} paddle hidden", side);
        events.push(GameEvent::PaddleHidden { side });
    }
}

/// Advance deferred actions by one tick and apply those that came due
pub fn fire_timers(world: &mut World, timers: &mut Scheduler, events: &mut Events) {
    for (token, action) in timers.advance() {
        match action {
            TimerAction::ExpirePowerUp => {
                let owner = active_power_up(world).filter(|(_e, p)| p.expiry == token);
                if let Some((entity, _)) = owner {
                    let _ = world.despawn(entity);
                    log::debug!("power-up expired");
                    events.push(GameEvent::PowerUpExpired);
                }
            }
            TimerAction::RestorePaddle { side, height } => {
                for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
                    if paddle.side == side && paddle.restore == Some(token) {
                        paddle.height = height;
                        paddle.restore = None;
                        log::debug!("{:?} paddle restored", side);
                        events.push(GameEvent::PaddleRestored { side });
                    }
                }
            }
        }
    }
}
