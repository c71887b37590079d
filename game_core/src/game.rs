//! The single owned game state
//!
//! Everything the loop, input handlers and timers touch lives in [`Game`].

use glam::Vec2;
use hecs::{Component, Entity, World};

use crate::snapshot::{BallView, PaddleView, PowerUpView, Snapshot};
use crate::systems::*;
use crate::timers::Scheduler;
use crate::*;

pub struct Game {
    pub world: World,
    pub time: Time,
    pub config: Config,
    pub score: Score,
    pub state: MatchState,
    pub events: Events,
    pub rng: GameRng,
    pub timers: Scheduler,
    pub power_ups_enabled: bool,
    ball: Entity,
    paddles: [Entity; 2],
}

impl Game {
    /// New match with the default configuration
    pub fn new(seed: u64) -> Self {
        Self::build(Config::default(), seed)
    }

    pub fn with_config(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: Config, seed: u64) -> Self {
        let mut world = World::new();
        let mut rng = GameRng::new(seed);

        let left = create_paddle(&mut world, &config, Side::Left, false);
        let right = create_paddle(&mut world, &config, Side::Right, config.ai_opponent);

        let mut serve = Ball::new(
            config.center(),
            Vec2::ZERO,
            config.ball_radius,
            config.ball_speed_initial,
        );
        serve.reset(config.center(), &mut rng);
        let ball = world.spawn((serve,));

        log::info!("new game (seed {}, ai opponent: {})", seed, config.ai_opponent);

        Self {
            world,
            time: Time::new(config.tick_dt),
            config,
            score: Score::new(),
            state: MatchState::Playing,
            events: Events::new(),
            rng,
            timers: Scheduler::new(),
            power_ups_enabled: false,
            ball,
            paddles: [left, right],
        }
    }

    /// Advance the simulation by one tick. Does nothing once the match is over.
    pub fn tick(&mut self) {
        step(
            &mut self.world,
            &mut self.time,
            &self.config,
            &mut self.score,
            &mut self.state,
            &mut self.events,
            &mut self.rng,
            &mut self.timers,
            self.power_ups_enabled,
        );
    }

    /// Apply a host command immediately; its effect is visible on the next tick
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetPaddleVelocity { side, dy } => {
                set_paddle_velocity(&mut self.world, side, dy);
            }
            Command::Restart => self.restart(),
            Command::TogglePowerUps { enabled } => {
                if self.power_ups_enabled != enabled {
                    log::info!("power-ups {}", if enabled { "enabled" } else { "disabled" });
                }
                self.power_ups_enabled = enabled;
            }
            Command::ClickAt { x, y } => {
                if !self.state.is_game_over() {
                    collect_at(
                        &mut self.world,
                        &self.config,
                        Vec2::new(x, y),
                        &mut self.timers,
                        &mut self.events,
                    );
                }
            }
        }
    }

    /// Start the next match: scores to zero, ball served from the centre
    ///
    /// Ball speed, paddle positions and paddle heights carry over, including a
    /// paddle still hidden by Disappear. Any power-up on the field is removed.
    pub fn restart(&mut self) {
        self.score.clear();
        self.state = MatchState::Playing;
        clear_power_up(&mut self.world, &mut self.timers);

        let center = self.config.center();
        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            ball.reset(center, &mut self.rng);
        }
        log::info!("match restarted");
    }

    /// Full re-initialisation: base ball speed, centred full-height paddles,
    /// no pending timers
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        clear_power_up(&mut self.world, &mut self.timers);
        self.score.clear();
        self.state = MatchState::Playing;
        self.events.clear();

        let spawn_y = self.config.paddle_spawn_y();
        let height = self.config.paddle_height;
        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            paddle.y = spawn_y;
            paddle.height = height;
            paddle.dy = 0.0;
            paddle.restore = None;
        }

        let center = self.config.center();
        let speed = self.config.ball_speed_initial;
        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            ball.speed = speed;
            ball.reset(center, &mut self.rng);
        }
        log::info!("game reset");
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn winner(&self) -> Option<Side> {
        match self.state {
            MatchState::GameOver { winner } => Some(winner),
            MatchState::Playing => None,
        }
    }

    pub fn ball(&self) -> Option<Ball> {
        self.component(self.ball)
    }

    pub fn ball_entity(&self) -> Entity {
        self.ball
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.component(self.paddle_entity(side))
    }

    pub fn paddle_entity(&self, side: Side) -> Entity {
        self.paddles[side.index() as usize]
    }

    pub fn power_up(&self) -> Option<PowerUp> {
        active_power_up(&self.world).map(|(_e, p)| p)
    }

    /// Take every event recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn snapshot(&self) -> Snapshot {
        let ball = self
            .ball()
            .map(|b| BallView {
                x: b.pos.x,
                y: b.pos.y,
                radius: b.radius,
            })
            .unwrap_or_default();
        let paddle_view = |side| {
            self.paddle(side)
                .map(|p| PaddleView {
                    x: p.x,
                    y: p.y,
                    width: p.width,
                    height: p.height,
                })
                .unwrap_or_default()
        };

        Snapshot {
            tick: self.time.tick,
            ball,
            left: paddle_view(Side::Left),
            right: paddle_view(Side::Right),
            score_left: self.score.left,
            score_right: self.score.right,
            power_up: self.power_up().map(|p| PowerUpView {
                x: p.pos.x,
                y: p.pos.y,
                radius: p.radius,
                kind: p.kind,
            }),
            game_over: self.is_game_over(),
            winner: self.winner(),
        }
    }

    fn component<T: Component + Copy>(&self, entity: Entity) -> Option<T> {
        self.world.get::<&T>(entity).ok().map(|c| *c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let game = Game::new(1);
        let left = game.paddle(Side::Left).unwrap();
        let right = game.paddle(Side::Right).unwrap();
        let ball = game.ball().unwrap();

        assert_eq!((left.x, left.y), (10.0, 150.0));
        assert_eq!((right.x, right.y), (780.0, 150.0));
        assert_eq!(ball.pos, Vec2::new(400.0, 200.0));
        assert_eq!(ball.vel.x.abs(), 2.0);
        assert_eq!(ball.vel.y.abs(), 2.0);
        assert!(!game.power_ups_enabled, "Power-ups start disabled");
        assert!(game.world.get::<&AiControlled>(game.paddle_entity(Side::Right)).is_ok());
        assert!(game.world.get::<&AiControlled>(game.paddle_entity(Side::Left)).is_err());
    }

    #[test]
    fn test_with_config_validates() {
        let config = Config {
            win_score: 0,
            ..Config::default()
        };
        assert!(Game::with_config(config, 1).is_err());
    }

    #[test]
    fn test_two_player_mode_has_no_ai() {
        let config = Config {
            ai_opponent: false,
            ..Config::default()
        };
        let mut game = Game::with_config(config, 1).unwrap();
        game.apply(Command::SetPaddleVelocity {
            side: Side::Right,
            dy: 5.0,
        });
        assert_eq!(game.paddle(Side::Right).unwrap().dy, 5.0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = Game::new(3);
        game.score.left = 2;
        let snapshot = game.snapshot();

        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.score_left, 2);
        assert_eq!(snapshot.ball.x, 400.0);
        assert_eq!(snapshot.paddle(Side::Right).x, 780.0);
        assert!(snapshot.power_up.is_none());
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.winner, None);
    }

    #[test]
    fn test_toggle_power_ups() {
        let mut game = Game::new(3);
        game.apply(Command::TogglePowerUps { enabled: true });
        assert!(game.power_ups_enabled);
        game.apply(Command::TogglePowerUps { enabled: false });
        assert!(!game.power_ups_enabled);
    }
}
