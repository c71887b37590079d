//! Game loop driver
//!
//! The host calls [`LoopDriver::frame`] from its display-refresh callback.
//! The driver decides how many ticks to run, forwards side effects and hands a
//! snapshot to the renderer, then tells the host whether to schedule another
//! frame.

use crate::game::Game;
use crate::params::Params;
use crate::resources::GameEvent;
use crate::snapshot::Snapshot;
use crate::{Collector, PowerUpKind, Side};

/// Receives one read-only snapshot per frame
pub trait RenderSink {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Fire-and-forget notifications (sounds, UI flashes); none affect the game
pub trait EffectSink {
    fn paddle_hit(&mut self, _side: Side) {}
    fn scored(&mut self, _scorer: Side) {}
    fn game_over(&mut self, _winner: Side) {}
    fn power_up_spawned(&mut self, _kind: PowerUpKind) {}
    fn power_up_consumed(&mut self, _kind: PowerUpKind, _by: Collector) {}
    fn power_up_expired(&mut self) {}
}

/// Sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _snapshot: &Snapshot) {}
}

impl EffectSink for NullSink {}

/// How simulation ticks relate to rendered frames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Pacing {
    /// One tick per frame, whatever the frame took
    #[default]
    PerFrame,
    /// Whole ticks of `tick_dt` for the elapsed time, at most `max_ticks` per frame
    FixedStep { max_ticks: u32 },
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    /// The match is over; stop requesting frames until a restart
    Suspend,
}

#[derive(Debug, Clone, Default)]
pub struct LoopDriver {
    pacing: Pacing,
    accumulator: f32,
    frames: u64,
}

impl LoopDriver {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            accumulator: 0.0,
            frames: 0,
        }
    }

    /// Fixed-step pacing with the default catch-up limit
    pub fn fixed_step() -> Self {
        Self::new(Pacing::FixedStep {
            max_ticks: Params::MAX_TICKS_PER_FRAME,
        })
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Forget accumulated time, e.g. after the loop was suspended
    pub fn resume(&mut self) {
        self.accumulator = 0.0;
    }

    /// Run one frame: tick, dispatch effects, render
    pub fn frame<R, E>(
        &mut self,
        game: &mut Game,
        elapsed: f32,
        render: &mut R,
        effects: &mut E,
    ) -> LoopControl
    where
        R: RenderSink + ?Sized,
        E: EffectSink + ?Sized,
    {
        self.frames += 1;

        for _ in 0..self.ticks_for_frame(game.config.tick_dt, elapsed) {
            if game.is_game_over() {
                break;
            }
            game.tick();
        }
        if game.is_game_over() {
            self.accumulator = 0.0;
        }

        dispatch(game.drain_events(), effects);
        render.render(&game.snapshot());

        if game.is_game_over() {
            LoopControl::Suspend
        } else {
            LoopControl::Continue
        }
    }

    fn ticks_for_frame(&mut self, tick_dt: f32, elapsed: f32) -> u32 {
        match self.pacing {
            Pacing::PerFrame => 1,
            Pacing::FixedStep { max_ticks } => {
                self.accumulator += elapsed.clamp(0.0, Params::MAX_FRAME_DT);
                let mut ticks = 0;
                while self.accumulator >= tick_dt && ticks < max_ticks {
                    self.accumulator -= tick_dt;
                    ticks += 1;
                }
                // Drop time we could not catch up on
                if ticks == max_ticks {
                    self.accumulator = self.accumulator.min(tick_dt);
                }
                ticks
            }
        }
    }
}

/// Forward game events to an effect sink
pub fn dispatch<E: EffectSink + ?Sized>(events: Vec<GameEvent>, effects: &mut E) {
    for event in events {
        match event {
            GameEvent::PaddleHit { side } => effects.paddle_hit(side),
            GameEvent::Scored { scorer, .. } => effects.scored(scorer),
            GameEvent::GameOver { winner } => effects.game_over(winner),
            GameEvent::PowerUpSpawned { kind, .. } => effects.power_up_spawned(kind),
            GameEvent::PowerUpConsumed { kind, by } => effects.power_up_consumed(kind, by),
            GameEvent::PowerUpExpired => effects.power_up_expired(),
            GameEvent::PaddleHidden { .. } | GameEvent::PaddleRestored { .. } => {}
        }
    }
}
