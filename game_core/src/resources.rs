use glam::Vec2;

use crate::components::{PowerUpKind, Side};

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,   // Length of one tick
    pub now: f32,  // Total elapsed simulation time
    pub tick: u64, // Ticks run so far
}

impl Time {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            now: 0.0,
            tick: 0,
        }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
        self.now += self.dt;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(crate::params::Params::TICK_DT)
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u8,  // Left player score
    pub right: u8, // Right player score
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award a point and return the scorer's new total
    pub fn increment(&mut self, side: Side) -> u8 {
        let counter = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *counter = counter.saturating_add(1);
        *counter
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchState {
    #[default]
    Playing,
    /// Terminal for the loop until an explicit restart
    GameOver { winner: Side },
}

impl MatchState {
    pub fn is_game_over(&self) -> bool {
        matches!(self, MatchState::GameOver { .. })
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Who took a power-up off the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collector {
    Paddle(Side),
    Click,
}

/// Something that happened during a tick (or a command) that the host may react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PaddleHit { side: Side },
    Scored { scorer: Side, score: Score },
    GameOver { winner: Side },
    PowerUpSpawned { kind: PowerUpKind, pos: Vec2 },
    PowerUpConsumed { kind: PowerUpKind, by: Collector },
    PowerUpExpired,
    PaddleHidden { side: Side },
    PaddleRestored { side: Side },
}

/// Events accumulated since the host last drained them
#[derive(Debug, Clone, Default)]
pub struct Events {
    pending: Vec<GameEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.pending.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_increment_left() {
        let mut score = Score::new();
        assert_eq!(score.left, 0);
        assert_eq!(score.increment(Side::Left), 1);
        assert_eq!(score.increment(Side::Left), 2);
        assert_eq!(score.right, 0);
    }

    #[test]
    fn test_score_increment_right() {
        let mut score = Score::new();
        score.increment(Side::Right);
        score.increment(Side::Right);
        assert_eq!(score.right, 2);
        assert_eq!(score.left, 0);
    }

    #[test]
    fn test_score_has_winner() {
        let mut score = Score::new();
        for _ in 0..5 {
            score.increment(Side::Right);
        }
        assert_eq!(score.has_winner(5), Some(Side::Right));
        assert_eq!(score.has_winner(5).map(Side::index), Some(1));
    }

    #[test]
    fn test_score_no_winner_below_threshold() {
        let mut score = Score::new();
        for _ in 0..4 {
            score.increment(Side::Left);
        }
        assert_eq!(score.has_winner(5), None, "No winner below threshold");
    }

    #[test]
    fn test_events_drain() {
        let mut events = Events::new();
        events.push(GameEvent::PaddleHit { side: Side::Left });
        events.push(GameEvent::PowerUpExpired);

        let drained = events.drain();
        assert_eq!(drained.len(), 2);
        assert!(events.is_empty());
    }

    #[test]
    fn test_time_advance() {
        let mut time = Time::new(0.5);
        time.advance();
        time.advance();
        assert_eq!(time.tick, 2);
        assert_eq!(time.now, 1.0);
    }
}
