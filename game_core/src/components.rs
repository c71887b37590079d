use glam::Vec2;
use rand::Rng;

use crate::geometry::Aabb;
use crate::resources::GameRng;
use crate::timers::TimerToken;

/// Which end of the field a paddle (or player) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// 0 = left, 1 = right
    pub fn index(self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,      // Left edge
    pub y: f32,      // Top edge (clamped to field)
    pub width: f32,
    pub height: f32, // Zero while hidden by a Disappear power-up
    pub dy: f32,     // Velocity command, pixels per tick
    /// Pending height restoration, if the paddle is hidden
    pub restore: Option<TimerToken>,
}

impl Paddle {
    pub fn new(side: Side, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            side,
            x,
            y,
            width,
            height,
            dy: 0.0,
            restore: None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Collapsed to zero height by a Disappear power-up
    pub fn is_hidden(&self) -> bool {
        self.height <= 0.0
    }

    /// Strict vertical span test used by ball deflection
    pub fn spans_y(&self, y: f32) -> bool {
        y > self.y && y < self.y + self.height
    }
}

/// Marker for paddles steered by the AI controller
#[derive(Debug, Clone, Copy, Default)]
pub struct AiControlled;

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Horizontal speed applied on every paddle hit and serve
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            speed,
        }
    }

    /// Serve from `center`: each axis gets `speed` with an independent random sign
    pub fn reset(&mut self, center: Vec2, rng: &mut GameRng) {
        self.pos = center;
        let sx = if rng.0.gen_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if rng.0.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(self.speed * sx, self.speed * sy);
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Effect applied when a power-up is collected by click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    SpeedBoost,
    Disappear,
}

/// Power-up component. The entity exists only while the power-up is active.
#[derive(Debug, Clone, Copy)]
pub struct PowerUp {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
    /// Scheduled deactivation; cancelled on any early deactivation
    pub expiry: TimerToken,
}

impl PowerUp {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_circle(self.pos, self.radius)
    }
}
