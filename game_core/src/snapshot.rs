use crate::components::{PowerUpKind, Side};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub kind: PowerUpKind,
}

/// Read-only copy of everything a renderer draws
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub ball: BallView,
    pub left: PaddleView,
    pub right: PaddleView,
    pub score_left: u8,
    pub score_right: u8,
    pub power_up: Option<PowerUpView>,
    pub game_over: bool,
    pub winner: Option<Side>,
}

impl Snapshot {
    pub fn paddle(&self, side: Side) -> &PaddleView {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}
