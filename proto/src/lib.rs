//! Message protocol between the Pong core and its host page
//!
//! Uses postcard for compact binary serialization. Sides travel as `u8`
//! (0 = left, 1 = right) so the host needs no knowledge of core types.

use postcard::{from_bytes, to_allocvec};

// ============================================================================
// ToCore Messages (Host to Core)
// ============================================================================

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ToCore {
    /// Paddle velocity in pixels per tick, negative is up
    SetPaddleVelocity { side: u8, dy: f32 },

    /// Zero the scores and serve again
    Restart,

    /// Power-up spawning on or off
    TogglePowerUps { enabled: bool },

    /// Pointer click in field coordinates
    ClickAt { x: f32, y: f32 },
}

// ============================================================================
// ToHost Messages (Core to Host)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BallState {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaddleState {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PowerUpState {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// 0 = speed boost, 1 = disappear
    pub kind: u8,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameState {
    pub tick: u32,
    pub ball: BallState,
    pub paddle_left: PaddleState,
    pub paddle_right: PaddleState,
    pub score_left: u8,
    pub score_right: u8,
    pub power_up: Option<PowerUpState>,
    pub game_over: bool,
    pub winner: Option<u8>, // 0 = left, 1 = right
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SoundCue {
    PaddleHit,
    Score,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ToHost {
    Frame(FrameState),
    Sound(SoundCue),
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl ToCore {
    /// Serialize ToCore message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize ToCore message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

impl ToHost {
    /// Serialize ToHost message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize ToHost message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}
