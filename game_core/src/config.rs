use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Side;
use crate::params::Params;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("power_up_spawn_chance must be within [0, 1], got {0}")]
    SpawnChance(f32),

    #[error("paddle height {paddle} does not fit a field of height {field}")]
    PaddleTooTall { paddle: f32, field: f32 },

    #[error("win_score must be at least 1")]
    WinScoreZero,
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_inset: f32,
    pub paddle_key_speed: f32,
    pub ai_paddle_speed: f32,
    /// When false the right paddle takes keyboard input instead of following the ball
    pub ai_opponent: bool,
    pub ball_radius: f32,
    pub ball_speed_initial: f32,
    pub win_score: u8,
    pub power_up_radius: f32,
    pub power_up_spawn_chance: f32,
    pub power_up_lifetime: f32,
    pub disappear_duration: f32,
    pub speed_boost: f32,
    pub tick_dt: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: Params::FIELD_WIDTH,
            field_height: Params::FIELD_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_inset: Params::PADDLE_INSET,
            paddle_key_speed: Params::PADDLE_KEY_SPEED,
            ai_paddle_speed: Params::AI_PADDLE_SPEED,
            ai_opponent: true,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            win_score: Params::WIN_SCORE,
            power_up_radius: Params::POWER_UP_RADIUS,
            power_up_spawn_chance: Params::POWER_UP_SPAWN_CHANCE,
            power_up_lifetime: Params::POWER_UP_LIFETIME,
            disappear_duration: Params::DISAPPEAR_DURATION,
            speed_boost: Params::SPEED_BOOST,
            tick_dt: Params::TICK_DT,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("power_up_radius", self.power_up_radius),
            ("tick_dt", self.tick_dt),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        if !(0.0..=1.0).contains(&self.power_up_spawn_chance) {
            return Err(ConfigError::SpawnChance(self.power_up_spawn_chance));
        }
        if self.paddle_height > self.field_height {
            return Err(ConfigError::PaddleTooTall {
                paddle: self.paddle_height,
                field: self.field_height,
            });
        }
        if self.win_score == 0 {
            return Err(ConfigError::WinScoreZero);
        }
        Ok(())
    }

    /// Left edge X of the paddle on the given side
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_inset,
            Side::Right => self.field_width - self.paddle_inset - self.paddle_width,
        }
    }

    /// Top edge Y of a vertically centred, full-height paddle
    pub fn paddle_spawn_y(&self) -> f32 {
        self.field_height / 2.0 - self.paddle_height / 2.0
    }

    /// Clamp paddle top edge so a paddle of `height` stays on the field
    pub fn clamp_paddle_y(&self, y: f32, height: f32) -> f32 {
        y.clamp(0.0, (self.field_height - height).max(0.0))
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }

    /// Number of ticks covering `secs` of simulation time
    pub fn ticks_for(&self, secs: f32) -> u64 {
        (secs / self.tick_dt).round().max(0.0) as u64
    }
}
