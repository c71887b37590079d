/// Game tuning parameters for Pong
///
/// Velocities are in pixels per tick; durations are in seconds of simulation time.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_INSET: f32 = 10.0; // Gap between paddle and side wall
    pub const PADDLE_KEY_SPEED: f32 = 5.0;
    pub const AI_PADDLE_SPEED: f32 = 2.0;

    // Ball
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED_INITIAL: f32 = 2.0;

    // Score
    pub const WIN_SCORE: u8 = 5; // First to 5 wins

    // Power-ups
    pub const POWER_UP_RADIUS: f32 = 15.0;
    pub const POWER_UP_SPAWN_CHANCE: f32 = 0.01; // Per tick
    pub const POWER_UP_LIFETIME: f32 = 5.0;
    pub const DISAPPEAR_DURATION: f32 = 2.0;
    pub const SPEED_BOOST: f32 = 2.0;

    // Timing
    pub const TICK_DT: f32 = 1.0 / 60.0; // ~60 Hz
    pub const MAX_FRAME_DT: f32 = 0.25; // Clamp to prevent large jumps
    pub const MAX_TICKS_PER_FRAME: u32 = 8;
}
