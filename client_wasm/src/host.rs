//! Platform-neutral host: owns the game and its loop driver
//!
//! The browser bindings forward raw events and timestamps here; everything
//! below is plain Rust so it can be tested natively.

use game_core::{
    Command, Config, ConfigError, EffectSink, Game, LoopControl, LoopDriver, RenderSink, Side,
    Snapshot,
};
use proto::{FrameState, SoundCue, ToCore, ToHost};

use crate::input::{handle_key_down, handle_key_up};
use crate::messages::{command_from_message, frame_state};

/// Keeps the most recent rendered frame
#[derive(Debug, Default)]
struct FrameCapture {
    last: Option<FrameState>,
}

impl RenderSink for FrameCapture {
    fn render(&mut self, snapshot: &Snapshot) {
        self.last = Some(frame_state(snapshot));
    }
}

/// Sound cues waiting for the page to play them
#[derive(Debug, Default)]
struct SoundQueue {
    cues: Vec<SoundCue>,
}

impl EffectSink for SoundQueue {
    fn paddle_hit(&mut self, _side: Side) {
        self.cues.push(SoundCue::PaddleHit);
    }

    fn scored(&mut self, _scorer: Side) {
        self.cues.push(SoundCue::Score);
    }

    fn game_over(&mut self, _winner: Side) {
        self.cues.push(SoundCue::GameOver);
    }
}

pub struct Host {
    game: Game,
    driver: LoopDriver,
    screen: FrameCapture,
    sounds: SoundQueue,
    last_ms: Option<f64>,
    running: bool,
}

impl Host {
    pub fn new(seed: u64) -> Self {
        Self::from_game(Game::new(seed))
    }

    pub fn with_config(config: Config, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::from_game(Game::with_config(config, seed)?))
    }

    fn from_game(game: Game) -> Self {
        Self {
            game,
            driver: LoopDriver::default(),
            screen: FrameCapture::default(),
            sounds: SoundQueue::default(),
            last_ms: None,
            running: true,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Whether the page should keep requesting animation frames
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true if the key did something
    pub fn key_down(&mut self, key: &str) -> bool {
        let command = handle_key_down(
            key,
            self.game.config.paddle_key_speed,
            self.game.is_game_over(),
        );
        self.dispatch(command)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        let command = handle_key_up(key);
        self.dispatch(command)
    }

    pub fn click(&mut self, x: f32, y: f32) {
        self.apply(Command::ClickAt { x, y });
    }

    pub fn set_power_ups(&mut self, enabled: bool) {
        self.apply(Command::TogglePowerUps { enabled });
    }

    pub fn restart(&mut self) {
        self.apply(Command::Restart);
    }

    /// Decode and apply a host message; unknown sides are ignored
    pub fn apply_message(&mut self, bytes: &[u8]) -> Result<(), postcard::Error> {
        let msg = ToCore::from_bytes(bytes)?;
        self.dispatch(command_from_message(msg));
        Ok(())
    }

    pub fn apply(&mut self, command: Command) {
        self.game.apply(command);
        if command == Command::Restart && !self.running {
            // Time spent on the game-over screen is not simulated
            self.driver.resume();
            self.last_ms = None;
            self.running = true;
        }
    }

    fn dispatch(&mut self, command: Option<Command>) -> bool {
        match command {
            Some(command) => {
                self.apply(command);
                true
            }
            None => false,
        }
    }

    /// Run one display frame at host time `now_ms`
    ///
    /// Returns false once the match is over and the loop should stop.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let elapsed = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => self.game.config.tick_dt,
        };
        self.last_ms = Some(now_ms);

        let control = self
            .driver
            .frame(&mut self.game, elapsed, &mut self.screen, &mut self.sounds);
        let was_running = self.running;
        self.running = control == LoopControl::Continue;
        if was_running && !self.running {
            log::info!("loop suspended");
        }
        self.running
    }

    pub fn last_frame(&self) -> Option<&FrameState> {
        self.screen.last.as_ref()
    }

    /// Latest frame as a ToHost message; the current state if nothing rendered yet
    pub fn frame_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        let frame = match &self.screen.last {
            Some(frame) => frame.clone(),
            None => frame_state(&self.game.snapshot()),
        };
        ToHost::Frame(frame).to_bytes()
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sounds.cues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Ball;
    use glam::Vec2;

    fn finish_match(host: &mut Host) {
        let game = &mut host.game;
        game.score.right = game.config.win_score - 1;
        let mut ball = game.world.get::<&mut Ball>(game.ball_entity()).unwrap();
        ball.pos = Vec2::new(11.0, 50.0);
        ball.vel = Vec2::new(-2.0, 0.0);
    }

    #[test]
    fn test_keys_drive_left_paddle() {
        let mut host = Host::new(1);
        assert!(host.key_down("w"));
        assert_eq!(host.game().paddle(Side::Left).unwrap().dy, -5.0);
        assert!(host.key_up("w"));
        assert_eq!(host.game().paddle(Side::Left).unwrap().dy, 0.0);
        assert!(!host.key_down("q"));
    }

    #[test]
    fn test_arrow_keys_drive_right_paddle_without_ai() {
        let config = Config {
            ai_opponent: false,
            ..Config::default()
        };
        let mut host = Host::with_config(config, 1).unwrap();

        assert!(host.key_down("ArrowUp"));
        assert_eq!(host.game().paddle(Side::Right).unwrap().dy, -5.0);
        assert!(host.key_up("ArrowUp"));
        assert_eq!(host.game().paddle(Side::Right).unwrap().dy, 0.0);
    }

    #[test]
    fn test_hot_seat_config_from_json() {
        let config = Config::from_json(r#"{ "ai_opponent": false }"#).unwrap();
        let mut host = Host::with_config(config, 1).unwrap();
        host.key_down("ArrowDown");
        host.frame(0.0);
        assert_eq!(host.game().paddle(Side::Right).unwrap().dy, 5.0);
    }

    #[test]
    fn test_one_tick_per_frame() {
        let mut host = Host::new(1);
        assert!(host.frame(1000.0));
        assert_eq!(host.game().time.tick, 1);

        // A slow frame still runs a single tick
        assert!(host.frame(1100.0));
        assert_eq!(host.game().time.tick, 2);
        assert_eq!(host.last_frame().unwrap().tick, 2);
    }

    #[test]
    fn test_game_over_stops_loop_and_queues_sounds() {
        let mut host = Host::new(1);
        finish_match(&mut host);

        assert!(!host.frame(0.0));
        assert!(!host.is_running());
        assert!(!host.frame(16.0), "Stays suspended on later frames");
        assert_eq!(host.drain_sounds(), vec![SoundCue::Score, SoundCue::GameOver]);
        assert!(host.drain_sounds().is_empty());
        assert!(host.last_frame().unwrap().game_over);
        assert_eq!(host.last_frame().unwrap().winner, Some(1));
    }

    #[test]
    fn test_restart_key_resumes_loop() {
        let mut host = Host::new(1);
        assert!(!host.key_down("r"), "No restart mid-match");
        finish_match(&mut host);
        host.frame(0.0);

        assert!(host.key_down("r"));
        assert!(host.is_running());
        assert!(!host.game().is_game_over());
        assert!(host.frame(60_000.0));
        assert_eq!(host.game().time.tick, 2, "Suspended time is not replayed");
    }

    #[test]
    fn test_apply_message() {
        let mut host = Host::new(1);
        let bytes = ToCore::TogglePowerUps { enabled: true }.to_bytes().unwrap();
        host.apply_message(&bytes).unwrap();
        assert!(host.game().power_ups_enabled);

        let bytes = ToCore::SetPaddleVelocity { side: 9, dy: 5.0 }.to_bytes().unwrap();
        assert!(host.apply_message(&bytes).is_ok());
        assert!(host.apply_message(&[0xff]).is_err());
    }

    #[test]
    fn test_frame_bytes_before_first_frame() {
        let host = Host::new(1);
        let bytes = host.frame_bytes().unwrap();
        match ToHost::from_bytes(&bytes).unwrap() {
            ToHost::Frame(frame) => assert_eq!(frame.tick, 0),
            other => panic!("unexpected message {:?}", other),
        }
    }
}
