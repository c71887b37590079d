//! Browser client for the Pong core
//!
//! The page owns the canvas, audio and `requestAnimationFrame`; this crate runs
//! the simulation and hands back frames and sound cues.

pub mod host;
mod input;
pub mod messages;

pub use host::Host;

#[cfg(target_arch = "wasm32")]
pub use web::PongClient;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::Host;
    use game_core::Config;
    use proto::SoundCue;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    fn init_logging() {
        console_error_panic_hook::set_once();
        // Already initialised when a second client is created
        let _ = console_log::init_with_level(log::Level::Info);
    }

    fn random_seed() -> Result<u64, JsValue> {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf)
            .map_err(|e| JsValue::from_str(&format!("Failed to get random seed: {}", e)))?;
        Ok(u64::from_le_bytes(buf))
    }

    fn cue_name(cue: SoundCue) -> &'static str {
        match cue {
            SoundCue::PaddleHit => "paddle_hit",
            SoundCue::Score => "score",
            SoundCue::GameOver => "game_over",
        }
    }

    #[wasm_bindgen]
    pub struct PongClient {
        host: Host,
    }

    #[wasm_bindgen]
    impl PongClient {
        /// Start a match; without a seed one is drawn from the browser
        #[wasm_bindgen(constructor)]
        pub fn new(seed: Option<u64>) -> Result<PongClient, JsValue> {
            init_logging();
            let seed = match seed {
                Some(seed) => seed,
                None => random_seed()?,
            };
            Ok(PongClient {
                host: Host::new(seed),
            })
        }

        /// Start a match from a JSON config, e.g. `{"ai_opponent": false}` for hot-seat play
        pub fn with_config(json: &str, seed: Option<u64>) -> Result<PongClient, JsValue> {
            init_logging();
            let config = Config::from_json(json)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
            let seed = match seed {
                Some(seed) => seed,
                None => random_seed()?,
            };
            let host = Host::with_config(config, seed)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
            Ok(PongClient { host })
        }

        pub fn key_down(&mut self, key: &str) -> bool {
            self.host.key_down(key)
        }

        pub fn key_up(&mut self, key: &str) -> bool {
            self.host.key_up(key)
        }

        /// Forward a keyboard event, suppressing page scrolling for game keys
        pub fn key_event(&mut self, event: &KeyboardEvent, down: bool) {
            let key = event.key();
            let handled = if down {
                self.host.key_down(&key)
            } else {
                self.host.key_up(&key)
            };
            if handled {
                event.prevent_default();
            }
        }

        pub fn click(&mut self, x: f32, y: f32) {
            self.host.click(x, y);
        }

        /// Forward a click on the canvas, in canvas pixel coordinates
        pub fn mouse_event(&mut self, event: &MouseEvent) {
            self.host
                .click(event.offset_x() as f32, event.offset_y() as f32);
        }

        pub fn set_power_ups(&mut self, enabled: bool) {
            self.host.set_power_ups(enabled);
        }

        pub fn restart(&mut self) {
            self.host.restart();
        }

        pub fn is_running(&self) -> bool {
            self.host.is_running()
        }

        /// Run one animation frame; false means stop until restart
        pub fn frame(&mut self, now_ms: f64) -> bool {
            self.host.frame(now_ms)
        }

        pub fn frame_bytes(&self) -> Result<Vec<u8>, JsValue> {
            self.host
                .frame_bytes()
                .map_err(|e| JsValue::from_str(&format!("Failed to serialize frame: {:?}", e)))
        }

        /// Sound cue names since the last call, oldest first
        pub fn drain_sounds(&mut self) -> js_sys::Array {
            self.host
                .drain_sounds()
                .into_iter()
                .map(|cue| JsValue::from_str(cue_name(cue)))
                .collect()
        }

        pub fn apply_message(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
            self.host
                .apply_message(bytes)
                .map_err(|e| JsValue::from_str(&format!("Failed to decode message: {:?}", e)))
        }
    }
}
