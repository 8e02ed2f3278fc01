//! Shake-to-roll die service.
//!
//! Accelerometer samples arrive from MQTT or a replay stream, pass through a
//! gravity filter and a debounced threshold test, and every accepted shake
//! rolls a six-sided die.

pub mod app;
pub mod config;
pub mod detector;
pub mod dice;
pub mod logger;
pub mod mqtt;
pub mod replay;
pub mod source;
pub mod types;
pub mod utils;

pub use app::ShakeDiceApp;
pub use config::{AppConfig, ConfigManager, DetectorConfig, GravityMode};
pub use detector::{GravityFilter, ShakeDetector};
pub use dice::{DieFace, DieRoller};
pub use types::{DataPoint, InputEvent, RollTrigger, SessionSummary, ShakeEvent};
