//! # veripura-config
//!
//! Settings for the VeriPura binaries.
//!
//! Every field has a default, so an empty or missing settings file is valid.
//! `Settings::from_toml_str` and `Settings::from_file` parse and validate in
//! one step; both return `ConfigError` on failure.
//!
//! ```toml
//! [generator]
//! api_base = "https://generativelanguage.googleapis.com/v1beta"
//! model = "gemini-3-flash-preview"
//! timeout_secs = 60
//!
//! [playback]
//! step_delay_ms = 1200
//!
//! [routing]
//! hitm_threshold = 85.0
//! ```

pub mod credentials;
pub mod settings;

pub use credentials::{api_key_from_env, ApiKey};
pub use settings::{GeneratorSettings, PlaybackSettings, RoutingSettings, Settings};
