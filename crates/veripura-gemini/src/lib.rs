//! # veripura-gemini
//!
//! A `TextGenerator` backed by the Gemini `generateContent` endpoint.
//!
//! [`client::GeminiClient`] performs one blocking POST per call with the
//! configured timeout. [`wire`] holds the request and response envelopes and
//! the translation of JSON Schema into Gemini's schema dialect.
//!
//! ```rust,ignore
//! use veripura_config::{api_key_from_env, Settings};
//! use veripura_gemini::GeminiClient;
//!
//! let client = GeminiClient::new(&Settings::default().generator, api_key_from_env());
//! ```

pub mod client;
pub mod wire;

pub use client::GeminiClient;
