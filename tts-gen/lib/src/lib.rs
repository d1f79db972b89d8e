//! tts-gen
//!
//! Text-to-MP3 over the Google Translate text-to-speech endpoint.
//!
//! ## Features
//!
//! - **Native gTTS client**: speaks the `batchexecute` protocol directly over
//!   `reqwest`, no Python runtime required
//! - **Long text support**: text is split into request-sized chunks and the
//!   audio is concatenated in order
//! - **Scoped artifacts**: the pid-named temporary MP3 is removed on every
//!   exit path
//! - **Async-first**: built on tokio; the provider sits behind the
//!   `TtsExecutor` trait so it can be swapped for a test double
//!
//! ## Quick Start
//!
//! ```ignore
//! use tts_gen_lib::{GttsProvider, Speak, SpeedLevel, TtsConfig};
//!
//! let provider = GttsProvider::new()?;
//! let config = TtsConfig::new().with_speed(SpeedLevel::from_hint(Some("0.5")));
//!
//! let mut stdout = std::io::stdout().lock();
//! Speak::new("Hello, world!")
//!     .with_config(config)
//!     .deliver(&provider, std::path::Path::new("."), &mut stdout)
//!     .await?;
//! ```
//!
//! ## Module Structure
//!
//! - [`types`] - Core type definitions (language, speed, config)
//! - [`errors`] - Error types for TTS operations
//! - [`traits`] - The `TtsExecutor` trait for provider implementations
//! - [`tokenizer`] - Splits text into request-sized chunks
//! - [`artifact`] - The temporary audio file
//! - [`speak`] - The `Speak` delivery pipeline

pub mod artifact;
pub mod errors;
pub mod languages;
pub mod providers;
pub mod speak;
pub mod tokenizer;
pub mod traits;
pub mod types;

// Re-export main types at crate root for convenience
pub use artifact::AudioArtifact;
pub use errors::TtsError;
pub use providers::GttsProvider;
pub use speak::Speak;
pub use traits::TtsExecutor;
pub use types::{
    AudioFormat, Language, SLOW_SPEED_THRESHOLD, SpeakResult, SpeedLevel, TtsConfig,
};
