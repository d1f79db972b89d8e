//! TTS provider implementations.
//!
//! Providers turn text into encoded audio over the network.

mod gtts;

pub use gtts::GttsProvider;
