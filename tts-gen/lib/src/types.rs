//! Core type definitions for tts-gen.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::TtsError;
use crate::languages;

/// Speed hints below this value request slow speech.
pub const SLOW_SPEED_THRESHOLD: f64 = 0.8;

/// The speech cadence requested from the provider.
///
/// The provider only knows two cadences, so any numeric playback hint is
/// reduced to one of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SpeedLevel {
    /// Default speech rate.
    #[default]
    Normal,
    /// Slower speech, for playback rates below [`SLOW_SPEED_THRESHOLD`].
    Slow,
}

impl SpeedLevel {
    /// Derive the speed level from an optional textual playback hint.
    ///
    /// The hint is lenient: anything that does not parse as a float is
    /// treated as if no hint had been given.
    ///
    /// ## Examples
    ///
    /// ```
    /// use tts_gen_lib::SpeedLevel;
    ///
    /// assert_eq!(SpeedLevel::from_hint(Some("0.5")), SpeedLevel::Slow);
    /// assert_eq!(SpeedLevel::from_hint(Some("1.2")), SpeedLevel::Normal);
    /// assert_eq!(SpeedLevel::from_hint(Some("fast")), SpeedLevel::Normal);
    /// assert_eq!(SpeedLevel::from_hint(None), SpeedLevel::Normal);
    /// ```
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.and_then(|h| h.trim().parse::<f64>().ok()) {
            Some(value) => Self::from_rate(value),
            None => SpeedLevel::Normal,
        }
    }

    /// Derive the speed level from a numeric playback rate.
    pub fn from_rate(rate: f64) -> Self {
        if rate < SLOW_SPEED_THRESHOLD {
            SpeedLevel::Slow
        } else {
            SpeedLevel::Normal
        }
    }

    pub fn is_slow(&self) -> bool {
        matches!(self, SpeedLevel::Slow)
    }
}

/// A language supported by the TTS provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    code: &'static str,
    name: &'static str,
}

impl Language {
    /// English, the default spoken language.
    pub const ENGLISH: Language = Language {
        code: "en",
        name: "English",
    };

    /// Resolve a language code against the provider's language table.
    ///
    /// ## Errors
    ///
    /// Returns `TtsError::UnsupportedLanguage` for unknown codes.
    pub fn from_code(code: &str) -> Result<Self, TtsError> {
        languages::lookup(code)
            .map(|(code, name)| Language { code, name })
            .ok_or_else(|| TtsError::UnsupportedLanguage {
                language: code.to_string(),
            })
    }

    /// The canonical code sent to the provider (e.g. `en`, `zh-CN`).
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Human readable name (e.g. `English (Australia)`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Every language the provider supports.
    pub fn all() -> impl Iterator<Item = Language> {
        languages::TTS_LANGUAGES
            .iter()
            .map(|&(code, name)| Language { code, name })
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::ENGLISH
    }
}

impl FromStr for Language {
    type Err = TtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.name)
    }
}

/// Audio container produced by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    /// MPEG-1 Audio Layer III
    Mp3,
}

impl AudioFormat {
    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }
}

/// Configuration for a synthesis request.
///
/// ## Examples
///
/// ```
/// use tts_gen_lib::{Language, SpeedLevel, TtsConfig};
///
/// let config = TtsConfig::new()
///     .with_language(Language::from_code("fr").unwrap())
///     .with_speed(SpeedLevel::Slow);
/// assert_eq!(config.language.code(), "fr");
/// assert!(config.speed.is_slow());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsConfig {
    /// Spoken language.
    pub language: Language,
    /// Speech cadence.
    pub speed: SpeedLevel,
    /// Top-level domain of the provider host (`translate.google.<tld>`).
    pub tld: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            speed: SpeedLevel::default(),
            tld: "com".to_string(),
            timeout: None,
        }
    }
}

impl TtsConfig {
    /// Create a new TtsConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: SpeedLevel) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = tld.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Summary of a completed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakResult {
    /// Language the text was spoken in.
    pub language: Language,
    /// Speech cadence that was requested.
    pub speed: SpeedLevel,
    /// Container of the bytes written.
    pub format: AudioFormat,
    /// Number of audio bytes written to the output.
    pub bytes_written: u64,
}

// ============================================================================
// Tests
// ============================================================================
