use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::artifact::AudioArtifact;
use crate::errors::TtsError;
use crate::traits::TtsExecutor;
use crate::types::{AudioFormat, SpeakResult, TtsConfig};

/// **Speak** struct
///
/// This is the primary primitive for turning text into an MP3 stream:
/// synthesize with a provider, park the audio in a pid-named artifact,
/// forward the artifact to a writer, then remove it.
///
/// ## Examples
///
/// ```ignore
/// use tts_gen_lib::{GttsProvider, Speak, SpeedLevel, TtsConfig};
///
/// let provider = GttsProvider::new()?;
/// let config = TtsConfig::new().with_speed(SpeedLevel::Slow);
///
/// let mut stdout = std::io::stdout().lock();
/// Speak::new("Hello, world!")
///     .with_config(config)
///     .deliver(&provider, std::path::Path::new("."), &mut stdout)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Speak {
    /// the text which will be spoken
    pub text: String,
    /// language, cadence and transport settings
    pub config: TtsConfig,
}

impl Speak {
    pub fn new<T: Into<String>>(text: T) -> Speak {
        Speak {
            text: text.into(),
            config: TtsConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: TtsConfig) -> Speak {
        self.config = config;
        self
    }

    /// Synthesize the text and stream the audio into `writer`.
    ///
    /// The artifact is created in `dir` only after synthesis succeeded, and
    /// nothing is written to `writer` until the whole payload is on disk.
    ///
    /// ## Errors
    ///
    /// Returns the provider's `TtsError` on synthesis failure, or
    /// `TtsError::TempFileError`/`TtsError::Io` on local I/O failure. The
    /// artifact is removed in every case.
    pub async fn deliver<E, W>(
        &self,
        executor: &E,
        dir: &Path,
        writer: &mut W,
    ) -> Result<SpeakResult, TtsError>
    where
        E: TtsExecutor,
        W: Write + ?Sized,
    {
        debug!(
            provider = executor.info(),
            text_len = self.text.chars().count(),
            lang = self.config.language.code(),
            slow = self.config.speed.is_slow(),
            "Synthesizing speech"
        );

        let audio = executor.synthesize(&self.text, &self.config).await?;

        let mut artifact = AudioArtifact::create_in(dir)?;
        artifact.write_audio(&audio)?;
        let bytes_written = artifact.copy_to(writer)?;
        artifact.close()?;

        let format = AudioFormat::Mp3;
        debug!(bytes = bytes_written, mime = format.mime_type(), "Delivered audio");

        Ok(SpeakResult {
            language: self.config.language,
            speed: self.config.speed,
            format,
            bytes_written,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
