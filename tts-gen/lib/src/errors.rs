/// Errors that can occur while turning text into MP3 audio.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// Nothing speakable was left after text preparation.
    #[error("No text to send to TTS API")]
    NoText,

    /// The requested language is not in the provider's language table.
    #[error("Language not supported: {language}")]
    UnsupportedLanguage {
        /// The language code that was requested.
        language: String,
    },

    /// The HTTP client could not be built or the request never completed.
    #[error("Failed to connect. Probable cause: Unknown ({source})")]
    HttpError {
        /// The provider which was being contacted.
        provider: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{status} ({reason}) from TTS API. Probable cause: {cause}")]
    ApiError {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
        /// Best guess at why the provider refused the request.
        cause: String,
    },

    /// The provider answered successfully but the body carried no audio.
    #[error("No audio stream in response. Unsupported language '{language}'")]
    NoAudioStream {
        /// The language code that was sent.
        language: String,
    },

    /// A response line announced audio but did not carry a payload.
    #[error("Malformed response from TTS API: {message}")]
    MalformedResponse {
        /// Description of what was wrong with the response.
        message: String,
    },

    /// The audio payload was not valid base64.
    #[error("Failed to decode audio payload: {source}")]
    DecodeError {
        #[source]
        source: base64::DecodeError,
    },

    /// The temporary audio artifact could not be created.
    #[error("Failed to create temporary audio file: {source}")]
    TempFileError {
        #[source]
        source: std::io::Error,
    },

    /// Writing, reading or removing the audio artifact (or the output
    /// stream) failed.
    #[error("Audio I/O failed: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

impl TtsError {
    /// Whether the failure happened on the local filesystem or output stream
    /// rather than while talking to the provider.
    pub fn is_io(&self) -> bool {
        matches!(self, TtsError::TempFileError { .. } | TtsError::Io { .. })
    }

    /// Whether the failure was caused by the caller's input rather than by
    /// the provider or the host.
    pub fn is_input(&self) -> bool {
        matches!(self, TtsError::UnsupportedLanguage { .. })
    }
}
