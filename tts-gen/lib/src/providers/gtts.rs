//! gTTS (Google Text-to-Speech) provider.
//!
//! Talks to the same Google Translate `batchexecute` endpoint the `gTTS`
//! Python package uses, directly over HTTPS. Requires network connectivity.
//!
//! ## Wire format
//!
//! Each text chunk is sent as a form field `f.req` holding an RPC envelope:
//!
//! ```text
//! [[["jQ1olc","[\"<text>\",\"<lang>\",<true|null>,\"null\"]",null,"generic"]]]
//! ```
//!
//! The response is line oriented; the line carrying the RPC id holds the
//! base64-encoded MP3 for that chunk.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use serde_json::{Value, json};
use tracing::debug;

use crate::errors::TtsError;
use crate::tokenizer;
use crate::traits::TtsExecutor;
use crate::types::{Language, TtsConfig};

/// RPC id of the text-to-speech call.
const GOOGLE_TTS_RPC: &str = "jQ1olc";

/// Path of the RPC endpoint below the provider host.
const BATCHEXECUTE_PATH: &str = "_/TranslateWebserverUi/data/batchexecute";

const GOOGLE_TTS_REFERER: &str = "http://translate.google.com/";

const GOOGLE_TTS_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36";

static AUDIO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"jQ1olc","\[\\"(.*?)\\"]"#).expect("Invalid audio payload regex")
});

/// gTTS (Google Text-to-Speech) provider.
///
/// ## Examples
///
/// ```ignore
/// use tts_gen_lib::{GttsProvider, TtsConfig, TtsExecutor};
///
/// let provider = GttsProvider::new()?;
/// let mp3 = provider.synthesize("Hello, world!", &TtsConfig::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GttsProvider {
    client: reqwest::Client,
    /// Overrides `https://translate.google.<tld>` when set.
    base_url: Option<String>,
}

impl GttsProvider {
    /// Provider name constant for error messages.
    const PROVIDER_NAME: &'static str = "gtts";

    /// Create a new gTTS provider talking to `translate.google.<tld>`.
    ///
    /// ## Errors
    ///
    /// Returns `TtsError::HttpError` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, TtsError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(GOOGLE_TTS_REFERER));

        let client = reqwest::Client::builder()
            .user_agent(GOOGLE_TTS_USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|source| TtsError::HttpError {
                provider: Self::PROVIDER_NAME.into(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Create a new gTTS provider with a custom base URL.
    ///
    /// Useful for testing with mock servers or routing through a proxy.
    ///
    /// ## Examples
    ///
    /// ```ignore
    /// let provider = GttsProvider::with_base_url("http://localhost:8080")?;
    /// ```
    pub fn with_base_url(url: impl Into<String>) -> Result<Self, TtsError> {
        let mut provider = Self::new()?;
        provider.base_url = Some(url.into());
        Ok(provider)
    }

    /// Every language this provider can speak.
    pub fn list_languages(&self) -> Vec<Language> {
        Language::all().collect()
    }

    fn endpoint(&self, tld: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), BATCHEXECUTE_PATH),
            None => format!("https://translate.google.{tld}/{BATCHEXECUTE_PATH}"),
        }
    }

    /// Build the `f.req` RPC envelope for one chunk.
    fn package_rpc(text: &str, config: &TtsConfig) -> String {
        let speed = if config.speed.is_slow() {
            Value::Bool(true)
        } else {
            Value::Null
        };

        let parameter = json!([text, config.language.code(), speed, "null"]).to_string();
        json!([[[GOOGLE_TTS_RPC, parameter, null, "generic"]]]).to_string()
    }

    /// Best guess at why the endpoint refused a request.
    fn infer_cause(status: StatusCode, tld: &str) -> String {
        if status == StatusCode::FORBIDDEN {
            "Bad token or upstream API changes".into()
        } else if status == StatusCode::NOT_FOUND && tld != "com" {
            format!("Unsupported tld '{tld}'")
        } else if status.is_server_error() {
            "Upstream API error. Try again later.".into()
        } else {
            "Unknown".into()
        }
    }

    /// Pull the decoded audio out of a `batchexecute` response body.
    fn extract_audio(body: &str, language: &str) -> Result<Vec<u8>, TtsError> {
        let mut audio = Vec::new();
        let mut found = false;

        for line in body.lines().filter(|l| l.contains(GOOGLE_TTS_RPC)) {
            let captures = AUDIO_RE
                .captures(line)
                .ok_or_else(|| TtsError::MalformedResponse {
                    message: format!("{GOOGLE_TTS_RPC} line without audio payload"),
                })?;

            let decoded = STANDARD
                .decode(captures[1].as_bytes())
                .map_err(|source| TtsError::DecodeError { source })?;

            audio.extend_from_slice(&decoded);
            found = true;
        }

        if !found {
            return Err(TtsError::NoAudioStream {
                language: language.to_string(),
            });
        }

        Ok(audio)
    }

    async fn request_chunk(&self, chunk: &str, config: &TtsConfig) -> Result<Vec<u8>, TtsError> {
        let mut request = self
            .client
            .post(self.endpoint(&config.tld))
            .form(&[("f.req", Self::package_rpc(chunk, config))]);

        if let Some(timeout) = config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|source| TtsError::HttpError {
            provider: Self::PROVIDER_NAME.into(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::ApiError {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                cause: Self::infer_cause(status, &config.tld),
            });
        }

        let body = response.text().await.map_err(|source| TtsError::HttpError {
            provider: Self::PROVIDER_NAME.into(),
            source,
        })?;

        Self::extract_audio(&body, config.language.code())
    }
}

impl TtsExecutor for GttsProvider {
    async fn synthesize(&self, text: &str, config: &TtsConfig) -> Result<Vec<u8>, TtsError> {
        let chunks = tokenizer::chunks(text)?;

        debug!(
            provider = Self::PROVIDER_NAME,
            lang = config.language.code(),
            tld = %config.tld,
            slow = config.speed.is_slow(),
            chunks = chunks.len(),
            "Requesting speech from gTTS"
        );

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let part = self.request_chunk(chunk, config).await?;
            debug!(chunk = idx, bytes = part.len(), "Received gTTS audio chunk");
            audio.extend_from_slice(&part);
        }

        Ok(audio)
    }

    fn info(&self) -> &str {
        "gTTS - Google Translate text-to-speech over HTTPS (requires internet)"
    }
}

// ============================================================================
// Tests
// ============================================================================
