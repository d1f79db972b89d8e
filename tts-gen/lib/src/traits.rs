//! Traits for the tts-gen synthesis layer.
//!
//! This module defines the seam between the delivery pipeline and whatever
//! actually produces audio.

use crate::errors::TtsError;
use crate::types::TtsConfig;

/// Executor trait for TTS providers.
///
/// A provider turns text into encoded audio bytes. It does not play or store
/// the audio; that is the job of [`crate::Speak`].
///
/// ## Native Async Traits
///
/// This trait uses native Rust async functions in traits (AFIT), available
/// since Rust 1.75. No `async-trait` crate is needed.
///
/// ## Examples
///
/// ```ignore
/// use tts_gen_lib::{TtsExecutor, TtsConfig, TtsError};
///
/// struct Silence;
///
/// impl TtsExecutor for Silence {
///     async fn synthesize(&self, _text: &str, _config: &TtsConfig) -> Result<Vec<u8>, TtsError> {
///         Ok(Vec::new())
///     }
///
///     fn info(&self) -> &str {
///         "silence"
///     }
/// }
/// ```
pub trait TtsExecutor: Send + Sync {
    /// Synthesize `text` and return the encoded audio.
    ///
    /// ## Errors
    ///
    /// Returns `TtsError` if the text cannot be prepared or the provider
    /// fails.
    fn synthesize(
        &self,
        text: &str,
        config: &TtsConfig,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, TtsError>> + Send;

    /// Short human readable description of the provider.
    fn info(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct MockExecutor {
        should_fail: bool,
    }

    impl TtsExecutor for MockExecutor {
        async fn synthesize(&self, text: &str, _config: &TtsConfig) -> Result<Vec<u8>, TtsError> {
            if self.should_fail {
                Err(TtsError::ApiError {
                    status: 500,
                    reason: "Internal Server Error".into(),
                    cause: "intentional failure".into(),
                })
            } else {
                Ok(text.as_bytes().to_vec())
            }
        }

        fn info(&self) -> &str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_mock_executor_success() {
        let executor = MockExecutor { should_fail: false };
        let config = TtsConfig::default();
        let result = executor.synthesize("test", &config).await;
        assert_eq!(result.unwrap(), b"test");
    }

    #[tokio::test]
    async fn test_mock_executor_failure() {
        let executor = MockExecutor { should_fail: true };
        let config = TtsConfig::default();
        let result = executor.synthesize("test", &config).await;
        assert!(result.is_err());
    }
}
