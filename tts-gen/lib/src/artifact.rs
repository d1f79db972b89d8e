//! Temporary on-disk home for synthesized audio.
//!
//! The artifact is named after the current process (`temp_audio_<pid>.mp3`)
//! so concurrent invocations never share a file. It is removed when the
//! owning [`AudioArtifact`] is dropped, whichever way the caller exits.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::TtsError;
use crate::types::AudioFormat;

/// A pid-named temporary audio file, removed on drop.
#[derive(Debug)]
pub struct AudioArtifact {
    file: NamedTempFile,
}

impl AudioArtifact {
    /// File name used for artifacts created by the current process.
    pub fn file_name() -> String {
        Self::file_name_for(std::process::id())
    }

    /// File name used for artifacts created by process `pid`.
    pub fn file_name_for(pid: u32) -> String {
        format!("temp_audio_{pid}.{}", AudioFormat::Mp3.extension())
    }

    /// Create the artifact inside `dir`.
    ///
    /// ## Errors
    ///
    /// Returns `TtsError::TempFileError` if the file cannot be created,
    /// including when a file of the same name already exists.
    pub fn create_in(dir: &Path) -> Result<Self, TtsError> {
        let file = tempfile::Builder::new()
            .prefix(&format!("temp_audio_{}", std::process::id()))
            .suffix(&format!(".{}", AudioFormat::Mp3.extension()))
            .rand_bytes(0)
            .tempfile_in(dir)
            .map_err(|source| TtsError::TempFileError { source })?;

        debug!(path = %file.path().display(), "Created audio artifact");

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Write the full audio payload and flush it to disk.
    pub fn write_audio(&mut self, audio: &[u8]) -> Result<(), TtsError> {
        let file = self.file.as_file_mut();
        file.write_all(audio)
            .and_then(|()| file.flush())
            .map_err(|source| TtsError::Io { source })
    }

    /// Copy the artifact's entire contents into `writer`.
    ///
    /// Returns the number of bytes copied.
    pub fn copy_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<u64, TtsError> {
        let mut reader: File = self
            .file
            .reopen()
            .map_err(|source| TtsError::Io { source })?;

        let copied = io::copy(&mut reader, writer).map_err(|source| TtsError::Io { source })?;
        writer.flush().map_err(|source| TtsError::Io { source })?;

        Ok(copied)
    }

    /// Remove the artifact now, reporting any failure.
    ///
    /// Dropping the artifact also removes it, but silently.
    pub fn close(self) -> Result<(), TtsError> {
        let path = self.file.path().to_path_buf();
        self.file
            .close()
            .map_err(|source| TtsError::Io { source })?;
        debug!(path = %path.display(), "Removed audio artifact");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
