use std::process::ExitCode;

use thiserror::Error;
use tts_gen_lib::TtsError;

/// Failure classes of a `tts-gen` invocation, each with its own exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad or missing arguments. The message is already fully rendered.
    #[error("{0}")]
    Usage(String),

    /// The provider could not produce audio.
    #[error("{0}")]
    Synthesis(TtsError),

    /// The audio artifact or the output stream failed.
    #[error("{0}")]
    Io(TtsError),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Synthesis(_) => 1,
            CliError::Usage(_) => 2,
            CliError::Io(_) => 3,
        }
    }

    /// Print the error to stderr and return the matching exit code.
    pub fn report(self) -> ExitCode {
        match &self {
            CliError::Usage(message) => eprint!("{message}"),
            other => eprintln!("Error: {other}"),
        }
        ExitCode::from(self.exit_code())
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        CliError::Usage(err.to_string())
    }
}

impl From<TtsError> for CliError {
    fn from(err: TtsError) -> Self {
        if err.is_io() {
            CliError::Io(err)
        } else if err.is_input() {
            CliError::Usage(format!("error: {err}\n"))
        } else {
            CliError::Synthesis(err)
        }
    }
}
