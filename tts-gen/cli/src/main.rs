//! tts-gen - speak text as MP3 on stdout.

mod error;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tts_gen_lib::{GttsProvider, Language, Speak, SpeedLevel, TtsConfig, TtsError};

use crate::error::CliError;

/// Convert text to MP3 speech on stdout
///
/// # Examples
///
/// ```no_run
/// // Normal speed
/// // tts-gen "Hello world" > hello.mp3
///
/// // Slow speech (speed hints below 0.8)
/// // tts-gen "Hello world" 0.5 > hello.mp3
///
/// // French, options after the positional arguments
/// // tts-gen "Bonjour" 1.0 --lang fr > bonjour.mp3
/// ```
#[derive(Parser, Debug)]
#[command(name = "tts-gen")]
#[command(about = "Convert text to MP3 speech on stdout using Google Translate TTS", long_about = None)]
#[command(override_usage = "tts-gen <TEXT> [SPEED] [OPTIONS]")]
#[command(after_help = "Arguments:
  <TEXT>   Text to speak, always the first argument and taken verbatim
  [SPEED]  Playback speed hint, always the second argument; values below 0.8
           request slow speech and values which are not numbers are ignored

Options are only read after TEXT and SPEED. Any further arguments are ignored.")]
#[command(version)]
struct Cli {
    #[arg(skip)]
    text: String,

    #[arg(skip)]
    speed: Option<String>,

    /// Language to speak in (see --all)
    #[arg(short, long, env = "TTS_GEN_LANG", default_value = "en", value_parser = parse_language)]
    lang: Language,

    /// Top-level domain of the Google Translate host, selects regional accents
    #[arg(long, env = "TTS_GEN_TLD", default_value = "com")]
    tld: String,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long, env = "TTS_GEN_TIMEOUT", value_name = "SECS", value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Print all supported languages instead of speaking TEXT
    #[arg(long)]
    all: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long)]
    json: bool,

    /// Override the provider base URL
    #[arg(long, env = "TTS_GEN_ENDPOINT", hide = true)]
    endpoint: Option<String>,

    /// Trailing arguments, ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    rest: Vec<String>,
}

/// Parse an invocation of the form `<TEXT> [SPEED] [OPTIONS]...`.
///
/// TEXT and SPEED are positional slots read before clap sees anything, so
/// values such as `-5 degrees`, `-hello` or `--all` are spoken rather than
/// taken as options.
fn parse_args<I>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let bin = args.next().unwrap_or_else(|| OsString::from("tts-gen"));

    let Some(text) = args.next() else {
        return Err(clap::Error::raw(
            ErrorKind::MissingRequiredArgument,
            format!(
                "the following required arguments were not provided:\n  <TEXT>\n\n{}",
                Cli::command().render_help()
            ),
        ));
    };
    let speed = args.next();

    let mut cli = Cli::try_parse_from(std::iter::once(bin).chain(args))?;
    cli.text = text.to_string_lossy().into_owned();
    cli.speed = speed.map(|s| s.to_string_lossy().into_owned());
    Ok(cli)
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_code(s).map_err(|e| e.to_string())
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number of seconds"))?;

    if secs <= 0.0 {
        return Err("timeout must be greater than zero".into());
    }

    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

/// Initialize tracing subscriber based on verbosity and output format
///
/// Logs always go to stderr; stdout carries nothing but audio.
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,tts_gen=info,tts_gen_lib=info".to_string(),
            2 => "info,tts_gen=debug,tts_gen_lib=debug".to_string(),
            _ => "debug,tts_gen=trace,tts_gen_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn build_config(cli: &Cli) -> TtsConfig {
    let config = TtsConfig::new()
        .with_language(cli.lang)
        .with_tld(cli.tld.clone())
        .with_speed(SpeedLevel::from_hint(cli.speed.as_deref()));

    match cli.timeout {
        Some(timeout) => config.with_timeout(timeout),
        None => config,
    }
}

fn print_languages(provider: &GttsProvider) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    for language in provider.list_languages() {
        writeln!(stdout, " {language}").map_err(|source| CliError::Io(TtsError::Io { source }))?;
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let provider = match &cli.endpoint {
        Some(url) => GttsProvider::with_base_url(url.as_str())?,
        None => GttsProvider::new()?,
    };

    if cli.all {
        return print_languages(&provider);
    }

    if !cli.rest.is_empty() {
        debug!(ignored = cli.rest.len(), "Ignoring trailing arguments");
    }

    let config = build_config(&cli);
    let mut stdout = io::stdout().lock();

    let result = Speak::new(cli.text)
        .with_config(config)
        .deliver(&provider, Path::new("."), &mut stdout)
        .await?;

    info!(
        lang = result.language.code(),
        slow = result.speed.is_slow(),
        bytes = result.bytes_written,
        mime = result.format.mime_type(),
        "Wrote audio to stdout"
    );

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => return CliError::from(err).report(),
        Err(err) => {
            // --help and --version
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
    };

    init_tracing(cli.log_verbosity, cli.json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => err.report(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        parse_args(
            std::iter::once("tts-gen")
                .chain(args.iter().copied())
                .map(OsString::from),
        )
    }

    // ========================================================================
    // Positional slots
    // ========================================================================

    #[test]
    fn test_text_only() {
        let cli = parse(&["hello"]).unwrap();
        assert_eq!(cli.text, "hello");
        assert!(cli.speed.is_none());
        assert_eq!(build_config(&cli).speed, SpeedLevel::Normal);
    }

    #[test]
    fn test_missing_text_is_usage_error() {
        let err = parse(&[]).unwrap_err();
        assert!(err.use_stderr());
        assert!(err.to_string().contains("Usage: tts-gen <TEXT> [SPEED] [OPTIONS]"));
        assert_eq!(CliError::from(err).exit_code(), 2);
    }

    #[test]
    fn test_text_with_leading_hyphen_is_verbatim() {
        for text in ["-5 degrees outside", "-hello", "--all", "--help", "-", "-v"] {
            let cli = parse(&[text, "1.0"]).unwrap();
            assert_eq!(cli.text, text);
            assert!(!cli.all, "{text} must not enable --all");
        }
    }

    #[test]
    fn test_speed_slot_is_verbatim() {
        let cli = parse(&["hello", "--help"]).unwrap();
        assert_eq!(cli.speed.as_deref(), Some("--help"));
        assert_eq!(build_config(&cli).speed, SpeedLevel::Normal);
    }

    #[test]
    fn test_trailing_arguments_are_ignored() {
        let cli = parse(&["hello", "1.0", "extra", "--unknown", "-x"]).unwrap();
        assert_eq!(cli.text, "hello");
        assert_eq!(cli.rest, vec!["extra", "--unknown", "-x"]);
    }

    // ========================================================================
    // Speed hints
    // ========================================================================

    #[test]
    fn test_slow_speed_hint() {
        let cli = parse(&["hello", "0.5"]).unwrap();
        assert_eq!(build_config(&cli).speed, SpeedLevel::Slow);
    }

    #[test]
    fn test_fast_speed_hint() {
        let cli = parse(&["hello", "1.2"]).unwrap();
        assert_eq!(build_config(&cli).speed, SpeedLevel::Normal);
    }

    #[test]
    fn test_unparsable_speed_hint_is_ignored() {
        let cli = parse(&["hello", "not-a-number"]).unwrap();
        assert_eq!(build_config(&cli).speed, SpeedLevel::Normal);
    }

    #[test]
    fn test_negative_speed_hint() {
        let cli = parse(&["hello", "-1"]).unwrap();
        assert_eq!(build_config(&cli).speed, SpeedLevel::Slow);
    }

    // ========================================================================
    // Options
    // ========================================================================

    #[test]
    fn test_options_follow_positionals() {
        let cli = parse(&["bonjour", "1.0", "--lang", "FR"]).unwrap();
        assert_eq!(cli.text, "bonjour");
        assert_eq!(build_config(&cli).language.code(), "fr");
    }

    #[test]
    fn test_all_after_positionals() {
        let cli = parse(&["hello", "1.0", "--all"]).unwrap();
        assert!(cli.all);
    }

    #[test]
    fn test_help_after_positionals() {
        let err = parse(&["hello", "1.0", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }

    #[test]
    fn test_unknown_language_is_usage_error() {
        let err = parse(&["hello", "1.0", "--lang", "klingon"]).unwrap_err();
        assert!(err.to_string().contains("Language not supported: klingon"));
    }

    #[test]
    fn test_timeout_option() {
        let cli = parse(&["hello", "1.0", "--timeout", "2.5"]).unwrap();
        assert_eq!(build_config(&cli).timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_timeout_must_be_positive() {
        assert!(parse(&["hello", "1.0", "--timeout", "0"]).is_err());
        assert!(parse(&["hello", "1.0", "--timeout", "soon"]).is_err());
    }

    #[test]
    fn test_tld_option() {
        let cli = parse(&["hello", "1.0", "--tld", "co.uk"]).unwrap();
        assert_eq!(build_config(&cli).tld, "co.uk");
    }
}
