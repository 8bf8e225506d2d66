mod command;
mod presenter;
mod shell;

use std::fmt;

use quiz_core::Clock;
use services::{QuizConfig, QuizSession, SessionLoop, SourceMode};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::shell::Shell;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <url>] [--offline]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api http://127.0.0.1:5000/api/quiz");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SOURCE (remote|local), QUIZ_API_URL, QUIZ_TIMEOUT_MS, RUST_LOG");
}

#[derive(Debug, Default)]
struct Args {
    api_url: Option<String>,
    offline: bool,
}

impl Args {
    /// `Ok(None)` means help was requested.
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(args, "--api")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    parsed.api_url = Some(value);
                }
                "--offline" => parsed.offline = true,
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Some(parsed))
    }

    fn apply(self, mut config: QuizConfig) -> Result<QuizConfig, Box<dyn std::error::Error>> {
        if let Some(raw) = self.api_url {
            config = config
                .with_base_url(&raw)
                .map_err(|_| ArgsError::InvalidApiUrl { raw })?;
        }
        if self.offline {
            config = config.with_mode(SourceMode::Local);
        }
        Ok(config)
    }
}

fn init_tracing() {
    // stdout belongs to the quiz; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let Some(args) = Args::parse(&mut argv).inspect_err(|e| {
        eprintln!("{e}");
        print_usage();
    })?
    else {
        print_usage();
        return Ok(());
    };

    let config = args.apply(QuizConfig::from_env()?)?;
    tracing::info!(mode = ?config.mode, api = %config.base_url, "starting quiz client");
    let runner = SessionLoop::from_backends(config.build_backends()?);

    let mut shell = Shell::new(
        runner,
        QuizSession::new(Clock::default_clock()),
        std::io::stdout(),
    );
    shell.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Args>, ArgsError> {
        Args::parse(&mut args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn parses_api_and_offline_flags() {
        let args = parse(&["--api", "http://quiz.local/api/quiz", "--offline"])
            .unwrap()
            .unwrap();
        assert_eq!(args.api_url.as_deref(), Some("http://quiz.local/api/quiz"));
        assert!(args.offline);
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn rejects_missing_value_and_unknown_flags() {
        assert!(matches!(
            parse(&["--api"]),
            Err(ArgsError::MissingValue { flag: "--api" })
        ));
        assert!(matches!(parse(&["--db"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn offline_flag_forces_local_mode() {
        let config = Args {
            api_url: None,
            offline: true,
        }
        .apply(QuizConfig::default())
        .unwrap();
        assert_eq!(config.mode, SourceMode::Local);
    }
}
