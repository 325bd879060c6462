use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use log::info;

use drill_core::model::TopicCatalog;
use services::{
    BankSentenceSource, Clock, GenAiClient, GenAiConfig, GenerativeSentenceSource,
    PracticeLoopService, ResponseValidator, SemanticValidator, SentenceSource, WordMatchValidator,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
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

struct Args {
    remote: bool,
    topics: Option<PathBuf>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut remote = std::env::var("DRILL_REMOTE")
            .is_ok_and(|value| matches!(value.as_str(), "1" | "true"));
        let mut topics = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--remote" => remote = true,
                "--topics" => {
                    let value = require_value(args, "--topics")?;
                    topics = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { remote, topics })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--remote] [--topics <path>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --remote          generate sentences and judge responses with the hosted model");
    eprintln!("  --topics <path>   load the topic bank from a JSON file");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_GENAI_API_KEY   required with --remote");
    eprintln!("  DRILL_GENAI_BASE_URL, DRILL_GENAI_MODEL, DRILL_REMOTE, RUST_LOG");
}

struct DesktopApp {
    catalog: Arc<TopicCatalog>,
    practice_loop: Arc<PracticeLoopService>,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<TopicCatalog> {
        Arc::clone(&self.catalog)
    }

    fn practice_loop(&self) -> Arc<PracticeLoopService> {
        Arc::clone(&self.practice_loop)
    }
}

fn load_catalog(path: Option<&Path>) -> Result<TopicCatalog, Box<dyn std::error::Error>> {
    match path {
        None => Ok(TopicCatalog::builtin()),
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    let catalog = Arc::new(load_catalog(parsed.topics.as_deref())?);
    info!("loaded {} topics", catalog.len());

    // Exactly one sentence source and one validator are wired for the whole
    // session; the two policies are never mixed.
    let (sentences, validator): (Arc<dyn SentenceSource>, Arc<dyn ResponseValidator>) =
        if parsed.remote {
            // The key is required here: a missing key is a startup failure,
            // not a degraded mode.
            let config = GenAiConfig::from_env()?;
            let client = GenAiClient::new(config);
            info!(
                "remote mode: model {} generates sentences and judges responses",
                client.model()
            );
            (
                Arc::new(GenerativeSentenceSource::new(
                    client.clone(),
                    Arc::clone(&catalog),
                )),
                Arc::new(SemanticValidator::new(client)),
            )
        } else {
            info!("local mode: bank sentences with word-match judging");
            (
                Arc::new(BankSentenceSource::new(Arc::clone(&catalog))),
                Arc::new(WordMatchValidator),
            )
        };

    let practice_loop = Arc::new(PracticeLoopService::new(
        Clock::system(),
        sentences,
        validator,
    ));

    let app = DesktopApp {
        catalog,
        practice_loop,
    };
    let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

    // Explicitly not always-on-top; some dev setups default to a modal-like
    // window otherwise.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Speech Drill")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut iter)
    }

    #[test]
    fn defaults_to_local_mode() {
        let args = parse(&[]).unwrap();
        assert!(!args.remote);
        assert!(args.topics.is_none());
    }

    #[test]
    fn remote_flag_and_topics_path_are_parsed() {
        let args = parse(&["--remote", "--topics", "bank.json"]).unwrap();
        assert!(args.remote);
        assert_eq!(args.topics.as_deref(), Some(Path::new("bank.json")));
    }

    #[test]
    fn topics_flag_requires_a_value() {
        let err = parse(&["--topics"]).unwrap_err();
        assert!(matches!(err, ArgsError::MissingValue { flag: "--topics" }));
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        let err = parse(&["--frobnicate"]).unwrap_err();
        assert!(matches!(err, ArgsError::UnknownArg(_)));
    }
}
