use std::fmt;
use std::io::Write;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use drill_core::model::{DEFAULT_QUESTION_COUNT, DEFAULT_SECONDS_PER_QUESTION, DrillConfig, Question};
use services::{Clock, DrillService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { source: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { source, raw } => {
                write!(f, "invalid {source} value: {raw}")
            }
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

fn parse_number<T: std::str::FromStr>(source: &'static str, raw: &str) -> Result<T, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidNumber {
        source,
        raw: raw.to_string(),
    })
}

struct DesktopApp {
    drill_service: Arc<DrillService>,
    default_config: DrillConfig,
}

impl UiApp for DesktopApp {
    fn drill_service(&self) -> Arc<DrillService> {
        Arc::clone(&self.drill_service)
    }

    fn default_config(&self) -> DrillConfig {
        self.default_config
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    seconds: u32,
    count: usize,
    seed: Option<u64>,
    json: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui        [--seconds <n>] [--count <n>] [--seed <n>]");
    eprintln!("  cargo run -p app -- worksheet [--count <n>] [--seed <n>] [--json]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --seconds {DEFAULT_SECONDS_PER_QUESTION}");
    eprintln!("  --count {DEFAULT_QUESTION_COUNT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_SECONDS, DRILL_COUNT, DRILL_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Worksheet,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "worksheet" => Some(Self::Worksheet),
            _ => None,
        }
    }
}

impl Args {
    /// Flags win over the environment, which wins over the built-in defaults.
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            seconds: DEFAULT_SECONDS_PER_QUESTION,
            count: DEFAULT_QUESTION_COUNT,
            seed: None,
            json: false,
        };
        if let Some(raw) = env("DRILL_SECONDS") {
            parsed.seconds = parse_number("DRILL_SECONDS", &raw)?;
        }
        if let Some(raw) = env("DRILL_COUNT") {
            parsed.count = parse_number("DRILL_COUNT", &raw)?;
        }
        if let Some(raw) = env("DRILL_SEED") {
            parsed.seed = Some(parse_number("DRILL_SEED", &raw)?);
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seconds" if cmd == Command::Ui => {
                    let value = require_value(args, "--seconds")?;
                    parsed.seconds = parse_number("--seconds", &value)?;
                }
                "--count" => {
                    let value = require_value(args, "--count")?;
                    parsed.count = parse_number("--count", &value)?;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    parsed.seed = Some(parse_number("--seed", &value)?);
                }
                "--json" if cmd == Command::Worksheet => parsed.json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn drill_service(&self) -> DrillService {
        let service = DrillService::new(Clock::default());
        match self.seed {
            Some(seed) => service.with_seed(seed),
            None => service,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render_worksheet(questions: &[Question]) -> String {
    let width = questions.len().to_string().len();
    let mut out = String::new();
    for (idx, question) in questions.iter().enumerate() {
        out.push_str(&format!(
            "{number:>width$}. {prompt:<14} {answer}\n",
            number = idx + 1,
            prompt = question.prompt(),
            answer = question.answer(),
        ));
    }
    out
}

fn run_worksheet(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let questions = args.drill_service().generate_questions(args.count);
    tracing::debug!(count = questions.len(), seeded = args.seed.is_some(), "worksheet generated");

    let mut stdout = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &questions)?;
        writeln!(stdout)?;
    } else {
        stdout.write_all(render_worksheet(&questions).as_bytes())?;
    }
    Ok(())
}

fn run_ui(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    // Rejects an empty drill before any window opens.
    let default_config = DrillConfig::new(args.count, args.seconds)?;
    tracing::info!(
        questions = default_config.question_count(),
        seconds = default_config.seconds_per_question(),
        seeded = args.seed.is_some(),
        "launching drill window"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        drill_service: Arc::new(args.drill_service()),
        default_config,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Arithmetic Drill")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the window.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match cmd {
        Command::Ui => run_ui(&parsed),
        Command::Worksheet => run_worksheet(&parsed),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
