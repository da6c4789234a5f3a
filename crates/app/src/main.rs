use std::fmt;
use std::sync::Arc;

use backend::{HttpBackend, HttpBackendConfig, IdentityProvider, SessionFile, StaticIdentity};
use services::{DerivedSnapshot, ProgressSyncService, TranslationConfig, TranslationService};
use shuar_core::model::CatalogKind;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidKind { raw: String },
    MissingApiUrl,
    MissingUpstreamUrl,
    MissingText,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidKind { raw } => {
                write!(f, "invalid --kind value: {raw} (expected lessons or stories)")
            }
            ArgsError::MissingApiUrl => {
                write!(f, "no backend URL; pass --api or set EDUSHUAR_API_URL")
            }
            ArgsError::MissingUpstreamUrl => write!(
                f,
                "no translation URL; pass --upstream or set EDUSHUAR_TRANSLATE_URL"
            ),
            ArgsError::MissingText => write!(f, "translate requires --text"),
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
    eprintln!("  cargo run -p app -- dashboard [--api <url>] [--kind lessons|stories]");
    eprintln!("                                [--user <id> | --session <file>] [--json]");
    eprintln!("  cargo run -p app -- translate --text <text> [--upstream <url>]");
    eprintln!();
    eprintln!("Defaults for dashboard:");
    eprintln!("  --kind lessons");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EDUSHUAR_API_URL, EDUSHUAR_SESSION_FILE, EDUSHUAR_USER, EDUSHUAR_TRANSLATE_URL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Dashboard,
    Translate,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "dashboard" => Some(Self::Dashboard),
            "translate" => Some(Self::Translate),
            _ => None,
        }
    }
}

struct DashboardArgs {
    api_url: Option<String>,
    kind: CatalogKind,
    user: Option<String>,
    session: Option<String>,
    json: bool,
}

impl DashboardArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            api_url: std::env::var("EDUSHUAR_API_URL").ok(),
            kind: CatalogKind::Lessons,
            user: std::env::var("EDUSHUAR_USER").ok(),
            session: None,
            json: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => parsed.api_url = Some(require_value(args, "--api")?),
                "--kind" => {
                    let value = require_value(args, "--kind")?;
                    parsed.kind = match value.as_str() {
                        "lessons" => CatalogKind::Lessons,
                        "stories" => CatalogKind::Stories,
                        _ => return Err(ArgsError::InvalidKind { raw: value }),
                    };
                }
                "--user" => parsed.user = Some(require_value(args, "--user")?),
                "--session" => parsed.session = Some(require_value(args, "--session")?),
                "--json" => parsed.json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn identity(&self) -> Arc<dyn IdentityProvider> {
        if let Some(user) = &self.user {
            return Arc::new(StaticIdentity::user(user));
        }
        if let Some(path) = &self.session {
            return Arc::new(SessionFile::new(path));
        }
        match SessionFile::from_env() {
            Some(store) => Arc::new(store),
            None => Arc::new(StaticIdentity::anonymous()),
        }
    }
}

struct TranslateArgs {
    upstream_url: Option<String>,
    text: Option<String>,
}

impl TranslateArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            upstream_url: std::env::var("EDUSHUAR_TRANSLATE_URL").ok(),
            text: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--upstream" => parsed.upstream_url = Some(require_value(args, "--upstream")?),
                "--text" => parsed.text = Some(require_value(args, "--text")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Dashboard,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Dashboard,
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

    match cmd {
        Command::Dashboard => {
            let args = DashboardArgs::parse(&mut iter).map_err(|e| {
                eprintln!("{e}");
                print_usage();
                e
            })?;
            let api_url = args.api_url.clone().ok_or(ArgsError::MissingApiUrl)?;

            let http = HttpBackend::new(HttpBackendConfig::new(api_url));
            let service = ProgressSyncService::new(
                Arc::new(http.clone()),
                Arc::new(http),
                args.identity(),
            );

            let snapshot = service.load_and_derive(args.kind).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&snapshot.view)?);
            } else {
                print_dashboard(args.kind, &snapshot);
            }
            Ok(())
        }
        Command::Translate => {
            let args = TranslateArgs::parse(&mut iter).map_err(|e| {
                eprintln!("{e}");
                print_usage();
                e
            })?;
            let upstream_url = args.upstream_url.ok_or(ArgsError::MissingUpstreamUrl)?;
            let text = args.text.ok_or(ArgsError::MissingText)?;

            let translator = TranslationService::new(TranslationConfig::new(upstream_url));
            let translation = translator.translate(&text).await?;
            println!("{}", serde_json::to_string_pretty(&translation)?);
            Ok(())
        }
    }
}

fn print_dashboard(kind: CatalogKind, snapshot: &DerivedSnapshot) {
    let stats = &snapshot.view.stats;
    println!("{kind} — {}", stats.level_label);
    println!(
        "Completadas {}/{} ({}%) — racha de {} días",
        stats.completed, stats.total, stats.percentage, stats.streak_days
    );
    if snapshot.progress_degraded {
        println!("(historial no disponible; mostrando el catálogo sin progreso)");
    }

    for group in &snapshot.view.groups {
        println!();
        println!("[{}]", group.level);
        for item in &group.items {
            println!(
                "  {:>3}. {:<32} {:<12} {:>3}%",
                item.item.order,
                item.item.title,
                item.state.to_string(),
                item.progress
            );
        }
    }

    if !snapshot.view.recent.is_empty() {
        println!();
        println!("Actividad reciente:");
        for entry in &snapshot.view.recent {
            println!(
                "  {} — {} ({} pts)",
                entry.title, entry.time_label, entry.score
            );
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
