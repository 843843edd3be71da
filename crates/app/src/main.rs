use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use providers::rest::HostedConfig;
use services::{
    AppServices, AuthService, Clock, CourseService, ProgressService, RosterService,
};
use ui::{App, DesktopLinkOpener, LinkOpenerRef, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBackend { raw: String },
    InvalidDbUrl { raw: String },
    MissingHostedConfig,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBackend { raw } => {
                write!(f, "invalid --backend value: {raw} (local, hosted or memory)")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingHostedConfig => write!(
                f,
                "hosted backend needs CAMPUS_API_KEY, CAMPUS_IDENTITY_URL and CAMPUS_PROFILES_URL"
            ),
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

/// Which backend pair the services run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    /// SQLite file on this machine; single learner, no network.
    Local,
    /// The hosted REST API; shared roster across machines.
    Hosted,
    /// Process-local maps; everything is lost on exit. Demo mode.
    Memory,
}

impl Backend {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "local" => Some(Self::Local),
            "hosted" => Some(Self::Hosted),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

struct DesktopApp {
    services: AppServices,
    link_opener: LinkOpenerRef,
}

impl UiApp for DesktopApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }

    fn roster(&self) -> Arc<RosterService> {
        self.services.roster()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

struct Args {
    backend: Backend,
    db_url: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--backend <local|hosted|memory>] [--db <sqlite_url>] [--data-dir <dir>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --backend local");
    eprintln!("  --db sqlite:campus.sqlite3   (placed inside --data-dir when that is set)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CAMPUS_BACKEND, CAMPUS_DB_URL");
    eprintln!("  hosted: CAMPUS_API_KEY, CAMPUS_IDENTITY_URL, CAMPUS_PROFILES_URL");
    eprintln!("          optional CAMPUS_SESSION_CACHE for restoring the last sign-in");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut backend = std::env::var("CAMPUS_BACKEND")
            .ok()
            .and_then(|value| Backend::from_arg(&value))
            .unwrap_or(Backend::Local);
        let mut db_override = std::env::var("CAMPUS_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut data_dir: Option<PathBuf> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--backend" => {
                    let value = require_value(args, "--backend")?;
                    backend = Backend::from_arg(&value)
                        .ok_or(ArgsError::InvalidBackend { raw: value })?;
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_override = Some(value);
                }
                "--data-dir" => {
                    let value = require_value(args, "--data-dir")?;
                    data_dir = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let db_url = match db_override {
            Some(url) => normalize_sqlite_url(url),
            None => {
                let dir = data_dir.unwrap_or_else(|| PathBuf::from("."));
                normalize_sqlite_url(dir.join("campus.sqlite3").display().to_string())
            }
        };

        Ok(Self { backend, db_url })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut iter = std::env::args().skip(1);
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let clock = Clock::system();
    let services = match args.backend {
        Backend::Local => {
            // Open + migrate SQLite at startup; the file has to exist
            // before sqlx connects to it.
            prepare_sqlite_file(&args.db_url)?;
            AppServices::new_sqlite(&args.db_url, clock).await?
        }
        Backend::Hosted => {
            let config = HostedConfig::from_env().ok_or(ArgsError::MissingHostedConfig)?;
            AppServices::new_hosted(config, clock)?
        }
        Backend::Memory => AppServices::in_memory(clock)?,
    };
    tracing::info!(backend = ?args.backend, "services ready");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        link_opener: Arc::new(DesktopLinkOpener),
    });
    let context = build_app_context(&app);

    // Dioxus/tao can default to an always-on-top window in some dev
    // setups; disable it so the app doesn't behave like a modal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Campus")
            .with_inner_size(LogicalSize::new(1200.0, 800.0))
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
