use std::fmt;

use chrono::{DateTime, Utc};
use course_core::model::{LearnerProfile, LearnerRole, SectionId};
use providers::{ProviderError, Providers};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    email: String,
    password: String,
    role: LearnerRole,
    complete: Vec<SectionId>,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidRole { raw: String },
    InvalidSection { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidRole { raw } => {
                write!(f, "invalid --role value (expected learner or admin): {raw}")
            }
            ArgsError::InvalidSection { raw } => write!(f, "invalid --complete value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("CAMPUS_DB_URL").unwrap_or_else(|_| "sqlite:campus.sqlite3".into());
        let mut email =
            std::env::var("CAMPUS_SEED_EMAIL").unwrap_or_else(|_| "admin@example.com".into());
        let mut password =
            std::env::var("CAMPUS_SEED_PASSWORD").unwrap_or_else(|_| "changeme".into());
        let mut role = std::env::var("CAMPUS_SEED_ROLE")
            .ok()
            .and_then(|value| value.parse::<LearnerRole>().ok())
            .unwrap_or(LearnerRole::Admin);
        let mut complete: Vec<SectionId> = Vec::new();
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--email" => {
                    email = require_value(&mut args, "--email")?;
                }
                "--password" => {
                    password = require_value(&mut args, "--password")?;
                }
                "--role" => {
                    let value = require_value(&mut args, "--role")?;
                    role = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidRole { raw: value.clone() })?;
                }
                "--complete" => {
                    let value = require_value(&mut args, "--complete")?;
                    let section = SectionId::new(value.clone())
                        .map_err(|_| ArgsError::InvalidSection { raw: value.clone() })?;
                    complete.push(section);
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            email,
            password,
            role,
            complete,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p providers --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:campus.sqlite3)");
    eprintln!("  --email <email>           Account email (default: admin@example.com)");
    eprintln!("  --password <password>     Account password (default: changeme)");
    eprintln!("  --role <learner|admin>    Profile role (default: admin)");
    eprintln!("  --complete <section_id>   Pre-mark a section complete (repeatable)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  CAMPUS_DB_URL, CAMPUS_SEED_EMAIL, CAMPUS_SEED_PASSWORD, CAMPUS_SEED_ROLE");
}

/// `sqlx` opens but never creates database files; make sure one exists.
fn prepare_sqlite_file(db_url: &str) -> std::io::Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }
    let path = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
        .unwrap_or(db_url);
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Ok(());
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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&args.db_url)?;
    let providers = Providers::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let credentials = match providers.identity.sign_up(&args.email, &args.password).await {
        Ok(credentials) => credentials,
        Err(ProviderError::EmailTaken) => {
            providers
                .identity
                .sign_in(&args.email, &args.password)
                .await?
        }
        Err(other) => return Err(other.into()),
    };

    let profile = match providers.progress.load_profile(&credentials.learner_id).await? {
        Some(existing) => LearnerProfile::from_persisted(
            existing.id().clone(),
            existing.email(),
            args.role,
            existing.completed().clone(),
            existing.created_at(),
        )?,
        None => LearnerProfile::new(
            credentials.learner_id.clone(),
            credentials.email.clone(),
            args.role,
            now,
        )?,
    };
    providers.progress.save_profile(&profile).await?;

    for section in &args.complete {
        providers
            .progress
            .append_completed_section(&credentials.learner_id, section, now)
            .await?;
    }

    // sign_up/sign_in wrote the local session slot; clear it so the
    // seeded account is not signed in on the next app launch.
    providers.identity.sign_out().await?;

    println!(
        "Seeded {} account {} with {} pre-completed sections into {}",
        args.role,
        args.email,
        args.complete.len(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
