use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Args, Parser};
use tracing::{debug, error, info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt};
use userbase_core::{NewUser, SeedFile, UserTable, sample_users};
use userbase_sqlite::Session;

const DEFAULT_DATABASE: &str = "database.db";

/// CLI-specific output format for the table dump.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "userbase")]
#[command(about = "Create the users table, seed it, and print its contents", version)]
struct Cli {
    /// Database file path.
    #[arg(long, env = "USERBASE_DATABASE", default_value = DEFAULT_DATABASE)]
    database: PathBuf,
    /// YAML file with records to insert instead of the built-in dataset.
    #[arg(long)]
    seed: Option<PathBuf>,
    /// Output format for the table dump.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
    #[command(flatten)]
    logging: LoggingArgs,
}

#[derive(Debug, Args)]
struct LoggingArgs {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Log line format.
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,
}

impl CliOutputFormat {
    /// Whether stdout is reserved for the serialized document.
    fn is_machine_readable(self) -> bool {
        !matches!(self, CliOutputFormat::Table)
    }

    /// Emits a progress line: on stdout next to the table dump, or as a log
    /// event when stdout carries a JSON/YAML document.
    fn status(self, line: &str) {
        if self.is_machine_readable() {
            info!("{line}");
        } else {
            println!("{line}");
        }
    }
}

impl LoggingArgs {
    /// Installs the subscriber. Logs share stdout with the table dump, but
    /// move to stderr when stdout carries a JSON/YAML document.
    fn init(&self, to_stderr: bool) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let (writer, ansi) = if to_stderr {
            (BoxMakeWriter::new(std::io::stderr), std::io::stderr().is_terminal())
        } else {
            (BoxMakeWriter::new(std::io::stdout), std::io::stdout().is_terminal())
        };

        match self.log_format {
            LogFormat::Json => {
                fmt().json().with_env_filter(filter).with_writer(writer).init();
            }
            LogFormat::Pretty => {
                fmt()
                    .with_env_filter(filter)
                    .with_ansi(ansi)
                    .with_writer(writer)
                    .init();
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    cli.logging.init(cli.format.is_machine_readable());
    run(&cli);
}

/// Runs the fixed sequence. Every failure is logged and swallowed; the
/// process always exits successfully.
fn run(cli: &Cli) {
    let out = cli.format;
    let records = load_records(cli.seed.as_deref());

    let Some(mut session) = connect(&cli.database, out) else {
        return;
    };

    ensure_schema(&mut session, out);

    if let Some(records) = records {
        insert_records(&session, &records, out);
    }

    if let Some(table) = fetch_all(&session, out) {
        print_table(&table, out);
    }

    if let Err(err) = session.close() {
        error!(error = %err, "Failed to close database");
    }
}

fn load_records(seed: Option<&Path>) -> Option<Vec<NewUser>> {
    let Some(path) = seed else {
        return Some(sample_users());
    };

    match SeedFile::load(path) {
        Ok(seed) => {
            debug!(path = %path.display(), users = seed.users.len(), "Loaded seed file");
            Some(seed.into_users())
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "Failed to load seed file");
            None
        }
    }
}

fn connect(path: &Path, out: CliOutputFormat) -> Option<Session> {
    match Session::connect(path) {
        Ok(session) => {
            out.status(&format!("Connected to database '{}'.", path.display()));
            Some(session)
        }
        Err(err) => {
            error!(error = %err, "Connection failed");
            None
        }
    }
}

fn ensure_schema(session: &mut Session, out: CliOutputFormat) {
    match session.ensure_schema() {
        Ok(()) => out.status("Table 'users' is ready."),
        Err(err) => error!(error = %err, "Schema setup failed"),
    }
}

fn insert_records(session: &Session, records: &[NewUser], out: CliOutputFormat) {
    match session.insert_records(records) {
        Ok(report) => {
            out.status(&format!(
                "{} user record(s) submitted, {} inserted.",
                report.attempted, report.inserted
            ));
            if !report.failures.is_empty() {
                warn!(
                    rejected = report.failures.len(),
                    "Some records were rejected by the database"
                );
            }
        }
        Err(err) => error!(error = %err, "Insert failed"),
    }
}

fn fetch_all(session: &Session, out: CliOutputFormat) -> Option<UserTable> {
    match session.fetch_all() {
        Ok(table) => {
            out.status(&format!("Fetched {} user record(s).", table.len()));
            Some(table)
        }
        Err(err) => {
            error!(error = %err, "Fetch failed");
            None
        }
    }
}

fn print_table(table: &UserTable, format: CliOutputFormat) {
    let rendered = match format {
        CliOutputFormat::Table => Ok(table.to_string()),
        CliOutputFormat::Json => serde_json::to_string_pretty(table)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(table).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    };

    match rendered {
        Ok(out) => println!("{}", out.trim_end()),
        Err(err) => error!(error = %err, "Failed to render table"),
    }
}
