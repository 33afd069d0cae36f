use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use triage_lib::config::{self, ScreeningConfig};
use triage_lib::db::SqliteStore;
use triage_lib::screening::RecordDispatch;
use triage_lib::ScreeningService;

#[derive(Parser, Debug)]
#[command(name = "triage-screen", about = "Keyword-level emergency screen for symptom descriptions")]
#[command(version)]
struct Cli {
    /// Emergency threshold (overrides TRIAGE_THRESHOLD)
    #[arg(long)]
    threshold: Option<u32>,

    /// SQLite store holding catalogs and the assessment log (overrides TRIAGE_DB_PATH)
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Use the store in the per-user data directory
    #[arg(long, conflicts_with = "db")]
    default_db: bool,

    /// Record the assessment under this user id (needs a store)
    #[arg(long, value_name = "ID")]
    user: Option<String>,

    /// Write the built-in catalog to the store before screening
    #[arg(long)]
    seed: bool,

    /// Print the full assessment instead of the report
    #[arg(short, long)]
    verbose: bool,

    /// Text to screen; read from stdin when omitted
    text: Vec<String>,
}

impl Cli {
    /// Store location: `--db`, then `--default-db`, then the environment.
    fn database_path(&self, from_env: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(db) = &self.db {
            return Some(db.clone());
        }
        if self.default_db {
            let path = config::default_database_path();
            if path.is_none() {
                tracing::warn!("No per-user data directory, continuing without a store");
            }
            return path;
        }
        from_env
    }
}

fn open_store(path: Option<&PathBuf>) -> Option<Arc<SqliteStore>> {
    let path = path?;
    match SqliteStore::open(path) {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            tracing::warn!(error = %e, "Screening store unavailable, continuing without it");
            None
        }
    }
}

fn read_stdin() -> Option<String> {
    let mut buffer = String::new();
    match std::io::stdin().read_to_string(&mut buffer) {
        Ok(_) => Some(buffer),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read stdin");
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    triage_lib::init_tracing();

    let mut config = ScreeningConfig::from_env();
    config.database_path = cli.database_path(config.database_path.take());
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }

    let store = open_store(config.database_path.as_ref());
    let service = ScreeningService::with_store(store, &config);

    if cli.seed {
        if let Err(e) = service.seed_default_catalog() {
            eprintln!("seeding failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    let text = if cli.text.is_empty() {
        read_stdin()
    } else {
        Some(cli.text.join(" "))
    };

    let assessment = service.assess(text.as_deref(), None);

    if let (Some(user), Some(text)) = (cli.user.as_deref(), text.as_deref()) {
        if let RecordDispatch::Pending(handle) = service.dispatch_record(user, text, &assessment) {
            // Let the blocking write finish before the runtime shuts down.
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Record task failed");
            }
        }
    }

    let output = if cli.verbose {
        serde_json::to_string_pretty(&assessment)
    } else {
        serde_json::to_string_pretty(&assessment.report())
    };
    match output {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("could not serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("triage-screen").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plain_text_words() {
        let cli = parse(&["chest", "pain"]).unwrap();
        assert_eq!(cli.text, ["chest", "pain"]);
        assert!(cli.threshold.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn all_options() {
        let cli = parse(&[
            "--threshold", "50", "--db", "/tmp/s.db", "--user", "u1", "--seed", "--verbose", "stroke",
        ])
        .unwrap();
        assert_eq!(cli.threshold, Some(50));
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/s.db")));
        assert_eq!(cli.user.as_deref(), Some("u1"));
        assert!(cli.seed);
        assert!(cli.verbose);
        assert_eq!(cli.text, ["stroke"]);
    }

    #[test]
    fn double_dash_ends_options() {
        let cli = parse(&["--", "--seed", "bleeding"]).unwrap();
        assert!(!cli.seed);
        assert_eq!(cli.text, ["--seed", "bleeding"]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--threshold"]).is_err());
        assert!(parse(&["--threshold", "high"]).is_err());
        assert!(parse(&["--threshold", "-5"]).is_err());
        assert!(parse(&["--db"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["--db", "/tmp/s.db", "--default-db"]).is_err());
    }

    #[test]
    fn no_arguments_means_stdin() {
        let cli = parse(&[]).unwrap();
        assert!(cli.text.is_empty());
        assert!(cli.database_path(None).is_none());
    }

    #[test]
    fn database_path_precedence() {
        let env = Some(PathBuf::from("/env/screen.db"));

        let cli = parse(&["--db", "/flag/screen.db"]).unwrap();
        assert_eq!(cli.database_path(env.clone()), Some(PathBuf::from("/flag/screen.db")));

        let cli = parse(&["--default-db"]).unwrap();
        assert_eq!(cli.database_path(env.clone()), config::default_database_path());

        let cli = parse(&["stroke"]).unwrap();
        assert_eq!(cli.database_path(env.clone()), env);
    }
}
