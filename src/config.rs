//! Command-line and environment configuration. Everything has a sensible
//! default so running the binary with no arguments just works.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".travel-planner";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "travel_planner.db";
/// Log file written next to the database unless overridden.
const LOG_FILE_NAME: &str = "travel_planner.log";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Keep track of travel plans and their itineraries from the terminal"
)]
pub struct Cli {
    #[arg(
        long = "db",
        env = "TRAVEL_PLANNER_DB",
        value_name = "PATH",
        help = "SQLite database file (defaults to ~/.travel-planner/travel_planner.db)"
    )]
    pub db: Option<PathBuf>,

    #[arg(
        long = "log-file",
        env = "TRAVEL_PLANNER_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (defaults to travel_planner.log beside the database)"
    )]
    pub log_file: Option<PathBuf>,
}

/// Fully resolved locations the application needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_file: PathBuf,
}

impl Config {
    /// Fill in defaults for anything the command line left out and make sure
    /// the database directory exists.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let db_path = match cli.db {
            Some(path) => path,
            None => default_db_path()?,
        };
        let log_file = cli
            .log_file
            .unwrap_or_else(|| sibling(&db_path, LOG_FILE_NAME));

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }

        Ok(Self { db_path, log_file })
    }
}

/// Load `.env` (or whatever `DOTENV_PATH` points at) and parse the command
/// line.
pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();
    Cli::parse()
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

fn sibling(path: &Path, file_name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_win() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("trips.db");
        let log = dir.path().join("trips.log");

        let config = Config::resolve(Cli {
            db: Some(db.clone()),
            log_file: Some(log.clone()),
        })
        .unwrap();

        assert_eq!(config.db_path, db);
        assert_eq!(config.log_file, log);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn log_file_defaults_next_to_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("trips.db");

        let config = Config::resolve(Cli {
            db: Some(db),
            log_file: None,
        })
        .unwrap();

        assert_eq!(config.log_file, dir.path().join(LOG_FILE_NAME));
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        assert_eq!(
            sibling(Path::new("trips.db"), LOG_FILE_NAME),
            PathBuf::from(LOG_FILE_NAME)
        );
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from(["travel-planner", "--db", "a.db", "--log-file", "a.log"])
            .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("a.db")));
        assert_eq!(cli.log_file, Some(PathBuf::from("a.log")));
    }
}
