//! Error types for taskline

use std::path::PathBuf;

use thiserror::Error;

/// Problems with a single command line. Always recoverable: the session
/// reports them and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Enter a description for the {0}.")]
    EmptyDescription(&'static str),

    #[error("A deadline needs a due date: deadline <description> /by <YYYY-MM-DD>")]
    MissingDeadline,

    #[error("An event needs both dates: event <description> /from <YYYY-MM-DD> /to <YYYY-MM-DD>")]
    MissingEventTime,

    #[error("Invalid date `{0}`. Enter dates in YYYY-MM-DD format.")]
    InvalidDate(String),

    #[error("Please enter a valid task number (got `{0}`).")]
    InvalidNumber(String),

    #[error("Task {0} does not exist.")]
    TaskNotFound(usize),

    #[error("Descriptions may not contain the `|` character.")]
    ReservedCharacter,
}

/// Failures reading or writing the data file.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("no data file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("task store {} is busy: another session has it open", .0.display())]
    Busy(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot determine a {0} directory for this platform")]
    NoProjectDir(&'static str),
}
