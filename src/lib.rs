pub mod app;
pub mod config;
pub mod error;
pub mod persistence;
pub mod task;
pub mod todolist;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI shared between main and tests
#[derive(Parser, Debug)]
#[command(name = "taskline", version, about = "A small command-driven task tracker")]
pub struct Cli {
    /// Override for the data file
    #[arg(long, env = "TASKLINE_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(long, env = "TASKLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter for stderr, e.g. `debug` or `taskline=trace`
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Read commands from stdin until `bye` (the default)
    Repl,
    /// Run a single command line, e.g. `exec todo Buy honey`
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Print the resolved data file path
    Path,
}
