use std::{env, io, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskline::{
    app::{self, Session},
    config::{self, Config},
    Cli, Cmd,
};

const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => config::default_config_file()?,
    };
    let cfg = Config::load(&config_path)?;
    init_tracing(cli.log_level.as_deref(), cfg.log_level.as_deref());

    let data_path = cfg
        .data_file(cli.data_file)
        .context("cannot resolve the data file location")?;

    match cli.cmd {
        Some(Cmd::Path) => {
            println!("{}", data_path.display());
        }
        Some(Cmd::Exec { words }) => {
            let mut session = open_session(&data_path)?;
            let reply = session.handle(&words.join(" "));
            println!("{}", reply.text);
        }
        Some(Cmd::Repl) | None => {
            let mut session = open_session(&data_path)?;
            let stdin = io::stdin();
            app::run(&mut session, stdin.lock(), io::stdout().lock())
                .context("terminal I/O failed")?;
        }
    }

    Ok(())
}

fn open_session(path: &Path) -> Result<Session> {
    Session::open(path).with_context(|| format!("cannot open task store {}", path.display()))
}

/// Logs go to stderr so replies on stdout stay clean.
fn init_tracing(flag: Option<&str>, configured: Option<&str>) {
    let from_env = env::var("RUST_LOG").ok();
    let filter = log_filter(flag, from_env.as_deref(), configured);
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// `--log-level` first, then `RUST_LOG`, then the config file.
fn log_filter<'a>(
    flag: Option<&'a str>,
    env: Option<&'a str>,
    configured: Option<&'a str>,
) -> &'a str {
    flag.or(env)
        .or(configured)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_LOG_FILTER)
}
