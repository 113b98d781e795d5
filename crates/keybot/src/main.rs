// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keybot - a conversational assistant that encrypts and decrypts passwords.
//!
//! This is the binary entry point. It loads configuration, installs the
//! tracing subscriber, and drives the command router from a local shell.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod shell;

use clap::{Parser, Subcommand};
use colored::Colorize;

/// Keybot - encrypt and decrypt passwords with a per-user key.
#[derive(Parser, Debug)]
#[command(name = "keybot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive session.
    Shell {
        /// Identity to start the session as (defaults to `shell.user`).
        #[arg(long)]
        user: Option<String>,
    },
    /// Print a fresh random key.
    Keygen,
}

fn main() {
    let cli = Cli::parse();

    let config = match keybot_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            keybot_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.normalized_log_level());
    tracing::debug!(agent = %config.agent.name, "config loaded");

    match cli.command {
        Some(Commands::Shell { user }) => {
            if let Err(e) = shell::run_shell(&config, user) {
                eprintln!("{}: {e}", "error".red());
                std::process::exit(1);
            }
        }
        Some(Commands::Keygen) => {
            println!("{}", keybot_vault::Key::generate().encode());
        }
        None => {
            println!("keybot: use --help for available commands");
        }
    }
}

/// Default filter when `RUST_LOG` is unset: the configured level for every
/// keybot crate, `warn` for everything else.
fn default_filter(log_level: &str) -> String {
    ["keybot", "keybot_router", "keybot_vault"]
        .iter()
        .map(|target| format!("{target}={log_level}"))
        .chain(std::iter::once("warn".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so shell replies on stdout stay clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
