// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `keybot shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and in-memory readline
//! history. Every line goes through the command router as the active user;
//! keys live only for the lifetime of the process.

use std::sync::Arc;

use colored::Colorize;
use keybot_config::model::KeybotConfig;
use keybot_core::{KeybotError, UserId};
use keybot_router::Router;
use keybot_vault::{KeyCodec, MemorySessionStore, SessionStore};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

/// A line handled by the shell itself rather than the router.
#[derive(Debug, PartialEq, Eq)]
enum Directive<'a> {
    Quit,
    SwitchUser(&'a str),
    /// A `:` line the shell does not understand, with a usage hint.
    Invalid(&'static str),
}

/// Recognize shell directives. Anything else is routed.
fn parse_directive(line: &str) -> Option<Directive<'_>> {
    let line = line.trim();
    if line == "/quit" || line == "/exit" {
        return Some(Directive::Quit);
    }

    let rest = line.strip_prefix(':')?;
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some("user"), Some(id), None) => Some(Directive::SwitchUser(id)),
        (Some("user"), _, _) => Some(Directive::Invalid("usage: :user <id>")),
        _ => Some(Directive::Invalid("unknown directive; try :user <id> or /quit")),
    }
}

fn prompt_for(agent_name: &str, user: &UserId) -> String {
    format!("{}@{}> ", user.as_str().cyan(), agent_name.green())
}

/// Runs the `keybot shell` interactive REPL.
pub fn run_shell(config: &KeybotConfig, user: Option<String>) -> Result<(), KeybotError> {
    let store = Arc::new(MemorySessionStore::new());
    let router = Router::new(store.clone(), KeyCodec::from_config(&config.codec));
    let mut user = UserId::from(user.unwrap_or_else(|| config.shell.user.clone()));

    let mut rl = DefaultEditor::new()
        .map_err(|e| KeybotError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", config.agent.name.bold().green());
    println!(
        "Type {} for commands, {} to switch user, {} to exit.\n",
        "help".yellow(),
        ":user <id>".yellow(),
        "/quit".yellow()
    );
    info!(user = %user, "shell session started");

    loop {
        match rl.readline(&prompt_for(&config.agent.name, &user)) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match parse_directive(&line) {
                    Some(Directive::Quit) => break,
                    Some(Directive::SwitchUser(id)) => {
                        user = UserId::from(id);
                        debug!(user = %user, "switched user");
                    }
                    Some(Directive::Invalid(hint)) => eprintln!("{}", hint.yellow()),
                    None => {
                        if let Some(reply) = router.route(&user, &line) {
                            println!("{reply}");
                        }
                    }
                }
            }
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    info!(sessions = store.len(), "shell session ended");
    println!("{}", "goodbye".dimmed());
    Ok(())
}
