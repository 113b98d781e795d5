// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for keybot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level keybot configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeybotConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Ciphertext token settings.
    #[serde(default)]
    pub codec: CodecConfig,

    /// Interactive shell settings.
    #[serde(default)]
    pub shell: ShellConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name, shown in the shell banner and prompt.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

impl AgentConfig {
    /// `log_level` trimmed and lowercased, as used for filter directives.
    pub fn normalized_log_level(&self) -> String {
        self.log_level.trim().to_ascii_lowercase()
    }
}

fn default_agent_name() -> String {
    "keybot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Ciphertext token configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Reject tokens older than this many seconds on decrypt.
    /// `None` accepts tokens of any age.
    #[serde(default)]
    pub max_token_age_secs: Option<u64>,
}

impl CodecConfig {
    /// The configured maximum token age as a [`Duration`].
    pub fn max_token_age(&self) -> Option<Duration> {
        self.max_token_age_secs.map(Duration::from_secs)
    }
}

/// Interactive shell configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Identity used for messages typed into the shell until `:user` switches it.
    #[serde(default = "default_shell_user")]
    pub user: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: default_shell_user(),
        }
    }
}

fn default_shell_user() -> String {
    "local".to_string()
}
