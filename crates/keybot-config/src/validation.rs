// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express: non-empty
//! names, a known log level, a positive token age.

use crate::diagnostic::ConfigError;
use crate::model::KeybotConfig;

/// Log levels accepted by `agent.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &KeybotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::validation("agent.name must not be empty"));
    }

    let level = config.agent.normalized_log_level();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "agent.log_level `{}` is not one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.codec.max_token_age_secs == Some(0) {
        errors.push(ConfigError::validation(
            "codec.max_token_age_secs must be greater than 0 when set",
        ));
    }

    let user = &config.shell.user;
    if user.is_empty() {
        errors.push(ConfigError::validation("shell.user must not be empty"));
    } else if user.chars().any(char::is_whitespace) {
        errors.push(ConfigError::validation(format!(
            "shell.user `{user}` must not contain whitespace"
        )));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
