// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./keybot.toml` > `~/.config/keybot/keybot.toml` > `/etc/keybot/keybot.toml`
//! with environment variable overrides via `KEYBOT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::KeybotConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/keybot/keybot.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "keybot.toml";

/// Path of the per-user configuration file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("keybot/keybot.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/keybot/keybot.toml` (system-wide)
/// 3. `~/.config/keybot/keybot.toml` (user XDG config)
/// 4. `./keybot.toml` (local directory)
/// 5. `KEYBOT_*` environment variables
pub fn load_config() -> Result<KeybotConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<KeybotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeybotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KeybotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeybotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for the standard hierarchy.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(KeybotConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider mapping `KEYBOT_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `KEYBOT_CODEC_MAX_TOKEN_AGE_SECS` must become
/// `codec.max_token_age_secs`. The map closure sees the key with its original
/// case, so it is lowercased before the section prefix is rewritten.
fn env_provider() -> Env {
    Env::prefixed("KEYBOT_").map(|key| env_key_to_path(key.as_str()).into())
}

/// Sections that may be overridden from the environment.
const ENV_SECTIONS: &[&str] = &["agent", "codec", "shell"];

fn env_key_to_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(*section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}
