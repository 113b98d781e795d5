// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across keybot crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, opaque identifier of the user a message came from.
///
/// Transports supply whatever identity they have (a chat user ID, a shell
/// login name); the core only compares and hashes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
