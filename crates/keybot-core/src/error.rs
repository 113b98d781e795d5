// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the keybot credential assistant.

use thiserror::Error;

/// The primary error type used across keybot crates.
///
/// Every variant except [`KeybotError::Internal`] describes bad user input.
/// The command handlers turn those into reply text; none of them terminate
/// the process. Configuration failures use `keybot_config::ConfigError`.
#[derive(Debug, Error)]
pub enum KeybotError {
    /// Key material is malformed or cannot build a cipher.
    #[error("invalid key material")]
    InvalidKey,

    /// An operation needed the session key but none is stored.
    #[error("no key has been set for this user")]
    KeyNotSet,

    /// Wrong argument count or an empty required argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Encryption was refused or failed.
    #[error("encryption failed: {reason}")]
    Encrypt { reason: String },

    /// Decryption failed: malformed token, authentication failure, or expiry.
    #[error("decryption failed: {reason}")]
    Decrypt { reason: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl KeybotError {
    /// Shorthand for an [`KeybotError::Encrypt`] with a static reason.
    pub fn encrypt(reason: impl Into<String>) -> Self {
        Self::Encrypt {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`KeybotError::Decrypt`] with a static reason.
    pub fn decrypt(reason: impl Into<String>) -> Self {
        Self::Decrypt {
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by what the user typed.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = KeybotError::decrypt("authentication tag mismatch");
        assert_eq!(
            err.to_string(),
            "decryption failed: authentication tag mismatch"
        );
    }

    #[test]
    fn user_errors_are_classified() {
        assert!(KeybotError::InvalidKey.is_user_error());
        assert!(KeybotError::KeyNotSet.is_user_error());
        assert!(KeybotError::encrypt("empty").is_user_error());
        assert!(!KeybotError::Internal("boom".into()).is_user_error());
    }
}
