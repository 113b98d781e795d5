// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the keybot credential assistant.
//!
//! Provides the error type and identity types shared by the codec, the
//! command router, and the binary. Nothing here touches key material.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KeybotError;
pub use types::UserId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keybot_error_has_all_variants() {
        let _invalid_key = KeybotError::InvalidKey;
        let _key_not_set = KeybotError::KeyNotSet;
        let _input = KeybotError::InvalidInput("test".into());
        let _encrypt = KeybotError::Encrypt {
            reason: "test".into(),
        };
        let _decrypt = KeybotError::Decrypt {
            reason: "test".into(),
        };
        let _internal = KeybotError::Internal("test".into());
    }

    #[test]
    fn user_id_serialization() {
        let user = UserId::from("12345");
        let json = serde_json::to_string(&user).expect("should serialize");
        assert_eq!(json, "\"12345\"");
        let parsed: UserId = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(user, parsed);
    }
}
