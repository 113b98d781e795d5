// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One handler per command.
//!
//! Handlers turn every user-caused error into reply text. Only internal
//! failures are logged at error level, and their details never reach the
//! reply.

use keybot_core::{KeybotError, UserId};
use keybot_vault::{Key, KeyCodec, SessionStore};
use tracing::{error, info, warn};

/// User-visible reply texts.
pub mod replies {
    pub const GREETING: &str =
        "Hi, I am a bot to encrypt/decrypt password. Use /help for more information";
    pub const KEY_SET: &str = "Key has been set";
    pub const KEY_RESET: &str = "Key has been reset";
    pub const INVALID_KEY: &str = "Invalid Key";
    pub const INVALID_INPUT: &str = "Invalid Input";
    pub const NO_KEY: &str = "No key has been set by you yet";
    pub const SET_KEY_FIRST: &str = "Set key first";
    pub const ENCRYPT_FAILED: &str = "Failed to Encrypt. Check if key and message are valid";
    pub const DECRYPT_FAILED: &str =
        "Failed to Decrypt. Check if key and encrypted message are valid";
    pub const USAGE: &str = "\
Following are the list of messages that you can use-
1. setkey | setkey key - Sets encryption/decryption key. Make sure input key is valid
2. getkey - Returns encryption/decryption key
3. encrypt password | encrypt key password - Returns encrypted password. Input password shouldnt contain whitespaces
4. decrypt encrypted_password | decrypt key encrypted_password - Returns decrypted password. Input encrypted_password should be a valid encryption
5. getrandomkey - Returns random key to encrypt & decrypt
6. resetkey - Resets key if any";
}

pub fn start() -> String {
    replies::GREETING.to_string()
}

pub fn help() -> String {
    replies::USAGE.to_string()
}

/// `setkey` stores a random key; `setkey <key>` stores the given key.
pub fn set_key(user: &UserId, args: &[&str], store: &dyn SessionStore) -> String {
    let key = match args {
        [] => Key::generate(),
        [raw] => match Key::parse(raw) {
            Ok(key) => key,
            Err(_) => return replies::INVALID_KEY.to_string(),
        },
        _ => return replies::INVALID_INPUT.to_string(),
    };

    store.set(user, key);
    info!(user = %user, generated = args.is_empty(), "key set");
    replies::KEY_SET.to_string()
}

/// A fresh key that is not stored anywhere.
pub fn get_random_key() -> String {
    Key::generate().encode()
}

pub fn reset_key(user: &UserId, store: &dyn SessionStore) -> String {
    let had_key = store.clear(user);
    info!(user = %user, had_key, "key reset");
    replies::KEY_RESET.to_string()
}

pub fn get_key(user: &UserId, store: &dyn SessionStore) -> String {
    match store.get(user) {
        Some(key) => key.encode(),
        None => replies::NO_KEY.to_string(),
    }
}

/// `encrypt <password>` with the session key, or `encrypt <key> <password>`.
pub fn encrypt(
    user: &UserId,
    args: &[&str],
    store: &dyn SessionStore,
    codec: &KeyCodec,
) -> String {
    let result = resolve_operands(user, args, store)
        .and_then(|(key, password)| codec.encrypt(&key, password));
    reply_for(user, "encrypt", result, replies::ENCRYPT_FAILED)
}

/// `decrypt <token>` with the session key, or `decrypt <key> <token>`.
pub fn decrypt(
    user: &UserId,
    args: &[&str],
    store: &dyn SessionStore,
    codec: &KeyCodec,
) -> String {
    let result = resolve_operands(user, args, store)
        .and_then(|(key, token)| codec.decrypt(&key, token));
    reply_for(user, "decrypt", result, replies::DECRYPT_FAILED)
}

/// Pick the key and the single payload token for encrypt/decrypt.
///
/// An explicit key applies to this call only and is never stored.
fn resolve_operands<'a>(
    user: &UserId,
    args: &[&'a str],
    store: &dyn SessionStore,
) -> Result<(Key, &'a str), KeybotError> {
    let (key, payload) = match args {
        [payload] => (None, *payload),
        [raw_key, payload] => (Some(*raw_key), *payload),
        _ => {
            return Err(KeybotError::InvalidInput(format!(
                "expected 1 or 2 arguments, got {}",
                args.len()
            )));
        }
    };

    if payload.is_empty() {
        return Err(KeybotError::InvalidInput("empty payload".to_string()));
    }

    let key = match key {
        Some(raw) => Key::parse(raw)?,
        None => store.get(user).ok_or(KeybotError::KeyNotSet)?,
    };
    Ok((key, payload))
}

fn reply_for(
    user: &UserId,
    operation: &str,
    result: Result<String, KeybotError>,
    failure_reply: &str,
) -> String {
    match result {
        Ok(output) => output,
        Err(KeybotError::InvalidInput(_)) => replies::INVALID_INPUT.to_string(),
        Err(KeybotError::KeyNotSet) => replies::SET_KEY_FIRST.to_string(),
        Err(e) if e.is_user_error() => {
            warn!(user = %user, operation, error = %e, "codec rejected request");
            failure_reply.to_string()
        }
        Err(e) => {
            error!(user = %user, operation, error = %e, "unexpected failure");
            failure_reply.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use keybot_vault::MemorySessionStore;

    use super::*;

    fn alice() -> UserId {
        UserId::from("alice")
    }

    #[test]
    fn set_key_without_args_generates_and_stores() {
        let store = MemorySessionStore::new();
        assert_eq!(set_key(&alice(), &[], &store), replies::KEY_SET);
        assert!(store.get(&alice()).is_some());
    }

    #[test]
    fn set_key_with_valid_key_stores_it() {
        let store = MemorySessionStore::new();
        let key = Key::generate().encode();
        assert_eq!(set_key(&alice(), &[key.as_str()], &store), replies::KEY_SET);
        assert_eq!(get_key(&alice(), &store), key);
    }

    #[test]
    fn set_key_with_invalid_key_keeps_previous() {
        let store = MemorySessionStore::new();
        let key = Key::generate().encode();
        set_key(&alice(), &[key.as_str()], &store);

        assert_eq!(set_key(&alice(), &["not-a-key"], &store), replies::INVALID_KEY);
        assert_eq!(get_key(&alice(), &store), key);
    }

    #[test]
    fn set_key_with_too_many_args_is_invalid_input() {
        let store = MemorySessionStore::new();
        assert_eq!(set_key(&alice(), &["a", "b", "c"], &store), replies::INVALID_INPUT);
        assert!(store.is_empty());
    }

    #[test]
    fn get_random_key_is_valid_and_unstored() {
        let raw = get_random_key();
        assert!(Key::parse(&raw).is_ok());
        assert_ne!(raw, get_random_key());
    }

    #[test]
    fn reset_key_twice_is_idempotent() {
        let store = MemorySessionStore::new();
        set_key(&alice(), &[], &store);
        assert_eq!(reset_key(&alice(), &store), replies::KEY_RESET);
        assert_eq!(reset_key(&alice(), &store), replies::KEY_RESET);
        assert_eq!(get_key(&alice(), &store), replies::NO_KEY);
    }

    #[test]
    fn encrypt_without_args_is_invalid_input() {
        let store = MemorySessionStore::new();
        let codec = KeyCodec::new();
        assert_eq!(encrypt(&alice(), &[], &store, &codec), replies::INVALID_INPUT);
        assert_eq!(
            decrypt(&alice(), &["a", "b", "c"], &store, &codec),
            replies::INVALID_INPUT
        );
    }

    #[test]
    fn encrypt_with_empty_payload_is_invalid_input() {
        let store = MemorySessionStore::new();
        set_key(&alice(), &[], &store);
        assert_eq!(
            encrypt(&alice(), &[""], &store, &KeyCodec::new()),
            replies::INVALID_INPUT
        );
    }

    #[test]
    fn encrypt_without_stored_key_asks_for_one() {
        let store = MemorySessionStore::new();
        let codec = KeyCodec::new();
        assert_eq!(encrypt(&alice(), &["pwd"], &store, &codec), replies::SET_KEY_FIRST);
        assert_eq!(decrypt(&alice(), &["tok"], &store, &codec), replies::SET_KEY_FIRST);
    }

    #[test]
    fn stored_key_roundtrip() {
        let store = MemorySessionStore::new();
        let codec = KeyCodec::new();
        set_key(&alice(), &[], &store);

        let token = encrypt(&alice(), &["hunter2"], &store, &codec);
        assert_ne!(token, replies::ENCRYPT_FAILED);
        assert_eq!(decrypt(&alice(), &[token.as_str()], &store, &codec), "hunter2");
    }

    #[test]
    fn explicit_key_is_not_stored() {
        let store = MemorySessionStore::new();
        let codec = KeyCodec::new();
        let key = Key::generate().encode();

        let token = encrypt(&alice(), &[key.as_str(), "pwd"], &store, &codec);
        assert_eq!(decrypt(&alice(), &[key.as_str(), token.as_str()], &store, &codec), "pwd");
        assert!(store.get(&alice()).is_none());
    }

    #[test]
    fn explicit_key_overrides_stored_key() {
        let store = MemorySessionStore::new();
        let codec = KeyCodec::new();
        set_key(&alice(), &[], &store);
        let other = Key::generate().encode();

        let token = encrypt(&alice(), &[other.as_str(), "pwd"], &store, &codec);
        assert_eq!(decrypt(&alice(), &[token.as_str()], &store, &codec), replies::DECRYPT_FAILED);
        assert_eq!(decrypt(&alice(), &[other.as_str(), token.as_str()], &store, &codec), "pwd");
    }

    #[test]
    fn invalid_explicit_key_reports_codec_failure() {
        let store = MemorySessionStore::new();
        let codec = KeyCodec::new();
        assert_eq!(
            encrypt(&alice(), &["bogus", "pwd"], &store, &codec),
            replies::ENCRYPT_FAILED
        );
        assert_eq!(
            decrypt(&alice(), &["bogus", "tok"], &store, &codec),
            replies::DECRYPT_FAILED
        );
    }

    #[test]
    fn decrypt_garbage_reports_failure() {
        let store = MemorySessionStore::new();
        set_key(&alice(), &[], &store);
        assert_eq!(
            decrypt(&alice(), &["garbage"], &store, &KeyCodec::new()),
            replies::DECRYPT_FAILED
        );
    }
}
