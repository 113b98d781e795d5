// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated ciphertext tokens.
//!
//! Token layout before base64 (URL-safe, padded):
//!
//! ```text
//! +---------+----------------+-----------+----------------------+---------+
//! | version | issued_at (BE) | nonce     | AES-256-GCM payload  | tag     |
//! | 1 byte  | 8 bytes        | 12 bytes  | len(plaintext) bytes | 16 bytes|
//! +---------+----------------+-----------+----------------------+---------+
//! ```
//!
//! The version byte and timestamp are the GCM associated data, so they are
//! covered by the tag even though they travel in the clear.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use keybot_config::model::CodecConfig;
use keybot_core::KeybotError;
use tracing::debug;

use crate::crypto::{self, NONCE_LEN, TAG_LEN};
use crate::key::Key;

/// Current token format version.
pub const TOKEN_VERSION: u8 = 0x80;

const HEADER_LEN: usize = 1 + 8;
const MIN_TOKEN_LEN: usize = HEADER_LEN + NONCE_LEN + TAG_LEN;

/// How far in the future a token timestamp may be before it is rejected.
/// Only enforced when a maximum age is configured.
pub const MAX_CLOCK_SKEW: Duration = Duration::from_secs(60);

/// Encrypts and decrypts short whitespace-free text under a [`Key`].
///
/// Stateless apart from the optional token age limit; cheap to clone and
/// safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct KeyCodec {
    max_age: Option<Duration>,
}

impl KeyCodec {
    /// A codec that accepts tokens of any age.
    pub fn new() -> Self {
        Self::default()
    }

    /// A codec that rejects tokens older than `max_age` on decrypt.
    pub fn with_max_age(max_age: Option<Duration>) -> Self {
        Self { max_age }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::with_max_age(config.max_token_age())
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Encrypt `plaintext` into a token.
    ///
    /// Plaintext must be non-empty and contain no whitespace; whitespace is
    /// the argument delimiter of the command grammar, so such a value could
    /// never be decrypted back through it.
    pub fn encrypt(&self, key: &Key, plaintext: &str) -> Result<String, KeybotError> {
        self.encrypt_at(key, plaintext, unix_now())
    }

    /// Decrypt a token produced by [`KeyCodec::encrypt`] under the same key.
    pub fn decrypt(&self, key: &Key, token: &str) -> Result<String, KeybotError> {
        self.decrypt_at(key, token, unix_now())
    }

    pub(crate) fn encrypt_at(
        &self,
        key: &Key,
        plaintext: &str,
        issued_at: u64,
    ) -> Result<String, KeybotError> {
        if plaintext.is_empty() {
            return Err(KeybotError::encrypt("plaintext is empty"));
        }
        if plaintext.chars().any(char::is_whitespace) {
            return Err(KeybotError::encrypt("plaintext contains whitespace"));
        }

        let header = token_header(issued_at);
        let (ciphertext, nonce) = crypto::seal(key.as_bytes(), &header, plaintext.as_bytes())?;

        let mut raw = Vec::with_capacity(HEADER_LEN + NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(&header);
        raw.extend_from_slice(&nonce);
        raw.extend_from_slice(&ciphertext);
        Ok(URL_SAFE.encode(raw))
    }

    pub(crate) fn decrypt_at(&self, key: &Key, token: &str, now: u64) -> Result<String, KeybotError> {
        let raw = URL_SAFE
            .decode(token.as_bytes())
            .map_err(|_| KeybotError::decrypt("token is not valid base64"))?;
        if raw.len() < MIN_TOKEN_LEN {
            return Err(KeybotError::decrypt("token is too short"));
        }

        let (header, rest) = raw.split_at(HEADER_LEN);
        if header[0] != TOKEN_VERSION {
            return Err(KeybotError::decrypt(format!(
                "unsupported token version {:#04x}",
                header[0]
            )));
        }
        let mut issued_at = [0u8; 8];
        issued_at.copy_from_slice(&header[1..]);
        let issued_at = u64::from_be_bytes(issued_at);

        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);

        let plaintext = crypto::open(key.as_bytes(), &nonce, header, ciphertext)?;

        // The timestamp is only trustworthy once the tag has verified.
        self.check_age(issued_at, now)?;

        String::from_utf8(plaintext).map_err(|_| KeybotError::decrypt("plaintext is not valid UTF-8"))
    }

    fn check_age(&self, issued_at: u64, now: u64) -> Result<(), KeybotError> {
        let Some(max_age) = self.max_age else {
            return Ok(());
        };

        if issued_at > now.saturating_add(MAX_CLOCK_SKEW.as_secs()) {
            debug!(issued_at, now, "rejecting token from the future");
            return Err(KeybotError::decrypt("token timestamp is in the future"));
        }
        if now.saturating_sub(issued_at) > max_age.as_secs() {
            debug!(issued_at, now, max_age_secs = max_age.as_secs(), "rejecting expired token");
            return Err(KeybotError::decrypt("token has expired"));
        }
        Ok(())
    }
}

fn token_header(issued_at: u64) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    header[0] = TOKEN_VERSION;
    header[1..].copy_from_slice(&issued_at.to_be_bytes());
    header
}

fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}
