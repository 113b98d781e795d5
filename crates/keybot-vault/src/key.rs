// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Symmetric key material and its textual form.
//!
//! A [`Key`] is 32 bytes for AES-256-GCM. Users see and type it as URL-safe
//! base64 with padding (44 characters), which survives chat transports
//! unchanged.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use keybot_core::KeybotError;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_LEN};

/// Length of a key's textual form.
pub const ENCODED_KEY_LEN: usize = 44;

/// A validated AES-256-GCM key. Zeroed on drop.
///
/// Debug output intentionally omits the key bytes.
#[derive(Clone)]
pub struct Key(Zeroizing<[u8; KEY_LEN]>);

impl Key {
    /// Generate a fresh key from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        rand::thread_rng().fill_bytes(bytes.as_mut_slice());
        Self(bytes)
    }

    /// Validate user-supplied key text.
    ///
    /// Accepts only canonical padded URL-safe base64 decoding to exactly
    /// [`KEY_LEN`] bytes, so `Key::parse(s)?.encode() == s` always holds.
    pub fn parse(raw: &str) -> Result<Self, KeybotError> {
        if raw.len() != ENCODED_KEY_LEN {
            return Err(KeybotError::InvalidKey);
        }

        let decoded = Zeroizing::new(
            URL_SAFE
                .decode(raw.as_bytes())
                .map_err(|_| KeybotError::InvalidKey)?,
        );
        if decoded.len() != KEY_LEN || !crypto::is_usable_key(&decoded) {
            return Err(KeybotError::InvalidKey);
        }

        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// The textual form handed back to users.
    pub fn encode(&self) -> String {
        URL_SAFE.encode(self.0.as_slice())
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice() == other.0.as_slice()
    }
}

impl Eq for Key {}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&"[REDACTED]").finish()
    }
}
