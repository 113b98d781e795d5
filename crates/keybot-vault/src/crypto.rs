// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the system
//! CSPRNG. Nonce reuse would be catastrophic for GCM security.

use keybot_core::KeybotError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};

pub use ring::aead::NONCE_LEN;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Returns `true` if `key` can construct an AES-256-GCM cipher.
pub fn is_usable_key(key: &[u8]) -> bool {
    UnboundKey::new(&AES_256_GCM, key).is_ok()
}

fn cipher(key: &[u8; KEY_LEN]) -> Result<LessSafeKey, KeybotError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key).map_err(|_| KeybotError::InvalidKey)?;
    Ok(LessSafeKey::new(unbound))
}

/// Encrypt `plaintext` under `key`, authenticating `aad` alongside it.
///
/// Returns `(ciphertext_with_tag, nonce_bytes)`.
pub fn seal(
    key: &[u8; KEY_LEN],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; NONCE_LEN]), KeybotError> {
    let cipher = cipher(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    SystemRandom::new()
        .fill(&mut nonce_bytes)
        .map_err(|_| KeybotError::encrypt("failed to generate random nonce"))?;

    // Seal in place: the buffer is extended with the authentication tag.
    let mut in_out = plaintext.to_vec();
    cipher
        .seal_in_place_append_tag(
            Nonce::assume_unique_for_key(nonce_bytes),
            Aad::from(aad),
            &mut in_out,
        )
        .map_err(|_| KeybotError::encrypt("AES-256-GCM encryption failed"))?;

    Ok((in_out, nonce_bytes))
}

/// Decrypt `ciphertext` (tag appended) and verify it together with `aad`.
///
/// Fails without releasing any plaintext if the key is wrong or any byte of
/// `aad`, nonce, or ciphertext was altered.
pub fn open(
    key: &[u8; KEY_LEN],
    nonce_bytes: &[u8; NONCE_LEN],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, KeybotError> {
    let cipher = cipher(key)?;

    let mut in_out = ciphertext.to_vec();
    let plaintext = cipher
        .open_in_place(
            Nonce::assume_unique_for_key(*nonce_bytes),
            Aad::from(aad),
            &mut in_out,
        )
        .map_err(|_| {
            KeybotError::decrypt("authentication failed -- wrong key or corrupted data")
        })?;

    Ok(plaintext.to_vec())
}
