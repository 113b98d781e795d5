// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key handling for keybot.
//!
//! - [`Key`]: validated AES-256-GCM key material with a base64 text form
//! - [`KeyCodec`]: authenticated, versioned ciphertext tokens
//! - [`SessionStore`]: at most one key per user, with an in-memory
//!   concurrent implementation in [`MemorySessionStore`]

pub mod codec;
pub mod crypto;
pub mod key;
pub mod session;

pub use codec::KeyCodec;
pub use key::Key;
pub use session::{MemorySessionStore, SessionStore};
