// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user key sessions.
//!
//! Each user holds at most one [`Key`]. A missing entry is the only "no key"
//! state; there is no empty placeholder value.

use dashmap::DashMap;
use keybot_core::UserId;
use tracing::debug;

use crate::key::Key;

/// Mapping from user identity to that user's current key.
///
/// Implementations must be safe to share across threads. Each call is
/// atomic with respect to other calls for the same user.
pub trait SessionStore: Send + Sync {
    /// The user's key, or `None` if none is set.
    fn get(&self, user: &UserId) -> Option<Key>;

    /// Store `key` for `user`, replacing any previous key.
    fn set(&self, user: &UserId, key: Key);

    /// Remove the user's key. Returns whether a key was present.
    fn clear(&self, user: &UserId) -> bool;

    /// Number of users that currently hold a key.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime [`SessionStore`] backed by a sharded concurrent map.
///
/// Users hashing to different shards never contend; calls for the same user
/// are serialized by that shard's lock.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<UserId, Key>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, user: &UserId) -> Option<Key> {
        self.sessions.get(user).map(|entry| entry.value().clone())
    }

    fn set(&self, user: &UserId, key: Key) {
        let replaced = self.sessions.insert(user.clone(), key).is_some();
        debug!(user = %user, replaced, "session key stored");
    }

    fn clear(&self, user: &UserId) -> bool {
        let removed = self.sessions.remove(user).is_some();
        debug!(user = %user, removed, "session key cleared");
        removed
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
