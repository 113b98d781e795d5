// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end conversation tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use keybot_config::model::KeybotConfig;
use keybot_core::UserId;
use keybot_router::Router;
use keybot_vault::{KeyCodec, MemorySessionStore, SessionStore};

/// Builder for creating test environments with configurable options.
#[derive(Debug, Default)]
pub struct TestHarnessBuilder {
    config: KeybotConfig,
}

impl TestHarnessBuilder {
    /// Reject tokens older than `max_age`.
    pub fn with_max_token_age(mut self, max_age: Duration) -> Self {
        self.config.codec.max_token_age_secs = Some(max_age.as_secs());
        self
    }

    /// Start from a full configuration instead of the defaults.
    pub fn with_config(mut self, config: KeybotConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> TestHarness {
        let store = Arc::new(MemorySessionStore::new());
        let codec = KeyCodec::from_config(&self.config.codec);
        let router = Router::new(store.clone(), codec);
        tracing::debug!(max_age = ?router.codec().max_age(), "test harness ready");

        TestHarness {
            router,
            store,
            transcript: Mutex::new(Vec::new()),
        }
    }
}

/// One line sent by a user and the reply it produced, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: UserId,
    pub line: String,
    pub reply: Option<String>,
}

/// A router over a private in-memory store, plus a transcript of traffic.
#[derive(Debug)]
pub struct TestHarness {
    router: Router,
    store: Arc<MemorySessionStore>,
    transcript: Mutex<Vec<Exchange>>,
}

impl TestHarness {
    /// Create a builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    /// Harness with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Route `line` as `user` and return the reply.
    pub fn send(&self, user: &str, line: &str) -> Option<String> {
        let user = UserId::from(user);
        let reply = self.router.route(&user, line);
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Exchange {
                user,
                line: line.to_string(),
                reply: reply.clone(),
            });
        reply
    }

    /// Like [`TestHarness::send`], but panics when no reply is produced.
    pub fn reply(&self, user: &str, line: &str) -> String {
        match self.send(user, line) {
            Some(reply) => reply,
            None => panic!("expected a reply to {line:?} from {user}"),
        }
    }

    /// Number of users currently holding a key.
    pub fn active_sessions(&self) -> usize {
        self.store.len()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Every exchange so far, oldest first.
    pub fn transcript(&self) -> Vec<Exchange> {
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
