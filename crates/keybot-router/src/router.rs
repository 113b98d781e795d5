// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch of parsed commands to their handlers.

use std::sync::Arc;

use keybot_core::UserId;
use keybot_vault::{KeyCodec, SessionStore};
use tracing::debug;

use crate::command::{Command, ParsedCommand};
use crate::handlers;

/// Routes raw user lines to command handlers.
///
/// The router owns no per-user state itself; all keys live in the injected
/// [`SessionStore`]. It is `Send + Sync` and can be shared across threads.
pub struct Router {
    store: Arc<dyn SessionStore>,
    codec: KeyCodec,
}

impl Router {
    /// Create a router over the given session store and codec.
    pub fn new(store: Arc<dyn SessionStore>, codec: KeyCodec) -> Self {
        Self { store, codec }
    }

    /// The session store this router reads and writes.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn codec(&self) -> &KeyCodec {
        &self.codec
    }

    /// Handle one line from `user`.
    ///
    /// Returns `None` when the line is not a command; such lines are
    /// silently ignored.
    pub fn route(&self, user: &UserId, line: &str) -> Option<String> {
        let Some(ParsedCommand { command, args }) = Command::parse(line) else {
            debug!(user = %user, "ignoring non-command message");
            return None;
        };

        debug!(user = %user, %command, arg_count = args.len(), "dispatching command");
        Some(self.dispatch(user, command, &args))
    }

    fn dispatch(&self, user: &UserId, command: Command, args: &[&str]) -> String {
        let store = self.store.as_ref();
        match command {
            Command::Start => handlers::start(),
            Command::Help => handlers::help(),
            Command::SetKey => handlers::set_key(user, args, store),
            Command::GetKey => handlers::get_key(user, store),
            Command::ResetKey => handlers::reset_key(user, store),
            Command::GetRandomKey => handlers::get_random_key(),
            Command::Encrypt => handlers::encrypt(user, args, store, &self.codec),
            Command::Decrypt => handlers::decrypt(user, args, store, &self.codec),
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("sessions", &self.store.len())
            .field("codec", &self.codec)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use keybot_vault::{Key, MemorySessionStore};
    use tracing_test::traced_test;

    use super::*;
    use crate::handlers::replies;

    fn router() -> Router {
        Router::new(Arc::new(MemorySessionStore::new()), KeyCodec::new())
    }

    fn user(name: &str) -> UserId {
        UserId::from(name)
    }

    #[test]
    fn router_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Router>();
    }

    #[test]
    fn non_commands_get_no_reply() {
        let router = router();
        let alice = user("alice");
        assert_eq!(router.route(&alice, ""), None);
        assert_eq!(router.route(&alice, "   "), None);
        assert_eq!(router.route(&alice, "hello there"), None);
        assert_eq!(router.route(&alice, "encryption is cool"), None);
        assert_eq!(router.route(&alice, "setkeys"), None);
    }

    #[test]
    fn start_and_help_differ() {
        let router = router();
        let alice = user("alice");
        assert_eq!(router.route(&alice, "start").as_deref(), Some(replies::GREETING));
        assert_eq!(router.route(&alice, "/help").as_deref(), Some(replies::USAGE));
        assert_eq!(router.route(&alice, "HELP extra args").as_deref(), Some(replies::USAGE));
    }

    #[test]
    fn key_lifecycle() {
        let router = router();
        let alice = user("alice");
        let key = Key::generate().encode();

        assert_eq!(
            router.route(&alice, "getkey").as_deref(),
            Some(replies::NO_KEY)
        );
        assert_eq!(
            router.route(&alice, &format!("setkey {key}")).as_deref(),
            Some(replies::KEY_SET)
        );
        assert_eq!(router.route(&alice, "getkey"), Some(key));
        assert_eq!(
            router.route(&alice, "resetkey").as_deref(),
            Some(replies::KEY_RESET)
        );
        assert_eq!(
            router.route(&alice, "getkey").as_deref(),
            Some(replies::NO_KEY)
        );
    }

    #[test]
    fn arity_errors() {
        let router = router();
        let alice = user("alice");
        assert_eq!(
            router.route(&alice, "setkey a b c").as_deref(),
            Some(replies::INVALID_INPUT)
        );
        assert_eq!(
            router.route(&alice, "encrypt").as_deref(),
            Some(replies::INVALID_INPUT)
        );
        assert_eq!(
            router.route(&alice, "encrypt pwd").as_deref(),
            Some(replies::SET_KEY_FIRST)
        );
    }

    #[test]
    fn getrandomkey_does_not_touch_session() {
        let router = router();
        let alice = user("alice");
        let reply = router.route(&alice, "getrandomkey").unwrap_or_default();
        assert!(Key::parse(&reply).is_ok());
        assert_eq!(
            router.route(&alice, "getkey").as_deref(),
            Some(replies::NO_KEY)
        );
    }

    #[test]
    fn users_do_not_see_each_other() {
        let router = router();
        let (alice, bob) = (user("alice"), user("bob"));

        router.route(&alice, "setkey");
        let token = router.route(&alice, "encrypt secret").unwrap_or_default();

        assert_eq!(router.route(&bob, "getkey").as_deref(), Some(replies::NO_KEY));
        assert_eq!(
            router.route(&bob, &format!("decrypt {token}")).as_deref(),
            Some(replies::SET_KEY_FIRST)
        );
        assert_eq!(
            router.route(&alice, &format!("decrypt {token}")).as_deref(),
            Some("secret")
        );
    }

    #[test]
    fn shared_router_across_threads() {
        let router = Arc::new(router());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let router = Arc::clone(&router);
                std::thread::spawn(move || {
                    let me = user(&format!("user-{i}"));
                    let password = format!("pw{i}");
                    router.route(&me, "setkey");
                    let token = router
                        .route(&me, &format!("encrypt {password}"))
                        .unwrap_or_default();
                    assert_eq!(router.route(&me, &format!("decrypt {token}")), Some(password));
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker thread panicked");
        }
        assert_eq!(router.store().len(), 8);
    }

    #[traced_test]
    #[test]
    fn key_material_is_not_logged() {
        let router = router();
        let alice = user("alice");
        let key = Key::generate().encode();

        router.route(&alice, &format!("setkey {key}"));
        let token = router.route(&alice, "encrypt hunter2").unwrap_or_default();
        router.route(&alice, &format!("decrypt {token}"));
        router.route(&alice, &format!("decrypt {key} not-a-token"));

        assert!(logs_contain("dispatching command"));
        assert!(logs_contain("key set"));
        assert!(!logs_contain(&key));
        assert!(!logs_contain("hunter2"));
        assert!(!logs_contain(&token));
    }
}
