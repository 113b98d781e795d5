// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for keybot integration tests.
//!
//! [`TestHarness`] wires a [`keybot_router::Router`] to a fresh in-memory
//! session store and records every exchange, so tests can drive whole
//! conversations without a terminal.

pub mod harness;

pub use harness::{Exchange, TestHarness, TestHarnessBuilder};
