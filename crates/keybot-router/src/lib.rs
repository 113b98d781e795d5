// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command routing for the keybot credential assistant.
//!
//! This crate provides:
//! - [`Command`]: the command grammar and its pure parser
//! - [`handlers`]: one function per command, producing reply text
//! - [`Router`]: the entry point taking a user and a raw line of text

pub mod command;
pub mod handlers;
pub mod router;

pub use command::{Command, ParsedCommand};
pub use router::Router;
