// SPDX-FileCopyrightText: 2026 Keybot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command grammar: one keyword followed by whitespace-separated arguments.
//!
//! The keyword must equal a command name ignoring ASCII case. Chat-style
//! `/help` and `/help@botname` forms are accepted too.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

/// Every command the assistant understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Command {
    Start,
    Help,
    SetKey,
    GetKey,
    ResetKey,
    GetRandomKey,
    Encrypt,
    Decrypt,
}

/// A recognized command and the tokens that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub command: Command,
    pub args: Vec<&'a str>,
}

impl Command {
    /// Parse one line of user text.
    ///
    /// Returns `None` for empty lines and lines whose first token is not a
    /// command keyword. `"encryption is cool"` is not `encrypt`.
    pub fn parse(line: &str) -> Option<ParsedCommand<'_>> {
        let mut tokens = line.split_whitespace();
        let command = Self::from_keyword(tokens.next()?)?;
        Some(ParsedCommand {
            command,
            args: tokens.collect(),
        })
    }

    fn from_keyword(token: &str) -> Option<Self> {
        let name = match token.strip_prefix('/') {
            Some(rest) => rest.split_once('@').map_or(rest, |(name, _bot)| name),
            None => token,
        };
        Self::from_str(name).ok()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn keywords_are_lowercase_names() {
        let names: Vec<String> = Command::iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            [
                "start",
                "help",
                "setkey",
                "getkey",
                "resetkey",
                "getrandomkey",
                "encrypt",
                "decrypt"
            ]
        );
    }

    #[test]
    fn every_command_parses_in_any_case() {
        for command in Command::iter() {
            let lower = command.to_string();
            assert_eq!(Command::parse(&lower).unwrap().command, command);
            assert_eq!(Command::parse(&lower.to_uppercase()).unwrap().command, command);
        }
        assert_eq!(Command::parse("SetKey").unwrap().command, Command::SetKey);
    }

    #[test]
    fn args_follow_keyword() {
        let parsed = Command::parse("  encrypt   KEY \t secret  ").unwrap();
        assert_eq!(parsed.command, Command::Encrypt);
        assert_eq!(parsed.args, ["KEY", "secret"]);
    }

    #[test]
    fn keyword_must_be_whole_token() {
        assert!(Command::parse("encryption is cool").is_none());
        assert!(Command::parse("getkeys").is_none());
        assert!(Command::parse("set key").is_none());
    }

    #[test]
    fn empty_and_unknown_lines_are_ignored() {
        assert!(Command::parse("").is_none());
        assert!(Command::parse("   \n").is_none());
        assert!(Command::parse("hello there").is_none());
    }

    #[test]
    fn slash_forms_are_accepted() {
        assert_eq!(Command::parse("/help").unwrap().command, Command::Help);
        assert_eq!(
            Command::parse("/getrandomkey@keybot").unwrap().command,
            Command::GetRandomKey
        );
        assert_eq!(Command::parse("/Start extra").unwrap().args, ["extra"]);
    }

    #[test]
    fn malformed_slash_forms_are_ignored() {
        assert!(Command::parse("/").is_none());
        assert!(Command::parse("//help").is_none());
        assert!(Command::parse("/@keybot").is_none());
        assert!(Command::parse("help@keybot").is_none());
    }
}
