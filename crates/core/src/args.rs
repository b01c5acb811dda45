//! Command-line tokenization
//!
//! Turns raw process arguments into a flat [`Invocation`]: positional values
//! in order, a map of flags, and whether help was requested. Task-level
//! meaning (which positional is the command, which values belong to which
//! task) is applied later by the argument binder.

use std::collections::BTreeMap;

use trellis_protocol::FlagValue;

/// Flat view of one command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub positional: Vec<String>,
    pub flags: BTreeMap<String, FlagValue>,
    pub help: bool,
}

impl Invocation {
    /// Tokenize arguments (without the program name).
    ///
    /// - `--name=value` binds text, `--name` switches on, `--no-name` off
    /// - `-abc` switches on `a`, `b` and `c`
    /// - `--help` and `-h` request help instead of binding a flag
    /// - `--` ends flag parsing; `-` and negative numbers are positional
    /// - a repeated flag keeps its last value
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut invocation = Self::default();
        let mut tokens = tokens.into_iter().map(Into::into);

        while let Some(token) = tokens.next() {
            if token == "--" {
                invocation.positional.extend(tokens.by_ref());
                break;
            }
            if !token.starts_with('-') || token == "-" || token.parse::<f64>().is_ok() {
                invocation.positional.push(token);
                continue;
            }

            if let Some(long) = token.strip_prefix("--") {
                invocation.bind_long(long);
            } else {
                for short in token.chars().skip(1) {
                    if short == 'h' {
                        invocation.help = true;
                    } else {
                        invocation
                            .flags
                            .insert(short.to_string(), FlagValue::Switch(true));
                    }
                }
            }
        }

        invocation
    }

    fn bind_long(&mut self, long: &str) {
        if let Some((name, value)) = long.split_once('=') {
            self.flags
                .insert(name.to_string(), FlagValue::Text(value.to_string()));
            return;
        }
        if long == "help" {
            self.help = true;
            return;
        }
        match long.strip_prefix("no-") {
            Some(name) if !name.is_empty() => {
                self.flags.insert(name.to_string(), FlagValue::Switch(false));
            }
            _ => {
                self.flags.insert(long.to_string(), FlagValue::Switch(true));
            }
        }
    }

    /// The command token, i.e. the first positional value.
    pub fn command(&self) -> Option<&str> {
        self.positional.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_and_flags() {
        let invocation = Invocation::parse(["init", "demo", "--force", "--title=My App", "extra"]);

        assert_eq!(invocation.command(), Some("init"));
        assert_eq!(invocation.positional, vec!["init", "demo", "extra"]);
        assert_eq!(invocation.flags.get("force"), Some(&FlagValue::Switch(true)));
        assert_eq!(
            invocation.flags.get("title"),
            Some(&FlagValue::Text("My App".to_string()))
        );
        assert!(!invocation.help);
    }

    #[test]
    fn test_negated_and_short_flags() {
        let invocation = Invocation::parse(["--no-color", "-vq", "run"]);

        assert_eq!(invocation.flags.get("color"), Some(&FlagValue::Switch(false)));
        assert_eq!(invocation.flags.get("v"), Some(&FlagValue::Switch(true)));
        assert_eq!(invocation.flags.get("q"), Some(&FlagValue::Switch(true)));
        assert_eq!(invocation.positional, vec!["run"]);
    }

    #[test]
    fn test_help_is_not_a_flag() {
        assert!(Invocation::parse(["--help"]).help);
        assert!(Invocation::parse(["build", "-h"]).help);
        assert!(Invocation::parse(["--help"]).flags.is_empty());
    }

    #[test]
    fn test_double_dash_ends_flag_parsing() {
        let invocation = Invocation::parse(["echo", "--", "--not-a-flag", "-x"]);
        assert_eq!(invocation.positional, vec!["echo", "--not-a-flag", "-x"]);
        assert!(invocation.flags.is_empty());
    }

    #[test]
    fn test_dash_and_negative_numbers_are_positional() {
        let invocation = Invocation::parse(["offset", "-5", "-"]);
        assert_eq!(invocation.positional, vec!["offset", "-5", "-"]);
    }

    #[test]
    fn test_repeated_flag_keeps_last_value() {
        let invocation = Invocation::parse(["--mode=a", "--mode=b"]);
        assert_eq!(
            invocation.flags.get("mode"),
            Some(&FlagValue::Text("b".to_string()))
        );
    }

    #[test]
    fn test_empty_input_has_no_command() {
        let invocation = Invocation::parse(Vec::<String>::new());
        assert_eq!(invocation.command(), None);
    }
}
