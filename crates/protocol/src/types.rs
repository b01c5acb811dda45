//! Declaration types shared by task definitions and the engine.
//!
//! This module contains the data a task declares about itself and the values
//! bound to it for a single invocation:
//! - [`FlagDef`] - An optional named flag, possibly marked required
//! - [`Dependency`] - A prerequisite task, with an optional positional override
//! - [`RunResult`] - The outcome a task reports for its own run
//! - [`FlagValue`] - The value bound to a flag on the command line
//! - [`ArgumentBag`] - Positional values and flags scoped to one invocation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A named flag accepted by a task (`--name` or `--name=value`).
///
/// Flags are optional unless marked [`required`](Self::required). Required
/// flags are only enforced when the task reads them through
/// `TaskContext::flag`, so a task that never asks for one is never blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDef {
    /// Flag name without the leading dashes.
    pub name: String,

    /// Human-readable text shown in help listings.
    pub description: String,

    /// Whether the task refuses to read the flag when it is absent.
    pub required: bool,
}

impl FlagDef {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }

    /// Marks the flag as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A prerequisite task that must complete before the declaring task runs.
///
/// When `params` is `Some`, the listed values replace the positional
/// arguments the dependency would otherwise inherit from its parent. Flags are
/// never overridden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Command name of the referenced task.
    pub command: String,

    /// Positional values passed instead of the parent's, if any.
    pub params: Option<Vec<String>>,
}

impl Dependency {
    /// A dependency that inherits its parent's positional arguments.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            params: None,
        }
    }

    /// A dependency invoked with exactly `params` as its positional arguments.
    #[must_use]
    pub fn with_params<I, S>(command: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            params: Some(params.into_iter().map(Into::into).collect()),
        }
    }
}

/// The outcome a task reports for its own run.
///
/// Every invocation starts as `Pending`. A task that finishes without setting
/// a result is resolved by the engine's unset-result policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RunResult {
    #[default]
    Pending,
    Success,
    Failed,
}

impl RunResult {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// The value bound to a flag on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// `--name` (true) or `--no-name` (false).
    Switch(bool),
    /// `--name=value`.
    Text(String),
}

impl FlagValue {
    /// Returns the text of a `--name=value` flag.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Switch(_) => None,
        }
    }

    /// Interprets the flag as a boolean switch.
    ///
    /// Text values count as enabled unless they spell out a negative
    /// (`false`, `no`, `off`, `0`) or are empty.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Switch(on) => *on,
            Self::Text(text) => !matches!(
                text.to_ascii_lowercase().as_str(),
                "" | "false" | "no" | "off" | "0"
            ),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch(on) => write!(f, "{}", on),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Positional values and flags scoped to one task invocation.
///
/// Bags are cloned into dependencies rather than shared, so an override
/// applied for one dependency never leaks into a sibling or the parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentBag {
    positional: Vec<String>,
    flags: BTreeMap<String, FlagValue>,
}

impl ArgumentBag {
    #[must_use]
    pub fn new(positional: Vec<String>, flags: BTreeMap<String, FlagValue>) -> Self {
        Self { positional, flags }
    }

    /// Positional values, consumed left-to-right against declared params.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn flags(&self) -> &BTreeMap<String, FlagValue> {
        &self.flags
    }

    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    /// A copy of this bag with its positional values replaced.
    #[must_use]
    pub fn with_positional(&self, positional: Vec<String>) -> Self {
        Self {
            positional,
            flags: self.flags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_with_params_collects_overrides() {
        let dep = Dependency::with_params("make-dir", ["build"]);
        assert_eq!(dep.command, "make-dir");
        assert_eq!(dep.params, Some(vec!["build".to_string()]));

        let plain = Dependency::new("make-dir");
        assert!(plain.params.is_none());
    }

    #[test]
    fn test_flag_value_is_enabled() {
        assert!(FlagValue::Switch(true).is_enabled());
        assert!(!FlagValue::Switch(false).is_enabled());
        assert!(FlagValue::Text("yes".into()).is_enabled());
        assert!(FlagValue::Text("1".into()).is_enabled());
        assert!(!FlagValue::Text("False".into()).is_enabled());
        assert!(!FlagValue::Text("off".into()).is_enabled());
        assert!(!FlagValue::Text(String::new()).is_enabled());
    }

    #[test]
    fn test_with_positional_keeps_flags_and_leaves_source_untouched() {
        let mut flags = BTreeMap::new();
        flags.insert("flag".to_string(), FlagValue::Text("1".into()));
        let parent = ArgumentBag::new(vec!["x".into(), "y".into()], flags);

        let child = parent.with_positional(vec!["z".into()]);

        assert_eq!(child.positional(), ["z".to_string()]);
        assert_eq!(child.flag("flag"), Some(&FlagValue::Text("1".into())));
        assert_eq!(parent.positional(), ["x".to_string(), "y".to_string()]);
    }
}
