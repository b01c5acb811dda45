use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{EngineError, EngineResult};

/// File names looked up by [`EngineConfig::discover`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["trellis.yml", "trellis.yaml"];

/// What a parent does when one of its dependencies did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    /// Run the parent once every dependency has settled, whatever the outcome.
    #[default]
    BestEffort,
    /// Skip the parent when any dependency failed or was skipped.
    FailFast,
}

/// How a task that finishes without setting a result is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnsetResultPolicy {
    #[default]
    Succeed,
    /// Succeed, but leave a warning in the task's log.
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct EngineConfig {
    pub failure_policy: FailurePolicy,
    pub unset_result: UnsetResultPolicy,
    /// Show progress spinners when stderr is a terminal.
    pub progress: bool,
    /// Colored console output. `NO_COLOR` turns it off regardless.
    pub color: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            unset_result: UnsetResultPolicy::default(),
            progress: true,
            color: true,
        }
    }
}

impl EngineConfig {
    /// Load the first config file found in `dir`, or the defaults when there is none.
    pub fn discover(dir: &Path) -> EngineResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.is_file() {
                return load_engine_config(&path);
            }
        }
        Ok(Self::default())
    }
}

pub fn parse_engine_config(yaml_str: &str) -> EngineResult<EngineConfig> {
    if yaml_str.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    let config: EngineConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

pub fn load_engine_config(path: &Path) -> EngineResult<EngineConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        EngineError::Config(format!(
            "Failed to read engine config {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_engine_config(&content).map_err(|e| {
        EngineError::Config(format!(
            "Failed to parse engine config {}: {}",
            path.display(),
            e
        ))
    })
}
