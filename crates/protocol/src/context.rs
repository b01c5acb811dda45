//! Per-invocation state handed to [`Task::run`](crate::Task::run).
//!
//! A fresh [`TaskContext`] is built for every execution, so a task
//! definition can be invoked several times in one tree (for example as a
//! dependency with different overrides) without any shared mutable state.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{TaskError, TaskResult};
use crate::log::DeferredLogger;
use crate::progress::{NoProgress, ProgressHandle};
use crate::traits::Task;
use crate::types::{ArgumentBag, FlagDef, FlagValue, RunResult};

pub struct TaskContext {
    command: String,
    label: String,
    params: Vec<String>,
    flags: Vec<FlagDef>,
    args: ArgumentBag,
    result: RunResult,
    logger: DeferredLogger,
    progress: Arc<dyn ProgressHandle>,
}

impl TaskContext {
    /// Binds `args` to `task`'s declared schema for a single run.
    pub fn new(task: &dyn Task, args: ArgumentBag, progress: Arc<dyn ProgressHandle>) -> Self {
        let label = task.label();
        Self {
            command: task.command().to_string(),
            logger: DeferredLogger::new(label.clone()),
            label,
            params: task.params(),
            flags: task.flags(),
            args,
            result: RunResult::Pending,
            progress,
        }
    }

    /// A context with no progress indicator attached.
    pub fn detached(task: &dyn Task, args: ArgumentBag) -> Self {
        Self::new(task, args, Arc::new(NoProgress))
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn args(&self) -> &ArgumentBag {
        &self.args
    }

    /// Value of a declared positional parameter.
    ///
    /// Resolved by position: the value at the index `name` occupies in the
    /// task's `params()` list.
    pub fn param(&self, name: &str) -> TaskResult<&str> {
        let index = self
            .params
            .iter()
            .position(|param| param == name)
            .ok_or_else(|| TaskError::InvalidParam(name.to_string()))?;

        self.args
            .positional()
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| TaskError::MissingParam(name.to_string()))
    }

    /// Value bound to a declared flag, or `None` when it was not passed.
    pub fn flag(&self, name: &str) -> TaskResult<Option<&FlagValue>> {
        let definition = self
            .flags
            .iter()
            .find(|flag| flag.name == name)
            .ok_or_else(|| TaskError::InvalidFlag(name.to_string()))?;

        match self.args.flag(name) {
            Some(value) => Ok(Some(value)),
            None if definition.required => Err(TaskError::MissingRequiredFlag(name.to_string())),
            None => Ok(None),
        }
    }

    /// Whether a declared flag was passed and is switched on.
    pub fn flag_enabled(&self, name: &str) -> TaskResult<bool> {
        Ok(self.flag(name)?.is_some_and(FlagValue::is_enabled))
    }

    /// Parses the text of a declared `--name=value` flag.
    ///
    /// A bare `--name` or `--no-name` carries no text and is rejected with
    /// [`TaskError::InvalidFlagValue`]; read switches with
    /// [`flag_enabled`](Self::flag_enabled).
    pub fn flag_value<T>(&self, name: &str) -> TaskResult<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let Some(value) = self.flag(name)? else {
            return Ok(None);
        };
        let Some(text) = value.as_str() else {
            return Err(TaskError::InvalidFlagValue {
                flag: name.to_string(),
                value: value.to_string(),
                reason: "expected --name=value".to_string(),
            });
        };

        text.parse::<T>()
            .map(Some)
            .map_err(|e| TaskError::InvalidFlagValue {
                flag: name.to_string(),
                value: text.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn result(&self) -> RunResult {
        self.result
    }

    pub fn set_result(&mut self, result: RunResult) {
        self.result = result;
    }

    pub fn succeed(&mut self) {
        self.set_result(RunResult::Success);
    }

    pub fn fail(&mut self) {
        self.set_result(RunResult::Failed);
    }

    /// Updates the attached progress indicator's text, if one is rendering.
    pub fn set_progress_text(&self, text: &str) {
        self.progress.set_text(text);
    }

    pub fn logger(&self) -> &DeferredLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut DeferredLogger {
        &mut self.logger
    }

    /// Consumes the context, returning its log buffer.
    #[must_use]
    pub fn into_logger(self) -> DeferredLogger {
        self.logger
    }
}

impl fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskContext")
            .field("command", &self.command)
            .field("label", &self.label)
            .field("args", &self.args)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}
