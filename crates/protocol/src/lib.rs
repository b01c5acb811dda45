//! Trellis Task Protocol
//!
//! This crate defines the contract between an application and the Trellis
//! execution engine. Applications implement [`Task`] for each command they
//! expose; the engine resolves dependencies, binds arguments and calls
//! [`Task::run`] with a fresh [`TaskContext`].
//!
//! - [`traits`] - The [`Task`] trait
//! - [`types`] - Flag, dependency, result and argument types
//! - [`context`] - Per-invocation argument accessors, result and logger
//! - [`log`] - Deferred log buffers
//! - [`progress`] - Progress indicator contract
//! - [`error`] - [`TaskError`] and [`TaskResult`]

pub mod context;
pub mod error;
pub mod log;
pub mod progress;
pub mod traits;
pub mod types;

pub use async_trait::async_trait;
pub use context::TaskContext;
pub use error::{TaskError, TaskResult};
pub use log::{DeferredLogger, LogEntry, LogLevel};
pub use progress::{NoProgress, ProgressHandle};
pub use traits::Task;
pub use types::{ArgumentBag, Dependency, FlagDef, FlagValue, RunResult};
