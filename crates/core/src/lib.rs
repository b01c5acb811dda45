//! Trellis Core Library
//!
//! This is the engine behind Trellis command-line tools. It owns the task
//! registry, parses invocations, resolves each task's dependency tree and
//! runs it concurrently, then prints every task's deferred logs once the
//! whole tree has settled.
//!
//! ## Architecture
//!
//! - [`tool`] - High-level interface: name, registry, config, process entry point
//! - [`registry`] - Task registration and definition checks
//! - [`args`] - Command-line token parsing into positionals and flags
//! - [`execution`] - Argument binding, dependency resolution, concurrent runner and log aggregation
//! - [`progress`] - Per-task progress indicators
//! - [`help`] - Help listing and error reports
//! - [`configs`] - Engine configuration (`trellis.yml`)
//! - [`results`] - Invocation reports returned by a run
//! - [`tasks`] - Label coloring shared by progress and log output
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trellis_core::{args::Invocation, Tool};
//! # use trellis_protocol::{async_trait, Task, TaskContext, TaskResult};
//! # struct Build;
//! # #[async_trait]
//! # impl Task for Build {
//! #     fn command(&self) -> &str { "build" }
//! #     async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> { ctx.succeed(); Ok(()) }
//! # }
//!
//! # async fn example() -> trellis_core::EngineResult<()> {
//! let mut tool = Tool::new("mytool");
//! tool.register(Build)?;
//!
//! let summary = tool.run(&Invocation::parse(["build"])).await?;
//! assert!(summary.is_success());
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod configs;
pub mod execution;
pub mod help;
pub mod progress;
pub mod registry;
pub mod results;
pub mod tasks;
pub mod tool;
pub mod types;

// Re-export the main types for easier usage
pub use args::Invocation;
pub use configs::engine::{EngineConfig, FailurePolicy, UnsetResultPolicy};
pub use registry::TaskRegistry;
pub use results::{InvocationReport, Outcome, RunSummary};
pub use tool::Tool;
pub use types::{EngineError, EngineResult};
