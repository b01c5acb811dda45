//! Command-line tool builder
//!
//! This module provides the [`Tool`], the primary interface for applications
//! built on Trellis. A tool owns its name, its task registry and its engine
//! configuration, and turns raw process arguments into an exit status.
//!
//! ## Example
//!
//! ```rust,no_run
//! use trellis_core::tool::Tool;
//! # use trellis_protocol::{async_trait, Task, TaskContext, TaskResult};
//! # struct Build;
//! # #[async_trait]
//! # impl Task for Build {
//! #     fn command(&self) -> &str { "build" }
//! #     async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> { ctx.succeed(); Ok(()) }
//! # }
//!
//! # async fn example() -> trellis_core::types::EngineResult<()> {
//! let mut tool = Tool::new("mytool").about("Builds things");
//! tool.register(Build)?;
//!
//! let status = tool.execute(std::env::args().skip(1)).await;
//! # let _ = status;
//! # Ok(())
//! # }
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use tracing::{debug, warn};
use trellis_protocol::Task;

use crate::args::Invocation;
use crate::configs::engine::EngineConfig;
use crate::execution::binder::root_arguments;
use crate::execution::dependencies::{build_dependency_graph, DependencyGraph};
use crate::execution::runner::TaskRunner;
use crate::help::{render_error, render_help};
use crate::progress::{HiddenProgress, ProgressFactory, TerminalProgress};
use crate::registry::TaskRegistry;
use crate::results::RunSummary;
use crate::types::{EngineError, EngineResult};

/// A command-line tool assembled from registered tasks.
pub struct Tool {
    name: String,
    about: Option<String>,
    registry: TaskRegistry,
    config: EngineConfig,
}

impl Tool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            registry: TaskRegistry::new(),
            config: EngineConfig::default(),
        }
    }

    /// One-line description shown under the tool name in help.
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a task. A duplicate command replaces the earlier task.
    pub fn register<T: Task + 'static>(&mut self, task: T) -> EngineResult<()> {
        self.registry.register(task)?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Declared dependencies of every registered task.
    pub fn dependency_graph(&self) -> DependencyGraph {
        build_dependency_graph(&self.registry)
    }

    pub fn help(&self) -> String {
        render_help(&self.name, self.about.as_deref(), &self.registry)
    }

    /// Run the command named by `invocation`, with the configured progress display.
    pub async fn run(&self, invocation: &Invocation) -> EngineResult<RunSummary> {
        let progress: Box<dyn ProgressFactory> =
            if self.config.progress && TerminalProgress::is_supported() {
                Box::new(TerminalProgress::new())
            } else {
                Box::new(HiddenProgress)
            };
        self.run_with_progress(invocation, progress.as_ref()).await
    }

    /// Run the command named by `invocation`, drawing indicators from `progress`.
    pub async fn run_with_progress(
        &self,
        invocation: &Invocation,
        progress: &dyn ProgressFactory,
    ) -> EngineResult<RunSummary> {
        let command = invocation.command().ok_or(EngineError::NoCommand)?;
        debug!(command = %command, "running command");

        let runner = TaskRunner::new(&self.registry, &self.config, progress);
        runner.run(command, root_arguments(invocation)).await
    }

    /// Parse `args` (without the program name), run, and print the results
    /// to stdout.
    ///
    /// Exit status is 0 for help and for completed runs, even when individual
    /// tasks reported failure, and 1 for every engine error.
    pub async fn execute<I, S>(&self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute_to(args, &mut io::stdout()).await
    }

    /// Like [`execute`](Self::execute), writing help, the error report or the
    /// separator line and deferred logs to `out`.
    pub async fn execute_to<I, S, W>(&self, args: I, out: &mut W) -> ExitCode
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        W: Write,
    {
        if !self.config.color || std::env::var_os("NO_COLOR").is_some() {
            colored::control::set_override(false);
        }

        let invocation = Invocation::parse(args);
        let (status, printed) = if invocation.help {
            (ExitCode::SUCCESS, write!(out, "{}", self.help()))
        } else {
            match self.run(&invocation).await {
                Ok(summary) => {
                    debug!(
                        succeeded = summary.succeeded(),
                        failed = summary.failed(),
                        skipped = summary.skipped(),
                        "run complete"
                    );
                    let printed = match writeln!(out) {
                        Ok(()) => summary.logs.flush(out).await,
                        Err(e) => Err(e),
                    };
                    (ExitCode::SUCCESS, printed)
                }
                Err(e) => (
                    ExitCode::FAILURE,
                    write!(out, "{}", render_error(&e, &self.registry)),
                ),
            }
        };

        if let Err(e) = printed {
            warn!(error = %e, "failed to write command output");
        }
        status
    }
}
