//! Task runner
//!
//! Resolves a root command and executes its dependency tree. Sibling
//! dependencies are started together and joined before their parent runs;
//! every invocation gets its own argument bag, context and log buffer.

use futures::future::{try_join_all, BoxFuture, FutureExt};
use serde_json::json;
use tracing::{debug, debug_span, Instrument};
use trellis_protocol::{ArgumentBag, DeferredLogger, RunResult, TaskContext};

use crate::configs::engine::{EngineConfig, FailurePolicy, UnsetResultPolicy};
use crate::execution::aggregator::LogAggregator;
use crate::execution::binder::{bind_dependency, validate_arguments};
use crate::execution::dependencies::extend_path;
use crate::progress::ProgressFactory;
use crate::registry::TaskRegistry;
use crate::results::{InvocationReport, Outcome, RunSummary};
use crate::types::{EngineError, EngineResult};

/// One pending node of the invocation tree.
struct Frame {
    command: String,
    args: ArgumentBag,
    depth: usize,
    /// Command of the task that declared this one, `None` at the root.
    parent: Option<String>,
    /// Commands from the root down to the parent.
    path: Vec<String>,
}

/// Executes invocation trees against a registry.
pub struct TaskRunner<'a> {
    registry: &'a TaskRegistry,
    config: &'a EngineConfig,
    progress: &'a dyn ProgressFactory,
    logs: LogAggregator,
}

impl<'a> TaskRunner<'a> {
    pub fn new(
        registry: &'a TaskRegistry,
        config: &'a EngineConfig,
        progress: &'a dyn ProgressFactory,
    ) -> Self {
        Self {
            registry,
            config,
            progress,
            logs: LogAggregator::new(),
        }
    }

    /// Run `command` and its whole dependency tree.
    ///
    /// Returns once every invocation has settled. A task reporting
    /// `RunResult::Failed` does not make this an error; unknown commands,
    /// missing params, cycles and errors returned by a task do.
    pub async fn run(&self, command: &str, args: ArgumentBag) -> EngineResult<RunSummary> {
        let root = self
            .invoke(Frame {
                command: command.to_string(),
                args,
                depth: 0,
                parent: None,
                path: Vec::new(),
            })
            .await?;

        debug!(command = %command, outcome = ?root.outcome, "invocation tree finished");
        Ok(RunSummary::new(root, self.logs.clone()))
    }

    fn invoke(&self, frame: Frame) -> BoxFuture<'_, EngineResult<InvocationReport>> {
        let span = debug_span!("invoke", command = %frame.command, depth = frame.depth);
        async move { self.invoke_frame(frame).await }
            .instrument(span)
            .boxed()
    }

    async fn invoke_frame(&self, frame: Frame) -> EngineResult<InvocationReport> {
        // Resolve the task; internal tasks are only reachable as dependencies
        let task = match (self.registry.lookup(&frame.command), &frame.parent) {
            (Some(task), Some(_)) => task,
            (Some(task), None) if !task.is_internal() => task,
            (_, None) => return Err(EngineError::UnknownCommand(frame.command)),
            (None, Some(parent)) => {
                return Err(EngineError::InvalidDependency {
                    parent: parent.clone(),
                    dependency: frame.command,
                })
            }
        };
        let path = extend_path(&frame.path, &frame.command)?;

        let label = task.label();
        let progress = self.progress.start(&label, frame.depth);
        progress.set_text("waiting");

        // Fan out: every dependency starts now, the parent waits for all of them
        let dependencies = task.dependencies();
        let children = if dependencies.is_empty() {
            Vec::new()
        } else {
            debug!(count = dependencies.len(), "starting dependencies");
            let pending = dependencies.iter().map(|dependency| {
                self.invoke(Frame {
                    command: dependency.command.clone(),
                    args: bind_dependency(&frame.args, dependency),
                    depth: frame.depth + 1,
                    parent: Some(frame.command.clone()),
                    path: path.clone(),
                })
            });
            match try_join_all(pending).await {
                Ok(children) => children,
                Err(e) => {
                    progress.fail();
                    return Err(e);
                }
            }
        };

        if let Err(e) = validate_arguments(task.as_ref(), &frame.args) {
            progress.fail();
            return Err(e);
        }

        let unsuccessful: Vec<String> = children
            .iter()
            .filter(|child| !child.outcome.is_success())
            .map(|child| child.command.clone())
            .collect();
        if self.config.failure_policy == FailurePolicy::FailFast && !unsuccessful.is_empty() {
            debug!(dependencies = ?unsuccessful, "skipping task after dependency failure");
            let mut logger = DeferredLogger::new(label.clone());
            logger.warn_with(
                "skipped because a dependency did not succeed",
                json!({ "dependencies": unsuccessful }),
            );
            self.logs.push(logger).await;
            progress.set_text("skipped");
            progress.fail();
            return Ok(InvocationReport {
                command: frame.command,
                label,
                depth: frame.depth,
                outcome: Outcome::Skipped,
                dependencies: children,
            });
        }

        progress.set_text("running");
        let mut ctx = TaskContext::new(task.as_ref(), frame.args, progress.clone());
        if let Err(source) = task.run(&mut ctx).await {
            progress.fail();
            return Err(EngineError::Task {
                command: frame.command,
                source,
            });
        }

        let outcome = self.resolve_outcome(&mut ctx);
        self.logs.push(ctx.into_logger()).await;
        if outcome.is_success() {
            progress.succeed();
        } else {
            progress.fail();
        }
        debug!(outcome = ?outcome, "task finished");

        Ok(InvocationReport {
            command: frame.command,
            label,
            depth: frame.depth,
            outcome,
            dependencies: children,
        })
    }

    fn resolve_outcome(&self, ctx: &mut TaskContext) -> Outcome {
        match ctx.result() {
            RunResult::Success => Outcome::Succeeded,
            RunResult::Failed => Outcome::Failed,
            RunResult::Pending => match self.config.unset_result {
                UnsetResultPolicy::Succeed => Outcome::Succeeded,
                UnsetResultPolicy::Warn => {
                    ctx.logger_mut()
                        .warn("finished without reporting a result, treating it as succeeded");
                    Outcome::Succeeded
                }
                UnsetResultPolicy::Fail => {
                    ctx.logger_mut().error("finished without reporting a result");
                    Outcome::Failed
                }
            },
        }
    }
}
