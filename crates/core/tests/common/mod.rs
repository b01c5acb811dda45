//! Shared fixtures for engine tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Barrier;
use trellis_protocol::{
    async_trait, Dependency, FlagValue, Task, TaskContext, TaskError, TaskResult,
};

/// Arguments a task saw when its `run` was called.
#[derive(Debug, Clone)]
pub struct Call {
    pub command: String,
    pub positional: Vec<String>,
    pub flags: BTreeMap<String, FlagValue>,
}

/// Records every `run` call across a tool's tasks, in call order.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Journal {
    fn record(&self, ctx: &TaskContext) {
        self.calls.lock().unwrap().push(Call {
            command: ctx.command().to_string(),
            positional: ctx.args().positional().to_vec(),
            flags: ctx.args().flags().clone(),
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.command).collect()
    }

    pub fn call(&self, command: &str) -> Option<Call> {
        self.calls().into_iter().find(|call| call.command == command)
    }
}

/// What a recording task does once it runs.
#[derive(Clone)]
pub enum Behavior {
    Succeed,
    Fail,
    /// Return without reporting a result.
    Leave,
    /// Return an error, aborting the run.
    Error,
    Sleep(Duration),
    /// Wait until every other task sharing the barrier has arrived.
    Rendezvous(Arc<Barrier>),
}

pub struct Recorder {
    command: String,
    label: Option<String>,
    params: Vec<String>,
    dependencies: Vec<Dependency>,
    internal: bool,
    behavior: Behavior,
    journal: Journal,
}

pub fn recorder(command: &str, journal: &Journal) -> Recorder {
    Recorder {
        command: command.to_string(),
        label: None,
        params: Vec::new(),
        dependencies: Vec::new(),
        internal: false,
        behavior: Behavior::Succeed,
        journal: journal.clone(),
    }
}

impl Recorder {
    pub fn depends_on<const N: usize>(mut self, commands: [&str; N]) -> Self {
        self.dependencies
            .extend(commands.into_iter().map(Dependency::new));
        self
    }

    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn params<const N: usize>(mut self, params: [&str; N]) -> Self {
        self.params = params.into_iter().map(String::from).collect();
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn internal(mut self) -> Self {
        self.internal = true;
        self
    }

    pub fn behave(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }
}

#[async_trait]
impl Task for Recorder {
    fn command(&self) -> &str {
        &self.command
    }

    fn dependencies(&self) -> Vec<Dependency> {
        self.dependencies.clone()
    }

    fn params(&self) -> Vec<String> {
        self.params.clone()
    }

    fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.command.clone())
    }

    fn is_internal(&self) -> bool {
        self.internal
    }

    async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> {
        self.journal.record(ctx);

        match &self.behavior {
            Behavior::Succeed => ctx.succeed(),
            Behavior::Fail => ctx.fail(),
            Behavior::Leave => return Ok(()),
            Behavior::Error => return Err(TaskError::Other(anyhow::anyhow!("boom"))),
            Behavior::Sleep(duration) => {
                tokio::time::sleep(*duration).await;
                ctx.succeed();
            }
            Behavior::Rendezvous(barrier) => {
                barrier.wait().await;
                ctx.succeed();
            }
        }

        ctx.logger_mut().info(format!("ran {}", self.command));
        Ok(())
    }
}
