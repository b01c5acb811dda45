//! Result types for task invocations
//!
//! Every invocation produces an [`InvocationReport`]; reports nest the same
//! way the dependency tree was expanded. A [`RunSummary`] wraps the root
//! report together with the deferred logs collected during the run.

use crate::execution::aggregator::LogAggregator;

/// Terminal state of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Succeeded,
    Failed,
    /// Not run because a dependency did not succeed (fail-fast policy only).
    Skipped,
}

impl Outcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Outcome of one task invocation and of the dependencies it waited on.
#[derive(Debug, Clone)]
pub struct InvocationReport {
    pub command: String,
    pub label: String,
    pub depth: usize,
    pub outcome: Outcome,
    pub dependencies: Vec<InvocationReport>,
}

impl InvocationReport {
    /// This report and every nested dependency report, parents first.
    pub fn walk(&self) -> Vec<&InvocationReport> {
        let mut reports = vec![self];
        for dependency in &self.dependencies {
            reports.extend(dependency.walk());
        }
        reports
    }

    /// First report for `command` in [`walk`](Self::walk) order.
    pub fn find(&self, command: &str) -> Option<&InvocationReport> {
        self.walk().into_iter().find(|report| report.command == command)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.walk()
            .iter()
            .filter(|report| report.outcome == outcome)
            .count()
    }
}

/// Everything a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub root: InvocationReport,
    pub logs: LogAggregator,
}

impl RunSummary {
    pub fn new(root: InvocationReport, logs: LogAggregator) -> Self {
        Self { root, logs }
    }

    /// Whether the root task itself succeeded.
    pub fn is_success(&self) -> bool {
        self.root.outcome.is_success()
    }

    pub fn succeeded(&self) -> usize {
        self.root.count(Outcome::Succeeded)
    }

    pub fn failed(&self) -> usize {
        self.root.count(Outcome::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.root.count(Outcome::Skipped)
    }
}
