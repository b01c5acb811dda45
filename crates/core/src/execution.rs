//! Task execution module
//!
//! This module handles the execution of task trees including argument binding,
//! dependency resolution, concurrent fan-out and deferred log collection.

pub mod aggregator;
pub mod binder;
pub mod dependencies;
pub mod runner;

pub use aggregator::LogAggregator;
pub use binder::{bind_dependency, root_arguments, validate_arguments};
pub use dependencies::{build_dependency_graph, DependencyGraph};
pub use runner::TaskRunner;
