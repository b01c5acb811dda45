//! Task dependency analysis
//!
//! Builds a graph of every declared dependency in a registry for
//! diagnostics (cycles, references to unregistered commands), and provides
//! the resolution-path check the runner uses to fail fast on a cycle
//! instead of recursing forever.

use std::collections::HashMap;

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;

use crate::registry::TaskRegistry;
use crate::types::{EngineError, EngineResult};

/// Declared dependencies of every registered task.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    /// Each cycle's members, sorted; cycles sorted.
    pub cycles: Vec<Vec<String>>,
    /// `(task, dependency)` pairs whose dependency is not registered.
    pub dangling: Vec<(String, String)>,
}

/// Build the dependency graph of all tasks in `registry`
pub fn build_dependency_graph(registry: &TaskRegistry) -> DependencyGraph {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_indices = HashMap::new();

    // Add all tasks as nodes
    for task in registry.iter() {
        let node_index = graph.add_node(task.command().to_string());
        node_indices.insert(task.command().to_string(), node_index);
    }

    // Add edges: task -> dependency (dependency runs first)
    let mut dangling = Vec::new();
    for task in registry.iter() {
        let from_node = node_indices[task.command()];
        for dependency in task.dependencies() {
            match node_indices.get(&dependency.command) {
                Some(&to_node) => {
                    if !graph.contains_edge(from_node, to_node) {
                        graph.add_edge(from_node, to_node, ());
                    }
                }
                None => dangling.push((task.command().to_string(), dependency.command)),
            }
        }
    }

    // Detect cycles using strongly connected components
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() > 1 {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].clone())
                    .collect::<Vec<_>>();
                cycle.sort();
                Some(cycle)
            } else {
                let node = component[0];
                if graph.contains_edge(node, node) {
                    Some(vec![graph[node].clone()])
                } else {
                    None
                }
            }
        })
        .collect();
    cycles.sort();

    DependencyGraph {
        graph,
        cycles,
        dangling,
    }
}

impl DependencyGraph {
    /// Registered commands, in registry order.
    pub fn commands(&self) -> Vec<&str> {
        self.graph.node_weights().map(String::as_str).collect()
    }

    /// Registered commands `command` directly depends on, sorted.
    pub fn dependencies_of(&self, command: &str) -> Vec<&str> {
        let Some(node) = self
            .graph
            .node_indices()
            .find(|index| self.graph[*index] == command)
        else {
            return Vec::new();
        };

        let mut dependencies: Vec<&str> = self
            .graph
            .neighbors(node)
            .map(|neighbor| self.graph[neighbor].as_str())
            .collect();
        dependencies.sort_unstable();
        dependencies
    }

    /// Cycles rendered as closed paths, e.g. `a -> b -> a`.
    pub fn describe_cycles(&self) -> Vec<String> {
        self.cycles
            .iter()
            .map(|cycle| {
                let mut path = cycle.clone();
                if let Some(first) = path.first().cloned() {
                    path.push(first);
                }
                path.join(" -> ")
            })
            .collect()
    }
}

/// Append `command` to a resolution path, failing if it is already on it.
pub fn extend_path(path: &[String], command: &str) -> EngineResult<Vec<String>> {
    if let Some(start) = path.iter().position(|entry| entry == command) {
        let mut cycle = path[start..].to_vec();
        cycle.push(command.to_string());
        return Err(EngineError::DependencyCycle { path: cycle });
    }

    let mut next = path.to_vec();
    next.push(command.to_string());
    Ok(next)
}
