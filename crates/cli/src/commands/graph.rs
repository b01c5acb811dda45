use colored::*;
use trellis_core::Tool;

pub fn execute(tool: &Tool) {
    println!("{}", "Task Dependency Graph:".bold().underline());

    let graph = tool.dependency_graph();

    if !graph.cycles.is_empty() {
        println!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!(
                "Circular dependencies detected: {}",
                graph.describe_cycles().join("; ")
            )
            .yellow()
        );
    }
    for (task, dependency) in &graph.dangling {
        println!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!("'{}' depends on '{}', which is not registered", task, dependency).yellow()
        );
    }

    for command in graph.commands() {
        let internal = tool
            .registry()
            .lookup(command)
            .is_some_and(|task| task.is_internal());
        if internal {
            println!("{} {}", command.blue().bold(), "(internal)".dimmed());
        } else {
            println!("{}", command.blue().bold());
        }

        let deps = graph.dependencies_of(command);
        if !deps.is_empty() {
            println!("  {} {}", "depends on:".dimmed(), deps.join(", "));
        } else {
            println!("  {}", "no dependencies".dimmed());
        }
        println!();
    }
}
