//! Help listings and console error reports

use std::fmt::Write;

use colored::*;
use trellis_protocol::Task;

use crate::registry::TaskRegistry;
use crate::types::EngineError;

/// Full help: tool name, usage line and every invocable command.
pub fn render_help(name: &str, about: Option<&str>, registry: &TaskRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", name.bold());
    if let Some(about) = about {
        let _ = writeln!(out, "{}", about);
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} {} <command> [...params] [--flag[=value]]...",
        "Usage:".bold().underline(),
        name
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Commands:".bold().underline());

    let tasks = registry.list_invocable();
    if tasks.is_empty() {
        let _ = writeln!(out, "  {}", "No commands registered".dimmed());
    }
    for task in tasks {
        let _ = writeln!(out, "  {}", usage(task.as_ref()));
        if !task.description().is_empty() {
            let _ = writeln!(out, "      {}", task.description());
        }
        for flag in task.flags() {
            let required = if flag.required {
                format!(" {}", "(required)".yellow())
            } else {
                String::new()
            };
            let _ = writeln!(
                out,
                "      {:<18} {}{}",
                format!("--{}", flag.name).cyan(),
                flag.description.dimmed(),
                required
            );
        }
    }
    out
}

/// Short list of invocable commands, shown after command errors.
pub fn render_command_list(registry: &TaskRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Available commands:".bold());
    for task in registry.list_invocable() {
        let _ = writeln!(out, "  {}", usage(task.as_ref()));
    }
    out
}

/// Error report: colored title, message and, for command errors, the command list.
pub fn render_error(error: &EngineError, registry: &TaskRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "error:".red().bold(), error.title().red().bold());
    let _ = writeln!(out, "  {}", error);
    if error.lists_commands() {
        let _ = writeln!(out);
        out.push_str(&render_command_list(registry));
    }
    out
}

fn usage(task: &dyn Task) -> String {
    let mut line = task.command().blue().bold().to_string();
    for param in task.params() {
        line.push(' ');
        line.push_str(&format!("<{}>", param).green().to_string());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_protocol::{async_trait, FlagDef, TaskContext, TaskResult};

    struct Clean;

    #[async_trait]
    impl Task for Clean {
        fn command(&self) -> &str {
            "clean"
        }

        fn description(&self) -> &str {
            "Remove a project folder"
        }

        fn params(&self) -> Vec<String> {
            vec!["folder_name".to_string()]
        }

        fn flags(&self) -> Vec<FlagDef> {
            vec![
                FlagDef::new("yes", "Confirm removal").required(),
                FlagDef::new("quiet", "Log less"),
            ]
        }

        async fn run(&self, _ctx: &mut TaskContext) -> TaskResult<()> {
            Ok(())
        }
    }

    struct Hidden;

    #[async_trait]
    impl Task for Hidden {
        fn command(&self) -> &str {
            "make-dir"
        }

        fn is_internal(&self) -> bool {
            true
        }

        async fn run(&self, _ctx: &mut TaskContext) -> TaskResult<()> {
            Ok(())
        }
    }

    fn registry() -> TaskRegistry {
        let mut registry = TaskRegistry::new();
        registry.register(Clean).unwrap();
        registry.register(Hidden).unwrap();
        registry
    }

    #[test]
    fn test_help_lists_invocable_commands_with_params_and_flags() {
        let help = render_help("trellis", Some("Scaffold folders"), &registry());

        assert!(help.contains("trellis"));
        assert!(help.contains("Scaffold folders"));
        assert!(help.contains("<command> [...params] [--flag[=value]]..."));
        assert!(help.contains("clean"));
        assert!(help.contains("<folder_name>"));
        assert!(help.contains("Remove a project folder"));
        assert!(help.contains("--yes"));
        assert!(help.contains("(required)"));
        assert!(help.contains("--quiet"));
        assert!(!help.contains("make-dir"));
    }

    #[test]
    fn test_command_errors_list_available_commands() {
        let registry = registry();

        let report = render_error(&EngineError::UnknownCommand("make-dir".into()), &registry);
        assert!(report.contains("Invalid command specified"));
        assert!(report.contains("Available commands:"));
        assert!(report.contains("clean"));

        let report = render_error(
            &EngineError::MissingParams {
                command: "clean".into(),
                missing: vec!["folder_name".into()],
            },
            &registry,
        );
        assert!(report.contains("Missing params"));
        assert!(report.contains("folder_name"));
        assert!(!report.contains("Available commands:"));
    }
}
