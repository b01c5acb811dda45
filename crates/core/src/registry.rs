//! Task registry
//!
//! Maps command names to live task definitions. The registry is populated
//! at startup and read-only while a tool runs. Dependency references are not
//! checked here; they are resolved lazily when a task is invoked.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};
use trellis_protocol::Task;

use crate::types::{EngineError, EngineResult};

/// Registered tasks keyed by their `command()`.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Arc<dyn Task>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task, returning the definition it replaced, if any.
    ///
    /// The task's declared schema is validated once here. A duplicate command
    /// is not an error: the last registration wins.
    pub fn register<T: Task + 'static>(&mut self, task: T) -> EngineResult<Option<Arc<dyn Task>>> {
        self.register_shared(Arc::new(task))
    }

    /// Register an already shared task definition.
    pub fn register_shared(&mut self, task: Arc<dyn Task>) -> EngineResult<Option<Arc<dyn Task>>> {
        validate_definition(task.as_ref())?;

        let command = task.command().to_string();
        let previous = self.tasks.insert(command.clone(), task);
        if previous.is_some() {
            warn!(command = %command, "task registered twice, keeping the latest definition");
        } else {
            debug!(command = %command, "registered task");
        }
        Ok(previous)
    }

    pub fn lookup(&self, command: &str) -> Option<Arc<dyn Task>> {
        self.tasks.get(command).cloned()
    }

    /// Tasks a user may invoke directly, sorted by command name.
    pub fn list_invocable(&self) -> Vec<Arc<dyn Task>> {
        self.tasks
            .values()
            .filter(|task| !task.is_internal())
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Task>> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn validate_definition(task: &dyn Task) -> EngineResult<()> {
    let command = task.command();
    let invalid = |reason: String| EngineError::InvalidDefinition {
        command: command.to_string(),
        reason,
    };

    if command.is_empty() {
        return Err(invalid("command must not be empty".to_string()));
    }
    if command.chars().any(char::is_whitespace) {
        return Err(invalid("command must not contain whitespace".to_string()));
    }
    if command.starts_with('-') {
        return Err(invalid("command must not start with '-'".to_string()));
    }

    let mut seen = HashSet::new();
    for param in task.params() {
        if param.is_empty() {
            return Err(invalid("parameter names must not be empty".to_string()));
        }
        if !seen.insert(param.clone()) {
            return Err(invalid(format!("parameter '{}' is declared twice", param)));
        }
    }

    let mut seen = HashSet::new();
    for flag in task.flags() {
        if flag.name.is_empty() || flag.name.starts_with('-') {
            return Err(invalid(format!("'{}' is not a valid flag name", flag.name)));
        }
        if flag.name == "help" {
            return Err(invalid("the 'help' flag is reserved".to_string()));
        }
        if !seen.insert(flag.name.clone()) {
            return Err(invalid(format!("flag '--{}' is declared twice", flag.name)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_protocol::{async_trait, FlagDef, TaskContext, TaskResult};

    struct Named {
        command: &'static str,
        internal: bool,
        params: Vec<&'static str>,
        flags: Vec<&'static str>,
    }

    impl Named {
        fn new(command: &'static str) -> Self {
            Self {
                command,
                internal: false,
                params: Vec::new(),
                flags: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl Task for Named {
        fn command(&self) -> &str {
            self.command
        }

        fn is_internal(&self) -> bool {
            self.internal
        }

        fn params(&self) -> Vec<String> {
            self.params.iter().map(|p| p.to_string()).collect()
        }

        fn flags(&self) -> Vec<FlagDef> {
            self.flags.iter().map(|f| FlagDef::new(*f, "")).collect()
        }

        async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> {
            ctx.succeed();
            Ok(())
        }
    }

    #[test]
    fn test_lookup_returns_registered_instance() {
        let mut registry = TaskRegistry::new();
        let task: Arc<dyn Task> = Arc::new(Named::new("build"));
        registry.register_shared(task.clone()).unwrap();

        let found = registry.lookup("build").expect("build should be registered");
        assert!(Arc::ptr_eq(&found, &task));
        assert!(registry.lookup("deploy").is_none());
    }

    #[test]
    fn test_duplicate_registration_replaces_previous() {
        let mut registry = TaskRegistry::new();
        let first: Arc<dyn Task> = Arc::new(Named::new("build"));
        let second: Arc<dyn Task> = Arc::new(Named::new("build"));

        assert!(registry.register_shared(first.clone()).unwrap().is_none());
        let replaced = registry.register_shared(second.clone()).unwrap();

        assert!(Arc::ptr_eq(&replaced.unwrap(), &first));
        assert!(Arc::ptr_eq(&registry.lookup("build").unwrap(), &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_invocable_hides_internal_tasks() {
        let mut registry = TaskRegistry::new();
        registry.register(Named::new("zip")).unwrap();
        registry
            .register(Named {
                internal: true,
                ..Named::new("prepare")
            })
            .unwrap();
        registry.register(Named::new("archive")).unwrap();

        let commands: Vec<String> = registry
            .list_invocable()
            .iter()
            .map(|t| t.command().to_string())
            .collect();
        assert_eq!(commands, vec!["archive", "zip"]);
        assert_eq!(registry.len(), 3);
    }

    fn rejection(registry: &mut TaskRegistry, task: Named) -> EngineError {
        match registry.register(task) {
            Err(err) => err,
            Ok(_) => panic!("definition should have been rejected"),
        }
    }

    #[test]
    fn test_invalid_definitions_are_rejected() {
        let mut registry = TaskRegistry::new();

        let err = rejection(&mut registry, Named::new(""));
        assert!(matches!(err, EngineError::InvalidDefinition { .. }));

        let err = rejection(&mut registry, Named::new("two words"));
        assert!(err.to_string().contains("whitespace"));

        let err = rejection(
            &mut registry,
            Named {
                params: vec!["name", "name"],
                ..Named::new("dup-param")
            },
        );
        assert!(err.to_string().contains("parameter 'name' is declared twice"));

        let err = rejection(
            &mut registry,
            Named {
                flags: vec!["force", "force"],
                ..Named::new("dup-flag")
            },
        );
        assert!(err.to_string().contains("'--force' is declared twice"));

        let err = rejection(
            &mut registry,
            Named {
                flags: vec!["help"],
                ..Named::new("helpful")
            },
        );
        assert!(err.to_string().contains("reserved"));

        assert!(registry.is_empty());
    }
}
