//! Argument binding
//!
//! Derives the argument bag each invocation runs with. The root bag comes
//! from the command line minus the command token; a dependency either
//! inherits its parent's positional values or receives its declared
//! override. Flags are global to a run and always pass through unchanged.

use trellis_protocol::{ArgumentBag, Dependency, Task};

use crate::args::Invocation;
use crate::types::{EngineError, EngineResult};

/// The root task's bag: every positional after the command, plus all flags.
pub fn root_arguments(invocation: &Invocation) -> ArgumentBag {
    ArgumentBag::new(
        invocation.positional.iter().skip(1).cloned().collect(),
        invocation.flags.clone(),
    )
}

/// The bag for one dependency of a task invoked with `parent`.
pub fn bind_dependency(parent: &ArgumentBag, dependency: &Dependency) -> ArgumentBag {
    match &dependency.params {
        Some(overrides) => parent.with_positional(overrides.clone()),
        None => parent.clone(),
    }
}

/// Check that `bag` supplies a value for every declared parameter of `task`.
pub fn validate_arguments(task: &dyn Task, bag: &ArgumentBag) -> EngineResult<()> {
    let params = task.params();
    let supplied = bag.positional().len();
    if supplied >= params.len() {
        return Ok(());
    }

    Err(EngineError::MissingParams {
        command: task.command().to_string(),
        missing: params[supplied..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_protocol::{async_trait, FlagValue, TaskContext, TaskResult};

    struct Scaffold;

    #[async_trait]
    impl Task for Scaffold {
        fn command(&self) -> &str {
            "scaffold"
        }

        fn params(&self) -> Vec<String> {
            vec!["folder_name".to_string(), "template".to_string()]
        }

        async fn run(&self, _ctx: &mut TaskContext) -> TaskResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_root_arguments_strip_command_token() {
        let invocation = Invocation::parse(["A", "x", "y", "--flag=1"]);
        let bag = root_arguments(&invocation);

        assert_eq!(bag.positional(), ["x".to_string(), "y".to_string()]);
        assert_eq!(bag.flag("flag"), Some(&FlagValue::Text("1".to_string())));
    }

    #[test]
    fn test_dependency_inherits_or_overrides_positionals() {
        let parent = root_arguments(&Invocation::parse(["A", "x", "y", "--flag=1"]));

        let inherited = bind_dependency(&parent, &Dependency::new("B"));
        assert_eq!(inherited, parent);

        let overridden = bind_dependency(&parent, &Dependency::with_params("B", ["z"]));
        assert_eq!(overridden.positional(), ["z".to_string()]);
        assert_eq!(overridden.flags(), parent.flags());

        let emptied = bind_dependency(&parent, &Dependency::with_params("B", Vec::<String>::new()));
        assert!(emptied.positional().is_empty());
    }

    #[test]
    fn test_validate_names_missing_params() {
        let bag = root_arguments(&Invocation::parse(["scaffold"]));
        match validate_arguments(&Scaffold, &bag) {
            Err(EngineError::MissingParams { command, missing }) => {
                assert_eq!(command, "scaffold");
                assert_eq!(missing, vec!["folder_name", "template"]);
            }
            other => panic!("expected MissingParams, got {:?}", other),
        }

        let bag = root_arguments(&Invocation::parse(["scaffold", "app"]));
        let err = validate_arguments(&Scaffold, &bag).unwrap_err();
        assert_eq!(err.to_string(), "Task 'scaffold' is missing params: template");

        let bag = root_arguments(&Invocation::parse(["scaffold", "app", "rust", "spare"]));
        assert!(validate_arguments(&Scaffold, &bag).is_ok());
    }
}
