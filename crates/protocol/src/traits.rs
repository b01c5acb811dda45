//! The trait every Trellis task implements.
//!
//! A [`Task`] is an immutable definition: its identity, the arguments it
//! accepts, the tasks it depends on, and the work it performs. Everything
//! that varies per invocation (bound arguments, result, log buffer, progress
//! indicator) lives in the [`TaskContext`] handed to [`Task::run`].

use async_trait::async_trait;

use crate::context::TaskContext;
use crate::error::TaskResult;
use crate::types::{Dependency, FlagDef};

/// A named, invokable unit of work.
///
/// **Implementation Pattern**: most tasks are unit structs whose declaration
/// methods return static data, with all state carried by the context.
///
/// # Example
///
/// ```rust
/// use trellis_protocol::{async_trait, Dependency, FlagDef, Task, TaskContext, TaskResult};
///
/// pub struct Greet;
///
/// #[async_trait]
/// impl Task for Greet {
///     fn command(&self) -> &str {
///         "greet"
///     }
///
///     fn description(&self) -> &str {
///         "Say hello"
///     }
///
///     fn params(&self) -> Vec<String> {
///         vec!["name".to_string()]
///     }
///
///     fn flags(&self) -> Vec<FlagDef> {
///         vec![FlagDef::new("shout", "Use capital letters")]
///     }
///
///     async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()> {
///         let mut greeting = format!("hello {}", ctx.param("name")?);
///         if ctx.flag_enabled("shout")? {
///             greeting = greeting.to_uppercase();
///         }
///         ctx.logger_mut().info(greeting);
///         ctx.succeed();
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync {
    /// The unique name used to invoke the task.
    ///
    /// Must be non-empty, contain no whitespace and not start with `-`.
    /// Registering a second task with the same command replaces the first.
    fn command(&self) -> &str;

    /// Text shown in help listings. Internal tasks may leave this empty.
    fn description(&self) -> &str {
        ""
    }

    /// Tasks that must complete before this one runs.
    ///
    /// Dependencies are started together and joined before [`run`](Self::run)
    /// is called. References are resolved lazily, when the task is invoked.
    fn dependencies(&self) -> Vec<Dependency> {
        Vec::new()
    }

    /// Ordered names of the required positional parameters.
    fn params(&self) -> Vec<String> {
        Vec::new()
    }

    /// Optional named flags.
    fn flags(&self) -> Vec<FlagDef> {
        Vec::new()
    }

    /// Display name for progress output and log tags.
    fn label(&self) -> String {
        self.command().to_string()
    }

    /// Internal tasks cannot be invoked by a user, only reached as dependencies.
    fn is_internal(&self) -> bool {
        false
    }

    /// Perform the task's work.
    ///
    /// Report the outcome with [`TaskContext::set_result`]. Returning `Err`
    /// aborts the whole invocation tree rather than failing only this task.
    async fn run(&self, ctx: &mut TaskContext) -> TaskResult<()>;
}
