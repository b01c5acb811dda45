//! Progress indicators for running tasks
//!
//! The engine asks a [`ProgressFactory`] for one indicator per invocation.
//! [`TerminalProgress`] draws an indented spinner per task on stderr;
//! [`HiddenProgress`] draws nothing and is used for piped output and tests.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use trellis_protocol::{NoProgress, ProgressHandle};

use crate::tasks::get_label_color;

/// Creates the progress indicator attached to each task invocation.
pub trait ProgressFactory: Send + Sync {
    /// Start an indicator for `label`, indented by the invocation's depth.
    fn start(&self, label: &str, depth: usize) -> Arc<dyn ProgressHandle>;
}

/// Factory whose indicators render nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenProgress;

impl ProgressFactory for HiddenProgress {
    fn start(&self, _label: &str, _depth: usize) -> Arc<dyn ProgressHandle> {
        Arc::new(NoProgress)
    }
}

/// Spinners for every invocation, stacked in one multi-line display.
pub struct TerminalProgress {
    multi: MultiProgress,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
        }
    }

    /// Whether stderr can display spinners.
    pub fn is_supported() -> bool {
        std::io::stderr().is_terminal()
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressFactory for TerminalProgress {
    fn start(&self, label: &str, depth: usize) -> Arc<dyn ProgressHandle> {
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix} {spinner:.cyan} {msg:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "·"]),
        );
        bar.set_prefix(format!(
            "{}{}",
            "  ".repeat(depth),
            label.color(get_label_color(label)).bold()
        ));
        bar.enable_steady_tick(Duration::from_millis(100));

        Arc::new(Spinner { bar })
    }
}

struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    fn finish(&self, message: String) {
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        self.bar.finish_with_message(message);
    }
}

impl ProgressHandle for Spinner {
    fn set_text(&self, text: &str) {
        if !self.bar.is_finished() {
            self.bar.set_message(text.to_string());
        }
    }

    fn succeed(&self) {
        if !self.bar.is_finished() {
            self.finish("✓".green().bold().to_string());
        }
    }

    fn fail(&self) {
        if self.bar.is_finished() {
            return;
        }
        let last = self.bar.message();
        let message = if last.is_empty() || last == "running" {
            "✗".red().bold().to_string()
        } else {
            format!("{} {}", "✗".red().bold(), last.red())
        };
        self.finish(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress_accepts_every_call() {
        let handle = HiddenProgress.start("build", 2);
        handle.set_text("waiting");
        handle.fail();
        handle.succeed();
    }

    #[test]
    fn test_spinner_ignores_calls_after_finishing() {
        let bar = ProgressBar::hidden();
        let spinner = Spinner { bar: bar.clone() };

        spinner.set_text("skipped");
        spinner.fail();
        assert!(bar.is_finished());
        assert!(bar.message().contains("skipped"));

        spinner.set_text("running");
        spinner.succeed();
        assert!(bar.message().contains("skipped"));
    }
}
