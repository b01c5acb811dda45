/// A progress indicator attached to one task invocation.
///
/// Implementations must tolerate calls after a terminal state; the engine may
/// mark an indicator failed while unwinding from an error.
pub trait ProgressHandle: Send + Sync {
    /// Replaces the indicator's text label.
    fn set_text(&self, text: &str);

    /// Terminal success state.
    fn succeed(&self);

    /// Terminal failure state.
    fn fail(&self);
}

/// An indicator that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressHandle for NoProgress {
    fn set_text(&self, _text: &str) {}

    fn succeed(&self) {}

    fn fail(&self) {}
}
