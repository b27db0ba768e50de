use crate::application::services::notifier::OperatorNotifier;

/// Operator notifications routed to the tracing pipeline. Suits headless
/// deployments where no interactive messenger is wired up.
#[derive(Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl OperatorNotifier for TracingNotifier {
    fn info(&self, message: &str) {
        tracing::info!(target: "operator", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(target: "operator", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "operator", "{message}");
    }
}
