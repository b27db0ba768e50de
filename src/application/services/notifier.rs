/// Channel for operator-facing messages. Fire and forget; the engine never
/// reads anything back. Text passed here must not leak internal error
/// detail beyond an optional provider-supplied message.
pub trait OperatorNotifier: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}
