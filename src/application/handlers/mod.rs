pub mod reconciliation;
pub mod transition;

/// Revision log message written whenever a record is forced to `sent`.
pub const SENT_LOG_MESSAGE: &str = "Sent";
