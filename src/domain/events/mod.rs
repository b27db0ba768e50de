use serde::{Deserialize, Serialize};

use crate::domain::models::ModerationState;

/// A workflow state change reported by the host's workflow engine.
///
/// `from_state` is `None` for a record entering the workflow; the handler
/// substitutes the workflow's initial state, like the host does.
#[derive(Debug, Clone)]
pub struct TransitionEvent {
    pub record_id: i64,
    pub workflow_id: String,
    pub from_state: Option<ModerationState>,
    pub to_state: ModerationState,
}

/// One pending reconciliation check: created exactly once per successful
/// create call, carried on the work queue until the worker consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationItem {
    pub remote_message_id: String,
    pub local_record_id: i64,
}

impl ReconciliationItem {
    pub fn new(remote_message_id: impl Into<String>, local_record_id: i64) -> Self {
        Self {
            remote_message_id: remote_message_id.into(),
            local_record_id,
        }
    }
}
