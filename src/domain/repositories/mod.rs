use async_trait::async_trait;

use crate::domain::models::{MessageRecord, ModerationState};

/// The content store owning message records. The engine reads records and
/// writes back `moderation_state` and `remote_message_id`; saves are
/// read-modify-write with last-writer-wins.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn get(&self, record_id: i64) -> anyhow::Result<Option<MessageRecord>>;

    async fn save(&self, record: &MessageRecord) -> anyhow::Result<()>;

    /// Save as a new revision carrying `log_message`.
    async fn save_revision(&self, record: &MessageRecord, log_message: &str)
    -> anyhow::Result<()>;
}

/// Resolves a media reference to an absolute URL, or `None` when the
/// referenced file cannot be found.
pub trait MediaResolver: Send + Sync {
    fn resolve_url(&self, media_ref: &str) -> Option<String>;
}

/// Looks up the transition id a workflow declares for a `(from, to)` pair.
/// `None` means the pair is not a declared transition, or the workflow is
/// unknown; callers treat both as a no-op.
pub trait WorkflowResolver: Send + Sync {
    fn initial_state(&self, workflow_id: &str) -> Option<ModerationState>;

    fn resolve_transition(
        &self,
        workflow_id: &str,
        from: ModerationState,
        to: ModerationState,
    ) -> Option<String>;
}
