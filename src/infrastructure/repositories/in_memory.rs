use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    models::{MessageRecord, ModerationState, Workflow},
    repositories::{MediaResolver, MessageRepository, WorkflowResolver},
};

/// A saved revision of a message record.
#[derive(Debug, Clone)]
pub struct RecordRevision {
    pub id: Uuid,
    pub record_id: i64,
    pub moderation_state: ModerationState,
    pub log_message: String,
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    records: Arc<RwLock<HashMap<i64, MessageRecord>>>,
    revisions: Arc<RwLock<Vec<RecordRevision>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: MessageRecord) {
        let mut records = self.records.write().await;
        records.insert(record.id, record);
    }

    pub async fn revisions_for(&self, record_id: i64) -> Vec<RecordRevision> {
        let revisions = self.revisions.read().await;
        revisions
            .iter()
            .filter(|r| r.record_id == record_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn get(&self, record_id: i64) -> anyhow::Result<Option<MessageRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&record_id).cloned())
    }

    async fn save(&self, record: &MessageRecord) -> anyhow::Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save_revision(
        &self,
        record: &MessageRecord,
        log_message: &str,
    ) -> anyhow::Result<()> {
        self.save(record).await?;
        let mut revisions = self.revisions.write().await;
        revisions.push(RecordRevision {
            id: Uuid::new_v4(),
            record_id: record.id,
            moderation_state: record.moderation_state,
            log_message: log_message.to_string(),
        });
        Ok(())
    }
}

/// Media reference to absolute URL lookup over a fixed map.
#[derive(Default)]
pub struct InMemoryMediaResolver {
    urls: HashMap<String, String>,
}

impl InMemoryMediaResolver {
    pub fn new(urls: HashMap<String, String>) -> Self {
        Self { urls }
    }
}

impl MediaResolver for InMemoryMediaResolver {
    fn resolve_url(&self, media_ref: &str) -> Option<String> {
        self.urls.get(media_ref).cloned()
    }
}

/// Workflow definitions keyed by id.
pub struct InMemoryWorkflowRegistry {
    workflows: HashMap<String, Workflow>,
}

impl InMemoryWorkflowRegistry {
    pub fn new(workflows: Vec<Workflow>) -> Self {
        Self {
            workflows: workflows.into_iter().map(|w| (w.id.clone(), w)).collect(),
        }
    }
}

impl WorkflowResolver for InMemoryWorkflowRegistry {
    fn initial_state(&self, workflow_id: &str) -> Option<ModerationState> {
        self.workflows.get(workflow_id).map(|w| w.initial_state)
    }

    fn resolve_transition(
        &self,
        workflow_id: &str,
        from: ModerationState,
        to: ModerationState,
    ) -> Option<String> {
        self.workflows
            .get(workflow_id)?
            .resolve_transition(from, to)
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_record;

    #[tokio::test]
    async fn save_revision_keeps_a_trail() {
        let repo = InMemoryMessageRepository::new();
        let mut record = sample_record(1);
        repo.insert(record.clone()).await;

        record.moderation_state = ModerationState::Sent;
        repo.save_revision(&record, "Sent").await.unwrap();

        let stored = repo.get(1).await.unwrap().unwrap();
        assert_eq!(stored.moderation_state, ModerationState::Sent);
        let revisions = repo.revisions_for(1).await;
        assert_eq!(revisions.len(), 1);
        assert_eq!(revisions[0].log_message, "Sent");
    }

    #[test]
    fn registry_resolves_only_known_workflows() {
        let registry = InMemoryWorkflowRegistry::new(vec![Workflow::message_publication()]);
        assert_eq!(
            registry.resolve_transition(
                "message_publication",
                ModerationState::Review,
                ModerationState::Published,
            ),
            Some("published".to_string())
        );
        assert_eq!(
            registry.resolve_transition(
                "editorial",
                ModerationState::Review,
                ModerationState::Published,
            ),
            None
        );
        assert_eq!(
            registry.initial_state("message_publication"),
            Some(ModerationState::Draft)
        );
    }
}
