use std::sync::Arc;

use crate::{
    application::{
        handlers::SENT_LOG_MESSAGE,
        services::{message_api::MessageApiClient, queue::ReconciliationQueue},
    },
    domain::{
        events::ReconciliationItem,
        models::{ModerationState, RemoteMessageStatus},
        repositories::MessageRepository,
    },
};

/// Closes the loop between "the API accepted this message" and the local
/// record: polls remote delivery status and finalizes the record once the
/// provider reports `SENT`.
///
/// Idempotent by design: duplicate deliveries of the same item find the
/// record already `sent` and do nothing. A poll that fails outright is
/// re-queued for the next cycle; a successfully retrieved non-`SENT`
/// status consumes the item without touching the record.
pub struct StatusReconciler {
    repo: Arc<dyn MessageRepository>,
    client: Arc<dyn MessageApiClient>,
    queue: Arc<dyn ReconciliationQueue>,
}

impl StatusReconciler {
    pub fn new(
        repo: Arc<dyn MessageRepository>,
        client: Arc<dyn MessageApiClient>,
        queue: Arc<dyn ReconciliationQueue>,
    ) -> Self {
        Self {
            repo,
            client,
            queue,
        }
    }

    pub async fn process(&self, item: ReconciliationItem) -> anyhow::Result<()> {
        match self.client.get_status(&item.remote_message_id).await {
            Ok(RemoteMessageStatus::Sent) => self.finalize(&item).await,
            Ok(status) => {
                tracing::debug!(
                    remote_id = %item.remote_message_id,
                    ?status,
                    "message not sent yet"
                );
                Ok(())
            }
            Err(failure) => {
                tracing::warn!(
                    remote_id = %item.remote_message_id,
                    %failure,
                    "status poll failed, re-queueing"
                );
                self.queue.enqueue(item).await
            }
        }
    }

    async fn finalize(&self, item: &ReconciliationItem) -> anyhow::Result<()> {
        let Some(mut record) = self.repo.get(item.local_record_id).await? else {
            tracing::warn!(
                record_id = item.local_record_id,
                "record vanished before reconciliation"
            );
            return Ok(());
        };
        if record.moderation_state == ModerationState::Sent {
            return Ok(());
        }
        record.moderation_state = ModerationState::Sent;
        self.repo.save_revision(&record, SENT_LOG_MESSAGE).await
    }
}
