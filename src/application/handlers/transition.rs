use std::sync::Arc;

use chrono::Utc;

use crate::{
    application::{
        handlers::SENT_LOG_MESSAGE,
        services::{
            message_api::MessageApiClient, notifier::OperatorNotifier, payload::PayloadBuilder,
            queue::ReconciliationQueue,
        },
    },
    domain::{
        events::{ReconciliationItem, TransitionEvent},
        models::{CancelOutcome, MessageRecord, ModerationState, RemoteMessageStatus},
        repositories::{MessageRepository, WorkflowResolver},
    },
};

const PUBLISH_AT_DISPLAY_FORMAT: &str = "%A, %B %d, %Y - %I:%M:%S %p";

/// Reacts to workflow transitions on message records.
///
/// Only two transition ids are acted on: `published` creates the message
/// remotely and queues a reconciliation check, `cancelled` probes the
/// remote status before attempting the cancel. Every other workflow move,
/// and any `(from, to)` pair the workflow does not declare, passes through
/// untouched.
pub struct DispatchTransitionHandler {
    repo: Arc<dyn MessageRepository>,
    workflows: Arc<dyn WorkflowResolver>,
    builder: PayloadBuilder,
    client: Arc<dyn MessageApiClient>,
    queue: Arc<dyn ReconciliationQueue>,
    notifier: Arc<dyn OperatorNotifier>,
    workflow_id: String,
}

impl DispatchTransitionHandler {
    pub fn new(
        repo: Arc<dyn MessageRepository>,
        workflows: Arc<dyn WorkflowResolver>,
        builder: PayloadBuilder,
        client: Arc<dyn MessageApiClient>,
        queue: Arc<dyn ReconciliationQueue>,
        notifier: Arc<dyn OperatorNotifier>,
        workflow_id: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            workflows,
            builder,
            client,
            queue,
            notifier,
            workflow_id: workflow_id.into(),
        }
    }

    pub async fn handle(&self, event: TransitionEvent) -> anyhow::Result<()> {
        if event.workflow_id != self.workflow_id {
            return Ok(());
        }

        let from = match event
            .from_state
            .or_else(|| self.workflows.initial_state(&event.workflow_id))
        {
            Some(state) => state,
            None => return Ok(()),
        };

        let transition_id = match self
            .workflows
            .resolve_transition(&event.workflow_id, from, event.to_state)
        {
            Some(id) => id,
            // Not a declared transition; deliberate no-op.
            None => return Ok(()),
        };

        let record = self
            .repo
            .get(event.record_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("message record {} not found", event.record_id))?;

        match transition_id.as_str() {
            "published" => self.on_published(record).await,
            "cancelled" => self.on_cancelled(record).await,
            _ => Ok(()),
        }
    }

    async fn on_published(&self, mut record: MessageRecord) -> anyhow::Result<()> {
        let payload = self.builder.build(&record);

        match self.client.create(&payload).await {
            Ok(remote_id) => {
                record.remote_message_id = Some(remote_id.clone());
                self.repo.save(&record).await?;
                self.queue
                    .enqueue(ReconciliationItem::new(remote_id, record.id))
                    .await?;

                if Utc::now() > record.publish_at {
                    self.notifier.info(
                        "Your message has been queued for sending. \
                         Check the message dashboard for status.",
                    );
                } else {
                    self.notifier.info(&format!(
                        "Your message has been queued for sending. \
                         Check the message dashboard after {}.",
                        record.publish_at.format(PUBLISH_AT_DISPLAY_FORMAT)
                    ));
                }
            }
            Err(failure) => {
                tracing::error!(record_id = record.id, %failure, "message creation failed");
                match failure.provider_message() {
                    Some(message) => self.notifier.error(&format!(
                        "There was a problem sending your message. {message}"
                    )),
                    None => self
                        .notifier
                        .error("There was a problem sending your message."),
                }
                // Back to review so the operator can publish again.
                record.moderation_state = ModerationState::Review;
                self.repo.save(&record).await?;
            }
        }

        Ok(())
    }

    async fn on_cancelled(&self, record: MessageRecord) -> anyhow::Result<()> {
        let remote_id = match record.remote_message_id.clone() {
            Some(id) => id,
            None => {
                self.notifier
                    .error("This message was never sent to the message API; nothing to cancel.");
                return Ok(());
            }
        };

        // The status probe must precede the cancel: cancelling a message the
        // provider has started sending is the race this check prevents.
        match self.client.get_status(&remote_id).await {
            Ok(RemoteMessageStatus::Processing) => {
                self.notifier
                    .warning("Message is being processed, cannot cancel.");
                return self.mark_sent(record).await;
            }
            Ok(_) => {}
            Err(failure) => {
                // A failed probe still attempts the cancel; the provider
                // rejects past-window cancels itself.
                tracing::warn!(%remote_id, %failure, "status check before cancel failed");
            }
        }

        match self.client.cancel(&remote_id).await {
            Ok(CancelOutcome::Cancelled) => {
                self.notifier.info("Message has been successfully cancelled.");
            }
            Ok(CancelOutcome::AlreadySent) => {
                self.notifier.warning("Message has already been sent.");
                self.mark_sent(record).await?;
            }
            Err(failure) => {
                // Local state stays cancelled while the remote message may
                // still send; inconsistent until manually reconciled.
                tracing::error!(%remote_id, %failure, "cancel request failed");
                self.notifier.error(
                    "Something went wrong with the cancel request. \
                     Please contact the site owners.",
                );
            }
        }

        Ok(())
    }

    async fn mark_sent(&self, mut record: MessageRecord) -> anyhow::Result<()> {
        record.moderation_state = ModerationState::Sent;
        self.repo.save_revision(&record, SENT_LOG_MESSAGE).await
    }
}
