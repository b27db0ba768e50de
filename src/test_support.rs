use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    application::services::{
        message_api::MessageApiClient, notifier::OperatorNotifier, payload::MessagePayload,
        queue::ReconciliationQueue,
    },
    domain::{
        errors::ApiFailure,
        events::ReconciliationItem,
        models::{CancelOutcome, MessageRecord, ModerationState, RemoteMessageStatus},
    },
};

pub fn sample_record(id: i64) -> MessageRecord {
    MessageRecord {
        id,
        title: "Campus Alert".to_string(),
        short_body: "Short version".to_string(),
        long_body: "Long version of the announcement.".to_string(),
        publish_at: "2024-03-01T09:00:00-05:00".parse().unwrap(),
        audience: ["staff"].iter().map(|s| s.to_string()).collect(),
        image_ref: None,
        moderation_state: ModerationState::Review,
        remote_message_id: None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Create,
    Cancel(String),
    GetStatus(String),
}

/// Remote API double fed with scripted results, consumed in call order.
/// Panics when a call arrives with nothing scripted for it, which in a
/// test means the code under test made an unexpected remote call.
#[derive(Default)]
pub struct ScriptedApiClient {
    create_results: Mutex<VecDeque<Result<String, ApiFailure>>>,
    cancel_results: Mutex<VecDeque<Result<CancelOutcome, ApiFailure>>>,
    status_results: Mutex<VecDeque<Result<RemoteMessageStatus, ApiFailure>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_ok(mut self, remote_id: &str) -> Self {
        self.create_results
            .get_mut()
            .push_back(Ok(remote_id.to_string()));
        self
    }

    pub fn create_err(mut self, failure: ApiFailure) -> Self {
        self.create_results.get_mut().push_back(Err(failure));
        self
    }

    pub fn cancel_ok(mut self, outcome: CancelOutcome) -> Self {
        self.cancel_results.get_mut().push_back(Ok(outcome));
        self
    }

    pub fn cancel_err(mut self, failure: ApiFailure) -> Self {
        self.cancel_results.get_mut().push_back(Err(failure));
        self
    }

    pub fn status_ok(mut self, status: RemoteMessageStatus) -> Self {
        self.status_results.get_mut().push_back(Ok(status));
        self
    }

    pub fn status_err(mut self, failure: ApiFailure) -> Self {
        self.status_results.get_mut().push_back(Err(failure));
        self
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl MessageApiClient for ScriptedApiClient {
    async fn create(&self, _payload: &MessagePayload) -> Result<String, ApiFailure> {
        self.calls.lock().await.push(ApiCall::Create);
        self.create_results
            .lock()
            .await
            .pop_front()
            .expect("unexpected create call")
    }

    async fn cancel(&self, remote_id: &str) -> Result<CancelOutcome, ApiFailure> {
        self.calls
            .lock()
            .await
            .push(ApiCall::Cancel(remote_id.to_string()));
        self.cancel_results
            .lock()
            .await
            .pop_front()
            .expect("unexpected cancel call")
    }

    async fn get_status(&self, remote_id: &str) -> Result<RemoteMessageStatus, ApiFailure> {
        self.calls
            .lock()
            .await
            .push(ApiCall::GetStatus(remote_id.to_string()));
        self.status_results
            .lock()
            .await
            .pop_front()
            .expect("unexpected get_status call")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Captures operator notifications for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: std::sync::Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub async fn count(&self, level: NoticeLevel) -> usize {
        self.messages(level).await.len()
    }
}

impl OperatorNotifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((NoticeLevel::Info, message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((NoticeLevel::Warning, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((NoticeLevel::Error, message.to_string()));
    }
}

/// Queue double that only records what was enqueued.
#[derive(Default)]
pub struct CollectingQueue {
    items: Mutex<Vec<ReconciliationItem>>,
}

impl CollectingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn items(&self) -> Vec<ReconciliationItem> {
        self.items.lock().await.clone()
    }
}

#[async_trait]
impl ReconciliationQueue for CollectingQueue {
    async fn enqueue(&self, item: ReconciliationItem) -> anyhow::Result<()> {
        self.items.lock().await.push(item);
        Ok(())
    }
}
