use async_trait::async_trait;

use crate::{
    application::services::payload::MessagePayload,
    domain::{
        errors::ApiFailure,
        models::{CancelOutcome, RemoteMessageStatus},
    },
};

/// The remote message API: create, cancel, poll. Implementations classify
/// failures and never retry; retry policy belongs to the caller.
#[async_trait]
pub trait MessageApiClient: Send + Sync {
    /// Create the message remotely, returning its remote id.
    async fn create(&self, payload: &MessagePayload) -> Result<String, ApiFailure>;

    /// Ask the provider to cancel a scheduled message.
    async fn cancel(&self, remote_id: &str) -> Result<CancelOutcome, ApiFailure>;

    /// Fetch the provider's current delivery status.
    async fn get_status(&self, remote_id: &str) -> Result<RemoteMessageStatus, ApiFailure>;
}
