use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    application::services::{message_api::MessageApiClient, payload::MessagePayload},
    config::Config,
    domain::{
        errors::ApiFailure,
        models::{CancelOutcome, RemoteMessageStatus},
    },
};

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone)]
pub struct DashboardApiConfig {
    pub create_endpoint: String,
    pub messages_endpoint: String,
    pub api_key: String,
    pub request_timeout: Duration,
}

impl From<&Config> for DashboardApiConfig {
    fn from(config: &Config) -> Self {
        Self {
            create_endpoint: config.create_endpoint.clone(),
            messages_endpoint: config.messages_endpoint.clone(),
            api_key: config.api_key.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// HTTP client for the dashboard message API. Stateless: classifies each
/// response and returns, no retries, no local state.
pub struct DashboardApiClient {
    http: Client,
    config: DashboardApiConfig,
}

impl DashboardApiClient {
    pub fn new(config: DashboardApiConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent("dashboard-messages")
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn message_url(&self, remote_id: &str) -> String {
        format!(
            "{}/{}",
            self.config.messages_endpoint.trim_end_matches('/'),
            remote_id
        )
    }

    fn cancel_url(&self, remote_id: &str) -> String {
        format!("{}/cancel", self.message_url(remote_id))
    }

    /// Non-2xx responses become `Client` failures carrying the provider's
    /// `message` field when the body has one.
    fn classify_rejection(status: StatusCode, body: &str) -> ApiFailure {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_default();
        ApiFailure::Client {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl MessageApiClient for DashboardApiClient {
    async fn create(&self, payload: &MessagePayload) -> Result<String, ApiFailure> {
        let response = self
            .http
            .post(&self.config.create_endpoint)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&CreateRequest { payload })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::classify_rejection(status, &body));
        }

        serde_json::from_str::<CreateResponse>(&body)
            .map(|parsed| parsed.object.id)
            .map_err(|_| ApiFailure::Protocol(format!("create response missing object id: {body}")))
    }

    async fn cancel(&self, remote_id: &str) -> Result<CancelOutcome, ApiFailure> {
        let response = self
            .http
            .post(self.cancel_url(remote_id))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => Ok(CancelOutcome::Cancelled),
            // The provider's signal that the message already left the
            // cancellable window.
            StatusCode::BAD_REQUEST => Ok(CancelOutcome::AlreadySent),
            _ => {
                let body = response.text().await?;
                Err(Self::classify_rejection(status, &body))
            }
        }
    }

    async fn get_status(&self, remote_id: &str) -> Result<RemoteMessageStatus, ApiFailure> {
        let response = self
            .http
            .get(self.message_url(remote_id))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::classify_rejection(status, &body));
        }

        serde_json::from_str::<StatusResponse>(&body)
            .map(|parsed| RemoteMessageStatus::parse(&parsed.message.status))
            .map_err(|_| ApiFailure::Protocol(format!("status response missing status: {body}")))
    }
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    payload: &'a MessagePayload,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    object: CreatedObject,
}

#[derive(Debug, Deserialize)]
struct CreatedObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    message: StatusBody,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DashboardApiClient {
        DashboardApiClient::new(DashboardApiConfig {
            create_endpoint: "https://api.example.edu/messages/create".to_string(),
            messages_endpoint: "https://api.example.edu/messages/".to_string(),
            api_key: "secret".to_string(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn message_urls_tolerate_trailing_slash() {
        let client = client();
        assert_eq!(
            client.message_url("msg-1"),
            "https://api.example.edu/messages/msg-1"
        );
        assert_eq!(
            client.cancel_url("msg-1"),
            "https://api.example.edu/messages/msg-1/cancel"
        );
    }

    #[test]
    fn create_response_parses_object_id() {
        let parsed: CreateResponse =
            serde_json::from_str(r#"{"object":{"id":"abc-123"}}"#).unwrap();
        assert_eq!(parsed.object.id, "abc-123");
    }

    #[test]
    fn status_response_parses_provider_status() {
        let parsed: StatusResponse =
            serde_json::from_str(r#"{"message":{"status":"PROCESSING"}}"#).unwrap();
        assert_eq!(
            RemoteMessageStatus::parse(&parsed.message.status),
            RemoteMessageStatus::Processing
        );
    }

    #[test]
    fn unknown_provider_status_is_preserved() {
        assert_eq!(
            RemoteMessageStatus::parse("THROTTLED"),
            RemoteMessageStatus::Other("THROTTLED".to_string())
        );
    }

    #[test]
    fn rejection_carries_provider_message_when_present() {
        let failure = DashboardApiClient::classify_rejection(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"affiliation unknown"}"#,
        );
        assert_eq!(failure.provider_message(), Some("affiliation unknown"));

        let failure =
            DashboardApiClient::classify_rejection(StatusCode::INTERNAL_SERVER_ERROR, "oops");
        assert_eq!(failure.provider_message(), None);
    }
}
