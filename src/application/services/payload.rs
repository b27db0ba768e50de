use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::{models::MessageRecord, repositories::MediaResolver};

/// The single delivery channel this system targets.
const CHANNEL_ID: &str = "dashboard";

const SEND_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationParams {
    pub affiliations: Vec<String>,
}

/// Wire payload for the create endpoint. Field names follow the provider's
/// JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub population_params: PopulationParams,
    pub channel_ids: Vec<String>,
    pub content: String,
    pub content_short: String,
    pub image_url: String,
    pub send_at: String,
    pub title: String,
}

/// Maps a message record into the provider's create payload. Pure: no I/O,
/// identical input yields an identical payload. Never mutates the record.
pub struct PayloadBuilder {
    media: Arc<dyn MediaResolver>,
}

impl PayloadBuilder {
    pub fn new(media: Arc<dyn MediaResolver>) -> Self {
        Self { media }
    }

    pub fn build(&self, record: &MessageRecord) -> MessagePayload {
        let image_url = record
            .image_ref
            .as_deref()
            .and_then(|media_ref| self.media.resolve_url(media_ref))
            .unwrap_or_default();

        MessagePayload {
            population_params: PopulationParams {
                affiliations: record.audience.iter().cloned().collect(),
            },
            channel_ids: vec![CHANNEL_ID.to_string()],
            content: record.long_body.clone(),
            content_short: record.short_body.clone(),
            image_url,
            send_at: record
                .publish_at
                .with_timezone(&Utc)
                .format(SEND_AT_FORMAT)
                .to_string(),
            title: record.title.clone(),
        }
    }
}
