use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Editorial workflow status of a message record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationState {
    Draft,
    Review,
    Published,
    Cancelled,
    Sent,
}

impl ModerationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationState::Draft => "draft",
            ModerationState::Review => "review",
            ModerationState::Published => "published",
            ModerationState::Cancelled => "cancelled",
            ModerationState::Sent => "sent",
        }
    }
}

/// A dashboard message as authored in the content store.
///
/// The engine reads the content fields and writes only `moderation_state`
/// and `remote_message_id`. `publish_at` keeps the editorial offset; it is
/// normalized to UTC when the wire payload is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub title: String,
    pub short_body: String,
    pub long_body: String,
    pub publish_at: DateTime<FixedOffset>,
    pub audience: BTreeSet<String>,
    pub image_ref: Option<String>,
    pub moderation_state: ModerationState,
    pub remote_message_id: Option<String>,
}
