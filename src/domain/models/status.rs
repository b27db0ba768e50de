/// Server-side delivery status of a remote message.
///
/// The provider's status set is open-ended; anything unrecognized lands in
/// `Other` and never drives a local state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteMessageStatus {
    Processing,
    Sent,
    Cancelled,
    Other(String),
}

impl RemoteMessageStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PROCESSING" => RemoteMessageStatus::Processing,
            "SENT" => RemoteMessageStatus::Sent,
            "CANCELLED" | "CANCELED" => RemoteMessageStatus::Cancelled,
            other => RemoteMessageStatus::Other(other.to_string()),
        }
    }
}

/// Outcome of a cancel request against the remote API.
///
/// `AlreadySent` is the provider's HTTP 400 signal that the message left
/// the cancellable window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    AlreadySent,
}
