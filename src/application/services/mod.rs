pub mod message_api;
pub mod notifier;
pub mod payload;
pub mod queue;
