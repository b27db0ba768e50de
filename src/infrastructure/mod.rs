pub mod messaging;
pub mod notifier;
pub mod queue;
pub mod repositories;
