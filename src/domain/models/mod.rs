pub mod message;
pub mod status;
pub mod workflow;

pub use message::{MessageRecord, ModerationState};
pub use status::{CancelOutcome, RemoteMessageStatus};
pub use workflow::{Workflow, WorkflowTransition};
