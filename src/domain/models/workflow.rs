use super::message::ModerationState;

/// A declared edge in a workflow graph.
#[derive(Debug, Clone)]
pub struct WorkflowTransition {
    pub id: String,
    pub from: Vec<ModerationState>,
    pub to: ModerationState,
}

/// A workflow definition: named transitions over moderation states.
///
/// The engine never walks the graph itself; it only asks which declared
/// transition connects a `(from, to)` pair.
#[derive(Debug, Clone)]
pub struct Workflow {
    pub id: String,
    pub initial_state: ModerationState,
    transitions: Vec<WorkflowTransition>,
}

impl Workflow {
    pub fn new(
        id: impl Into<String>,
        initial_state: ModerationState,
        transitions: Vec<WorkflowTransition>,
    ) -> Self {
        Self {
            id: id.into(),
            initial_state,
            transitions,
        }
    }

    /// The moderation workflow dashboard messages move through.
    pub fn message_publication() -> Self {
        let edge = |id: &str, from: Vec<ModerationState>, to: ModerationState| WorkflowTransition {
            id: id.to_string(),
            from,
            to,
        };
        Self::new(
            "message_publication",
            ModerationState::Draft,
            vec![
                edge(
                    "create_new_draft",
                    vec![
                        ModerationState::Draft,
                        ModerationState::Review,
                        ModerationState::Published,
                    ],
                    ModerationState::Draft,
                ),
                edge(
                    "review",
                    vec![ModerationState::Draft, ModerationState::Published],
                    ModerationState::Review,
                ),
                edge(
                    "published",
                    vec![ModerationState::Review],
                    ModerationState::Published,
                ),
                edge(
                    "cancelled",
                    vec![ModerationState::Published],
                    ModerationState::Cancelled,
                ),
            ],
        )
    }

    /// Resolve the transition id declared for `(from, to)`, if any.
    pub fn resolve_transition(
        &self,
        from: ModerationState,
        to: ModerationState,
    ) -> Option<&str> {
        self.transitions
            .iter()
            .find(|t| t.to == to && t.from.contains(&from))
            .map(|t| t.id.as_str())
    }
}
