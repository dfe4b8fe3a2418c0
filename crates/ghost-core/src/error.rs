use contracts::{GhostType, QuestionId};

/// Caller-side failures. Data-integrity defects are caught by the validator instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("ghost type {0} is not registered")]
    GhostNotRegistered(GhostType),
    #[error("question {question} has no word pools for ghost {ghost}")]
    QuestionNotConfigured {
        ghost: GhostType,
        question: QuestionId,
    },
    #[error("invalid tuning config: {0}")]
    InvalidTuning(String),
}
