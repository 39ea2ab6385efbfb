use crate::types::DbId;

/// Domain error taxonomy.
///
/// Every variant is a recoverable, expected outcome surfaced to the caller
/// with a machine-readable kind and a human-readable reason. A failed guard
/// leaves all entities exactly as they were before the call.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed input: score out of range, date in the past, bad enum string.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Cardinality or uniqueness violation (second reviewer, duplicate session).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A workflow gate is not yet satisfied.
    #[error("Not eligible: {0}")]
    Ineligible(String),

    /// The acting teacher does not hold the claimed evaluator role.
    #[error("Unauthorized role: {0}")]
    UnauthorizedRole(String),

    /// Operation is illegal in the current workflow state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Mutation forbidden after defense completion (evaluator set is frozen).
    #[error("Locked: {0}")]
    Locked(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
