//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods accept any `PgExecutor`, so callers pass `&PgPool` for
//! snapshot reads or `&mut PgConnection` inside a transaction when the
//! workflow layer serializes writes per project.

pub mod assignment_repo;
pub mod defense_session_repo;
pub mod evaluation_repo;
pub mod event_repo;
pub mod project_repo;

pub use assignment_repo::AssignmentRepo;
pub use defense_session_repo::DefenseSessionRepo;
pub use evaluation_repo::EvaluationRepo;
pub use event_repo::EventRepo;
pub use project_repo::ProjectRepo;
