//! Transactional lifecycle workflow.
//!
//! Every mutating operation in the submodules follows the same shape:
//! open a transaction, load the project with `SELECT ... FOR UPDATE` (the
//! per-project lock that serializes concurrent writers), re-validate the
//! guard predicates from `gradus_core` against in-transaction state,
//! mutate, commit, and only then publish domain events. A failed guard
//! rolls back, so no partial mutation is ever visible.
//!
//! Unlocked snapshot reads (the reporting aggregate, eligibility probes)
//! live here in [`load_aggregate`]; they never mutate.

pub mod assignments;
pub mod defense;
pub mod evaluations;
pub mod lifecycle;

use serde::Serialize;
use sqlx::PgConnection;

use gradus_core::assignment::{committee_of, reviewer_of, RoleBinding};
use gradus_core::error::CoreError;
use gradus_core::evaluation::{
    final_score, pre_defense_score, required_evaluators, ScoreEntry,
};
use gradus_core::project::{ProjectKind, ProjectStatus};
use gradus_core::roles::EvaluatorRole;
use gradus_core::types::DbId;
use gradus_db::models::assignment::Assignment;
use gradus_db::models::defense_session::DefenseSession;
use gradus_db::models::evaluation::Evaluation;
use gradus_db::models::project::Project;
use gradus_db::repositories::{
    AssignmentRepo, DefenseSessionRepo, EvaluationRepo, ProjectRepo,
};
use gradus_db::DbPool;

use crate::error::AppError;

/// The full read model for one project, returned by mutating operations
/// and by the reporting accessor.
#[derive(Debug, Serialize)]
pub struct ProjectAggregate {
    pub project: Project,
    pub assignments: Vec<Assignment>,
    pub evaluations: Vec<Evaluation>,
    pub defense_session: Option<DefenseSession>,
    pub pre_defense_score: Option<f64>,
}

/// In-transaction view of a project and its workflow state, loaded under
/// the project row lock.
pub(crate) struct WorkflowContext {
    pub project: Project,
    pub kind: ProjectKind,
    pub status: ProjectStatus,
    pub bindings: Vec<RoleBinding>,
    pub entries: Vec<ScoreEntry>,
}

impl WorkflowContext {
    /// The evaluators whose scores make up this project's final grade.
    pub fn required_evaluators(&self) -> Vec<gradus_core::evaluation::RequiredEvaluator> {
        required_evaluators(
            self.kind.has_committee(),
            self.project.supervisor_id,
            reviewer_of(&self.bindings),
            &committee_of(&self.bindings),
        )
    }
}

// ---------------------------------------------------------------------------
// Row-to-domain mapping
// ---------------------------------------------------------------------------

/// Parse the stored status string. The workflow layer is the only writer,
/// so a bad value is data corruption, not caller input.
pub(crate) fn parse_status(project: &Project) -> Result<ProjectStatus, AppError> {
    ProjectStatus::from_str_value(&project.status)
        .map_err(|e| AppError::Core(CoreError::Internal(e)))
}

/// Parse the stored project kind string.
pub(crate) fn parse_kind(project: &Project) -> Result<ProjectKind, AppError> {
    ProjectKind::from_str_value(&project.kind)
        .map_err(|e| AppError::Core(CoreError::Internal(e)))
}

/// Map assignment rows to core role bindings.
pub(crate) fn bindings_of(assignments: &[Assignment]) -> Result<Vec<RoleBinding>, AppError> {
    assignments
        .iter()
        .map(|a| {
            EvaluatorRole::from_str_value(&a.role)
                .map(|role| RoleBinding {
                    teacher_id: a.teacher_id,
                    role,
                })
                .map_err(|e| AppError::Core(CoreError::Internal(e)))
        })
        .collect()
}

/// Map evaluation rows to core score entries.
pub(crate) fn entries_of(evaluations: &[Evaluation]) -> Result<Vec<ScoreEntry>, AppError> {
    evaluations
        .iter()
        .map(|e| {
            EvaluatorRole::from_str_value(&e.role)
                .map(|role| ScoreEntry {
                    role,
                    teacher_id: e.teacher_id,
                    score: e.score,
                })
                .map_err(|err| AppError::Core(CoreError::Internal(err)))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the project under its row lock together with the assignment and
/// evaluation state the guard predicates need. Must run inside the
/// transaction that will perform the mutation.
pub(crate) async fn lock_context(
    conn: &mut PgConnection,
    project_id: DbId,
) -> Result<WorkflowContext, AppError> {
    let project = ProjectRepo::find_by_id_for_update(&mut *conn, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let assignments = AssignmentRepo::list_for_project(&mut *conn, project_id).await?;
    let evaluations = EvaluationRepo::list_for_project(&mut *conn, project_id).await?;

    let kind = parse_kind(&project)?;
    let status = parse_status(&project)?;
    let bindings = bindings_of(&assignments)?;
    let entries = entries_of(&evaluations)?;

    Ok(WorkflowContext {
        project,
        kind,
        status,
        bindings,
        entries,
    })
}

/// Unlocked snapshot read of the full aggregate, for the reporting
/// collaborator and for the response body of mutating calls.
pub async fn load_aggregate(
    pool: &DbPool,
    project_id: DbId,
) -> Result<ProjectAggregate, AppError> {
    let project = ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let assignments = AssignmentRepo::list_for_project(pool, project_id).await?;
    let evaluations = EvaluationRepo::list_for_project(pool, project_id).await?;
    let defense_session = DefenseSessionRepo::find_active_for_project(pool, project_id).await?;

    let entries = entries_of(&evaluations)?;
    let pre_defense = pre_defense_score(&entries);

    Ok(ProjectAggregate {
        project,
        assignments,
        evaluations,
        defense_session,
        pre_defense_score: pre_defense,
    })
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Close the project if the evaluation ledger is complete.
///
/// Called inside the mutating transaction after an evaluation lands or the
/// defense completes, with `ctx` reflecting in-transaction state. Returns
/// the updated project when the final grade was awarded.
pub(crate) async fn try_finalize(
    conn: &mut PgConnection,
    ctx: &WorkflowContext,
) -> Result<Option<Project>, AppError> {
    if ctx.status != ProjectStatus::DefenseCompleted {
        return Ok(None);
    }

    let required = ctx.required_evaluators();
    let Some(score) = final_score(&ctx.entries, &required) else {
        return Ok(None);
    };

    ctx.status
        .validate_transition(ProjectStatus::Completed)
        .map_err(|e| AppError::Core(CoreError::InvalidState(e)))?;

    let project = ProjectRepo::finalize(
        &mut *conn,
        ctx.project.id,
        ProjectStatus::Completed.as_str(),
        score,
    )
    .await?;

    Ok(Some(project))
}
