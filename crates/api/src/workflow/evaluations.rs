//! Evaluation submission and ledger-triggered completion.

use serde_json::json;

use gradus_core::error::CoreError;
use gradus_core::evaluation::{validate_comments, validate_score, validate_submitter, ScoreEntry};
use gradus_core::roles::EvaluatorRole;
use gradus_core::types::DbId;
use gradus_db::models::evaluation::{Evaluation, SubmitEvaluationRequest};
use gradus_db::models::project::Project;
use gradus_db::repositories::EvaluationRepo;
use gradus_events::bus::{DomainEvent, EVENT_EVALUATION_SUBMITTED, EVENT_PROJECT_COMPLETED};

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::workflow::{lock_context, try_finalize};

/// Submit (or re-submit) an evaluation as the acting teacher.
///
/// The score must be within range and the actor must actually hold the
/// claimed role. Re-submission replaces the prior record, never
/// duplicates it. When the project is past its defense and this score
/// completes the ledger, the project is closed and the final grade
/// recorded in the same transaction; the possibly-updated project is
/// returned alongside the evaluation.
pub async fn submit(
    state: &AppState,
    project_id: DbId,
    input: &SubmitEvaluationRequest,
    actor: &Actor,
) -> AppResult<(Evaluation, Project)> {
    let role = EvaluatorRole::from_str_value(&input.role)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    validate_score(input.score)?;
    validate_comments(input.comments.as_deref())?;

    let mut tx = state.pool.begin().await?;
    let mut ctx = lock_context(&mut tx, project_id).await?;

    if ctx.status.is_terminal() {
        return Err(AppError::Core(CoreError::InvalidState(format!(
            "Cannot grade a project with status '{}'",
            ctx.status.as_str()
        ))));
    }

    validate_submitter(
        role,
        actor.teacher_id,
        ctx.project.supervisor_id,
        &ctx.bindings,
    )?;

    let evaluation = EvaluationRepo::upsert(
        &mut *tx,
        project_id,
        actor.teacher_id,
        role.as_str(),
        input.score,
        input.comments.as_deref(),
    )
    .await?;

    // Reflect the upsert in the in-transaction view, then see whether the
    // ledger is now complete for the post-defense stage.
    ctx.entries
        .retain(|e| !(e.role == role && e.teacher_id == actor.teacher_id));
    ctx.entries.push(ScoreEntry {
        role,
        teacher_id: actor.teacher_id,
        score: input.score,
    });

    let finalized = try_finalize(&mut tx, &ctx).await?;
    let project = finalized.clone().unwrap_or(ctx.project);

    tx.commit().await?;

    state.event_bus.publish(
        DomainEvent::new(EVENT_EVALUATION_SUBMITTED)
            .with_source("project", project_id)
            .with_actor(actor.teacher_id)
            .with_payload(json!({
                "role": role.as_str(),
                "score": input.score,
            })),
    );

    if let Some(completed) = finalized {
        state.event_bus.publish(
            DomainEvent::new(EVENT_PROJECT_COMPLETED)
                .with_source("project", project_id)
                .with_actor(actor.teacher_id)
                .with_payload(json!({
                    "final_score": completed.final_score,
                })),
        );
    }

    Ok((evaluation, project))
}
