//! # Class Handlers
//!
//! Create, read, update and delete classes together with their weekly slots
//! and student roster.
//!
//! ## Saving a schedule
//!
//! Create and update share one flow:
//!
//! 1. Validate every submitted slot (day name, `HH:MM` times, start before
//!    end, non-empty location). Any failure is a `400`.
//! 2. Load the assigned teacher (`404` if missing), then every slot that
//!    teacher already teaches and every slot in the centre.
//! 3. Run the conflict checker. On an edit the class's own stored slots are
//!    left out so an unchanged schedule never clashes with itself.
//! 4. If anything clashes, answer `409` with every message and write nothing.
//! 5. Otherwise write the class and its slots in one transaction.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, warn};
use tuition_core::{
    conflict::ConflictReport,
    errors::TuitionError,
    models::{
        class::{
            CheckConflictsRequest, CheckConflictsResponse, Class, ClassResponse, ClassSummary,
            CreateClassRequest, DeleteResponse, EnrollStudentRequest, ProposedClass,
            UpdateClassRequest,
        },
        slot::{ScheduleSlot, validate_slots},
    },
};
use tuition_db::store::{ClassChanges, NewClass};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_class(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), AppError> {
    let name = required("Class name", &payload.name)?;
    let proposed = ProposedClass {
        class_id: None,
        teacher_id: payload.teacher_id,
        slots: validate_slots(&payload.slots)?,
    };

    ensure_no_conflicts(&state, &proposed).await?;

    let class = state
        .store
        .create_class(
            NewClass {
                name,
                academic_level: optional(payload.academic_level),
                teacher_id: proposed.teacher_id,
                student_ids: payload.student_ids,
            },
            proposed.slots.clone(),
        )
        .await?;

    info!(
        "Created class {} ({}) with {} slot(s)",
        class.name,
        class.id,
        proposed.slots.len()
    );

    let slots = annotate(&class, proposed.slots);
    Ok((StatusCode::CREATED, Json(ClassResponse::new(class, slots))))
}

#[axum::debug_handler]
pub async fn list_classes(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ClassSummary>>, AppError> {
    let classes = state.store.list_classes().await?;

    Ok(Json(classes.into_iter().map(ClassSummary::from).collect()))
}

#[axum::debug_handler]
pub async fn get_class(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClassResponse>, AppError> {
    let class = find_class(&state, id).await?;
    let slots = state.store.get_class_slots(id).await?;

    Ok(Json(ClassResponse::new(class, slots)))
}

#[axum::debug_handler]
pub async fn update_class(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClassRequest>,
) -> Result<Json<ClassResponse>, AppError> {
    let name = payload
        .name
        .as_deref()
        .map(|name| required("Class name", name))
        .transpose()?;
    let proposed = ProposedClass {
        class_id: Some(id),
        teacher_id: payload.teacher_id,
        slots: validate_slots(&payload.slots)?,
    };

    find_class(&state, id).await?;
    ensure_no_conflicts(&state, &proposed).await?;

    let class = state
        .store
        .update_class(
            id,
            ClassChanges {
                name,
                academic_level: payload.academic_level.map(|level| optional(Some(level))),
                teacher_id: proposed.teacher_id,
            },
            proposed.slots.clone(),
        )
        .await?
        .ok_or_else(|| class_not_found(id))?;

    info!(
        "Updated class {} ({}) with {} slot(s)",
        class.name,
        class.id,
        proposed.slots.len()
    );

    let slots = annotate(&class, proposed.slots);
    Ok(Json(ClassResponse::new(class, slots)))
}

#[axum::debug_handler]
pub async fn delete_class(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    if !state.store.delete_class(id).await? {
        return Err(class_not_found(id).into());
    }

    info!("Deleted class {}", id);
    Ok(Json(DeleteResponse { deleted: true }))
}

/// Deletes one slot; `index` is 0-based, later slots move down.
#[axum::debug_handler]
pub async fn delete_class_slot(
    State(state): State<Arc<ApiState>>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<DeleteResponse>, AppError> {
    find_class(&state, id).await?;

    if !state.store.delete_class_slot(id, index).await? {
        return Err(TuitionError::NotFound(format!(
            "Class {} has no schedule at index {}",
            id, index
        ))
        .into());
    }

    Ok(Json(DeleteResponse { deleted: true }))
}

/// Runs the conflict check without saving anything.
#[axum::debug_handler]
pub async fn check_conflicts(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CheckConflictsRequest>,
) -> Result<Json<CheckConflictsResponse>, AppError> {
    let proposed = ProposedClass {
        class_id: payload.class_id,
        teacher_id: payload.teacher_id,
        slots: validate_slots(&payload.slots)?,
    };

    let report = find_conflicts(&state, &proposed).await?;

    Ok(Json(CheckConflictsResponse {
        has_conflicts: report.has_conflicts(),
        report,
    }))
}

#[axum::debug_handler]
pub async fn enroll_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EnrollStudentRequest>,
) -> Result<Json<Class>, AppError> {
    let student_id = required("Student ID", &payload.student_id)?;

    let class = state
        .store
        .enroll_student(id, student_id)
        .await?
        .ok_or_else(|| class_not_found(id))?;

    Ok(Json(class))
}

#[axum::debug_handler]
pub async fn unenroll_student(
    State(state): State<Arc<ApiState>>,
    Path((id, student_id)): Path<(Uuid, String)>,
) -> Result<Json<Class>, AppError> {
    let class = state
        .store
        .unenroll_student(id, student_id)
        .await?
        .ok_or_else(|| class_not_found(id))?;

    Ok(Json(class))
}

async fn find_class(state: &ApiState, id: Uuid) -> Result<Class, AppError> {
    let class = state
        .store
        .get_class(id)
        .await?
        .ok_or_else(|| class_not_found(id))?;

    Ok(class)
}

/// Reads the teacher's and the centre's current slots and checks the proposal
/// against them.
async fn find_conflicts(
    state: &ApiState,
    proposed: &ProposedClass,
) -> Result<ConflictReport, AppError> {
    state
        .store
        .get_teacher(proposed.teacher_id)
        .await?
        .ok_or_else(|| {
            TuitionError::NotFound(format!("Teacher with ID {} not found", proposed.teacher_id))
        })?;

    let teacher_slots = state.store.get_teacher_slots(proposed.teacher_id).await?;
    let all_slots = state.store.get_all_slots().await?;

    Ok(state.checker.check(proposed, &teacher_slots, &all_slots))
}

async fn ensure_no_conflicts(state: &ApiState, proposed: &ProposedClass) -> Result<(), AppError> {
    let report = find_conflicts(state, proposed).await?;

    if report.has_conflicts() {
        warn!(
            "Blocked schedule for teacher {}: {} conflict(s)",
            proposed.teacher_id,
            report.len()
        );
        return Err(TuitionError::ScheduleConflict(report).into());
    }

    Ok(())
}

fn annotate(class: &Class, slots: Vec<ScheduleSlot>) -> Vec<ScheduleSlot> {
    slots
        .into_iter()
        .map(|slot| slot.for_class(class.id, class.name.clone(), class.academic_level.clone()))
        .collect()
}

fn required(field: &str, value: &str) -> Result<String, TuitionError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TuitionError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn class_not_found(id: Uuid) -> TuitionError {
    TuitionError::NotFound(format!("Class with ID {} not found", id))
}
