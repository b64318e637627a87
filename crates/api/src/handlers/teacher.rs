use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tuition_core::{
    errors::TuitionError,
    models::teacher::{CreateTeacherRequest, Teacher, TeacherResponse, TimetableResponse},
    timetable::weekly_timetable,
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_teacher(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<TeacherResponse>), AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError(TuitionError::Validation(
            "Teacher name is required".to_string(),
        )));
    }
    let email = payload
        .email
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty());

    let teacher = state.store.create_teacher(name.to_string(), email).await?;

    Ok((
        StatusCode::CREATED,
        Json(TeacherResponse::new(teacher, Vec::new())),
    ))
}

#[axum::debug_handler]
pub async fn list_teachers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let teachers = state.store.list_teachers().await?;

    Ok(Json(teachers))
}

#[axum::debug_handler]
pub async fn get_teacher(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeacherResponse>, AppError> {
    let teacher = find_teacher(&state, id).await?;
    let class_ids = state.store.get_teacher_class_ids(id).await?;

    Ok(Json(TeacherResponse::new(teacher, class_ids)))
}

/// The teacher's week, Monday first, each day ordered by start time.
#[axum::debug_handler]
pub async fn get_teacher_timetable(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TimetableResponse>, AppError> {
    find_teacher(&state, id).await?;
    let slots = state.store.get_teacher_slots(id).await?;

    Ok(Json(TimetableResponse {
        teacher_id: id,
        days: weekly_timetable(slots),
    }))
}

async fn find_teacher(state: &ApiState, id: Uuid) -> Result<Teacher, AppError> {
    let teacher = state
        .store
        .get_teacher(id)
        .await?
        .ok_or_else(|| TuitionError::NotFound(format!("Teacher with ID {} not found", id)))?;

    Ok(teacher)
}
