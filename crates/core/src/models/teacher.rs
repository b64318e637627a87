use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timetable::TimetableDay;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeacherRequest {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherResponse {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub class_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl TeacherResponse {
    pub fn new(teacher: Teacher, class_ids: Vec<Uuid>) -> Self {
        Self {
            id: teacher.id,
            name: teacher.name,
            email: teacher.email,
            class_ids,
            created_at: teacher.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableResponse {
    pub teacher_id: Uuid,
    pub days: Vec<TimetableDay>,
}
