use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conflict::ConflictReport;

use super::slot::{ScheduleSlot, SlotRequest};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    pub academic_level: Option<String>,
    pub teacher_id: Uuid,
    pub student_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The schedule a class is about to be saved with.
///
/// `class_id` is `None` while the class does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedClass {
    pub class_id: Option<Uuid>,
    pub teacher_id: Uuid,
    pub slots: Vec<ScheduleSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub academic_level: Option<String>,
    pub teacher_id: Uuid,
    #[serde(default)]
    pub slots: Vec<SlotRequest>,
    #[serde(default)]
    pub student_ids: Vec<String>,
}

/// Full replacement of a class's schedule. Name and level are kept when omitted;
/// a blank level clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub academic_level: Option<String>,
    pub teacher_id: Uuid,
    pub slots: Vec<SlotRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConflictsRequest {
    pub class_id: Option<Uuid>,
    pub teacher_id: Uuid,
    pub slots: Vec<SlotRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConflictsResponse {
    pub has_conflicts: bool,
    pub report: ConflictReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassResponse {
    pub id: Uuid,
    pub name: String,
    pub academic_level: Option<String>,
    pub teacher_id: Uuid,
    pub student_ids: Vec<String>,
    pub slots: Vec<ScheduleSlot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClassResponse {
    pub fn new(class: Class, slots: Vec<ScheduleSlot>) -> Self {
        Self {
            id: class.id,
            name: class.name,
            academic_level: class.academic_level,
            teacher_id: class.teacher_id,
            student_ids: class.student_ids,
            slots,
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSummary {
    pub id: Uuid,
    pub name: String,
    pub academic_level: Option<String>,
    pub teacher_id: Uuid,
    pub student_count: usize,
}

impl From<Class> for ClassSummary {
    fn from(class: Class) -> Self {
        Self {
            id: class.id,
            name: class.name,
            academic_level: class.academic_level,
            teacher_id: class.teacher_id,
            student_count: class.student_ids.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollStudentRequest {
    pub student_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
