use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tuition_core::{
    errors::TuitionError,
    models::{
        class::Class,
        slot::{DayOfWeek, ScheduleSlot},
        teacher::Teacher,
    },
};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTeacher {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClass {
    pub id: Uuid,
    pub name: String,
    pub academic_level: Option<String>,
    pub teacher_id: Uuid,
    pub student_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleSlot {
    pub class_id: Uuid,
    pub position: i32,
    pub day: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
}

/// Slot row joined with the name and level of its class.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotWithClass {
    pub class_id: Uuid,
    pub class_name: String,
    pub academic_level: Option<String>,
    pub position: i32,
    pub day: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
}

impl From<DbTeacher> for Teacher {
    fn from(row: DbTeacher) -> Self {
        Teacher {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

impl From<DbClass> for Class {
    fn from(row: DbClass) -> Self {
        Class {
            id: row.id,
            name: row.name,
            academic_level: row.academic_level,
            teacher_id: row.teacher_id,
            student_ids: row.student_ids,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<DbScheduleSlot> for ScheduleSlot {
    type Error = TuitionError;

    fn try_from(row: DbScheduleSlot) -> Result<Self, Self::Error> {
        validated_slot(
            row.class_id,
            row.position,
            &row.day,
            row.start_time,
            row.end_time,
            row.location,
        )
        .map(|slot| ScheduleSlot {
            class_id: Some(row.class_id),
            ..slot
        })
    }
}

impl TryFrom<DbSlotWithClass> for ScheduleSlot {
    type Error = TuitionError;

    fn try_from(row: DbSlotWithClass) -> Result<Self, Self::Error> {
        let slot = validated_slot(
            row.class_id,
            row.position,
            &row.day,
            row.start_time,
            row.end_time,
            row.location,
        )?;

        Ok(slot.for_class(row.class_id, row.class_name, row.academic_level))
    }
}

fn validated_slot(
    class_id: Uuid,
    position: i32,
    day: &str,
    start_time: NaiveTime,
    end_time: NaiveTime,
    location: String,
) -> Result<ScheduleSlot, TuitionError> {
    let invalid = |reason: String| {
        TuitionError::InvalidRecord(format!(
            "slot {} of class {}: {}",
            position, class_id, reason
        ))
    };

    let day = day
        .parse::<DayOfWeek>()
        .map_err(|_| invalid(format!("unknown day {:?}", day)))?;
    ScheduleSlot::new(day, start_time, end_time, location).map_err(|err| invalid(err.to_string()))
}
