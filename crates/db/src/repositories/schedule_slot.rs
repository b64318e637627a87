use crate::models::{DbScheduleSlot, DbSlotWithClass};
use eyre::Result;
use sqlx::postgres::PgExecutor;
use tuition_core::models::slot::ScheduleSlot;
use uuid::Uuid;

const JOINED_SLOT_SELECT: &str = r#"
    SELECT s.class_id, c.name AS class_name, c.academic_level, s.position,
           s.day, s.start_time, s.end_time, s.location
    FROM schedule_slots s
    JOIN classes c ON c.id = s.class_id
"#;

pub async fn create_slot<'e, E: PgExecutor<'e>>(
    executor: E,
    class_id: Uuid,
    position: i32,
    slot: &ScheduleSlot,
) -> Result<DbScheduleSlot> {
    let row = sqlx::query_as::<_, DbScheduleSlot>(
        r#"
        INSERT INTO schedule_slots (class_id, position, day, start_time, end_time, location)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING class_id, position, day, start_time, end_time, location
        "#,
    )
    .bind(class_id)
    .bind(position)
    .bind(slot.day.as_str())
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(&slot.location)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_slots_by_class_id<'e, E: PgExecutor<'e>>(
    executor: E,
    class_id: Uuid,
) -> Result<Vec<DbSlotWithClass>> {
    let rows = sqlx::query_as::<_, DbSlotWithClass>(&format!(
        "{JOINED_SLOT_SELECT} WHERE s.class_id = $1 ORDER BY s.position ASC"
    ))
    .bind(class_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Every slot of every class taught by the teacher.
pub async fn get_slots_by_teacher_id<'e, E: PgExecutor<'e>>(
    executor: E,
    teacher_id: Uuid,
) -> Result<Vec<DbSlotWithClass>> {
    let rows = sqlx::query_as::<_, DbSlotWithClass>(&format!(
        "{JOINED_SLOT_SELECT} WHERE c.teacher_id = $1 ORDER BY c.name ASC, s.position ASC"
    ))
    .bind(teacher_id)
    .fetch_all(executor)
    .await?;

    tracing::debug!("Loaded {} slots for teacher {}", rows.len(), teacher_id);
    Ok(rows)
}

pub async fn get_all_slots<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<DbSlotWithClass>> {
    let rows = sqlx::query_as::<_, DbSlotWithClass>(&format!(
        "{JOINED_SLOT_SELECT} ORDER BY c.name ASC, s.position ASC"
    ))
    .fetch_all(executor)
    .await?;

    tracing::debug!("Loaded {} slots across all classes", rows.len());
    Ok(rows)
}

pub async fn delete_slots_by_class_id<'e, E: PgExecutor<'e>>(
    executor: E,
    class_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM schedule_slots
        WHERE class_id = $1
        "#,
    )
    .bind(class_id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete_slot<'e, E: PgExecutor<'e>>(
    executor: E,
    class_id: Uuid,
    position: i32,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM schedule_slots
        WHERE class_id = $1 AND position = $2
        "#,
    )
    .bind(class_id)
    .bind(position)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Closes the gap left by a deleted slot so positions stay contiguous.
pub async fn shift_slots_after<'e, E: PgExecutor<'e>>(
    executor: E,
    class_id: Uuid,
    position: i32,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE schedule_slots
        SET position = position - 1
        WHERE class_id = $1 AND position > $2
        "#,
    )
    .bind(class_id)
    .bind(position)
    .execute(executor)
    .await?;

    Ok(())
}
