use crate::models::DbClass;
use chrono::Utc;
use eyre::Result;
use sqlx::postgres::PgExecutor;
use uuid::Uuid;

const CLASS_COLUMNS: &str =
    "id, name, academic_level, teacher_id, student_ids, created_at, updated_at";

pub async fn create_class<'e, E: PgExecutor<'e>>(
    executor: E,
    name: &str,
    academic_level: Option<&str>,
    teacher_id: Uuid,
    student_ids: &[String],
) -> Result<DbClass> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating class: id={}, name={}, teacher_id={}",
        id,
        name,
        teacher_id
    );

    let class = sqlx::query_as::<_, DbClass>(&format!(
        r#"
        INSERT INTO classes (id, name, academic_level, teacher_id, student_ids, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING {CLASS_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(academic_level)
    .bind(teacher_id)
    .bind(student_ids)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(class)
}

pub async fn get_class_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<DbClass>> {
    let class = sqlx::query_as::<_, DbClass>(&format!(
        r#"
        SELECT {CLASS_COLUMNS}
        FROM classes
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(class)
}

pub async fn list_classes<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<DbClass>> {
    let classes = sqlx::query_as::<_, DbClass>(&format!(
        r#"
        SELECT {CLASS_COLUMNS}
        FROM classes
        ORDER BY name ASC
        "#
    ))
    .fetch_all(executor)
    .await?;

    Ok(classes)
}

/// Updates name, level and teacher. Omitted name or level keep their stored
/// value; `Some(None)` for the level sets it to NULL.
pub async fn update_class<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    name: Option<&str>,
    academic_level: Option<Option<&str>>,
    teacher_id: Uuid,
) -> Result<Option<DbClass>> {
    let clear_level = matches!(academic_level, Some(None));
    let class = sqlx::query_as::<_, DbClass>(&format!(
        r#"
        UPDATE classes
        SET name = COALESCE($2, name),
            academic_level = CASE WHEN $6 THEN NULL ELSE COALESCE($3, academic_level) END,
            teacher_id = $4,
            updated_at = $5
        WHERE id = $1
        RETURNING {CLASS_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(academic_level.flatten())
    .bind(teacher_id)
    .bind(Utc::now())
    .bind(clear_level)
    .fetch_optional(executor)
    .await?;

    Ok(class)
}

pub async fn delete_class<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM classes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn add_student<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    student_id: &str,
) -> Result<Option<DbClass>> {
    let class = sqlx::query_as::<_, DbClass>(&format!(
        r#"
        UPDATE classes
        SET student_ids = CASE
                WHEN $2 = ANY(student_ids) THEN student_ids
                ELSE array_append(student_ids, $2)
            END,
            updated_at = $3
        WHERE id = $1
        RETURNING {CLASS_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(student_id)
    .bind(Utc::now())
    .fetch_optional(executor)
    .await?;

    Ok(class)
}

pub async fn remove_student<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    student_id: &str,
) -> Result<Option<DbClass>> {
    let class = sqlx::query_as::<_, DbClass>(&format!(
        r#"
        UPDATE classes
        SET student_ids = array_remove(student_ids, $2),
            updated_at = $3
        WHERE id = $1
        RETURNING {CLASS_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(student_id)
    .bind(Utc::now())
    .fetch_optional(executor)
    .await?;

    Ok(class)
}
