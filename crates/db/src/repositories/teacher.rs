use crate::models::DbTeacher;
use chrono::Utc;
use eyre::Result;
use sqlx::postgres::PgExecutor;
use uuid::Uuid;

pub async fn create_teacher<'e, E: PgExecutor<'e>>(
    executor: E,
    name: &str,
    email: Option<&str>,
) -> Result<DbTeacher> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating teacher: id={}, name={}", id, name);

    let teacher = sqlx::query_as::<_, DbTeacher>(
        r#"
        INSERT INTO teachers (id, name, email, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(teacher)
}

pub async fn get_teacher_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<DbTeacher>> {
    let teacher = sqlx::query_as::<_, DbTeacher>(
        r#"
        SELECT id, name, email, created_at
        FROM teachers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    if teacher.is_none() {
        tracing::debug!("Teacher not found: id={}", id);
    }

    Ok(teacher)
}

pub async fn list_teachers<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<DbTeacher>> {
    let teachers = sqlx::query_as::<_, DbTeacher>(
        r#"
        SELECT id, name, email, created_at
        FROM teachers
        ORDER BY name ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(teachers)
}

/// Ids of every class the teacher is assigned to.
pub async fn get_class_ids_by_teacher_id<'e, E: PgExecutor<'e>>(
    executor: E,
    teacher_id: Uuid,
) -> Result<Vec<Uuid>> {
    let class_ids = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM classes
        WHERE teacher_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(teacher_id)
    .fetch_all(executor)
    .await?;

    Ok(class_ids)
}
