//! # Tuition Store
//!
//! The `TuitionStore` trait is the boundary between the API and Postgres.
//! Every method hands back validated core types; rows that fail validation
//! surface as `TuitionError::InvalidRecord` wrapped in the returned report.
//!
//! Writes that touch a class and its slots run inside one transaction, so a
//! failure part way through leaves nothing behind.

use async_trait::async_trait;
use eyre::Result;
use tracing::error;
use tuition_core::models::{class::Class, slot::ScheduleSlot, teacher::Teacher};
use uuid::Uuid;

use crate::{
    DbPool,
    models::DbSlotWithClass,
    repositories::{class, schedule_slot, teacher},
};

/// A class about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClass {
    pub name: String,
    pub academic_level: Option<String>,
    pub teacher_id: Uuid,
    pub student_ids: Vec<String>,
}

/// Changes applied to an existing class alongside its replacement schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassChanges {
    pub name: Option<String>,
    /// `None` keeps the stored level, `Some(None)` clears it.
    pub academic_level: Option<Option<String>>,
    pub teacher_id: Uuid,
}

#[async_trait]
pub trait TuitionStore: Send + Sync {
    async fn create_teacher(&self, name: String, email: Option<String>) -> Result<Teacher>;

    async fn get_teacher(&self, id: Uuid) -> Result<Option<Teacher>>;

    async fn list_teachers(&self) -> Result<Vec<Teacher>>;

    async fn get_teacher_class_ids(&self, teacher_id: Uuid) -> Result<Vec<Uuid>>;

    /// Slots of every class the teacher teaches, annotated with their class.
    async fn get_teacher_slots(&self, teacher_id: Uuid) -> Result<Vec<ScheduleSlot>>;

    /// Slots of every class, annotated with their class.
    async fn get_all_slots(&self) -> Result<Vec<ScheduleSlot>>;

    /// Creates the class and its slots atomically.
    async fn create_class(&self, class: NewClass, slots: Vec<ScheduleSlot>) -> Result<Class>;

    async fn get_class(&self, id: Uuid) -> Result<Option<Class>>;

    async fn list_classes(&self) -> Result<Vec<Class>>;

    async fn get_class_slots(&self, id: Uuid) -> Result<Vec<ScheduleSlot>>;

    /// Updates the class and replaces its whole schedule atomically.
    /// Returns `None` if the class does not exist.
    async fn update_class(
        &self,
        id: Uuid,
        changes: ClassChanges,
        slots: Vec<ScheduleSlot>,
    ) -> Result<Option<Class>>;

    async fn delete_class(&self, id: Uuid) -> Result<bool>;

    /// Removes the slot at `index`; later slots move down one place.
    async fn delete_class_slot(&self, id: Uuid, index: usize) -> Result<bool>;

    async fn enroll_student(&self, id: Uuid, student_id: String) -> Result<Option<Class>>;

    async fn unenroll_student(&self, id: Uuid, student_id: String) -> Result<Option<Class>>;
}

/// `TuitionStore` backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgTuitionStore {
    pool: DbPool,
}

impl PgTuitionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn write_class(&self, class: NewClass, slots: &[ScheduleSlot]) -> Result<Class> {
        let mut tx = self.pool.begin().await?;

        let row = class::create_class(
            &mut *tx,
            &class.name,
            class.academic_level.as_deref(),
            class.teacher_id,
            &class.student_ids,
        )
        .await?;

        for (position, slot) in slots.iter().enumerate() {
            schedule_slot::create_slot(&mut *tx, row.id, i32::try_from(position)?, slot).await?;
        }

        tx.commit().await?;
        Ok(row.into())
    }

    async fn rewrite_class(
        &self,
        id: Uuid,
        changes: ClassChanges,
        slots: &[ScheduleSlot],
    ) -> Result<Option<Class>> {
        let mut tx = self.pool.begin().await?;

        let Some(row) = class::update_class(
            &mut *tx,
            id,
            changes.name.as_deref(),
            changes.academic_level.as_ref().map(Option::as_deref),
            changes.teacher_id,
        )
        .await?
        else {
            return Ok(None);
        };

        schedule_slot::delete_slots_by_class_id(&mut *tx, id).await?;
        for (position, slot) in slots.iter().enumerate() {
            schedule_slot::create_slot(&mut *tx, id, i32::try_from(position)?, slot).await?;
        }

        tx.commit().await?;
        Ok(Some(row.into()))
    }
}

fn into_slots(rows: Vec<DbSlotWithClass>) -> Result<Vec<ScheduleSlot>> {
    let slots = rows
        .into_iter()
        .map(ScheduleSlot::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(slots)
}

#[async_trait]
impl TuitionStore for PgTuitionStore {
    async fn create_teacher(&self, name: String, email: Option<String>) -> Result<Teacher> {
        let row = teacher::create_teacher(&self.pool, &name, email.as_deref()).await?;
        Ok(row.into())
    }

    async fn get_teacher(&self, id: Uuid) -> Result<Option<Teacher>> {
        let row = teacher::get_teacher_by_id(&self.pool, id).await?;
        Ok(row.map(Into::into))
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let rows = teacher::list_teachers(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_teacher_class_ids(&self, teacher_id: Uuid) -> Result<Vec<Uuid>> {
        teacher::get_class_ids_by_teacher_id(&self.pool, teacher_id).await
    }

    async fn get_teacher_slots(&self, teacher_id: Uuid) -> Result<Vec<ScheduleSlot>> {
        into_slots(schedule_slot::get_slots_by_teacher_id(&self.pool, teacher_id).await?)
    }

    async fn get_all_slots(&self) -> Result<Vec<ScheduleSlot>> {
        into_slots(schedule_slot::get_all_slots(&self.pool).await?)
    }

    async fn create_class(&self, class: NewClass, slots: Vec<ScheduleSlot>) -> Result<Class> {
        let name = class.name.clone();
        self.write_class(class, &slots).await.inspect_err(|err| {
            error!("Creating class {} failed, nothing was saved: {:?}", name, err)
        })
    }

    async fn get_class(&self, id: Uuid) -> Result<Option<Class>> {
        let row = class::get_class_by_id(&self.pool, id).await?;
        Ok(row.map(Into::into))
    }

    async fn list_classes(&self) -> Result<Vec<Class>> {
        let rows = class::list_classes(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_class_slots(&self, id: Uuid) -> Result<Vec<ScheduleSlot>> {
        into_slots(schedule_slot::get_slots_by_class_id(&self.pool, id).await?)
    }

    async fn update_class(
        &self,
        id: Uuid,
        changes: ClassChanges,
        slots: Vec<ScheduleSlot>,
    ) -> Result<Option<Class>> {
        self.rewrite_class(id, changes, &slots)
            .await
            .inspect_err(|err| error!("Updating class {} failed, rolled back: {:?}", id, err))
    }

    async fn delete_class(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        schedule_slot::delete_slots_by_class_id(&mut *tx, id).await?;
        let deleted = class::delete_class(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(deleted)
    }

    async fn delete_class_slot(&self, id: Uuid, index: usize) -> Result<bool> {
        // No class holds more than i32::MAX slots.
        let Ok(position) = i32::try_from(index) else {
            return Ok(false);
        };

        let mut tx = self.pool.begin().await?;
        let deleted = schedule_slot::delete_slot(&mut *tx, id, position).await?;
        if deleted {
            schedule_slot::shift_slots_after(&mut *tx, id, position).await?;
        }
        tx.commit().await?;

        Ok(deleted)
    }

    async fn enroll_student(&self, id: Uuid, student_id: String) -> Result<Option<Class>> {
        let row = class::add_student(&self.pool, id, &student_id).await?;
        Ok(row.map(Into::into))
    }

    async fn unenroll_student(&self, id: Uuid, student_id: String) -> Result<Option<Class>> {
        let row = class::remove_student(&self.pool, id, &student_id).await?;
        Ok(row.map(Into::into))
    }
}
