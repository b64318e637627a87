use async_trait::async_trait;
use mockall::mock;
use tuition_core::models::{class::Class, slot::ScheduleSlot, teacher::Teacher};
use uuid::Uuid;

use crate::store::{ClassChanges, NewClass, TuitionStore};

// Mock store for handler tests
mock! {
    pub TuitionStore {}

    #[async_trait]
    impl TuitionStore for TuitionStore {
        async fn create_teacher(&self, name: String, email: Option<String>) -> eyre::Result<Teacher>;

        async fn get_teacher(&self, id: Uuid) -> eyre::Result<Option<Teacher>>;

        async fn list_teachers(&self) -> eyre::Result<Vec<Teacher>>;

        async fn get_teacher_class_ids(&self, teacher_id: Uuid) -> eyre::Result<Vec<Uuid>>;

        async fn get_teacher_slots(&self, teacher_id: Uuid) -> eyre::Result<Vec<ScheduleSlot>>;

        async fn get_all_slots(&self) -> eyre::Result<Vec<ScheduleSlot>>;

        async fn create_class(&self, class: NewClass, slots: Vec<ScheduleSlot>) -> eyre::Result<Class>;

        async fn get_class(&self, id: Uuid) -> eyre::Result<Option<Class>>;

        async fn list_classes(&self) -> eyre::Result<Vec<Class>>;

        async fn get_class_slots(&self, id: Uuid) -> eyre::Result<Vec<ScheduleSlot>>;

        async fn update_class(
            &self,
            id: Uuid,
            changes: ClassChanges,
            slots: Vec<ScheduleSlot>,
        ) -> eyre::Result<Option<Class>>;

        async fn delete_class(&self, id: Uuid) -> eyre::Result<bool>;

        async fn delete_class_slot(&self, id: Uuid, index: usize) -> eyre::Result<bool>;

        async fn enroll_student(&self, id: Uuid, student_id: String) -> eyre::Result<Option<Class>>;

        async fn unenroll_student(&self, id: Uuid, student_id: String) -> eyre::Result<Option<Class>>;
    }
}
