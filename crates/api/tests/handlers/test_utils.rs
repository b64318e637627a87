use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveTime, Utc};
use serde_json::{Value, json};
use tuition_api::{ApiState, build_router};
use tuition_core::{
    conflict::ConflictChecker,
    models::{
        class::Class,
        slot::{DayOfWeek, ScheduleSlot},
        teacher::Teacher,
    },
};
use tuition_db::mock::MockTuitionStore;
use uuid::Uuid;

pub struct TestContext {
    pub store: MockTuitionStore,
    pub checker: ConflictChecker,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            store: MockTuitionStore::new(),
            checker: ConflictChecker::default(),
        }
    }

    /// Serves the real router over the mock store.
    pub fn server(self) -> TestServer {
        let state = Arc::new(ApiState::new(Arc::new(self.store), self.checker));
        TestServer::new(build_router(state)).expect("Failed to start test server")
    }

    /// Teacher lookup plus the two slot reads every save performs.
    pub fn expect_conflict_inputs(
        &mut self,
        teacher_id: Uuid,
        teacher_slots: Vec<ScheduleSlot>,
        all_slots: Vec<ScheduleSlot>,
    ) {
        let found = teacher(teacher_id);
        self.store
            .expect_get_teacher()
            .withf(move |id| *id == teacher_id)
            .returning(move |_| Ok(Some(found.clone())));
        self.store
            .expect_get_teacher_slots()
            .withf(move |id| *id == teacher_id)
            .returning(move |_| Ok(teacher_slots.clone()));
        self.store
            .expect_get_all_slots()
            .returning(move || Ok(all_slots.clone()));
    }
}

pub fn teacher(id: Uuid) -> Teacher {
    Teacher {
        id,
        name: "Ms Tan".to_string(),
        email: Some("tan@example.com".to_string()),
        created_at: Utc::now(),
    }
}

pub fn class(id: Uuid, teacher_id: Uuid, name: &str) -> Class {
    let now = Utc::now();
    Class {
        id,
        name: name.to_string(),
        academic_level: Some("Primary 5".to_string()),
        teacher_id,
        student_ids: vec![],
        created_at: now,
        updated_at: now,
    }
}

pub fn stored_slot(
    class_id: Uuid,
    class_name: &str,
    day: DayOfWeek,
    start: &str,
    end: &str,
    location: &str,
) -> ScheduleSlot {
    ScheduleSlot::new(
        day,
        NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        location,
    )
    .unwrap()
    .for_class(class_id, class_name, None)
}

pub fn slot_json(day: &str, start: &str, end: &str, location: &str) -> Value {
    json!({
        "day": day,
        "start_time": start,
        "end_time": end,
        "location": location,
    })
}
