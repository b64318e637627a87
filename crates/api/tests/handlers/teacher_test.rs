use axum::http::StatusCode;
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tuition_core::models::{
    slot::DayOfWeek,
    teacher::{TeacherResponse, TimetableResponse},
};
use uuid::Uuid;

use crate::test_utils::{TestContext, stored_slot, teacher};

#[tokio::test]
async fn test_create_teacher() {
    let mut ctx = TestContext::new();
    let teacher_id = Uuid::new_v4();

    ctx.store
        .expect_create_teacher()
        .withf(|name, email| name == "Ms Tan" && email.is_none())
        .times(1)
        .returning(move |name, email| {
            let mut created = teacher(teacher_id);
            created.name = name;
            created.email = email;
            Ok(created)
        });

    let response = ctx
        .server()
        .post("/api/teachers")
        .json(&json!({ "name": " Ms Tan ", "email": "" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: TeacherResponse = response.json();
    assert_eq!(body.id, teacher_id);
    assert!(body.class_ids.is_empty());
}

#[tokio::test]
async fn test_create_teacher_requires_name() {
    let ctx = TestContext::new();

    let response = ctx
        .server()
        .post("/api/teachers")
        .json(&json!({ "name": "  " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_teacher_lists_taught_classes() {
    let mut ctx = TestContext::new();
    let teacher_id = Uuid::new_v4();
    let class_ids = vec![Uuid::new_v4(), Uuid::new_v4()];
    let expected = class_ids.clone();

    ctx.store
        .expect_get_teacher()
        .returning(move |id| Ok(Some(teacher(id))));
    ctx.store
        .expect_get_teacher_class_ids()
        .with(predicate::eq(teacher_id))
        .returning(move |_| Ok(class_ids.clone()));

    let response = ctx
        .server()
        .get(&format!("/api/teachers/{}", teacher_id))
        .await;

    response.assert_status_ok();
    let body: TeacherResponse = response.json();
    assert_eq!(body.class_ids, expected);
}

#[tokio::test]
async fn test_get_missing_teacher() {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_teacher().returning(|_| Ok(None));

    let response = ctx
        .server()
        .get(&format!("/api/teachers/{}/timetable", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Resource not found"));
}

#[tokio::test]
async fn test_list_teachers() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_list_teachers()
        .returning(|| Ok(vec![teacher(Uuid::new_v4()), teacher(Uuid::new_v4())]));

    let response = ctx.server().get("/api/teachers").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_teacher_timetable_is_ordered() {
    let mut ctx = TestContext::new();
    let teacher_id = Uuid::new_v4();
    let maths = Uuid::new_v4();
    let science = Uuid::new_v4();

    ctx.store
        .expect_get_teacher()
        .returning(move |id| Ok(Some(teacher(id))));
    ctx.store.expect_get_teacher_slots().returning(move |_| {
        Ok(vec![
            stored_slot(maths, "Maths P5", DayOfWeek::Thursday, "16:00", "17:00", "Room 1"),
            stored_slot(science, "Science P5", DayOfWeek::Monday, "14:00", "15:00", "Lab"),
            stored_slot(maths, "Maths P5", DayOfWeek::Monday, "09:00", "10:00", "Room 1"),
        ])
    });

    let response = ctx
        .server()
        .get(&format!("/api/teachers/{}/timetable", teacher_id))
        .await;

    response.assert_status_ok();
    let body: TimetableResponse = response.json();
    assert_eq!(body.teacher_id, teacher_id);
    let days: Vec<DayOfWeek> = body.days.iter().map(|day| day.day).collect();
    assert_eq!(days, vec![DayOfWeek::Monday, DayOfWeek::Thursday]);
    let monday: Vec<&str> = body.days[0]
        .slots
        .iter()
        .filter_map(|slot| slot.class_name.as_deref())
        .collect();
    assert_eq!(monday, vec!["Maths P5", "Science P5"]);
}
