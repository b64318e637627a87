use axum::{http::StatusCode, response::IntoResponse};
use rstest::rstest;
use tuition_api::middleware::error_handling::{AppError, map_error};
use tuition_core::{conflict::ConflictReport, errors::TuitionError};

#[rstest]
#[case::not_found(TuitionError::NotFound("Class not found".into()), StatusCode::NOT_FOUND)]
#[case::validation(TuitionError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case::conflict(
    TuitionError::ScheduleConflict(ConflictReport::default()),
    StatusCode::CONFLICT
)]
#[case::invalid_record(
    TuitionError::InvalidRecord("bad row".into()),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[case::database(
    TuitionError::Database(eyre::eyre!("Database error")),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_codes(#[case] error: TuitionError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_keeps_domain_error() {
    let report = eyre::Report::new(TuitionError::NotFound("Teacher not found".into()));

    let AppError(err) = AppError::from(report);

    assert!(matches!(err, TuitionError::NotFound(_)));
}

#[test]
fn test_plain_eyre_report_is_database_error() {
    let AppError(err) = AppError::from(eyre::eyre!("pool timed out"));

    assert!(matches!(err, TuitionError::Database(_)));
}

#[tokio::test]
async fn test_conflict_body_groups_messages() {
    let report = ConflictReport {
        own_conflicts: vec!["Schedule 1: overlaps with Maths P5 on Monday (10:30-11:30)".into()],
        other_conflicts: vec![
            "Schedule 1: overlaps with Physics S4 at Location C on Monday (10:00-11:00)".into(),
        ],
        internal_conflicts: vec![],
    };

    let response = AppError(TuitionError::ScheduleConflict(report)).into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "Schedule conflict: 2 overlapping slot(s)");
    assert_eq!(body["conflicts"]["Overlap with own classes"].as_array().unwrap().len(), 1);
    assert_eq!(body["conflicts"]["Overlap with other classes"].as_array().unwrap().len(), 1);
    assert!(body["conflicts"].get("Overlap within this schedule").is_none());
}
