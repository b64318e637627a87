use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/classes",
            post(handlers::class::create_class).get(handlers::class::list_classes),
        )
        .route("/api/classes/check", post(handlers::class::check_conflicts))
        .route(
            "/api/classes/:id",
            get(handlers::class::get_class)
                .put(handlers::class::update_class)
                .delete(handlers::class::delete_class),
        )
        .route(
            "/api/classes/:id/slots/:index",
            delete(handlers::class::delete_class_slot),
        )
        .route(
            "/api/classes/:id/students",
            post(handlers::class::enroll_student),
        )
        .route(
            "/api/classes/:id/students/:student_id",
            delete(handlers::class::unenroll_student),
        )
}
