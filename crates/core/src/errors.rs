use thiserror::Error;

use crate::conflict::ConflictReport;

#[derive(Error, Debug)]
pub enum TuitionError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Schedule conflict: {} overlapping slot(s)", .0.len())]
    ScheduleConflict(ConflictReport),

    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type TuitionResult<T> = Result<T, TuitionError>;
