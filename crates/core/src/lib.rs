//! # Tuition Core
//!
//! Domain types shared by the store and the API: schedule slots, classes,
//! teachers, the schedule conflict checker and the weekly timetable view.
//! Nothing in this crate performs I/O.

pub mod conflict;
pub mod errors;
pub mod models;
pub mod timetable;
