pub mod class;
pub mod teacher;
