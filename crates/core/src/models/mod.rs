pub mod class;
pub mod slot;
pub mod teacher;
