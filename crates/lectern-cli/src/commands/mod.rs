pub mod config;
pub mod content;
pub mod course;
pub mod data;
pub mod enroll;
pub mod segment;
