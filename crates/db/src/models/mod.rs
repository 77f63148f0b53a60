//! Row models and create DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row and, where rows are inserted through this crate, a
//! `Deserialize` create DTO.

pub mod answer;
pub mod assignment;
pub mod assignment_notification;
pub mod comparison;
pub mod course;
pub mod group;
pub mod user;
pub mod user_course;
