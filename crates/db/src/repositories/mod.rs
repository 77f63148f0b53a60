//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod answer_repo;
pub mod assignment_notification_repo;
pub mod assignment_repo;
pub mod comparison_repo;
pub mod course_repo;
pub mod group_repo;
pub mod user_course_repo;
pub mod user_repo;

pub use answer_repo::AnswerRepo;
pub use assignment_notification_repo::AssignmentNotificationRepo;
pub use assignment_repo::AssignmentRepo;
pub use comparison_repo::ComparisonRepo;
pub use course_repo::CourseRepo;
pub use group_repo::GroupRepo;
pub use user_course_repo::UserCourseRepo;
pub use user_repo::UserRepo;
