//! Repository for the `user_courses` table.

use sqlx::PgPool;
use x121_core::reminders::COURSE_ROLE_STUDENT;
use x121_core::types::DbId;

use crate::models::user_course::{CreateUserCourse, EnrolledStudent, UserCourse};

/// Provides access to course enrollments.
pub struct UserCourseRepo;

impl UserCourseRepo {
    /// Enroll a user in a course, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUserCourse) -> Result<UserCourse, sqlx::Error> {
        sqlx::query_as::<_, UserCourse>(
            "INSERT INTO user_courses (user_id, course_id, course_role, group_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, user_id, course_id, course_role, group_id",
        )
        .bind(input.user_id)
        .bind(input.course_id)
        .bind(&input.course_role)
        .bind(input.group_id)
        .fetch_one(pool)
        .await
    }

    /// List the students enrolled in a course, ordered by user ID.
    pub async fn list_students(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<EnrolledStudent>, sqlx::Error> {
        sqlx::query_as::<_, EnrolledStudent>(
            "SELECT u.id AS user_id, u.display_name, u.email, \
                    u.email_notification_method, uc.group_id \
             FROM user_courses uc \
             JOIN users u ON u.id = uc.user_id \
             WHERE uc.course_id = $1 AND uc.course_role = $2 \
             ORDER BY u.id",
        )
        .bind(course_id)
        .bind(COURSE_ROLE_STUDENT)
        .fetch_all(pool)
        .await
    }
}
