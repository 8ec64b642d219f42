pub mod dto;
pub mod http;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::*;

pub use dto::AuthResponse;
pub use http::HttpLmsApi;

#[async_trait]
pub trait LmsApi: Send + Sync {
    // auth
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, AppError>;
    async fn register(&self, data: &RegisterData) -> Result<AuthResponse, AppError>;

    // users
    async fn user(&self, id: &str) -> Result<User, AppError>;
    async fn users_by_role(&self, role: Role) -> Result<Vec<User>, AppError>;

    // courses
    async fn courses(&self) -> Result<Vec<Course>, AppError>;
    async fn course(&self, id: &str) -> Result<Course, AppError>;
    async fn create_course(&self, course: &NewCourseRequest) -> Result<Course, AppError>;
    async fn courses_by_teacher(&self, teacher_id: &str) -> Result<Vec<Course>, AppError>;
    async fn course_students(&self, course_id: &str) -> Result<Vec<User>, AppError>;
    async fn student_courses(&self, student_id: &str) -> Result<Vec<Course>, AppError>;

    // schedules
    async fn schedules_by_course(&self, course_id: &str) -> Result<Vec<Schedule>, AppError>;
    async fn schedules_by_day(&self, day: Weekday) -> Result<Vec<Schedule>, AppError>;
    async fn create_schedule(&self, schedule: &NewSchedule) -> Result<Schedule, AppError>;

    // attendance
    async fn mark_attendance(&self, attendance: &NewAttendance) -> Result<Attendance, AppError>;
    async fn attendance_by_student(
        &self,
        student_id: &str,
        course_id: Option<&str>,
    ) -> Result<Vec<Attendance>, AppError>;
    async fn attendance_by_course(
        &self,
        course_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<Attendance>, AppError>;

    // assignments and submissions
    async fn assignments_by_course(&self, course_id: &str) -> Result<Vec<Assignment>, AppError>;
    async fn assignment(&self, id: &str) -> Result<Assignment, AppError>;
    async fn create_assignment(&self, assignment: &NewAssignment) -> Result<Assignment, AppError>;
    async fn submissions_by_assignment(
        &self,
        assignment_id: &str,
    ) -> Result<Vec<Submission>, AppError>;
    async fn submissions_by_student(&self, student_id: &str) -> Result<Vec<Submission>, AppError>;
    async fn create_submission(&self, submission: &NewSubmission) -> Result<Submission, AppError>;
    async fn grade_submission(
        &self,
        id: &str,
        grade: &GradeSubmissionRequest,
    ) -> Result<Submission, AppError>;

    // forums
    async fn forums_by_course(&self, course_id: &str) -> Result<Vec<Forum>, AppError>;
    async fn create_forum(&self, forum: &NewForum) -> Result<Forum, AppError>;
    async fn forum_posts(&self, forum_id: &str) -> Result<Vec<ForumPost>, AppError>;
    async fn create_forum_post(&self, post: &NewForumPost) -> Result<ForumPost, AppError>;

    // notifications
    async fn notifications(&self, user_id: &str) -> Result<Vec<Notification>, AppError>;
    async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, AppError>;
    async fn mark_notification_read(&self, id: &str) -> Result<(), AppError>;

    // course materials
    async fn materials_by_course(&self, course_id: &str) -> Result<Vec<CourseMaterial>, AppError>;
    async fn create_material(
        &self,
        material: &NewCourseMaterial,
    ) -> Result<CourseMaterial, AppError>;
    async fn delete_material(&self, id: &str) -> Result<(), AppError>;

    // institutions
    async fn institutions(&self) -> Result<Vec<Institution>, AppError>;
    async fn create_institution(
        &self,
        institution: &NewInstitution,
    ) -> Result<Institution, AppError>;
}
