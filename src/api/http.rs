use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::LmsApi;
use super::dto::{AuthResponse, ErrorBody};
use crate::config::Config;
use crate::error::AppError;
use crate::models::*;

pub struct HttpLmsApi {
    client: Client,
    base: Url,
}

impl HttpLmsApi {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    pub fn with_client(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    /// `{base}/api/{segments...}` with every segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("{} cannot be a base url", self.base)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response, AppError> {
        debug!("{} {}", method, url);
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ErrorBody::message_from(&body);
            warn!("{} {} failed: {} {}", method, url, status, message);
            return Err(AppError::Api { status, message });
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        let response = self.send::<()>(Method::GET, url, None).await?;
        Self::json(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, AppError> {
        let url = self.endpoint(segments)?;
        let response = self.send(Method::POST, url, Some(body)).await?;
        Self::json(response).await
    }

    async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, AppError> {
        let url = self.endpoint(segments)?;
        let response = self.send(Method::PATCH, url, Some(body)).await?;
        Self::json(response).await
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, AppError> {
        self.get(self.endpoint(segments)?).await
    }
}

#[async_trait]
impl LmsApi for HttpLmsApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, AppError> {
        self.post(&["auth", "login"], credentials).await
    }

    async fn register(&self, data: &RegisterData) -> Result<AuthResponse, AppError> {
        self.post(&["auth", "register"], data).await
    }

    async fn user(&self, id: &str) -> Result<User, AppError> {
        self.fetch(&["users", id]).await
    }

    async fn users_by_role(&self, role: Role) -> Result<Vec<User>, AppError> {
        self.fetch(&["users", "role", role.as_str()]).await
    }

    async fn courses(&self) -> Result<Vec<Course>, AppError> {
        self.fetch(&["courses"]).await
    }

    async fn course(&self, id: &str) -> Result<Course, AppError> {
        self.fetch(&["courses", id]).await
    }

    async fn create_course(&self, course: &NewCourseRequest) -> Result<Course, AppError> {
        self.post(&["courses"], course).await
    }

    async fn courses_by_teacher(&self, teacher_id: &str) -> Result<Vec<Course>, AppError> {
        self.fetch(&["courses", "teacher", teacher_id]).await
    }

    async fn course_students(&self, course_id: &str) -> Result<Vec<User>, AppError> {
        self.fetch(&["courses", course_id, "students"]).await
    }

    async fn student_courses(&self, student_id: &str) -> Result<Vec<Course>, AppError> {
        self.fetch(&["students", student_id, "courses"]).await
    }

    async fn schedules_by_course(&self, course_id: &str) -> Result<Vec<Schedule>, AppError> {
        self.fetch(&["schedules", "course", course_id]).await
    }

    async fn schedules_by_day(&self, day: Weekday) -> Result<Vec<Schedule>, AppError> {
        self.fetch(&["schedules", "day", day.as_str()]).await
    }

    async fn create_schedule(&self, schedule: &NewSchedule) -> Result<Schedule, AppError> {
        self.post(&["schedules"], schedule).await
    }

    async fn mark_attendance(&self, attendance: &NewAttendance) -> Result<Attendance, AppError> {
        self.post(&["attendance"], attendance).await
    }

    async fn attendance_by_student(
        &self,
        student_id: &str,
        course_id: Option<&str>,
    ) -> Result<Vec<Attendance>, AppError> {
        let mut url = self.endpoint(&["attendance", "student", student_id])?;
        if let Some(course_id) = course_id {
            url.query_pairs_mut().append_pair("courseId", course_id);
        }
        self.get(url).await
    }

    async fn attendance_by_course(
        &self,
        course_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<Attendance>, AppError> {
        let mut url = self.endpoint(&["attendance", "course", course_id])?;
        if let Some(date) = date {
            url.query_pairs_mut().append_pair("date", date);
        }
        self.get(url).await
    }

    async fn assignments_by_course(&self, course_id: &str) -> Result<Vec<Assignment>, AppError> {
        self.fetch(&["assignments", "course", course_id]).await
    }

    async fn assignment(&self, id: &str) -> Result<Assignment, AppError> {
        self.fetch(&["assignments", id]).await
    }

    async fn create_assignment(&self, assignment: &NewAssignment) -> Result<Assignment, AppError> {
        self.post(&["assignments"], assignment).await
    }

    async fn submissions_by_assignment(
        &self,
        assignment_id: &str,
    ) -> Result<Vec<Submission>, AppError> {
        self.fetch(&["submissions", "assignment", assignment_id]).await
    }

    async fn submissions_by_student(&self, student_id: &str) -> Result<Vec<Submission>, AppError> {
        self.fetch(&["submissions", "student", student_id]).await
    }

    async fn create_submission(&self, submission: &NewSubmission) -> Result<Submission, AppError> {
        self.post(&["submissions"], submission).await
    }

    async fn grade_submission(
        &self,
        id: &str,
        grade: &GradeSubmissionRequest,
    ) -> Result<Submission, AppError> {
        self.patch(&["submissions", id, "grade"], grade).await
    }

    async fn forums_by_course(&self, course_id: &str) -> Result<Vec<Forum>, AppError> {
        self.fetch(&["forums", "course", course_id]).await
    }

    async fn create_forum(&self, forum: &NewForum) -> Result<Forum, AppError> {
        self.post(&["forums"], forum).await
    }

    async fn forum_posts(&self, forum_id: &str) -> Result<Vec<ForumPost>, AppError> {
        self.fetch(&["forums", forum_id, "posts"]).await
    }

    async fn create_forum_post(&self, post: &NewForumPost) -> Result<ForumPost, AppError> {
        self.post(&["forum-posts"], post).await
    }

    async fn notifications(&self, user_id: &str) -> Result<Vec<Notification>, AppError> {
        self.fetch(&["notifications", user_id]).await
    }

    async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, AppError> {
        self.post(&["notifications"], notification).await
    }

    async fn mark_notification_read(&self, id: &str) -> Result<(), AppError> {
        let url = self.endpoint(&["notifications", id, "read"])?;
        self.send::<()>(Method::PATCH, url, None).await?;
        Ok(())
    }

    async fn materials_by_course(&self, course_id: &str) -> Result<Vec<CourseMaterial>, AppError> {
        self.fetch(&["materials", "course", course_id]).await
    }

    async fn create_material(
        &self,
        material: &NewCourseMaterial,
    ) -> Result<CourseMaterial, AppError> {
        self.post(&["materials"], material).await
    }

    async fn delete_material(&self, id: &str) -> Result<(), AppError> {
        let url = self.endpoint(&["materials", id])?;
        self.send::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn institutions(&self) -> Result<Vec<Institution>, AppError> {
        self.fetch(&["institutions"]).await
    }

    async fn create_institution(
        &self,
        institution: &NewInstitution,
    ) -> Result<Institution, AppError> {
        self.post(&["institutions"], institution).await
    }
}
