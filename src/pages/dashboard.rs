use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::info;

use super::{percent, rounded_mean};
use crate::error::AppError;
use crate::models::*;
use crate::queries;
use crate::state::AppState;

pub const RECENT_REGISTRATIONS: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub courses: Vec<Course>,
    pub total_courses: usize,
    pub attendance_rate: u32,
    pub average_grade: u32,
    pub pending_assignments: usize,
    pub pending_submissions: Vec<Submission>,
}

impl StudentDashboard {
    pub fn build(courses: Vec<Course>, attendance: &[Attendance], submissions: &[Submission]) -> Self {
        let present = attendance
            .iter()
            .filter(|a| a.status == AttendanceStatus::Present)
            .count();
        let average_grade = rounded_mean(
            submissions
                .iter()
                .filter(|s| s.has_status(SubmissionStatus::Graded))
                .map(|s| s.score.unwrap_or(0.0)),
        )
        .unwrap_or(0);
        let pending_submissions: Vec<Submission> = submissions
            .iter()
            .filter(|s| {
                s.has_status(SubmissionStatus::Submitted) || s.has_status(SubmissionStatus::Draft)
            })
            .cloned()
            .collect();

        Self {
            total_courses: courses.len(),
            courses,
            attendance_rate: percent(present, attendance.len()),
            average_grade,
            pending_assignments: pending_submissions.len(),
            pending_submissions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDashboard {
    pub courses: Vec<Course>,
    pub total_courses: usize,
    pub active_courses: usize,
    pub total_students: usize,
    pub pending_reviews: usize,
}

impl TeacherDashboard {
    pub fn build(courses: Vec<Course>, roster_sizes: &[usize], submissions: &[Submission]) -> Self {
        Self {
            total_courses: courses.len(),
            active_courses: courses.iter().filter(|c| c.active()).count(),
            courses,
            total_students: roster_sizes.iter().sum(),
            pending_reviews: submissions
                .iter()
                .filter(|s| s.has_status(SubmissionStatus::Submitted))
                .count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_users: usize,
    pub total_teachers: usize,
    pub total_students: usize,
    pub active_courses: usize,
    pub total_courses: usize,
    pub total_institutions: usize,
    pub recent_registrations: Vec<User>,
}

impl AdminDashboard {
    pub fn build(
        teachers: Vec<User>,
        students: Vec<User>,
        courses: &[Course],
        institutions: &[Institution],
    ) -> Self {
        let total_teachers = teachers.len();
        let total_students = students.len();
        let mut everyone: Vec<User> = teachers.into_iter().chain(students).collect();
        everyone.sort_by_key(|u| std::cmp::Reverse(created_at(u)));
        everyone.truncate(RECENT_REGISTRATIONS);

        Self {
            total_users: total_teachers + total_students,
            total_teachers,
            total_students,
            active_courses: courses.iter().filter(|c| c.active()).count(),
            total_courses: courses.len(),
            total_institutions: institutions.len(),
            recent_registrations: everyone,
        }
    }
}

fn created_at(user: &User) -> Option<DateTime<Utc>> {
    user.created_at
        .as_deref()
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstituteAdminDashboard {
    pub institution: Option<Institution>,
    pub faculty: usize,
    pub students: usize,
    pub courses: Vec<Course>,
    pub total_courses: usize,
    pub active_courses: usize,
}

impl InstituteAdminDashboard {
    /// The administered institution is the first one the server lists.
    pub fn build(
        institutions: Vec<Institution>,
        teachers: &[User],
        students: &[User],
        all_courses: Vec<Course>,
    ) -> Self {
        let institution = institutions.into_iter().next();
        let courses: Vec<Course> = match &institution {
            Some(inst) => all_courses
                .into_iter()
                .filter(|c| c.institution_id.as_deref() == Some(inst.id.as_str()))
                .collect(),
            None => Vec::new(),
        };

        Self {
            institution,
            faculty: teachers.len(),
            students: students.len(),
            total_courses: courses.len(),
            active_courses: courses.iter().filter(|c| c.active()).count(),
            courses,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Dashboard {
    Student(StudentDashboard),
    Teacher(TeacherDashboard),
    Admin(AdminDashboard),
    InstituteAdmin(InstituteAdminDashboard),
}

pub struct DashboardPage {
    state: AppState,
}

impl DashboardPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn load(&self, user: &User) -> Result<Dashboard, AppError> {
        info!("loading {} dashboard for {}", user.role, user.username);
        let dashboard = match user.role {
            Role::Student => Dashboard::Student(self.student(user).await?),
            Role::Teacher => Dashboard::Teacher(self.teacher(user).await?),
            Role::Admin => Dashboard::Admin(self.admin().await?),
            Role::InstituteAdmin => Dashboard::InstituteAdmin(self.institute_admin().await?),
        };
        Ok(dashboard)
    }

    pub async fn student(&self, user: &User) -> Result<StudentDashboard, AppError> {
        let (courses, attendance, submissions) = tokio::try_join!(
            queries::fetch_courses_for(&self.state, user),
            queries::fetch_student_attendance(&self.state, &user.id, None),
            queries::fetch_student_submissions(&self.state, &user.id),
        )?;
        Ok(StudentDashboard::build(courses, &attendance, &submissions))
    }

    pub async fn teacher(&self, user: &User) -> Result<TeacherDashboard, AppError> {
        let courses = queries::fetch_courses_for(&self.state, user).await?;

        let rosters = try_join_all(
            courses
                .iter()
                .map(|c| queries::fetch_course_students(&self.state, &c.id)),
        );
        let submissions = async {
            let assignments = queries::fetch_assignments_for_courses(&self.state, &courses).await?;
            queries::fetch_submissions_for_assignments(&self.state, &assignments).await
        };
        let (rosters, submissions) = tokio::try_join!(rosters, submissions)?;

        let sizes: Vec<usize> = rosters.iter().map(Vec::len).collect();
        Ok(TeacherDashboard::build(courses, &sizes, &submissions))
    }

    pub async fn admin(&self) -> Result<AdminDashboard, AppError> {
        let (teachers, students, courses, institutions) = tokio::try_join!(
            queries::fetch_users_by_role(&self.state, Role::Teacher),
            queries::fetch_users_by_role(&self.state, Role::Student),
            queries::fetch_all_courses(&self.state),
            queries::fetch_institutions(&self.state),
        )?;
        Ok(AdminDashboard::build(teachers, students, &courses, &institutions))
    }

    pub async fn institute_admin(&self) -> Result<InstituteAdminDashboard, AppError> {
        let (institutions, teachers, students, courses) = tokio::try_join!(
            queries::fetch_institutions(&self.state),
            queries::fetch_users_by_role(&self.state, Role::Teacher),
            queries::fetch_users_by_role(&self.state, Role::Student),
            queries::fetch_all_courses(&self.state),
        )?;
        Ok(InstituteAdminDashboard::build(institutions, &teachers, &students, courses))
    }
}
