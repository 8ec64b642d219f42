use std::collections::HashMap;

use chrono::NaiveDate;
use futures::future::try_join_all;
use serde::Serialize;
use tracing::info;

use crate::access;
use crate::error::AppError;
use crate::models::*;
use crate::queries::{self, keys};
use crate::state::AppState;

const NO_ACCESS: &str = "You don't have permission to manage attendance.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub student: User,
    pub status: AttendanceStatus,
    pub recorded: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceStats {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
}

impl AttendanceStats {
    pub fn from_statuses(statuses: impl IntoIterator<Item = AttendanceStatus>) -> Self {
        statuses.into_iter().fold(Self::default(), |mut stats, status| {
            stats.total += 1;
            match status {
                AttendanceStatus::Present => stats.present += 1,
                AttendanceStatus::Absent => stats.absent += 1,
                AttendanceStatus::Late => stats.late += 1,
                AttendanceStatus::Excused => stats.excused += 1,
            }
            stats
        })
    }

    pub fn rate(&self) -> u32 {
        super::percent(self.present, self.total)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRoster {
    pub course_id: String,
    pub date: String,
    pub entries: Vec<RosterEntry>,
    pub stats: AttendanceStats,
}

impl AttendanceRoster {
    /// Saved record first, then the local draft, then present.
    pub fn build(
        course_id: &str,
        date: &str,
        students: Vec<User>,
        records: &[Attendance],
        drafts: &HashMap<String, AttendanceStatus>,
    ) -> Self {
        let entries: Vec<RosterEntry> = students
            .into_iter()
            .map(|student| {
                let saved = records
                    .iter()
                    .find(|a| a.student_id == student.id && a.day() == date)
                    .map(|a| a.status);
                let status = saved
                    .or_else(|| drafts.get(&student.id).copied())
                    .unwrap_or_default();
                RosterEntry {
                    recorded: saved.is_some(),
                    status,
                    student,
                }
            })
            .collect();
        let stats = AttendanceStats::from_statuses(entries.iter().map(|e| e.status));

        Self {
            course_id: course_id.to_string(),
            date: date.to_string(),
            entries,
            stats,
        }
    }
}

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date {}, expected YYYY-MM-DD", date)))
}

pub struct AttendancePage {
    state: AppState,
}

impl AttendancePage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn ensure_access(user: &User) -> Result<(), AppError> {
        access::ensure(user, |p| p.can_manage_attendance, NO_ACCESS)
    }

    pub async fn courses(&self, user: &User) -> Result<Vec<Course>, AppError> {
        Self::ensure_access(user)?;
        queries::fetch_courses_for(&self.state, user).await
    }

    pub async fn roster(
        &self,
        user: &User,
        course_id: &str,
        date: &str,
        drafts: &HashMap<String, AttendanceStatus>,
    ) -> Result<AttendanceRoster, AppError> {
        Self::ensure_access(user)?;
        parse_date(date)?;
        let (students, records) = tokio::try_join!(
            queries::fetch_course_students(&self.state, course_id),
            queries::fetch_course_attendance(&self.state, course_id, Some(date)),
        )?;
        Ok(AttendanceRoster::build(course_id, date, students, &records, drafts))
    }

    pub async fn mark(
        &self,
        user: &User,
        course_id: &str,
        date: &str,
        student_id: &str,
        status: AttendanceStatus,
    ) -> Result<Attendance, AppError> {
        Self::ensure_access(user)?;
        let day = parse_date(date)?;
        let record = NewAttendance {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            // Midnight UTC, the server column is a timestamp.
            date: day.format("%Y-%m-%dT00:00:00.000Z").to_string(),
            status,
            marked_by: Some(user.id.clone()),
        };
        let saved = self.state.api.mark_attendance(&record).await?;
        info!("marked {} {} for {} on {}", student_id, status, course_id, date);

        self.state
            .cache
            .invalidate(&keys::course_attendance(course_id, Some(date)))
            .await;
        self.state
            .cache
            .invalidate(&keys::student_attendance(student_id, None))
            .await;
        Ok(saved)
    }

    pub async fn mark_all(
        &self,
        user: &User,
        course_id: &str,
        date: &str,
        drafts: &HashMap<String, AttendanceStatus>,
    ) -> Result<Vec<Attendance>, AppError> {
        Self::ensure_access(user)?;
        try_join_all(
            drafts
                .iter()
                .map(|(student_id, status)| self.mark(user, course_id, date, student_id, *status)),
        )
        .await
    }

    pub async fn history(
        &self,
        user: &User,
        student_id: &str,
        course_id: Option<&str>,
    ) -> Result<(Vec<Attendance>, AttendanceStats), AppError> {
        if user.id != student_id {
            Self::ensure_access(user)?;
        }
        let records = queries::fetch_student_attendance(&self.state, student_id, course_id).await?;
        let stats = AttendanceStats::from_statuses(records.iter().map(|a| a.status));
        Ok((records, stats))
    }
}
