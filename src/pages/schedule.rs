use futures::future::try_join_all;
use serde::Serialize;
use tracing::info;

use crate::access;
use crate::error::AppError;
use crate::models::*;
use crate::queries::{self, keys};
use crate::state::AppState;

pub const TIME_SLOTS: [&str; 10] = [
    "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub day: Weekday,
    pub time: &'static str,
    pub schedule: Option<Schedule>,
    pub course: Option<Course>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub subtitle: &'static str,
    pub days: Vec<Weekday>,
    pub schedules: Vec<Schedule>,
    pub courses: Vec<Course>,
    pub can_manage: bool,
}

impl ScheduleView {
    pub fn build(role: Role, days: Vec<Weekday>, schedules: Vec<Schedule>, courses: Vec<Course>) -> Self {
        Self {
            subtitle: if role == Role::Teacher {
                "Manage your teaching schedule"
            } else {
                "View your class timetable"
            },
            days,
            schedules,
            courses,
            can_manage: role.is_staff(),
        }
    }

    pub fn find(&self, day: Weekday, start_time: &str) -> Option<&Schedule> {
        self.schedules
            .iter()
            .find(|s| s.day_of_week == day && s.start_time == start_time)
    }

    pub fn course_for(&self, schedule: &Schedule) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == schedule.course_id)
    }

    pub fn grid(&self, day: Weekday) -> Vec<ScheduleSlot> {
        TIME_SLOTS
            .into_iter()
            .map(|time| {
                let schedule = self.find(day, time);
                ScheduleSlot {
                    day,
                    time,
                    course: schedule.and_then(|s| self.course_for(s)).cloned(),
                    schedule: schedule.cloned(),
                }
            })
            .collect()
    }
}

pub struct SchedulePage {
    state: AppState,
}

impl SchedulePage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn day(&self, user: &User, day: Weekday) -> Result<ScheduleView, AppError> {
        let (schedules, courses) = tokio::try_join!(
            queries::fetch_schedules_by_day(&self.state, day),
            queries::fetch_courses_for(&self.state, user),
        )?;
        Ok(ScheduleView::build(user.role, vec![day], schedules, courses))
    }

    pub async fn week(&self, user: &User) -> Result<ScheduleView, AppError> {
        let (per_day, courses) = tokio::try_join!(
            try_join_all(
                Weekday::ALL
                    .into_iter()
                    .map(|day| queries::fetch_schedules_by_day(&self.state, day)),
            ),
            queries::fetch_courses_for(&self.state, user),
        )?;
        Ok(ScheduleView::build(
            user.role,
            Weekday::ALL.to_vec(),
            per_day.into_iter().flatten().collect(),
            courses,
        ))
    }

    pub async fn create(&self, user: &User, schedule: NewSchedule) -> Result<Schedule, AppError> {
        access::ensure(
            user,
            |p| p.can_create_courses,
            "You don't have permission to manage schedules.",
        )?;
        schedule.validate()?;

        let created = self.state.api.create_schedule(&schedule).await?;
        info!(
            "scheduled course {} on {} at {}",
            created.course_id, created.day_of_week, created.start_time
        );
        self.state
            .cache
            .invalidate(&keys::schedules_by_day(created.day_of_week))
            .await;
        self.state
            .cache
            .invalidate(&keys::schedules_by_course(&created.course_id))
            .await;
        Ok(created)
    }
}
