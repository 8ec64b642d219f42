use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use super::{matches_choice, matches_search};
use crate::access::{self, permissions};
use crate::error::AppError;
use crate::models::{Course, NewCourseRequest, Role, User};
use crate::queries::{self, keys};
use crate::state::AppState;

#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub search: String,
    pub grade_level: Option<String>,
    pub semester: Option<String>,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        let search = matches_search(&course.name, &self.search)
            || matches_search(&course.code, &self.search);
        search
            && matches_choice(Some(course.grade_level.as_str()), self.grade_level.as_deref())
            && matches_choice(Some(course.semester.as_str()), self.semester.as_deref())
    }

    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|c| self.matches(c)).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursesView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub courses: Vec<Course>,
    pub total: usize,
    pub grade_levels: Vec<String>,
    pub semesters: Vec<String>,
    pub can_create: bool,
}

pub fn title_for(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Teacher => ("My Courses", "Manage and track your teaching courses"),
        Role::Student => ("Enrolled Courses", "Access your enrolled courses and materials"),
        Role::Admin | Role::InstituteAdmin => ("All Courses", "Manage all courses in the system"),
    }
}

pub struct CoursesPage {
    state: AppState,
}

impl CoursesPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, user: &User, filter: &CourseFilter) -> Result<CoursesView, AppError> {
        let all = queries::fetch_courses_for(&self.state, user).await?;
        let (title, subtitle) = title_for(user.role);

        let grade_levels: BTreeSet<String> = all.iter().map(|c| c.grade_level.clone()).collect();
        let semesters: BTreeSet<String> = all.iter().map(|c| c.semester.clone()).collect();
        let courses: Vec<Course> = filter.apply(&all).into_iter().cloned().collect();

        Ok(CoursesView {
            title,
            subtitle,
            total: all.len(),
            courses,
            grade_levels: grade_levels.into_iter().collect(),
            semesters: semesters.into_iter().collect(),
            can_create: permissions(user.role).can_create_courses,
        })
    }

    pub async fn create(&self, user: &User, mut request: NewCourseRequest) -> Result<Course, AppError> {
        access::ensure(
            user,
            |p| p.can_create_courses,
            "You don't have permission to create courses.",
        )?;
        if request.teacher_id.is_none() && user.role == Role::Teacher {
            request.teacher_id = Some(user.id.clone());
        }
        request.validate()?;

        let course = self.state.api.create_course(&request).await?;
        info!("created course {} ({})", course.code, course.id);

        self.state.cache.invalidate(&keys::all_courses()).await;
        if let Some(teacher_id) = &course.teacher_id {
            self.state
                .cache
                .invalidate(&keys::teacher_courses(teacher_id))
                .await;
        }
        Ok(course)
    }
}
