use serde::Serialize;
use tracing::info;

use crate::access;
use crate::error::AppError;
use crate::models::*;
use crate::queries::{self, keys};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    pub course: Course,
    pub students: Vec<User>,
    pub assignments: Vec<Assignment>,
    pub materials: Vec<CourseMaterial>,
    pub forums: Vec<Forum>,
    pub schedules: Vec<Schedule>,
    pub can_manage: bool,
}

impl CourseDetails {
    pub fn active_assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(|a| a.active())
    }
}

pub struct CourseDetailsPage {
    state: AppState,
}

impl CourseDetailsPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn load(&self, user: &User, course_id: &str) -> Result<CourseDetails, AppError> {
        let (course, students, assignments, materials, forums, schedules) = tokio::try_join!(
            queries::fetch_course(&self.state, course_id),
            queries::fetch_course_students(&self.state, course_id),
            queries::fetch_assignments(&self.state, course_id),
            queries::fetch_materials(&self.state, course_id),
            queries::fetch_forums(&self.state, course_id),
            queries::fetch_schedules_by_course(&self.state, course_id),
        )?;

        Ok(CourseDetails {
            course,
            students,
            assignments,
            materials,
            forums,
            schedules,
            can_manage: access::permissions(user.role).can_create_courses,
        })
    }

    pub async fn add_material(
        &self,
        user: &User,
        mut material: NewCourseMaterial,
    ) -> Result<CourseMaterial, AppError> {
        access::ensure(
            user,
            |p| p.can_create_courses,
            "You don't have permission to manage course materials.",
        )?;
        material.uploaded_by.get_or_insert_with(|| user.id.clone());
        material.validate()?;

        let created = self.state.api.create_material(&material).await?;
        info!("uploaded material {} to course {}", created.id, created.course_id);
        self.state
            .cache
            .invalidate(&keys::materials(&created.course_id))
            .await;
        Ok(created)
    }

    pub async fn delete_material(
        &self,
        user: &User,
        course_id: &str,
        material_id: &str,
    ) -> Result<(), AppError> {
        access::ensure(
            user,
            |p| p.can_create_courses,
            "You don't have permission to manage course materials.",
        )?;
        self.state.api.delete_material(material_id).await?;
        info!("deleted material {} from course {}", material_id, course_id);
        self.state.cache.invalidate(&keys::materials(course_id)).await;
        Ok(())
    }
}
