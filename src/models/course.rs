use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub grade_level: String,
    pub semester: String,
    pub credits: Option<u8>,
    pub teacher_id: Option<String>,
    pub institution_id: Option<String>,
    pub thumbnail: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Course {
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(false)
    }
}

pub const DEFAULT_CREDITS: u8 = 3;
pub const MAX_CREDITS: u8 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub grade_level: String,
    pub semester: String,
    #[serde(default = "default_credits")]
    pub credits: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_credits() -> u8 {
    DEFAULT_CREDITS
}

fn default_active() -> bool {
    true
}

impl NewCourseRequest {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        grade_level: impl Into<String>,
        semester: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: None,
            grade_level: grade_level.into(),
            semester: semester.into(),
            credits: DEFAULT_CREDITS,
            teacher_id: None,
            institution_id: None,
            is_active: true,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("Course name", &self.name),
            ("Course code", &self.code),
            ("Grade level", &self.grade_level),
            ("Semester", &self.semester),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
        }
        if !(1..=MAX_CREDITS).contains(&self.credits) {
            return Err(AppError::Validation(format!(
                "Credits must be between 1 and {}",
                MAX_CREDITS
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEnrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub enrolled_at: Option<String>,
    pub status: Option<EnrollmentStatus>,
}
