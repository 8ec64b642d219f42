use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentType {
    Homework,
    Quiz,
    Exam,
    Project,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AssignmentType>,
    pub max_score: Option<f64>,
    pub due_date: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Option<String>,
    pub is_active: Option<bool>,
}

impl Assignment {
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub course_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AssignmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub is_active: bool,
}

impl NewAssignment {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if self.course_id.trim().is_empty() {
            return Err(AppError::Validation("Course is required".to_string()));
        }
        if let Some(max) = self.max_score {
            if !(max > 0.0) {
                return Err(AppError::Validation(
                    "Max score must be positive".to_string(),
                ));
            }
        }
        if let Some(due) = &self.due_date {
            if chrono::DateTime::parse_from_rfc3339(due).is_err()
                && chrono::NaiveDate::parse_from_str(due, "%Y-%m-%d").is_err()
            {
                return Err(AppError::Validation(format!("invalid due date: {}", due)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
    Graded,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Graded => "graded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attachments: Vec<serde_json::Value>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub submitted_at: Option<String>,
    pub graded_at: Option<String>,
    pub graded_by: Option<String>,
}

// The column is nullable and submissions without files come back as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Submission {
    pub fn has_status(&self, status: SubmissionStatus) -> bool {
        self.status == Some(status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub assignment_id: String,
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<serde_json::Value>,
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSubmissionRequest {
    pub score: f64,
    pub feedback: String,
    pub graded_by: String,
}
