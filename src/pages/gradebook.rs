use serde::Serialize;

use super::rounded_mean;
use crate::access;
use crate::error::AppError;
use crate::models::*;
use crate::queries;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookSummary {
    pub students: usize,
    pub assignments: usize,
    pub graded: usize,
    pub awaiting_review: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentProgress {
    pub assignment_id: String,
    pub title: String,
    pub submitted: usize,
    pub graded: usize,
    pub roster: usize,
    pub average: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradebook {
    pub course_id: String,
    pub students: Vec<User>,
    pub assignments: Vec<Assignment>,
    pub submissions: Vec<Submission>,
}

impl Gradebook {
    pub fn grade(&self, student_id: &str, assignment_id: &str) -> Option<f64> {
        self.submissions
            .iter()
            .find(|s| s.student_id == student_id && s.assignment_id == assignment_id)
            .and_then(|s| s.score)
    }

    pub fn student_average(&self, student_id: &str) -> Option<u32> {
        rounded_mean(
            self.submissions
                .iter()
                .filter(|s| s.student_id == student_id)
                .filter_map(|s| s.score),
        )
    }

    pub fn assignment_average(&self, assignment_id: &str) -> Option<u32> {
        rounded_mean(
            self.submissions
                .iter()
                .filter(|s| s.assignment_id == assignment_id)
                .filter_map(|s| s.score),
        )
    }

    pub fn summary(&self) -> GradebookSummary {
        GradebookSummary {
            students: self.students.len(),
            assignments: self.assignments.len(),
            graded: self
                .submissions
                .iter()
                .filter(|s| s.has_status(SubmissionStatus::Graded))
                .count(),
            awaiting_review: self
                .submissions
                .iter()
                .filter(|s| s.has_status(SubmissionStatus::Submitted))
                .count(),
        }
    }

    pub fn progress(&self) -> Vec<AssignmentProgress> {
        self.assignments
            .iter()
            .map(|a| {
                let submissions: Vec<&Submission> = self
                    .submissions
                    .iter()
                    .filter(|s| s.assignment_id == a.id)
                    .collect();
                AssignmentProgress {
                    assignment_id: a.id.clone(),
                    title: a.title.clone(),
                    submitted: submissions.len(),
                    graded: submissions
                        .iter()
                        .filter(|s| s.has_status(SubmissionStatus::Graded))
                        .count(),
                    roster: self.students.len(),
                    average: self.assignment_average(&a.id),
                }
            })
            .collect()
    }
}

/// `round(score / max * 100)`; `None` without a positive maximum.
pub fn grade_percent(score: f64, max_score: Option<f64>) -> Option<u32> {
    match max_score {
        Some(max) if max > 0.0 => Some((score / max * 100.0).round().max(0.0) as u32),
        _ => None,
    }
}

pub struct GradebookPage {
    state: AppState,
}

impl GradebookPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn load(&self, user: &User, course_id: &str) -> Result<Gradebook, AppError> {
        access::ensure(
            user,
            |p| p.can_grade_assignments,
            "You don't have permission to view the grade book.",
        )?;
        let (students, assignments) = tokio::try_join!(
            queries::fetch_course_students(&self.state, course_id),
            queries::fetch_assignments(&self.state, course_id),
        )?;
        let submissions = queries::fetch_submissions_for_assignments(&self.state, &assignments).await?;

        Ok(Gradebook {
            course_id: course_id.to_string(),
            students,
            assignments,
            submissions,
        })
    }
}
