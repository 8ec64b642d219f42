use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use super::{matches_choice, matches_search};
use crate::access;
use crate::error::AppError;
use crate::models::*;
use crate::queries::{self, keys};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Draft,
    Submitted,
    Graded,
    Active,
    Inactive,
}

impl AssignmentStatus {
    pub fn for_student(submission: Option<&Submission>) -> Self {
        match submission.map(|s| s.status) {
            None => AssignmentStatus::Pending,
            Some(Some(SubmissionStatus::Draft)) => AssignmentStatus::Draft,
            Some(Some(SubmissionStatus::Graded)) => AssignmentStatus::Graded,
            Some(Some(SubmissionStatus::Submitted) | None) => AssignmentStatus::Submitted,
        }
    }

    pub fn for_staff(assignment: &Assignment) -> Self {
        if assignment.active() {
            AssignmentStatus::Active
        } else {
            AssignmentStatus::Inactive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Draft => "draft",
            AssignmentStatus::Submitted => "submitted",
            AssignmentStatus::Graded => "graded",
            AssignmentStatus::Active => "active",
            AssignmentStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub search: String,
    pub course_id: Option<String>,
    pub status: Option<String>,
}

impl AssignmentFilter {
    /// `pending` also covers drafts; every other status matches exactly.
    fn matches_status(&self, status: AssignmentStatus) -> bool {
        match self.status.as_deref() {
            None | Some("all") => true,
            Some("pending") => matches!(status, AssignmentStatus::Pending | AssignmentStatus::Draft),
            Some(other) => status.as_str() == other,
        }
    }

    pub fn matches(&self, row: &AssignmentRow) -> bool {
        matches_search(&row.assignment.title, &self.search)
            && matches_choice(Some(row.assignment.course_id.as_str()), self.course_id.as_deref())
            && self.matches_status(row.status)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRow {
    pub assignment: Assignment,
    pub course_name: Option<String>,
    pub status: AssignmentStatus,
    pub submission: Option<Submission>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentsView {
    pub title: &'static str,
    pub rows: Vec<AssignmentRow>,
    pub pending: usize,
    pub submitted: usize,
    pub can_create: bool,
}

impl AssignmentsView {
    pub fn build(
        role: Role,
        courses: &[Course],
        assignments: Vec<Assignment>,
        submissions: &[Submission],
        filter: &AssignmentFilter,
    ) -> Self {
        let course_names: HashMap<&str, &str> = courses
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect();
        let by_assignment: HashMap<&str, &Submission> = submissions
            .iter()
            .map(|s| (s.assignment_id.as_str(), s))
            .collect();

        let rows: Vec<AssignmentRow> = assignments
            .into_iter()
            .map(|assignment| {
                let submission = by_assignment.get(assignment.id.as_str()).copied();
                let status = if role.is_staff() {
                    AssignmentStatus::for_staff(&assignment)
                } else {
                    AssignmentStatus::for_student(submission)
                };
                AssignmentRow {
                    course_name: course_names
                        .get(assignment.course_id.as_str())
                        .map(|n| n.to_string()),
                    submission: submission.cloned(),
                    status,
                    assignment,
                }
            })
            .filter(|row| filter.matches(row))
            .collect();

        let (pending, submitted) = if role.is_staff() {
            (0, 0)
        } else {
            (
                rows.iter().filter(|r| r.submission.is_none()).count(),
                rows.iter()
                    .filter(|r| matches!(r.status, AssignmentStatus::Submitted | AssignmentStatus::Graded))
                    .count(),
            )
        };

        Self {
            title: if role.is_staff() {
                "Assignment Management"
            } else {
                "My Assignments"
            },
            rows,
            pending,
            submitted,
            can_create: access::permissions(role).can_create_courses,
        }
    }
}

pub struct AssignmentsPage {
    state: AppState,
}

impl AssignmentsPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, user: &User, filter: &AssignmentFilter) -> Result<AssignmentsView, AppError> {
        let courses = queries::fetch_courses_for(&self.state, user).await?;
        let assignments = queries::fetch_assignments_for_courses(&self.state, &courses).await?;
        let submissions = if user.role == Role::Student {
            queries::fetch_student_submissions(&self.state, &user.id).await?
        } else {
            Vec::new()
        };
        Ok(AssignmentsView::build(user.role, &courses, assignments, &submissions, filter))
    }

    pub async fn submit(
        &self,
        user: &User,
        assignment_id: &str,
        content: Option<String>,
    ) -> Result<Submission, AppError> {
        if user.role != Role::Student {
            return Err(AppError::Forbidden("Only students can submit assignments.".to_string()));
        }
        let submission = NewSubmission {
            assignment_id: assignment_id.to_string(),
            student_id: user.id.clone(),
            content,
            attachments: Vec::new(),
            status: SubmissionStatus::Submitted,
        };
        let created = self.state.api.create_submission(&submission).await?;
        info!("submitted assignment {} as {}", assignment_id, user.username);

        self.state.cache.invalidate(&keys::student_submissions(&user.id)).await;
        self.state
            .cache
            .invalidate(&keys::assignment_submissions(assignment_id))
            .await;
        Ok(created)
    }

    pub async fn create(&self, user: &User, mut assignment: NewAssignment) -> Result<Assignment, AppError> {
        access::ensure(
            user,
            |p| p.can_create_courses,
            "You don't have permission to create assignments.",
        )?;
        assignment.created_by.get_or_insert_with(|| user.id.clone());
        assignment.validate()?;

        let created = self.state.api.create_assignment(&assignment).await?;
        info!("created assignment {} in course {}", created.id, created.course_id);
        self.state
            .cache
            .invalidate(&keys::assignments(&created.course_id))
            .await;
        Ok(created)
    }

    pub async fn grade(
        &self,
        user: &User,
        assignment_id: &str,
        submission_id: &str,
        score: f64,
        feedback: String,
    ) -> Result<Submission, AppError> {
        access::ensure(
            user,
            |p| p.can_grade_assignments,
            "You don't have permission to grade assignments.",
        )?;
        let assignment = queries::fetch_assignment(&self.state, assignment_id).await?;
        check_score(score, assignment.max_score)?;

        let grade = GradeSubmissionRequest {
            score,
            feedback,
            graded_by: user.id.clone(),
        };
        let graded = self.state.api.grade_submission(submission_id, &grade).await?;
        info!("graded submission {} with {}", submission_id, score);

        self.state
            .cache
            .invalidate(&keys::assignment_submissions(assignment_id))
            .await;
        self.state
            .cache
            .invalidate(&keys::student_submissions(&graded.student_id))
            .await;
        Ok(graded)
    }
}

pub fn check_score(score: f64, max_score: Option<f64>) -> Result<(), AppError> {
    if !score.is_finite() || score < 0.0 {
        return Err(AppError::Validation("Score must be zero or more".to_string()));
    }
    if let Some(max) = max_score {
        if score > max {
            return Err(AppError::Validation(format!(
                "Score {} exceeds the maximum of {}",
                score, max
            )));
        }
    }
    Ok(())
}
