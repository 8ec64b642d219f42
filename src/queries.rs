//! Cached, role-scoped reads shared by the pages.
//!
//! Keys follow the server paths so a mutation can invalidate everything
//! under a path prefix.

use futures::future::try_join_all;

use crate::cache::QueryKey;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub mod keys {
    use crate::cache::QueryKey;
    use crate::models::{Role, User, Weekday};

    pub fn all_courses() -> QueryKey {
        QueryKey::new(["/api/courses"])
    }

    pub fn course(id: &str) -> QueryKey {
        QueryKey::new(["/api/courses", id])
    }

    pub fn course_students(course_id: &str) -> QueryKey {
        QueryKey::new(["/api/courses", course_id, "students"])
    }

    pub fn teacher_courses(teacher_id: &str) -> QueryKey {
        QueryKey::new(["/api/courses/teacher", teacher_id])
    }

    pub fn student_courses(student_id: &str) -> QueryKey {
        QueryKey::new(["/api/students", student_id, "courses"])
    }

    pub fn courses_for(user: &User) -> QueryKey {
        match user.role {
            Role::Teacher => teacher_courses(&user.id),
            Role::Student => student_courses(&user.id),
            Role::Admin | Role::InstituteAdmin => all_courses(),
        }
    }

    pub fn assignments(course_id: &str) -> QueryKey {
        QueryKey::new(["/api/assignments/course", course_id])
    }

    pub fn assignment(id: &str) -> QueryKey {
        QueryKey::new(["/api/assignments", id])
    }

    pub fn assignment_submissions(assignment_id: &str) -> QueryKey {
        QueryKey::new(["/api/submissions/assignment", assignment_id])
    }

    pub fn student_submissions(student_id: &str) -> QueryKey {
        QueryKey::new(["/api/submissions/student", student_id])
    }

    pub fn course_attendance(course_id: &str, date: Option<&str>) -> QueryKey {
        let mut parts = vec!["/api/attendance/course", course_id];
        parts.extend(date);
        QueryKey::new(parts)
    }

    pub fn student_attendance(student_id: &str, course_id: Option<&str>) -> QueryKey {
        let mut parts = vec!["/api/attendance/student", student_id];
        parts.extend(course_id);
        QueryKey::new(parts)
    }

    pub fn schedules_by_day(day: Weekday) -> QueryKey {
        QueryKey::new(["/api/schedules/day", day.as_str()])
    }

    pub fn schedules_by_course(course_id: &str) -> QueryKey {
        QueryKey::new(["/api/schedules/course", course_id])
    }

    pub fn forums(course_id: &str) -> QueryKey {
        QueryKey::new(["/api/forums/course", course_id])
    }

    pub fn forum_posts(forum_id: &str) -> QueryKey {
        QueryKey::new(["/api/forums", forum_id, "posts"])
    }

    pub fn materials(course_id: &str) -> QueryKey {
        QueryKey::new(["/api/materials/course", course_id])
    }

    pub fn users_by_role(role: Role) -> QueryKey {
        QueryKey::new(["/api/users/role", role.as_str()])
    }

    pub fn institutions() -> QueryKey {
        QueryKey::new(["/api/institutions"])
    }

    pub fn notifications(user_id: &str) -> QueryKey {
        QueryKey::new(["/api/notifications", user_id])
    }
}

pub async fn fetch_courses_for(state: &AppState, user: &User) -> Result<Vec<Course>, AppError> {
    let api = state.api.clone();
    let role = user.role;
    let id = user.id.clone();
    state
        .cache
        .get_or_fetch(keys::courses_for(user), || async move {
            match role {
                Role::Teacher => api.courses_by_teacher(&id).await,
                Role::Student => api.student_courses(&id).await,
                Role::Admin | Role::InstituteAdmin => api.courses().await,
            }
        })
        .await
}

pub async fn fetch_all_courses(state: &AppState) -> Result<Vec<Course>, AppError> {
    cached(state, keys::all_courses(), |api| async move { api.courses().await }).await
}

pub async fn fetch_course(state: &AppState, id: &str) -> Result<Course, AppError> {
    let id = id.to_string();
    cached(state, keys::course(&id), |api| async move { api.course(&id).await }).await
}

pub async fn fetch_course_students(state: &AppState, course_id: &str) -> Result<Vec<User>, AppError> {
    let course_id = course_id.to_string();
    cached(state, keys::course_students(&course_id), |api| async move {
        api.course_students(&course_id).await
    })
    .await
}

pub async fn fetch_assignments(state: &AppState, course_id: &str) -> Result<Vec<Assignment>, AppError> {
    let course_id = course_id.to_string();
    cached(state, keys::assignments(&course_id), |api| async move {
        api.assignments_by_course(&course_id).await
    })
    .await
}

pub async fn fetch_assignment(state: &AppState, id: &str) -> Result<Assignment, AppError> {
    let id = id.to_string();
    cached(state, keys::assignment(&id), |api| async move { api.assignment(&id).await }).await
}

pub async fn fetch_assignments_for_courses(
    state: &AppState,
    courses: &[Course],
) -> Result<Vec<Assignment>, AppError> {
    let per_course = try_join_all(courses.iter().map(|c| fetch_assignments(state, &c.id))).await?;
    Ok(per_course.into_iter().flatten().collect())
}

pub async fn fetch_assignment_submissions(
    state: &AppState,
    assignment_id: &str,
) -> Result<Vec<Submission>, AppError> {
    let assignment_id = assignment_id.to_string();
    cached(state, keys::assignment_submissions(&assignment_id), |api| async move {
        api.submissions_by_assignment(&assignment_id).await
    })
    .await
}

pub async fn fetch_submissions_for_assignments(
    state: &AppState,
    assignments: &[Assignment],
) -> Result<Vec<Submission>, AppError> {
    let per_assignment = try_join_all(
        assignments
            .iter()
            .map(|a| fetch_assignment_submissions(state, &a.id)),
    )
    .await?;
    Ok(per_assignment.into_iter().flatten().collect())
}

pub async fn fetch_student_submissions(
    state: &AppState,
    student_id: &str,
) -> Result<Vec<Submission>, AppError> {
    let student_id = student_id.to_string();
    cached(state, keys::student_submissions(&student_id), |api| async move {
        api.submissions_by_student(&student_id).await
    })
    .await
}

pub async fn fetch_course_attendance(
    state: &AppState,
    course_id: &str,
    date: Option<&str>,
) -> Result<Vec<Attendance>, AppError> {
    let course_id = course_id.to_string();
    let date = date.map(str::to_string);
    cached(state, keys::course_attendance(&course_id, date.as_deref()), |api| async move {
        api.attendance_by_course(&course_id, date.as_deref()).await
    })
    .await
}

pub async fn fetch_student_attendance(
    state: &AppState,
    student_id: &str,
    course_id: Option<&str>,
) -> Result<Vec<Attendance>, AppError> {
    let student_id = student_id.to_string();
    let course_id = course_id.map(str::to_string);
    cached(
        state,
        keys::student_attendance(&student_id, course_id.as_deref()),
        |api| async move { api.attendance_by_student(&student_id, course_id.as_deref()).await },
    )
    .await
}

pub async fn fetch_schedules_by_day(state: &AppState, day: Weekday) -> Result<Vec<Schedule>, AppError> {
    cached(state, keys::schedules_by_day(day), |api| async move {
        api.schedules_by_day(day).await
    })
    .await
}

pub async fn fetch_schedules_by_course(
    state: &AppState,
    course_id: &str,
) -> Result<Vec<Schedule>, AppError> {
    let course_id = course_id.to_string();
    cached(state, keys::schedules_by_course(&course_id), |api| async move {
        api.schedules_by_course(&course_id).await
    })
    .await
}

pub async fn fetch_forums(state: &AppState, course_id: &str) -> Result<Vec<Forum>, AppError> {
    let course_id = course_id.to_string();
    cached(state, keys::forums(&course_id), |api| async move {
        api.forums_by_course(&course_id).await
    })
    .await
}

pub async fn fetch_forum_posts(state: &AppState, forum_id: &str) -> Result<Vec<ForumPost>, AppError> {
    let forum_id = forum_id.to_string();
    cached(state, keys::forum_posts(&forum_id), |api| async move {
        api.forum_posts(&forum_id).await
    })
    .await
}

pub async fn fetch_materials(state: &AppState, course_id: &str) -> Result<Vec<CourseMaterial>, AppError> {
    let course_id = course_id.to_string();
    cached(state, keys::materials(&course_id), |api| async move {
        api.materials_by_course(&course_id).await
    })
    .await
}

pub async fn fetch_users_by_role(state: &AppState, role: Role) -> Result<Vec<User>, AppError> {
    cached(state, keys::users_by_role(role), |api| async move {
        api.users_by_role(role).await
    })
    .await
}

pub async fn fetch_institutions(state: &AppState) -> Result<Vec<Institution>, AppError> {
    cached(state, keys::institutions(), |api| async move { api.institutions().await }).await
}

pub async fn fetch_notifications(state: &AppState, user_id: &str) -> Result<Vec<Notification>, AppError> {
    let user_id = user_id.to_string();
    cached(state, keys::notifications(&user_id), |api| async move {
        api.notifications(&user_id).await
    })
    .await
}

async fn cached<T, F, Fut>(state: &AppState, key: QueryKey, fetch: F) -> Result<T, AppError>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce(std::sync::Arc<dyn crate::api::LmsApi>) -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let api = state.api.clone();
    state.cache.get_or_fetch(key, || fetch(api)).await
}
