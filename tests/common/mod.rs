#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

use lms_client::api::HttpLmsApi;
use lms_client::config::Config;
use lms_client::models::*;
use lms_client::state::AppState;

pub const PASSWORD: &str = "secret1";

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

fn not_found(what: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{} not found", what) })),
    )
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// In-memory LMS data plus a log of every request the server saw.
#[derive(Default)]
pub struct Db {
    pub requests: Vec<String>,
    pub fail_next: Option<(StatusCode, String)>,
    pub users: Vec<User>,
    pub passwords: HashMap<String, String>,
    pub institutions: Vec<Institution>,
    pub courses: Vec<Course>,
    /// (student id, course id)
    pub enrollments: Vec<(String, String)>,
    pub schedules: Vec<Schedule>,
    pub attendance: Vec<Attendance>,
    pub assignments: Vec<Assignment>,
    pub submissions: Vec<Submission>,
    pub forums: Vec<Forum>,
    pub posts: Vec<ForumPost>,
    pub notifications: Vec<Notification>,
    pub materials: Vec<CourseMaterial>,
}

#[derive(Clone, Default)]
pub struct FakeLms {
    db: Arc<Mutex<Db>>,
}

impl FakeLms {
    pub fn seeded() -> Self {
        let fake = Self::default();
        seed(&mut fake.db());
        fake
    }

    pub fn db(&self) -> MutexGuard<'_, Db> {
        self.db.lock().unwrap()
    }

    /// Requests received, as `METHOD /path[?query]`.
    pub fn requests(&self) -> Vec<String> {
        self.db().requests.clone()
    }

    pub fn hits(&self, line: &str) -> usize {
        self.db().requests.iter().filter(|r| *r == line).count()
    }

    pub fn clear_requests(&self) {
        self.db().requests.clear();
    }

    /// Answer the next request with this status and message.
    pub fn fail_next(&self, status: StatusCode, message: &str) {
        self.db().fail_next = Some((status, message.to_string()));
    }
}

pub struct TestServer {
    pub base: Url,
    pub fake: FakeLms,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::with(FakeLms::seeded()).await
    }

    pub async fn with(fake: FakeLms) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(fake.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base: Url::parse(&format!("http://{}", addr)).unwrap(),
            fake,
        }
    }

    pub fn api(&self) -> HttpLmsApi {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpLmsApi::with_client(client, self.base.clone())
    }

    pub fn config(&self, session_file: &Path) -> Config {
        Config {
            api_url: self.base.clone(),
            session_file: session_file.to_path_buf(),
            http_timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(300),
        }
    }

    pub fn state(&self, session_file: &Path) -> AppState {
        AppState::new(Arc::new(self.api()), &self.config(session_file))
    }

    /// App state with `user_id` already signed in.
    pub async fn signed_in(&self, session_dir: &Path, user_id: &str) -> (AppState, User) {
        let state = self.state(&session_dir.join("session.json"));
        let username = self
            .fake
            .db()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.username.clone())
            .unwrap();
        let user = state
            .session
            .login(&LoginCredentials {
                username,
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        self.fake.clear_requests();
        (state, user)
    }
}

async fn record(State(fake): State<FakeLms>, req: Request, next: Next) -> Response {
    let line = match req.uri().query() {
        Some(q) => format!("{} {}?{}", req.method(), req.uri().path(), q),
        None => format!("{} {}", req.method(), req.uri().path()),
    };
    let fail = {
        let mut db = fake.db();
        db.requests.push(line);
        db.fail_next.take()
    };
    if let Some((status, message)) = fail {
        return (status, Json(json!({ "message": message }))).into_response();
    }
    next.run(req).await
}

pub fn router(fake: FakeLms) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/users/{id}", get(user))
        .route("/api/users/role/{role}", get(users_by_role))
        .route("/api/courses", get(courses).post(create_course))
        .route("/api/courses/{id}", get(course))
        .route("/api/courses/teacher/{id}", get(teacher_courses))
        .route("/api/courses/{id}/students", get(course_students))
        .route("/api/students/{id}/courses", get(student_courses))
        .route("/api/schedules", post(create_schedule))
        .route("/api/schedules/course/{id}", get(course_schedules))
        .route("/api/schedules/day/{day}", get(day_schedules))
        .route("/api/attendance", post(mark_attendance))
        .route("/api/attendance/student/{id}", get(student_attendance))
        .route("/api/attendance/course/{id}", get(course_attendance))
        .route("/api/assignments", post(create_assignment))
        .route("/api/assignments/{id}", get(assignment))
        .route("/api/assignments/course/{id}", get(course_assignments))
        .route("/api/submissions", post(create_submission))
        .route("/api/submissions/assignment/{id}", get(assignment_submissions))
        .route("/api/submissions/student/{id}", get(student_submissions))
        .route("/api/submissions/{id}/grade", patch(grade_submission))
        .route("/api/forums", post(create_forum))
        .route("/api/forums/course/{id}", get(course_forums))
        .route("/api/forums/{id}/posts", get(forum_posts))
        .route("/api/forum-posts", post(create_post))
        .route("/api/notifications", post(create_notification))
        .route("/api/notifications/{id}", get(notifications))
        .route("/api/notifications/{id}/read", patch(read_notification))
        .route("/api/materials", post(create_material))
        .route("/api/materials/course/{id}", get(course_materials))
        .route("/api/materials/{id}", delete(delete_material))
        .route("/api/institutions", get(institutions).post(create_institution))
        .layer(middleware::from_fn_with_state(fake.clone(), record))
        .with_state(fake)
}

async fn login(State(fake): State<FakeLms>, Json(body): Json<LoginCredentials>) -> ApiResult<Value> {
    let db = fake.db();
    let user = db
        .users
        .iter()
        .find(|u| u.username == body.username)
        .filter(|u| db.passwords.get(&u.id) == Some(&body.password))
        .ok_or((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        ))?;
    Ok(Json(json!({ "user": user })))
}

async fn register(State(fake): State<FakeLms>, Json(body): Json<RegisterData>) -> ApiResult<Value> {
    let mut db = fake.db();
    if db.users.iter().any(|u| u.username == body.username) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Username already exists" })),
        ));
    }
    let user = User {
        id: new_id(),
        username: body.username,
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
        role: body.role,
        avatar: body.avatar,
        is_active: Some(true),
        created_at: Some(now()),
        updated_at: None,
    };
    db.passwords.insert(user.id.clone(), body.password);
    db.users.push(user.clone());
    Ok(Json(json!({ "user": user })))
}

async fn user(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> ApiResult<User> {
    fake.db()
        .users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("User"))
}

async fn users_by_role(State(fake): State<FakeLms>, UrlPath(role): UrlPath<String>) -> Json<Vec<User>> {
    Json(
        fake.db()
            .users
            .iter()
            .filter(|u| u.role.as_str() == role)
            .cloned()
            .collect(),
    )
}

async fn courses(State(fake): State<FakeLms>) -> Json<Vec<Course>> {
    Json(fake.db().courses.clone())
}

async fn course(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> ApiResult<Course> {
    fake.db()
        .courses
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Course"))
}

async fn create_course(State(fake): State<FakeLms>, Json(body): Json<NewCourseRequest>) -> Json<Course> {
    let course = Course {
        id: new_id(),
        name: body.name,
        code: body.code,
        description: body.description,
        grade_level: body.grade_level,
        semester: body.semester,
        credits: Some(body.credits),
        teacher_id: body.teacher_id,
        institution_id: body.institution_id,
        thumbnail: None,
        is_active: Some(body.is_active),
        created_at: Some(now()),
        updated_at: None,
    };
    fake.db().courses.push(course.clone());
    Json(course)
}

async fn teacher_courses(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<Course>> {
    Json(
        fake.db()
            .courses
            .iter()
            .filter(|c| c.teacher_id.as_deref() == Some(id.as_str()))
            .cloned()
            .collect(),
    )
}

async fn course_students(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<User>> {
    let db = fake.db();
    Json(
        db.users
            .iter()
            .filter(|u| db.enrollments.iter().any(|(s, c)| *s == u.id && *c == id))
            .cloned()
            .collect(),
    )
}

async fn student_courses(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<Course>> {
    let db = fake.db();
    Json(
        db.courses
            .iter()
            .filter(|c| db.enrollments.iter().any(|(s, cid)| *s == id && *cid == c.id))
            .cloned()
            .collect(),
    )
}

async fn create_schedule(State(fake): State<FakeLms>, Json(body): Json<NewSchedule>) -> Json<Schedule> {
    let schedule = Schedule {
        id: new_id(),
        course_id: body.course_id,
        day_of_week: body.day_of_week,
        start_time: body.start_time,
        end_time: body.end_time,
        room: body.room,
        kind: body.kind,
        is_recurring: body.is_recurring,
    };
    fake.db().schedules.push(schedule.clone());
    Json(schedule)
}

async fn course_schedules(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<Schedule>> {
    Json(
        fake.db()
            .schedules
            .iter()
            .filter(|s| s.course_id == id)
            .cloned()
            .collect(),
    )
}

async fn day_schedules(State(fake): State<FakeLms>, UrlPath(day): UrlPath<String>) -> Json<Vec<Schedule>> {
    Json(
        fake.db()
            .schedules
            .iter()
            .filter(|s| s.day_of_week.as_str() == day)
            .cloned()
            .collect(),
    )
}

async fn mark_attendance(State(fake): State<FakeLms>, Json(body): Json<NewAttendance>) -> Json<Attendance> {
    let record = Attendance {
        id: new_id(),
        student_id: body.student_id,
        course_id: body.course_id,
        date: body.date,
        status: body.status,
        marked_by: body.marked_by,
        marked_at: Some(now()),
    };
    let mut db = fake.db();
    db.attendance
        .retain(|a| !(a.student_id == record.student_id && a.course_id == record.course_id && a.day() == record.day()));
    db.attendance.push(record.clone());
    Json(record)
}

async fn student_attendance(
    State(fake): State<FakeLms>,
    UrlPath(id): UrlPath<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<Attendance>> {
    let course = query.get("courseId");
    Json(
        fake.db()
            .attendance
            .iter()
            .filter(|a| a.student_id == id && course.is_none_or(|c| *c == a.course_id))
            .cloned()
            .collect(),
    )
}

async fn course_attendance(
    State(fake): State<FakeLms>,
    UrlPath(id): UrlPath<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<Attendance>> {
    let date = query.get("date");
    Json(
        fake.db()
            .attendance
            .iter()
            .filter(|a| a.course_id == id && date.is_none_or(|d| a.day() == d.as_str()))
            .cloned()
            .collect(),
    )
}

async fn create_assignment(State(fake): State<FakeLms>, Json(body): Json<NewAssignment>) -> Json<Assignment> {
    let assignment = Assignment {
        id: new_id(),
        course_id: body.course_id,
        title: body.title,
        description: body.description,
        kind: body.kind,
        max_score: body.max_score,
        due_date: body.due_date,
        created_by: body.created_by,
        created_at: Some(now()),
        is_active: Some(body.is_active),
    };
    fake.db().assignments.push(assignment.clone());
    Json(assignment)
}

async fn assignment(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> ApiResult<Assignment> {
    fake.db()
        .assignments
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Assignment"))
}

async fn course_assignments(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<Assignment>> {
    Json(
        fake.db()
            .assignments
            .iter()
            .filter(|a| a.course_id == id)
            .cloned()
            .collect(),
    )
}

async fn create_submission(State(fake): State<FakeLms>, Json(body): Json<NewSubmission>) -> Json<Submission> {
    let submission = Submission {
        id: new_id(),
        assignment_id: body.assignment_id,
        student_id: body.student_id,
        content: body.content,
        attachments: body.attachments,
        score: None,
        feedback: None,
        status: Some(body.status),
        submitted_at: Some(now()),
        graded_at: None,
        graded_by: None,
    };
    fake.db().submissions.push(submission.clone());
    Json(submission)
}

async fn assignment_submissions(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<Submission>> {
    Json(
        fake.db()
            .submissions
            .iter()
            .filter(|s| s.assignment_id == id)
            .cloned()
            .collect(),
    )
}

async fn student_submissions(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<Submission>> {
    Json(
        fake.db()
            .submissions
            .iter()
            .filter(|s| s.student_id == id)
            .cloned()
            .collect(),
    )
}

async fn grade_submission(
    State(fake): State<FakeLms>,
    UrlPath(id): UrlPath<String>,
    Json(body): Json<GradeSubmissionRequest>,
) -> ApiResult<Submission> {
    let mut db = fake.db();
    let submission = db
        .submissions
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| not_found("Submission"))?;
    submission.score = Some(body.score);
    submission.feedback = Some(body.feedback);
    submission.graded_by = Some(body.graded_by);
    submission.graded_at = Some(now());
    submission.status = Some(SubmissionStatus::Graded);
    Ok(Json(submission.clone()))
}

async fn create_forum(State(fake): State<FakeLms>, Json(body): Json<NewForum>) -> Json<Forum> {
    let forum = Forum {
        id: new_id(),
        course_id: body.course_id,
        title: body.title,
        description: body.description,
        created_by: body.created_by,
        created_at: Some(now()),
        is_active: Some(body.is_active),
    };
    fake.db().forums.push(forum.clone());
    Json(forum)
}

async fn course_forums(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<Forum>> {
    Json(
        fake.db()
            .forums
            .iter()
            .filter(|f| f.course_id == id)
            .cloned()
            .collect(),
    )
}

async fn forum_posts(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<ForumPost>> {
    Json(
        fake.db()
            .posts
            .iter()
            .filter(|p| p.forum_id == id)
            .cloned()
            .collect(),
    )
}

async fn create_post(State(fake): State<FakeLms>, Json(body): Json<NewForumPost>) -> Json<ForumPost> {
    let post = ForumPost {
        id: new_id(),
        forum_id: body.forum_id,
        parent_id: body.parent_id,
        content: body.content,
        author_id: body.author_id,
        created_at: Some(now()),
        updated_at: None,
    };
    fake.db().posts.push(post.clone());
    Json(post)
}

async fn create_notification(
    State(fake): State<FakeLms>,
    Json(body): Json<NewNotification>,
) -> Json<Notification> {
    let notification = Notification {
        id: new_id(),
        user_id: body.user_id,
        title: body.title,
        content: body.content,
        kind: body.kind,
        is_read: Some(false),
        created_at: Some(now()),
    };
    fake.db().notifications.push(notification.clone());
    Json(notification)
}

async fn notifications(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<Notification>> {
    Json(
        fake.db()
            .notifications
            .iter()
            .filter(|n| n.user_id == id)
            .cloned()
            .collect(),
    )
}

async fn read_notification(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> StatusCode {
    let mut db = fake.db();
    match db.notifications.iter_mut().find(|n| n.id == id) {
        Some(n) => {
            n.is_read = Some(true);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn create_material(
    State(fake): State<FakeLms>,
    Json(body): Json<NewCourseMaterial>,
) -> Json<CourseMaterial> {
    let material = CourseMaterial {
        id: new_id(),
        course_id: body.course_id,
        title: body.title,
        description: body.description,
        kind: body.kind,
        url: body.url,
        file_size: body.file_size,
        uploaded_by: body.uploaded_by,
        uploaded_at: Some(now()),
        is_active: Some(body.is_active),
    };
    fake.db().materials.push(material.clone());
    Json(material)
}

async fn course_materials(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> Json<Vec<CourseMaterial>> {
    Json(
        fake.db()
            .materials
            .iter()
            .filter(|m| m.course_id == id)
            .cloned()
            .collect(),
    )
}

async fn delete_material(State(fake): State<FakeLms>, UrlPath(id): UrlPath<String>) -> StatusCode {
    let mut db = fake.db();
    let before = db.materials.len();
    db.materials.retain(|m| m.id != id);
    if db.materials.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn institutions(State(fake): State<FakeLms>) -> Json<Vec<Institution>> {
    Json(fake.db().institutions.clone())
}

async fn create_institution(
    State(fake): State<FakeLms>,
    Json(body): Json<NewInstitution>,
) -> Json<Institution> {
    let institution = Institution {
        id: new_id(),
        name: body.name,
        code: body.code,
        address: body.address,
        phone: body.phone,
        email: body.email,
        website: body.website,
        logo: body.logo,
        created_at: Some(now()),
    };
    fake.db().institutions.push(institution.clone());
    Json(institution)
}

pub fn user_fixture(id: &str, first: &str, last: &str, role: Role, created_at: &str) -> User {
    User {
        id: id.into(),
        username: format!("{}.{}", first, last).to_lowercase(),
        email: format!("{}@school.test", id),
        first_name: first.into(),
        last_name: last.into(),
        role,
        avatar: None,
        is_active: Some(true),
        created_at: Some(created_at.into()),
        updated_at: None,
    }
}

pub fn course_fixture(
    id: &str,
    name: &str,
    code: &str,
    teacher: Option<&str>,
    institution: Option<&str>,
    active: bool,
) -> Course {
    Course {
        id: id.into(),
        name: name.into(),
        code: code.into(),
        description: None,
        grade_level: "9".into(),
        semester: "Fall 2024".into(),
        credits: Some(3),
        teacher_id: teacher.map(str::to_string),
        institution_id: institution.map(str::to_string),
        thumbnail: None,
        is_active: Some(active),
        created_at: None,
        updated_at: None,
    }
}

fn assignment_fixture(id: &str, course: &str, title: &str, max: f64) -> Assignment {
    Assignment {
        id: id.into(),
        course_id: course.into(),
        title: title.into(),
        description: None,
        kind: Some(AssignmentType::Homework),
        max_score: Some(max),
        due_date: Some("2024-10-01".into()),
        created_by: Some("t1".into()),
        created_at: None,
        is_active: Some(true),
    }
}

fn submission_fixture(
    id: &str,
    assignment: &str,
    student: &str,
    score: Option<f64>,
    status: SubmissionStatus,
) -> Submission {
    Submission {
        id: id.into(),
        assignment_id: assignment.into(),
        student_id: student.into(),
        content: Some("answer".into()),
        attachments: Vec::new(),
        score,
        feedback: None,
        status: Some(status),
        submitted_at: None,
        graded_at: None,
        graded_by: None,
    }
}

fn attendance_fixture(student: &str, date: &str, status: AttendanceStatus) -> Attendance {
    Attendance {
        id: format!("att-{}-{}", student, date),
        student_id: student.into(),
        course_id: "c1".into(),
        date: date.into(),
        status,
        marked_by: Some("t1".into()),
        marked_at: None,
    }
}

/// Teacher t1 teaches c1 and c2; students s1 (c1, c2) and s2 (c1).
fn seed(db: &mut Db) {
    db.users = vec![
        user_fixture("t1", "Ada", "Lovelace", Role::Teacher, "2024-08-01T09:00:00Z"),
        user_fixture("t2", "Alan", "Turing", Role::Teacher, "2024-08-02T09:00:00Z"),
        user_fixture("s1", "Grace", "Hopper", Role::Student, "2024-08-03T09:00:00Z"),
        user_fixture("s2", "Linus", "Pauling", Role::Student, "2024-08-04T09:00:00Z"),
        user_fixture("a1", "Edsger", "Dijkstra", Role::Admin, "2024-07-01T09:00:00Z"),
        user_fixture("i1", "Barbara", "Liskov", Role::InstituteAdmin, "2024-07-02T09:00:00Z"),
    ];
    db.passwords = db
        .users
        .iter()
        .map(|u| (u.id.clone(), PASSWORD.to_string()))
        .collect();
    db.institutions = vec![Institution {
        id: "inst1".into(),
        name: "Springfield High".into(),
        code: "SPH".into(),
        address: None,
        phone: None,
        email: None,
        website: None,
        logo: None,
        created_at: None,
    }];
    db.courses = vec![
        course_fixture("c1", "Algebra I", "MATH101", Some("t1"), Some("inst1"), true),
        course_fixture("c2", "Biology", "BIO101", Some("t1"), Some("inst1"), false),
        course_fixture("c3", "World History", "HIS101", Some("t2"), Some("inst2"), true),
    ];
    db.enrollments = vec![
        ("s1".into(), "c1".into()),
        ("s1".into(), "c2".into()),
        ("s2".into(), "c1".into()),
    ];
    db.schedules = vec![
        Schedule {
            id: "sch1".into(),
            course_id: "c1".into(),
            day_of_week: Weekday::Monday,
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            room: Some("101".into()),
            kind: Some(SessionType::Lecture),
            is_recurring: Some(true),
        },
        Schedule {
            id: "sch2".into(),
            course_id: "c2".into(),
            day_of_week: Weekday::Wednesday,
            start_time: "10:00".into(),
            end_time: "11:30".into(),
            room: Some("Lab 2".into()),
            kind: Some(SessionType::Lab),
            is_recurring: Some(true),
        },
    ];
    db.attendance = vec![
        attendance_fixture("s1", "2024-09-02", AttendanceStatus::Present),
        attendance_fixture("s2", "2024-09-02", AttendanceStatus::Absent),
        attendance_fixture("s1", "2024-09-03", AttendanceStatus::Late),
    ];
    db.assignments = vec![
        assignment_fixture("as1", "c1", "Linear Equations", 100.0),
        assignment_fixture("as2", "c1", "Quadratics Quiz", 50.0),
        assignment_fixture("as3", "c2", "Cell Diagram", 20.0),
    ];
    db.submissions = vec![
        submission_fixture("sub1", "as1", "s1", Some(90.0), SubmissionStatus::Graded),
        submission_fixture("sub2", "as2", "s1", None, SubmissionStatus::Submitted),
        submission_fixture("sub3", "as1", "s2", Some(70.0), SubmissionStatus::Graded),
    ];
    db.forums = vec![Forum {
        id: "f1".into(),
        course_id: "c1".into(),
        title: "General Discussion".into(),
        description: Some("Questions about homework".into()),
        created_by: "t1".into(),
        created_at: None,
        is_active: Some(true),
    }];
    db.posts = vec![
        ForumPost {
            id: "p1".into(),
            forum_id: "f1".into(),
            parent_id: None,
            content: "How do I factor x^2 - 1?".into(),
            author_id: "s1".into(),
            created_at: Some("2024-09-05T10:00:00Z".into()),
            updated_at: None,
        },
        ForumPost {
            id: "p2".into(),
            forum_id: "f1".into(),
            parent_id: Some("p1".into()),
            content: "Difference of squares.".into(),
            author_id: "t1".into(),
            created_at: Some("2024-09-05T11:00:00Z".into()),
            updated_at: None,
        },
    ];
    db.notifications = vec![
        Notification {
            id: "n1".into(),
            user_id: "s1".into(),
            title: "New assignment".into(),
            content: None,
            kind: Some(NotificationType::Info),
            is_read: Some(false),
            created_at: Some("2024-09-06T08:00:00Z".into()),
        },
        Notification {
            id: "n2".into(),
            user_id: "s1".into(),
            title: "Grade posted".into(),
            content: None,
            kind: Some(NotificationType::Success),
            is_read: Some(true),
            created_at: Some("2024-09-01T08:00:00Z".into()),
        },
    ];
    db.materials = vec![CourseMaterial {
        id: "m1".into(),
        course_id: "c1".into(),
        title: "Syllabus".into(),
        description: None,
        kind: MaterialType::Document,
        url: None,
        file_size: Some(2048),
        uploaded_by: Some("t1".into()),
        uploaded_at: None,
        is_active: Some(true),
    }];
}
