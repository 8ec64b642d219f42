mod common;

use axum::http::StatusCode;
use lms_client::api::LmsApi;
use lms_client::error::AppError;
use lms_client::models::*;

use common::TestServer;

fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|i| id(i).to_string()).collect()
}

#[tokio::test]
async fn course_lists_hit_scoped_paths() {
    let server = TestServer::start().await;
    let api = server.api();

    assert_eq!(api.courses().await.unwrap().len(), 3);
    let taught = api.courses_by_teacher("t1").await.unwrap();
    assert_eq!(ids(&taught, |c| c.id.as_str()), ["c1", "c2"]);
    let enrolled = api.student_courses("s2").await.unwrap();
    assert_eq!(ids(&enrolled, |c| c.id.as_str()), ["c1"]);
    let roster = api.course_students("c1").await.unwrap();
    assert_eq!(ids(&roster, |u| u.id.as_str()), ["s1", "s2"]);

    assert_eq!(
        server.fake.requests(),
        [
            "GET /api/courses",
            "GET /api/courses/teacher/t1",
            "GET /api/students/s2/courses",
            "GET /api/courses/c1/students",
        ]
    );
}

#[tokio::test]
async fn optional_filters_become_query_parameters() {
    let server = TestServer::start().await;
    let api = server.api();

    let day = api.attendance_by_course("c1", Some("2024-09-02")).await.unwrap();
    assert_eq!(day.len(), 2);
    let whole_course = api.attendance_by_course("c1", None).await.unwrap();
    assert_eq!(whole_course.len(), 3);
    let own = api.attendance_by_student("s1", Some("c1")).await.unwrap();
    assert_eq!(own.len(), 2);

    assert_eq!(
        server.fake.requests(),
        [
            "GET /api/attendance/course/c1?date=2024-09-02",
            "GET /api/attendance/course/c1",
            "GET /api/attendance/student/s1?courseId=c1",
        ]
    );
}

#[tokio::test]
async fn post_and_patch_send_camel_case_bodies() {
    let server = TestServer::start().await;
    let api = server.api();

    let mut request = NewCourseRequest::new("Chemistry", "CHEM101", "10", "Spring 2025");
    request.teacher_id = Some("t2".to_string());
    request.credits = 4;
    let course = api.create_course(&request).await.unwrap();
    assert_eq!(course.code, "CHEM101");
    assert_eq!(course.grade_level, "10");
    assert_eq!(course.teacher_id.as_deref(), Some("t2"));
    assert_eq!(course.credits, Some(4));
    assert_eq!(server.fake.db().courses.len(), 4);

    let graded = api
        .grade_submission(
            "sub2",
            &GradeSubmissionRequest {
                score: 42.0,
                feedback: "Nice work".to_string(),
                graded_by: "t1".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(graded.score, Some(42.0));
    assert!(graded.has_status(SubmissionStatus::Graded));

    assert_eq!(
        server.fake.requests(),
        ["POST /api/courses", "PATCH /api/submissions/sub2/grade"]
    );
}

#[tokio::test]
async fn empty_responses_are_accepted() {
    let server = TestServer::start().await;
    let api = server.api();

    api.delete_material("m1").await.unwrap();
    api.mark_notification_read("n1").await.unwrap();

    let db = server.fake.db();
    assert!(db.materials.is_empty());
    assert_eq!(db.notifications[0].is_read, Some(true));
}

#[tokio::test]
async fn roles_and_days_use_wire_names() {
    let server = TestServer::start().await;
    let api = server.api();

    let admins = api.users_by_role(Role::InstituteAdmin).await.unwrap();
    assert_eq!(ids(&admins, |u| u.id.as_str()), ["i1"]);
    let monday = api.schedules_by_day(Weekday::Monday).await.unwrap();
    assert_eq!(monday[0].course_id, "c1");

    assert_eq!(
        server.fake.requests(),
        ["GET /api/users/role/institute_admin", "GET /api/schedules/day/monday"]
    );
}

#[tokio::test]
async fn error_statuses_carry_the_server_message() {
    let server = TestServer::start().await;
    let api = server.api();

    let err = api
        .login(&LoginCredentials {
            username: "ada.lovelace".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    match &err {
        AppError::Api { status, message } => {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!err.is_retryable());
    assert_eq!(err.toast("Login failed").message, "Invalid credentials");

    let missing = api.course("a b").await.unwrap_err();
    assert!(matches!(missing, AppError::Api { status, .. } if status == StatusCode::NOT_FOUND));
    assert_eq!(server.fake.requests().last().unwrap(), "GET /api/courses/a%20b");

    server.fake.fail_next(StatusCode::SERVICE_UNAVAILABLE, "maintenance");
    let err = api.courses().await.unwrap_err();
    assert!(err.is_retryable());
    let toast = err.toast("Error loading courses");
    assert!(toast.retryable);
    assert_eq!(toast.to_string(), "Error loading courses: maintenance (retry)");

    assert_eq!(api.courses().await.unwrap().len(), 3);
}

#[tokio::test]
async fn unreachable_server_is_a_retryable_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let base = url::Url::parse(&format!("http://{}", addr)).unwrap();
    let api = lms_client::api::HttpLmsApi::with_client(client, base);

    let err = api.courses().await.unwrap_err();
    assert!(matches!(err, AppError::Http(_)));
    assert!(err.is_retryable());
    assert_eq!(
        err.toast("Error loading courses").message,
        "Unable to reach the server. Please try again."
    );
}
