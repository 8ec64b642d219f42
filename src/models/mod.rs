pub mod assignment;
pub mod attendance;
pub mod course;
pub mod forum;
pub mod institution;
pub mod material;
pub mod notification;
pub mod schedule;
pub mod user;

pub use assignment::{
    Assignment, AssignmentType, GradeSubmissionRequest, NewAssignment, NewSubmission, Submission,
    SubmissionStatus,
};
pub use attendance::{Attendance, AttendanceStatus, NewAttendance};
pub use course::{Course, CourseEnrollment, EnrollmentStatus, NewCourseRequest};
pub use forum::{Forum, ForumPost, NewForum, NewForumPost};
pub use institution::{Institution, NewInstitution};
pub use material::{CourseMaterial, MaterialType, NewCourseMaterial};
pub use notification::{NewNotification, Notification, NotificationType};
pub use schedule::{NewSchedule, Schedule, SessionType, Weekday};
pub use user::{LoginCredentials, RegisterData, Role, User};
