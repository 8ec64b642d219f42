pub mod assignments;
pub mod attendance;
pub mod course_details;
pub mod courses;
pub mod dashboard;
pub mod forums;
pub mod gradebook;
pub mod notifications;
pub mod profile;
pub mod schedule;

pub use assignments::{AssignmentFilter, AssignmentStatus, AssignmentsPage, AssignmentsView};
pub use attendance::{AttendancePage, AttendanceRoster, AttendanceStats, RosterEntry};
pub use course_details::{CourseDetails, CourseDetailsPage};
pub use courses::{CourseFilter, CoursesPage, CoursesView};
pub use dashboard::{
    AdminDashboard, Dashboard, DashboardPage, InstituteAdminDashboard, StudentDashboard,
    TeacherDashboard,
};
pub use forums::{ForumFilter, ForumThread, ForumWithCourse, ForumsPage};
pub use gradebook::{AssignmentProgress, Gradebook, GradebookPage, GradebookSummary};
pub use notifications::{NotificationsPage, NotificationsView};
pub use profile::{Profile, ProfilePage};
pub use schedule::{SchedulePage, ScheduleSlot, ScheduleView, TIME_SLOTS};

pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

pub fn rounded_mean(values: impl IntoIterator<Item = f64>) -> Option<u32> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some((sum / count as f64).round().max(0.0) as u32)
    }
}

pub fn matches_search(haystack: &str, term: &str) -> bool {
    term.is_empty() || haystack.to_lowercase().contains(&term.to_lowercase())
}

/// A select filter where `None` and `"all"` both mean "no filter".
pub fn matches_choice(value: Option<&str>, choice: Option<&str>) -> bool {
    match choice {
        None | Some("all") => true,
        Some(wanted) => value == Some(wanted),
    }
}
