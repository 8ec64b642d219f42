use std::collections::HashMap;

use clap::{Args, Subcommand};
use serde::Serialize;

use lms_client::access;
use lms_client::error::{AppError, Toast};
use lms_client::models::*;
use lms_client::pages::attendance::{parse_date, today};
use lms_client::pages::*;
use lms_client::state::AppState;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the user
    Login {
        username: String,
        #[arg(long, env = "LMS_PASSWORD")]
        password: String,
    },
    /// Create an account and sign in
    Register(RegisterArgs),
    /// Forget the signed-in user
    Logout,
    /// Show the signed-in user's profile
    Whoami,
    /// Sidebar entries for a role, or for the signed-in user
    Nav { role: Option<String> },
    /// The role's dashboard
    Dashboard,
    #[command(subcommand)]
    Courses(CoursesCommand),
    #[command(subcommand)]
    Assignments(AssignmentsCommand),
    #[command(subcommand)]
    Attendance(AttendanceCommand),
    /// Grade book of a course
    Gradebook { course_id: String },
    #[command(subcommand)]
    Forums(ForumsCommand),
    /// Timetable for a day, or the whole week
    Schedule {
        #[arg(long)]
        day: Option<Weekday>,
    },
    #[command(subcommand)]
    Notifications(NotificationsCommand),
    #[command(subcommand)]
    Materials(MaterialsCommand),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long, env = "LMS_PASSWORD")]
    password: String,
    /// Defaults to the password
    #[arg(long)]
    confirm_password: Option<String>,
    #[arg(long, default_value = "student")]
    role: Role,
}

#[derive(Subcommand, Debug)]
pub enum CoursesCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        grade_level: Option<String>,
        #[arg(long)]
        semester: Option<String>,
    },
    Show { course_id: String },
    Create {
        name: String,
        code: String,
        #[arg(long)]
        grade_level: String,
        #[arg(long)]
        semester: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value_t = 3)]
        credits: u8,
        #[arg(long)]
        teacher_id: Option<String>,
        #[arg(long)]
        institution_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AssignmentsCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        course_id: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    Submit {
        assignment_id: String,
        #[arg(long)]
        content: Option<String>,
    },
    Create {
        course_id: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        max_score: Option<f64>,
        #[arg(long)]
        due_date: Option<String>,
    },
    Grade {
        assignment_id: String,
        submission_id: String,
        score: f64,
        #[arg(long, default_value = "")]
        feedback: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AttendanceCommand {
    Roster {
        course_id: String,
        #[arg(long)]
        date: Option<String>,
    },
    Mark {
        course_id: String,
        student_id: String,
        status: AttendanceStatus,
        #[arg(long)]
        date: Option<String>,
    },
    /// A student's history; defaults to the signed-in user
    History {
        #[arg(long)]
        student_id: Option<String>,
        #[arg(long)]
        course_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ForumsCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        course_id: Option<String>,
    },
    Posts { forum_id: String },
    Create {
        course_id: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    Post {
        forum_id: String,
        content: String,
        #[arg(long)]
        reply_to: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotificationsCommand {
    List,
    Read { notification_id: String },
}

#[derive(Subcommand, Debug)]
pub enum MaterialsCommand {
    Add {
        course_id: String,
        title: String,
        #[arg(long, default_value = "document")]
        kind: MaterialType,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete { course_id: String, material_id: String },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Register(_) => "register",
            Command::Logout => "logout",
            Command::Whoami => "whoami",
            Command::Nav { .. } => "nav",
            Command::Dashboard => "dashboard",
            Command::Courses(_) => "courses",
            Command::Assignments(_) => "assignments",
            Command::Attendance(_) => "attendance",
            Command::Gradebook { .. } => "gradebook",
            Command::Forums(_) => "forums",
            Command::Schedule { .. } => "schedule",
            Command::Notifications(_) => "notifications",
            Command::Materials(_) => "materials",
        }
    }

    pub fn failure_title(&self) -> &'static str {
        match self {
            Command::Login { .. } => "Login failed",
            Command::Register(_) => "Registration failed",
            Command::Dashboard => "Error loading dashboard",
            Command::Courses(CoursesCommand::Create { .. }) => "Error creating course",
            Command::Courses(_) => "Error loading courses",
            Command::Assignments(AssignmentsCommand::Submit { .. }) => "Error submitting assignment",
            Command::Assignments(AssignmentsCommand::Grade { .. }) => "Error saving grade",
            Command::Assignments(_) => "Error loading assignments",
            Command::Attendance(AttendanceCommand::Mark { .. }) => "Failed to mark attendance",
            Command::Attendance(_) => "Error loading attendance",
            Command::Gradebook { .. } => "Error loading grade book",
            Command::Forums(_) => "Error loading forums",
            Command::Schedule { .. } => "Error loading schedule",
            Command::Notifications(_) => "Error loading notifications",
            Command::Materials(_) => "Error updating materials",
            Command::Logout | Command::Whoami | Command::Nav { .. } => "Error",
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_toast(toast: Toast) {
    println!("{}", toast);
}

pub async fn run(state: &AppState, command: &Command) -> Result<(), AppError> {
    match command {
        Command::Login { username, password } => {
            let credentials = LoginCredentials {
                username: username.clone(),
                password: password.clone(),
            };
            match state.session.login(&credentials).await? {
                Some(user) => print_toast(Toast::success(
                    "Welcome back!",
                    format!("Signed in as {}", user.full_name()),
                )),
                None => return Err(AppError::NotAuthenticated),
            }
            Ok(())
        }
        Command::Register(args) => {
            let data = RegisterData {
                username: args.username.clone(),
                email: args.email.clone(),
                password: args.password.clone(),
                confirm_password: args
                    .confirm_password
                    .clone()
                    .unwrap_or_else(|| args.password.clone()),
                first_name: args.first_name.clone(),
                last_name: args.last_name.clone(),
                role: args.role,
                avatar: None,
            };
            match state.session.register(&data).await? {
                Some(user) => print_toast(Toast::success(
                    "Account created",
                    format!("Welcome, {}", user.full_name()),
                )),
                None => return Err(AppError::NotAuthenticated),
            }
            Ok(())
        }
        Command::Logout => {
            state.session.logout().await?;
            print_toast(Toast::success("Signed out", "See you next time"));
            Ok(())
        }
        Command::Whoami => print_json(&ProfilePage::new(state.clone()).load().await?),
        Command::Nav { role } => {
            let items = match role {
                Some(role) => access::navigation_for(role),
                None => access::navigation(state.session.require_user().await?.role),
            };
            for item in items {
                println!("{:<12} {:<14} {}", item.id, item.label, item.path);
            }
            Ok(())
        }
        Command::Dashboard => {
            let user = state.session.require_user().await?;
            print_json(&DashboardPage::new(state.clone()).load(&user).await?)
        }
        Command::Courses(cmd) => run_courses(state, cmd).await,
        Command::Assignments(cmd) => run_assignments(state, cmd).await,
        Command::Attendance(cmd) => run_attendance(state, cmd).await,
        Command::Gradebook { course_id } => {
            let user = state.session.require_user().await?;
            let book = GradebookPage::new(state.clone()).load(&user, course_id).await?;
            print_json(&serde_json::json!({
                "summary": book.summary(),
                "progress": book.progress(),
                "gradebook": book,
            }))
        }
        Command::Forums(cmd) => run_forums(state, cmd).await,
        Command::Schedule { day } => {
            let user = state.session.require_user().await?;
            let page = SchedulePage::new(state.clone());
            let view = match day {
                Some(day) => page.day(&user, *day).await?,
                None => page.week(&user).await?,
            };
            for day in &view.days {
                for slot in view.grid(*day).into_iter().filter(|s| s.schedule.is_some()) {
                    let course = slot
                        .course
                        .map(|c| format!("{} {}", c.code, c.name))
                        .or_else(|| slot.schedule.map(|s| s.course_id))
                        .unwrap_or_default();
                    println!("{:<10} {} {}", day, slot.time, course);
                }
            }
            Ok(())
        }
        Command::Notifications(cmd) => {
            let user = state.session.require_user().await?;
            let page = NotificationsPage::new(state.clone());
            match cmd {
                NotificationsCommand::List => print_json(&page.list(&user).await?),
                NotificationsCommand::Read { notification_id } => {
                    page.mark_read(&user, notification_id).await?;
                    print_toast(Toast::success("Notification", "Marked as read"));
                    Ok(())
                }
            }
        }
        Command::Materials(cmd) => {
            let user = state.session.require_user().await?;
            let page = CourseDetailsPage::new(state.clone());
            match cmd {
                MaterialsCommand::Add {
                    course_id,
                    title,
                    kind,
                    url,
                    description,
                } => {
                    let material = NewCourseMaterial {
                        course_id: course_id.clone(),
                        title: title.clone(),
                        description: description.clone(),
                        kind: *kind,
                        url: url.clone(),
                        file_size: None,
                        uploaded_by: None,
                        is_active: true,
                    };
                    print_json(&page.add_material(&user, material).await?)
                }
                MaterialsCommand::Delete {
                    course_id,
                    material_id,
                } => {
                    page.delete_material(&user, course_id, material_id).await?;
                    print_toast(Toast::success("Material deleted", material_id.clone()));
                    Ok(())
                }
            }
        }
    }
}

async fn run_courses(state: &AppState, cmd: &CoursesCommand) -> Result<(), AppError> {
    let user = state.session.require_user().await?;
    match cmd {
        CoursesCommand::List {
            search,
            grade_level,
            semester,
        } => {
            let filter = CourseFilter {
                search: search.clone(),
                grade_level: grade_level.clone(),
                semester: semester.clone(),
            };
            print_json(&CoursesPage::new(state.clone()).list(&user, &filter).await?)
        }
        CoursesCommand::Show { course_id } => {
            print_json(&CourseDetailsPage::new(state.clone()).load(&user, course_id).await?)
        }
        CoursesCommand::Create {
            name,
            code,
            grade_level,
            semester,
            description,
            credits,
            teacher_id,
            institution_id,
        } => {
            let mut request = NewCourseRequest::new(name, code, grade_level, semester);
            request.description = description.clone();
            request.credits = *credits;
            request.teacher_id = teacher_id.clone();
            request.institution_id = institution_id.clone();

            let course = CoursesPage::new(state.clone()).create(&user, request).await?;
            print_toast(Toast::success(
                "Course created",
                format!("{} ({}) is ready", course.name, course.id),
            ));
            Ok(())
        }
    }
}

async fn run_assignments(state: &AppState, cmd: &AssignmentsCommand) -> Result<(), AppError> {
    let user = state.session.require_user().await?;
    let page = AssignmentsPage::new(state.clone());
    match cmd {
        AssignmentsCommand::List {
            search,
            course_id,
            status,
        } => {
            let filter = AssignmentFilter {
                search: search.clone(),
                course_id: course_id.clone(),
                status: status.clone(),
            };
            print_json(&page.list(&user, &filter).await?)
        }
        AssignmentsCommand::Submit {
            assignment_id,
            content,
        } => {
            let submission = page.submit(&user, assignment_id, content.clone()).await?;
            print_toast(Toast::success(
                "Assignment submitted",
                format!("Submission {}", submission.id),
            ));
            Ok(())
        }
        AssignmentsCommand::Create {
            course_id,
            title,
            description,
            max_score,
            due_date,
        } => {
            let assignment = NewAssignment {
                course_id: course_id.clone(),
                title: title.clone(),
                description: description.clone(),
                kind: None,
                max_score: *max_score,
                due_date: due_date.clone(),
                created_by: None,
                is_active: true,
            };
            print_json(&page.create(&user, assignment).await?)
        }
        AssignmentsCommand::Grade {
            assignment_id,
            submission_id,
            score,
            feedback,
        } => {
            let graded = page
                .grade(&user, assignment_id, submission_id, *score, feedback.clone())
                .await?;
            print_json(&graded)
        }
    }
}

async fn run_attendance(state: &AppState, cmd: &AttendanceCommand) -> Result<(), AppError> {
    let user = state.session.require_user().await?;
    let page = AttendancePage::new(state.clone());
    match cmd {
        AttendanceCommand::Roster { course_id, date } => {
            let date = date.clone().unwrap_or_else(today);
            let roster = page.roster(&user, course_id, &date, &HashMap::new()).await?;
            for entry in &roster.entries {
                let mark = if entry.recorded { "" } else { " *" };
                println!("{:<24} {}{}", entry.student.full_name(), entry.status, mark);
            }
            println!(
                "{} students, {}% present",
                roster.stats.total,
                roster.stats.rate()
            );
            Ok(())
        }
        AttendanceCommand::Mark {
            course_id,
            student_id,
            status,
            date,
        } => {
            let date = date.clone().unwrap_or_else(today);
            parse_date(&date)?;
            page.mark(&user, course_id, &date, student_id, *status).await?;
            print_toast(Toast::success(
                "Attendance marked",
                format!("{} marked {} on {}", student_id, status, date),
            ));
            Ok(())
        }
        AttendanceCommand::History {
            student_id,
            course_id,
        } => {
            let student_id = student_id.clone().unwrap_or_else(|| user.id.clone());
            let (records, stats) = page
                .history(&user, &student_id, course_id.as_deref())
                .await?;
            print_json(&serde_json::json!({ "records": records, "stats": stats }))
        }
    }
}

async fn run_forums(state: &AppState, cmd: &ForumsCommand) -> Result<(), AppError> {
    let user = state.session.require_user().await?;
    let page = ForumsPage::new(state.clone());
    match cmd {
        ForumsCommand::List { search, course_id } => {
            let filter = ForumFilter {
                search: search.clone(),
                course_id: course_id.clone(),
            };
            print_json(&page.list(&user, &filter).await?)
        }
        ForumsCommand::Posts { forum_id } => print_json(&page.threads(forum_id).await?),
        ForumsCommand::Create {
            course_id,
            title,
            description,
        } => print_json(
            &page
                .create_forum(&user, course_id, title, description.clone())
                .await?,
        ),
        ForumsCommand::Post {
            forum_id,
            content,
            reply_to,
        } => print_json(&page.post(&user, forum_id, content, reply_to.clone()).await?),
    }
}
