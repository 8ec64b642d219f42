//! Role-based navigation and permissions.

use serde::Serialize;

use crate::error::AppError;
use crate::models::{Role, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub path: String,
}

impl NavItem {
    fn new(id: &'static str, label: &'static str, icon: &'static str, path: &str) -> Self {
        Self {
            id,
            label,
            icon,
            path: path.to_string(),
        }
    }

    pub fn is_active(&self, location: &str) -> bool {
        location == self.path
            || location
                .strip_prefix(self.path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissions {
    pub can_create_courses: bool,
    pub can_manage_users: bool,
    pub can_view_analytics: bool,
    pub can_manage_attendance: bool,
    pub can_grade_assignments: bool,
    pub can_manage_institution: bool,
}

pub fn permissions(role: Role) -> RolePermissions {
    let staff = role.is_staff();
    RolePermissions {
        can_create_courses: staff,
        can_manage_users: matches!(role, Role::Admin | Role::InstituteAdmin),
        can_view_analytics: staff,
        can_manage_attendance: staff,
        can_grade_assignments: staff,
        can_manage_institution: matches!(role, Role::InstituteAdmin),
    }
}

pub fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Student => "/dashboard/student",
        Role::Teacher => "/dashboard/teacher",
        Role::Admin => "/dashboard/admin",
        Role::InstituteAdmin => "/dashboard/institute-admin",
    }
}

pub fn navigation(role: Role) -> Vec<NavItem> {
    let mut items = vec![
        NavItem::new("dashboard", "Dashboard", "Home", dashboard_path(role)),
        NavItem::new("courses", "My Courses", "BookOpen", "/courses"),
        NavItem::new("schedule", "Schedule", "Calendar", "/schedule"),
    ];

    let specific: &[(&str, &str, &str, &str)] = match role {
        Role::Student => &[
            ("assignments", "Assignments", "FileText", "/assignments"),
            ("forums", "Forums", "MessageCircle", "/forums"),
        ],
        Role::Teacher => &[
            ("students", "Students", "Users", "/students"),
            ("attendance", "Attendance", "ClipboardCheck", "/attendance"),
            ("gradebook", "Grade Book", "GraduationCap", "/gradebook"),
            ("analytics", "Analytics", "BarChart3", "/analytics"),
            ("forums", "Forums", "MessageCircle", "/forums"),
        ],
        Role::Admin => &[
            ("users", "Users", "Users", "/users"),
            ("analytics", "Analytics", "BarChart3", "/analytics"),
            ("reports", "Reports", "FileText", "/reports"),
        ],
        Role::InstituteAdmin => &[
            ("users", "Users", "Users", "/users"),
            ("analytics", "Analytics", "BarChart3", "/analytics"),
            ("reports", "Reports", "FileText", "/reports"),
            ("settings", "Settings", "Settings", "/settings"),
        ],
    };

    items.extend(
        specific
            .iter()
            .map(|&(id, label, icon, path)| NavItem::new(id, label, icon, path)),
    );
    items
}

pub fn navigation_for(role: &str) -> Vec<NavItem> {
    role.parse::<Role>().map(navigation).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub id: &'static str,
    pub label: &'static str,
    pub path: &'static str,
}

pub fn quick_actions(role: Role) -> Vec<QuickAction> {
    if permissions(role).can_create_courses {
        vec![QuickAction {
            id: "create-course",
            label: "Create Course",
            path: "/courses/create",
        }]
    } else {
        Vec::new()
    }
}

pub fn can_access(user: Option<&User>, allowed: &[Role]) -> bool {
    user.is_some_and(|u| allowed.contains(&u.role))
}

pub fn ensure(user: &User, allowed: impl Fn(&RolePermissions) -> bool, message: &str) -> Result<(), AppError> {
    if allowed(&permissions(user.role)) {
        Ok(())
    } else {
        Err(AppError::Forbidden(message.to_string()))
    }
}
