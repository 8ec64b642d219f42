use serde::Serialize;

use crate::access::{self, NavItem, RolePermissions};
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user: User,
    pub full_name: String,
    pub initials: String,
    pub role_label: &'static str,
    pub permissions: RolePermissions,
    pub navigation: Vec<NavItem>,
    pub dashboard_path: &'static str,
}

impl Profile {
    pub fn of(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            initials: user.initials(),
            role_label: user.role.label(),
            permissions: access::permissions(user.role),
            navigation: access::navigation(user.role),
            dashboard_path: access::dashboard_path(user.role),
            user,
        }
    }
}

pub struct ProfilePage {
    state: AppState,
}

impl ProfilePage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn load(&self) -> Result<Profile, AppError> {
        let user = self.state.session.require_user().await?;
        Ok(Profile::of(user))
    }
}
