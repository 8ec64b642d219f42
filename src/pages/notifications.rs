use serde::Serialize;
use tracing::debug;

use crate::access;
use crate::error::AppError;
use crate::models::*;
use crate::queries::{self, keys};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsView {
    pub notifications: Vec<Notification>,
    pub unread: usize,
}

impl NotificationsView {
    /// Newest first; undated notifications go last.
    pub fn build(mut notifications: Vec<Notification>) -> Self {
        notifications.sort_by(|a, b| match (&a.created_at, &b.created_at) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self {
            unread: notifications.iter().filter(|n| !n.read()).count(),
            notifications,
        }
    }
}

pub struct NotificationsPage {
    state: AppState,
}

impl NotificationsPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, user: &User) -> Result<NotificationsView, AppError> {
        let notifications = queries::fetch_notifications(&self.state, &user.id).await?;
        Ok(NotificationsView::build(notifications))
    }

    pub async fn mark_read(&self, user: &User, notification_id: &str) -> Result<(), AppError> {
        self.state.api.mark_notification_read(notification_id).await?;
        debug!("notification {} marked read", notification_id);
        self.state.cache.invalidate(&keys::notifications(&user.id)).await;
        Ok(())
    }

    pub async fn send(&self, user: &User, notification: NewNotification) -> Result<Notification, AppError> {
        access::ensure(
            user,
            |p| p.can_create_courses,
            "You don't have permission to send notifications.",
        )?;
        if notification.title.trim().is_empty() {
            return Err(AppError::Validation("Notification title is required".to_string()));
        }
        let created = self.state.api.create_notification(&notification).await?;
        self.state
            .cache
            .invalidate(&keys::notifications(&notification.user_id))
            .await;
        Ok(created)
    }
}
