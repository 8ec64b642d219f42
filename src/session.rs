use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::LmsApi;
use crate::cache::QueryCache;
use crate::error::AppError;
use crate::models::{LoginCredentials, RegisterData, User};

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file means signed out. An unreadable record is discarded.
    pub async fn load(&self) -> Result<Option<User>, AppError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("discarding stored session {}: {}", self.path.display(), e);
                self.clear().await?;
                Ok(None)
            }
        }
    }

    pub async fn save(&self, user: &User) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(user)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Clone)]
pub struct Session {
    api: Arc<dyn LmsApi>,
    store: Arc<SessionStore>,
    cache: QueryCache,
    user: Arc<RwLock<Option<User>>>,
}

impl Session {
    pub fn new(api: Arc<dyn LmsApi>, store: SessionStore, cache: QueryCache) -> Self {
        Self {
            api,
            store: Arc::new(store),
            cache,
            user: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn restore(&self) -> Result<Option<User>, AppError> {
        let stored = self.store.load().await?;
        *self.user.write().await = stored.clone();
        Ok(stored)
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Option<User>, AppError> {
        credentials.validate()?;
        let response = self.api.login(credentials).await?;
        self.adopt(response.user).await
    }

    pub async fn register(&self, data: &RegisterData) -> Result<Option<User>, AppError> {
        data.validate()?;
        let response = self.api.register(data).await?;
        self.adopt(response.user).await
    }

    async fn adopt(&self, user: Option<User>) -> Result<Option<User>, AppError> {
        let Some(user) = user else {
            warn!("auth response carried no user");
            return Ok(None);
        };
        self.store.save(&user).await?;
        info!("signed in as {} ({})", user.username, user.role);
        *self.user.write().await = Some(user.clone());
        Ok(Some(user))
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        *self.user.write().await = None;
        self.cache.clear().await;
        self.store.clear().await?;
        info!("signed out");
        Ok(())
    }

    pub async fn current(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn require_user(&self) -> Result<User, AppError> {
        self.current().await.ok_or(AppError::NotAuthenticated)
    }
}
