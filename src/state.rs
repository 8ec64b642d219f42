use std::sync::Arc;

use crate::api::{HttpLmsApi, LmsApi};
use crate::cache::QueryCache;
use crate::config::Config;
use crate::error::AppError;
use crate::session::{Session, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn LmsApi>,
    pub cache: QueryCache,
    pub session: Session,
}

impl AppState {
    pub fn new(api: Arc<dyn LmsApi>, config: &Config) -> Self {
        let cache = QueryCache::new(config.cache_ttl);
        let session = Session::new(
            api.clone(),
            SessionStore::new(config.session_file.clone()),
            cache.clone(),
        );
        Self { api, cache, session }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let api = Arc::new(HttpLmsApi::new(config)?);
        Ok(Self::new(api, config))
    }
}
