use std::sync::Arc;
use std::time::Duration;

use crate::{
    cache::QueryCache,
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: Arc<AppConfig>,
    pub cache: QueryCache,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        let orm = orm_from_pool(&pool);
        let cache = QueryCache::new(Duration::from_secs(config.cache_ttl_secs));
        Self {
            pool,
            orm,
            config: Arc::new(config),
            cache,
        }
    }
}
