pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::services::{
    attempt::AttemptService, attempt_store::AttemptStore, content::ContentService,
    results::ResultService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub content_service: ContentService,
    pub result_service: ResultService,
    pub attempt_store: Arc<AttemptStore>,
    pub attempt_service: AttemptService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let content_service = ContentService::new(pool.clone());
        let result_service = ResultService::new(pool.clone());
        let attempt_store = Arc::new(AttemptStore::new(Duration::from_secs(
            config.attempt_ttl_minutes * 60,
        )));
        let attempt_service = AttemptService::new(
            content_service.clone(),
            result_service.clone(),
            attempt_store.clone(),
        );

        Self {
            pool,
            content_service,
            result_service,
            attempt_store,
            attempt_service,
        }
    }
}
