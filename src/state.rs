use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, create_orm_conn},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub auth: Arc<AuthSettings>,
}

/// Token signing parameters shared by login and the bearer extractor.
#[derive(Debug)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        Self::with_auth(
            pool,
            AuthSettings {
                jwt_secret: config.jwt_secret.clone(),
                jwt_ttl_hours: config.jwt_ttl_hours,
            },
        )
    }

    pub fn with_auth(pool: DbPool, auth: AuthSettings) -> Self {
        let orm = create_orm_conn(&pool);
        Self {
            pool,
            orm,
            auth: Arc::new(auth),
        }
    }
}
