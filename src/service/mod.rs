pub mod announcement_service;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::AuthService;
use crate::repository::*;
use announcement_service::AnnouncementService;

pub struct ServiceContext {
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub class_repo: Arc<dyn ClassRepository>,
    pub announcement_service: Arc<AnnouncementService>,
    pub auth_service: Arc<AuthService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        announcement_repo: Arc<dyn AnnouncementRepository>,
        class_repo: Arc<dyn ClassRepository>,
        auth_service: Arc<AuthService>,
        db_pool: SqlitePool,
    ) -> Self {
        let announcement_service = Arc::new(AnnouncementService::new(
            announcement_repo.clone(),
            class_repo.clone(),
        ));

        Self {
            announcement_repo,
            class_repo,
            announcement_service,
            auth_service,
            db_pool,
        }
    }
}
