use async_trait::async_trait;

use crate::domain::*;
use crate::error::Result;

pub mod announcement_repository;
pub mod class_repository;

pub use announcement_repository::SqliteAnnouncementRepository;
pub use class_repository::SqliteClassRepository;

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Announcement>>;
    /// The full candidate set for visibility filtering, newest first.
    async fn list_all(&self) -> Result<Vec<Announcement>>;
    async fn update(&self, id: i64, announcement: Announcement) -> Result<Announcement>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn create(&self, class: NewClass) -> Result<Class>;
    async fn enroll(&self, class_id: i64, student: NewStudent) -> Result<()>;
    async fn find_roster(&self, class_id: i64) -> Result<Option<ClassRoster>>;
    /// Resolve rosters for the given class ids. Ids that do not resolve
    /// are simply absent from the result; the visibility filter treats
    /// absence as denial.
    async fn rosters_for(&self, class_ids: &[i64]) -> Result<RosterDirectory>;
}
