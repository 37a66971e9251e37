use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Publication timestamp; the ordering key for every listing.
    pub date: DateTime<Utc>,
    /// None means the announcement is unscoped and visible to everyone.
    pub class_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub class_id: Option<i64>,
}
