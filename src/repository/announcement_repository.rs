use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{Announcement, NewAnnouncement},
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

#[derive(FromRow)]
struct AnnouncementRow {
    id: i64,
    title: String,
    description: String,
    date: NaiveDateTime,
    class_id: Option<i64>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_announcement(row: AnnouncementRow) -> Announcement {
        Announcement {
            id: row.id,
            title: row.title,
            description: row.description,
            date: DateTime::from_naive_utc_and_offset(row.date, Utc),
            class_id: row.class_id,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        }
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let date_naive = announcement.date.naive_utc();
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO announcements (title, description, date, class_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&announcement.title)
        .bind(&announcement.description)
        .bind(date_naive)
        .bind(announcement.class_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created announcement".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, description, date, class_id, created_at, updated_at
            FROM announcements
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Self::row_to_announcement))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, description, date, class_id, created_at, updated_at
            FROM announcements
            ORDER BY date DESC, id ASC
            LIMIT ? OFFSET ?
            "#
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_announcement).collect())
    }

    async fn list_all(&self) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, description, date, class_id, created_at, updated_at
            FROM announcements
            ORDER BY date DESC, id ASC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_announcement).collect())
    }

    async fn update(&self, id: i64, announcement: Announcement) -> Result<Announcement> {
        let date_naive = announcement.date.naive_utc();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE announcements
            SET title = ?, description = ?, date = ?, class_id = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&announcement.title)
        .bind(&announcement.description)
        .bind(date_naive)
        .bind(announcement.class_id)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated announcement".to_string())
        })
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
