use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    api::state::AppState,
    domain::{visibility, Announcement, NewAnnouncement, Viewer},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub description: String,
    /// Publication timestamp; defaults to now when omitted.
    pub date: Option<DateTime<Utc>>,
    /// Restricts the announcement to one class's roster when set.
    pub class_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub class_id: Option<Option<i64>>,
}

#[derive(Debug, Deserialize)]
pub struct ListAnnouncementsQuery {
    pub limit: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListAnnouncementsQuery>,
    viewer: Option<Extension<Viewer>>,
) -> Result<Json<Vec<Announcement>>> {
    let viewer = viewer
        .map(|Extension(v)| v)
        .unwrap_or_else(Viewer::anonymous);
    let limit = params
        .limit
        .unwrap_or(visibility::DEFAULT_PAGE_SIZE)
        .min(100);

    let announcements = state
        .service_context
        .announcement_service
        .visible_to(&viewer, limit)
        .await?;

    Ok(Json(announcements))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    viewer: Option<Extension<Viewer>>,
) -> Result<Json<Announcement>> {
    let viewer = viewer
        .map(|Extension(v)| v)
        .unwrap_or_else(Viewer::anonymous);

    let announcement = state
        .service_context
        .announcement_service
        .find_visible(&viewer, id)
        .await?
        .ok_or(AppError::NotFound("Announcement not found".to_string()))?;

    Ok(Json(announcement))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(_viewer): Extension<Viewer>,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>)> {
    // Validate title and description
    if request.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Description must not be empty".to_string(),
        ));
    }

    let announcement = state
        .service_context
        .announcement_repo
        .create(NewAnnouncement {
            title: request.title,
            description: request.description,
            date: request.date.unwrap_or_else(Utc::now),
            class_id: request.class_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(_viewer): Extension<Viewer>,
    Json(request): Json<UpdateAnnouncementRequest>,
) -> Result<Json<Announcement>> {
    // Get the existing announcement
    let mut announcement = state
        .service_context
        .announcement_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Announcement not found".to_string()))?;

    // Apply updates
    if let Some(title) = request.title {
        if title.trim().is_empty() {
            return Err(AppError::BadRequest("Title must not be empty".to_string()));
        }
        announcement.title = title;
    }
    if let Some(description) = request.description {
        announcement.description = description;
    }
    if let Some(date) = request.date {
        announcement.date = date;
    }
    if let Some(class_id) = request.class_id {
        announcement.class_id = class_id;
    }

    announcement.updated_at = Utc::now();

    let updated = state
        .service_context
        .announcement_repo
        .update(id, announcement)
        .await?;

    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(_viewer): Extension<Viewer>,
) -> Result<StatusCode> {
    state
        .service_context
        .announcement_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Announcement not found".to_string()))?;

    state.service_context.announcement_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
