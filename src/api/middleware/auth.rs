use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{api::state::AppState, domain::Role, error::AppError};

pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_cookie = jar.get("session").ok_or(AppError::Unauthorized)?;

    let viewer = state
        .service_context
        .auth_service
        .resolve_viewer(session_cookie.value())
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Insert the acting viewer into request extensions
    request.extensions_mut().insert(viewer);

    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_cookie = jar.get("session").ok_or(AppError::Unauthorized)?;

    let viewer = state
        .service_context
        .auth_service
        .resolve_viewer(session_cookie.value())
        .await?
        .ok_or(AppError::Unauthorized)?;

    if viewer.role != Role::Admin {
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(viewer);

    Ok(next.run(request).await)
}

pub async fn optional_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(session_cookie) = jar.get("session") {
        if let Ok(Some(viewer)) = state
            .service_context
            .auth_service
            .resolve_viewer(session_cookie.value())
            .await
        {
            request.extensions_mut().insert(viewer);
        }
    }

    next.run(request).await
}
