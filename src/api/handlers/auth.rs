use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    api::state::AppState,
    auth::AuthService,
    domain::{Role, Viewer},
    error::Result,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// The signed assertion minted by the identity provider once its own
    /// sign-in flow has completed.
    pub handoff_token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub role: Role,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let auth_service = &state.service_context.auth_service;

    let claims = auth_service.verify_handoff(&req.handoff_token)?;

    // A missing role claim is stored as-is and resolves to Unknown; such
    // viewers still see unscoped announcements.
    let role_claim = claims.role.unwrap_or_default();

    let (_session, token) = auth_service
        .create_session(
            &claims.sub,
            &role_claim,
            state.settings.auth.session_duration_hours,
        )
        .await?;

    let cookie = auth_service.create_session_cookie(&token, false);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user_id: claims.sub,
            role: Role::from_claim(&role_claim),
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(session_cookie) = jar.get("session") {
        // Invalidate session in database
        let _ = state
            .service_context
            .auth_service
            .invalidate_session(session_cookie.value())
            .await;
    }

    // Remove cookie
    let jar = jar.add(AuthService::create_logout_cookie());

    Ok((jar, StatusCode::NO_CONTENT))
}

pub async fn me(Extension(viewer): Extension<Viewer>) -> Json<Viewer> {
    Json(viewer)
}
