use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    domain::{Role, Viewer},
    error::{AppError, Result},
};

pub mod session;

use session::{Session, SessionStore};

/// Claims carried by the identity provider's handoff token. `sub` is the
/// provider's opaque user identifier; `role` is its role claim, kept as
/// an untrusted string and parsed fail-closed downstream.
#[derive(Debug, Deserialize)]
pub struct HandoffClaims {
    pub sub: String,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: i64,
}

pub struct AuthService {
    session_store: SessionStore,
    handoff_secret: String,
}

impl AuthService {
    pub fn new(pool: SqlitePool, handoff_secret: String) -> Self {
        Self {
            session_store: SessionStore::new(pool),
            handoff_secret,
        }
    }

    /// Verify the identity provider's signed handoff assertion. Expiry is
    /// enforced as part of validation.
    pub fn verify_handoff(&self, token: &str) -> Result<HandoffClaims> {
        let data = decode::<HandoffClaims>(
            token,
            &DecodingKey::from_secret(self.handoff_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| AppError::Unauthorized)?;

        Ok(data.claims)
    }

    pub async fn create_session(
        &self,
        user_id: &str,
        role: &str,
        duration_hours: i64,
    ) -> Result<(Session, String)> {
        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(duration_hours);

        let session = self
            .session_store
            .create(user_id, role, &token, expires_at)
            .await?;

        Ok((session, token))
    }

    pub async fn validate_session(&self, token: &str) -> Result<Option<Session>> {
        self.session_store.find_by_token(token).await
    }

    /// Resolve a session token into the acting viewer. The stored role
    /// claim parses fail-closed, so a claim this code does not recognize
    /// yields `Role::Unknown` rather than an error.
    pub async fn resolve_viewer(&self, token: &str) -> Result<Option<Viewer>> {
        let session = self.session_store.find_by_token(token).await?;
        Ok(session.map(|s| Viewer::new(s.user_id, Role::from_claim(&s.role))))
    }

    pub async fn invalidate_session(&self, token: &str) -> Result<()> {
        self.session_store.delete_by_token(token).await
    }

    pub async fn invalidate_user_sessions(&self, user_id: &str) -> Result<()> {
        self.session_store.delete_by_user(user_id).await
    }

    pub async fn cleanup_expired_sessions(&self) -> Result<u64> {
        self.session_store.cleanup_expired().await
    }

    pub fn create_session_cookie(&self, token: &str, secure: bool) -> Cookie<'static> {
        Cookie::build(("session", token.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(secure)
            .max_age(cookie::time::Duration::hours(24))
            .build()
    }

    pub fn create_logout_cookie() -> Cookie<'static> {
        Cookie::build(("session", ""))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .max_age(cookie::time::Duration::seconds(0))
            .build()
    }
}

fn generate_token() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
