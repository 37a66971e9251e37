use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chalkboard::{
    api,
    auth::AuthService,
    config::Settings,
    domain::{NewAnnouncement, NewClass, NewStudent, Role, Viewer},
    repository::{SqliteAnnouncementRepository, SqliteClassRepository},
    service::ServiceContext,
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tower::ServiceExt;

async fn setup() -> anyhow::Result<Arc<ServiceContext>> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let auth_service = Arc::new(AuthService::new(pool.clone(), "test-secret".to_string()));
    let announcement_repo = Arc::new(SqliteAnnouncementRepository::new(pool.clone()));
    let class_repo = Arc::new(SqliteClassRepository::new(pool.clone()));

    Ok(Arc::new(ServiceContext::new(
        announcement_repo,
        class_repo,
        auth_service,
        pool,
    )))
}

/// One class taught by T1 with students S1 (parent P1) and S2 (parent
/// P2), one global announcement, one scoped to the class.
async fn seed_school(context: &ServiceContext) -> anyhow::Result<i64> {
    let class = context
        .class_repo
        .create(NewClass {
            name: "Class 1A".to_string(),
            teacher_id: "T1".to_string(),
        })
        .await?;

    context
        .class_repo
        .enroll(
            class.id,
            NewStudent {
                id: "S1".to_string(),
                full_name: "Sam Osei".to_string(),
                parent_id: "P1".to_string(),
            },
        )
        .await?;
    context
        .class_repo
        .enroll(
            class.id,
            NewStudent {
                id: "S2".to_string(),
                full_name: "Ida Berg".to_string(),
                parent_id: "P2".to_string(),
            },
        )
        .await?;

    context
        .announcement_repo
        .create(NewAnnouncement {
            title: "Term dates".to_string(),
            description: "Term starts Monday.".to_string(),
            date: Utc::now(),
            class_id: None,
        })
        .await?;
    context
        .announcement_repo
        .create(NewAnnouncement {
            title: "Class 1A field trip".to_string(),
            description: "Permission slips due Thursday.".to_string(),
            date: Utc::now() - Duration::hours(1),
            class_id: Some(class.id),
        })
        .await?;

    Ok(class.id)
}

#[tokio::test]
async fn test_visibility_by_role() -> anyhow::Result<()> {
    let context = setup().await?;
    seed_school(&context).await?;

    let service = &context.announcement_service;

    let admin = Viewer::new("head_1", Role::Admin);
    assert_eq!(service.visible_to(&admin, 10).await?.len(), 2);

    let teacher = Viewer::new("T1", Role::Teacher);
    assert_eq!(service.visible_to(&teacher, 10).await?.len(), 2);

    let other_teacher = Viewer::new("T2", Role::Teacher);
    assert_eq!(service.visible_to(&other_teacher, 10).await?.len(), 1);

    let student = Viewer::new("S1", Role::Student);
    assert_eq!(service.visible_to(&student, 10).await?.len(), 2);

    let parent = Viewer::new("P2", Role::Parent);
    assert_eq!(service.visible_to(&parent, 10).await?.len(), 2);

    let unrelated_parent = Viewer::new("P9", Role::Parent);
    assert_eq!(service.visible_to(&unrelated_parent, 10).await?.len(), 1);

    let anonymous = Viewer::anonymous();
    let visible = service.visible_to(&anonymous, 10).await?;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Term dates");

    Ok(())
}

#[tokio::test]
async fn test_find_visible_is_fail_closed() -> anyhow::Result<()> {
    let context = setup().await?;
    let class_id = seed_school(&context).await?;

    let scoped = context
        .announcement_repo
        .list_all()
        .await?
        .into_iter()
        .find(|a| a.class_id == Some(class_id))
        .expect("scoped announcement exists");

    let service = &context.announcement_service;

    let teacher = Viewer::new("T1", Role::Teacher);
    assert!(service.find_visible(&teacher, scoped.id).await?.is_some());

    // A student from another class sees nothing, same as a missing id.
    let stranger = Viewer::new("S9", Role::Student);
    assert!(service.find_visible(&stranger, scoped.id).await?.is_none());
    assert!(service.find_visible(&teacher, 12345).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_session_lifecycle() -> anyhow::Result<()> {
    let context = setup().await?;
    let auth = &context.auth_service;

    let (_session, token) = auth.create_session("T1", "teacher", 24).await?;

    let viewer = auth.resolve_viewer(&token).await?.expect("session resolves");
    assert_eq!(viewer.id, "T1");
    assert_eq!(viewer.role, Role::Teacher);

    // Unrecognized role claims resolve to Unknown rather than failing.
    let (_s, guest_token) = auth.create_session("G1", "guest", 24).await?;
    let guest = auth
        .resolve_viewer(&guest_token)
        .await?
        .expect("session resolves");
    assert_eq!(guest.role, Role::Unknown);

    auth.invalidate_session(&token).await?;
    assert!(auth.resolve_viewer(&token).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_list_endpoint_scopes_by_session() -> anyhow::Result<()> {
    let context = setup().await?;
    seed_school(&context).await?;

    let (_session, token) = context
        .auth_service
        .create_session("T1", "teacher", 24)
        .await?;

    let app = api::create_app(context.clone(), Arc::new(Settings::default()));

    // Anonymous request: only the global announcement.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/announcements?limit=10")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let announcements: Vec<serde_json::Value> = serde_json::from_slice(&body)?;
    assert_eq!(announcements.len(), 1);

    // The teacher's session sees the class-scoped announcement too.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/announcements?limit=10")
                .header(header::COOKIE, format!("session={}", token))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let announcements: Vec<serde_json::Value> = serde_json::from_slice(&body)?;
    assert_eq!(announcements.len(), 2);

    // Non-positive page sizes are rejected.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/announcements?limit=0")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn test_login_exchanges_handoff_for_session() -> anyhow::Result<()> {
    let context = setup().await?;
    seed_school(&context).await?;

    let app = api::create_app(context.clone(), Arc::new(Settings::default()));

    // A handoff assertion as the identity provider would sign it.
    let claims = serde_json::json!({
        "sub": "T1",
        "role": "teacher",
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
    });
    let handoff = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
    )?;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({ "handoff_token": handoff }).to_string(),
                ))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set")
        .to_str()?
        .to_string();
    let session_pair = cookie.split(';').next().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::COOKIE, session_pair)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let me: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(me["id"], "T1");
    assert_eq!(me["role"], "teacher");

    Ok(())
}
