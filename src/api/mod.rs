pub mod handlers;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        .route("/api", get(handlers::root::api_info))
        // Auth routes
        .nest("/auth", auth_routes(app_state.clone()))
        // API routes
        .nest("/api", api_routes(app_state.clone()))
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Configure properly for production
        .layer(TraceLayer::new_for_http())
}

fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .nest("/", Router::new()
            .route("/me", get(handlers::auth::me))
            .route_layer(axum::middleware::from_fn_with_state(
                state,
                middleware::auth::require_auth,
            ))
        )
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new().nest("/announcements", announcement_routes(state))
}

fn announcement_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Read routes: the viewer is resolved when a session cookie is
        // present, but anonymous requests go through as Role::Unknown.
        .route("/", get(handlers::announcements::list))
        .route("/:id", get(handlers::announcements::get))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::optional_auth,
        ))
        // Write routes are the administrative path
        .nest("/", Router::new()
            .route("/", post(handlers::announcements::create))
            .route("/:id", put(handlers::announcements::update))
            .route("/:id", delete(handlers::announcements::delete))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::auth::require_admin,
            ))
        )
}
