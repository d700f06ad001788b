use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod users;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn not_found() -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)
}

/// Build the full application router: public, session-protected, and docs routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes (health + register/login)
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/users", post(users::register))
        .route("/api/users/auth", post(users::login));

    // Everything else under /api needs a session (see auth::is_public)
    let api = Router::new()
        .route(
            "/api/users/current",
            get(users::current).patch(users::update).delete(users::logout),
        )
        .route("/api/contacts", get(contacts::search))
        .route("/api/contacts/create", post(contacts::create))
        .route(
            "/api/contacts/:contact_id",
            get(contacts::get).put(contacts::update).delete(contacts::remove),
        )
        .route("/api/contacts/:contact_id/addresses", get(addresses::list))
        .route("/api/contacts/:contact_id/addresses/create", post(addresses::create))
        .route(
            "/api/contacts/:contact_id/addresses/:address_id",
            get(addresses::get).put(addresses::update).delete(addresses::remove),
        );

    // Compose; the session check wraps the fallback and 405 responses too,
    // so an unauthenticated /api caller always sees 401 first
    public
        .merge(api)
        .with_state(state.clone())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state, auth::require_session))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
