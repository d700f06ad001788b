use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::WithRejection;

use common::types::WebResponse;
use service::user::domain::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, User, UserResponse};

use crate::{errors::JsonApiError, routes::auth::ServerState};

#[utoipa::path(
    post, path = "/api/users", tag = "users",
    request_body = crate::openapi::RegisterUserDoc,
    responses(
        (status = 201, description = "Registered", body = crate::openapi::UserEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Username already exists", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterUserRequest>, JsonApiError>,
) -> Result<(StatusCode, Json<WebResponse<UserResponse>>), JsonApiError> {
    let user = state.users.register(req).await?;
    Ok((StatusCode::CREATED, Json(WebResponse::new(user))))
}

#[utoipa::path(
    post, path = "/api/users/auth", tag = "users",
    request_body = crate::openapi::LoginUserDoc,
    responses(
        (status = 200, description = "Logged in; `token` is the session token", body = crate::openapi::UserEnvelopeDoc),
        (status = 401, description = "Username or password is invalid", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginUserRequest>, JsonApiError>,
) -> Result<Json<WebResponse<UserResponse>>, JsonApiError> {
    Ok(Json(WebResponse::new(state.users.login(req).await?)))
}

#[utoipa::path(
    get, path = "/api/users/current", tag = "users",
    security(("session_token" = [])),
    responses((status = 200, description = "Current user", body = crate::openapi::UserEnvelopeDoc), (status = 401, description = "Unauthorized"))
)]
pub async fn current(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
) -> Result<Json<WebResponse<UserResponse>>, JsonApiError> {
    Ok(Json(WebResponse::new(state.users.get(&user).await?)))
}

#[utoipa::path(
    patch, path = "/api/users/current", tag = "users",
    security(("session_token" = [])),
    request_body = crate::openapi::UpdateUserDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::UserEnvelopeDoc), (status = 400, description = "Validation Error"), (status = 401, description = "Unauthorized"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateUserRequest>, JsonApiError>,
) -> Result<Json<WebResponse<UserResponse>>, JsonApiError> {
    Ok(Json(WebResponse::new(state.users.update(&user, req).await?)))
}

#[utoipa::path(
    delete, path = "/api/users/current", tag = "users",
    security(("session_token" = [])),
    responses((status = 200, description = "Logged out", body = crate::openapi::BoolEnvelopeDoc), (status = 401, description = "Unauthorized"))
)]
pub async fn logout(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
) -> Result<Json<WebResponse<bool>>, JsonApiError> {
    state.users.logout(&user).await?;
    Ok(Json(WebResponse::new(true)))
}
