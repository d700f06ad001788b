use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;

use common::types::WebResponse;
use service::contact::domain::{ContactResponse, CreateContactRequest, SearchContactRequest, UpdateContactRequest};
use service::user::domain::User;

use crate::{errors::JsonApiError, routes::auth::ServerState};

type ContactPath = WithRejection<Path<i32>, JsonApiError>;

#[utoipa::path(
    post, path = "/api/contacts/create", tag = "contacts",
    security(("session_token" = [])),
    request_body = crate::openapi::CreateContactDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ContactEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Json(req), _): WithRejection<Json<CreateContactRequest>, JsonApiError>,
) -> Result<(StatusCode, Json<WebResponse<ContactResponse>>), JsonApiError> {
    let contact = state.contacts.create(&user, req).await?;
    Ok((StatusCode::CREATED, Json(WebResponse::new(contact))))
}

#[utoipa::path(
    get, path = "/api/contacts/{contact_id}", tag = "contacts",
    security(("session_token" = [])),
    params(("contact_id" = i32, Path, description = "Contact id")),
    responses((status = 200, description = "Found", body = crate::openapi::ContactEnvelopeDoc), (status = 404, description = "Contact is not found", body = crate::openapi::ErrorDoc))
)]
pub async fn get(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Path(id), _): ContactPath,
) -> Result<Json<WebResponse<ContactResponse>>, JsonApiError> {
    Ok(Json(WebResponse::new(state.contacts.get(&user, id).await?)))
}

#[utoipa::path(
    put, path = "/api/contacts/{contact_id}", tag = "contacts",
    security(("session_token" = [])),
    params(("contact_id" = i32, Path, description = "Contact id")),
    request_body = crate::openapi::UpdateContactDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::ContactEnvelopeDoc), (status = 400, description = "Validation Error"), (status = 404, description = "Contact is not found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Path(id), _): ContactPath,
    WithRejection(Json(mut req), _): WithRejection<Json<UpdateContactRequest>, JsonApiError>,
) -> Result<Json<WebResponse<ContactResponse>>, JsonApiError> {
    req.id = id;
    Ok(Json(WebResponse::new(state.contacts.update(&user, req).await?)))
}

#[utoipa::path(
    delete, path = "/api/contacts/{contact_id}", tag = "contacts",
    security(("session_token" = [])),
    params(("contact_id" = i32, Path, description = "Contact id")),
    responses((status = 200, description = "Removed together with its addresses", body = crate::openapi::BoolEnvelopeDoc), (status = 404, description = "Contact is not found"))
)]
pub async fn remove(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Path(id), _): ContactPath,
) -> Result<Json<WebResponse<bool>>, JsonApiError> {
    state.contacts.remove(&user, id).await?;
    Ok(Json(WebResponse::new(true)))
}

#[utoipa::path(
    get, path = "/api/contacts", tag = "contacts",
    security(("session_token" = [])),
    params(crate::openapi::SearchContactParams),
    responses((status = 200, description = "One page of matches", body = crate::openapi::ContactPageDoc), (status = 400, description = "Validation Error"))
)]
pub async fn search(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Query(req), _): WithRejection<Query<SearchContactRequest>, JsonApiError>,
) -> Result<Json<WebResponse<Vec<ContactResponse>>>, JsonApiError> {
    let (rows, paging) = state.contacts.search(&user, req).await?;
    Ok(Json(WebResponse::paged(rows, paging)))
}
