use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;

use common::types::WebResponse;
use service::address::domain::{AddressKey, AddressResponse, CreateAddressRequest, UpdateAddressRequest};
use service::user::domain::User;

use crate::{errors::JsonApiError, routes::auth::ServerState};

#[utoipa::path(
    post, path = "/api/contacts/{contact_id}/addresses/create", tag = "addresses",
    security(("session_token" = [])),
    params(("contact_id" = i32, Path, description = "Parent contact id")),
    request_body = crate::openapi::CreateAddressDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AddressEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Contact is not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Path(contact_id), _): WithRejection<Path<i32>, JsonApiError>,
    WithRejection(Json(mut req), _): WithRejection<Json<CreateAddressRequest>, JsonApiError>,
) -> Result<(StatusCode, Json<WebResponse<AddressResponse>>), JsonApiError> {
    req.contact_id = contact_id;
    let address = state.addresses.create(&user, req).await?;
    Ok((StatusCode::CREATED, Json(WebResponse::new(address))))
}

#[utoipa::path(
    get, path = "/api/contacts/{contact_id}/addresses/{address_id}", tag = "addresses",
    security(("session_token" = [])),
    params(("contact_id" = i32, Path, description = "Parent contact id"), ("address_id" = i32, Path, description = "Address id")),
    responses((status = 200, description = "Found", body = crate::openapi::AddressEnvelopeDoc), (status = 404, description = "Contact or address is not found"))
)]
pub async fn get(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Path(key), _): WithRejection<Path<AddressKey>, JsonApiError>,
) -> Result<Json<WebResponse<AddressResponse>>, JsonApiError> {
    Ok(Json(WebResponse::new(state.addresses.get(&user, key).await?)))
}

#[utoipa::path(
    put, path = "/api/contacts/{contact_id}/addresses/{address_id}", tag = "addresses",
    security(("session_token" = [])),
    params(("contact_id" = i32, Path, description = "Parent contact id"), ("address_id" = i32, Path, description = "Address id")),
    request_body = crate::openapi::UpdateAddressDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::AddressEnvelopeDoc), (status = 404, description = "Contact or address is not found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Path(key), _): WithRejection<Path<AddressKey>, JsonApiError>,
    WithRejection(Json(mut req), _): WithRejection<Json<UpdateAddressRequest>, JsonApiError>,
) -> Result<Json<WebResponse<AddressResponse>>, JsonApiError> {
    req.contact_id = key.contact_id;
    req.id = key.address_id;
    Ok(Json(WebResponse::new(state.addresses.update(&user, req).await?)))
}

#[utoipa::path(
    delete, path = "/api/contacts/{contact_id}/addresses/{address_id}", tag = "addresses",
    security(("session_token" = [])),
    params(("contact_id" = i32, Path, description = "Parent contact id"), ("address_id" = i32, Path, description = "Address id")),
    responses((status = 204, description = "Removed"), (status = 404, description = "Contact or address is not found"))
)]
pub async fn remove(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Path(key), _): WithRejection<Path<AddressKey>, JsonApiError>,
) -> Result<StatusCode, JsonApiError> {
    state.addresses.remove(&user, key).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/contacts/{contact_id}/addresses", tag = "addresses",
    security(("session_token" = [])),
    params(("contact_id" = i32, Path, description = "Parent contact id")),
    responses((status = 200, description = "All addresses of the contact", body = crate::openapi::AddressListDoc), (status = 404, description = "Contact is not found"))
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    WithRejection(Path(contact_id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<WebResponse<Vec<AddressResponse>>>, JsonApiError> {
    Ok(Json(WebResponse::new(state.addresses.list(&user, contact_id).await?)))
}
