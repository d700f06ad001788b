use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::SearchConfig;
use serde_json::{json, Value};
use tower::Service;

use server::routes::{self, auth::ServerState};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app() -> Router {
    routes::build_router(ServerState::in_memory(SearchConfig::default()), cors())
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header("authorization", t);
    }
    let req = match body {
        Some(b) => req.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
        None => req.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

/// Register and log in; returns the session token.
async fn session(app: &Router, username: &str) -> anyhow::Result<String> {
    let (status, _) = send(app, "POST", "/api/users", None, Some(json!({"username": username, "password": "rahasia", "name": "Test"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(app, "POST", "/api/users/auth", None, Some(json!({"username": username, "password": "rahasia"}))).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["data"]["token"].as_str().unwrap_or_default().to_string())
}

async fn create_contact(app: &Router, token: &str, first: &str, last: Option<&str>) -> anyhow::Result<i64> {
    let (status, body) = send(app, "POST", "/api/contacts/create", Some(token), Some(json!({
        "first_name": first,
        "last_name": last,
        "email": "contact@example.com",
        "phone": "08123456789"
    }))).await?;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    Ok(body["data"]["id"].as_i64().unwrap_or_default())
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/contacts/{contact_id}/addresses/{address_id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn register_twice_conflicts() -> anyhow::Result<()> {
    let app = build_app();
    let payload = json!({"username": "eko", "password": "rahasia", "name": "Eko"});
    let (status, body) = send(&app, "POST", "/api/users", None, Some(payload.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"data": {"username": "eko", "name": "Eko"}}));

    let (status, body) = send(&app, "POST", "/api/users", None, Some(payload)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errors"], "Username already exists");
    Ok(())
}

#[tokio::test]
async fn register_validation_lists_fields() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "POST", "/api/users", None, Some(json!({"username": "", "password": ""}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["details"].as_array().into_iter().flatten().filter_map(|d| d["field"].as_str()).collect();
    assert_eq!(fields, ["username", "password", "name"]);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/users", None, Some(json!({"username": 42, "password": "x", "name": "y"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn wrong_password_keeps_session() -> anyhow::Result<()> {
    let app = build_app();
    let token = session(&app, "eko").await?;

    let (status, body) = send(&app, "POST", "/api/users/auth", None, Some(json!({"username": "eko", "password": "salah"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errors"], "Username or password is invalid");

    let (status, _) = send(&app, "GET", "/api/users/current", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_token() -> anyhow::Result<()> {
    let app = build_app();
    let token = session(&app, "eko").await?;

    let (status, _) = send(&app, "GET", "/api/users/current", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, "GET", "/api/contacts", Some("not-a-token"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let bearer = format!("Bearer {token}");
    let (status, body) = send(&app, "GET", "/api/users/current", Some(&bearer), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": {"username": "eko", "name": "Test"}}));
    Ok(())
}

#[tokio::test]
async fn update_and_logout_current_user() -> anyhow::Result<()> {
    let app = build_app();
    let token = session(&app, "eko").await?;

    let (status, body) = send(&app, "PATCH", "/api/users/current", Some(&token), Some(json!({"name": "Eko Khannedy"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Eko Khannedy");

    let (status, body) = send(&app, "DELETE", "/api/users/current", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": true}));

    let (status, _) = send(&app, "GET", "/api/users/current", Some(&token), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn contact_crud_is_owner_scoped() -> anyhow::Result<()> {
    let app = build_app();
    let alice = session(&app, "alice").await?;
    let bob = session(&app, "bob").await?;
    let id = create_contact(&app, &alice, "Eko", Some("Khannedy")).await?;
    let uri = format!("/api/contacts/{id}");

    let (status, body) = send(&app, "GET", &uri, Some(&alice), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({
        "id": id, "first_name": "Eko", "last_name": "Khannedy",
        "email": "contact@example.com", "phone": "08123456789"
    }));

    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app, method, &uri, Some(&bob), None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"], "Contact is not found");
    }
    let (status, _) = send(&app, "PUT", &uri, Some(&bob), Some(json!({"first_name": "Hacked"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "PUT", &uri, Some(&alice), Some(json!({"phone": "0899"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phone"], "0899");
    assert_eq!(body["data"]["last_name"], "Khannedy");

    let (status, body) = send(&app, "DELETE", &uri, Some(&alice), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": true}));
    let (status, _) = send(&app, "GET", &uri, Some(&alice), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let token = session(&app, "eko").await?;
    let (status, body) = send(&app, "GET", "/api/contacts/abc", Some(&token), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].is_string());
    Ok(())
}

#[tokio::test]
async fn search_paginates_and_filters() -> anyhow::Result<()> {
    let app = build_app();
    let token = session(&app, "eko").await?;
    for i in 0..25 {
        create_contact(&app, &token, &format!("John{i}"), None).await?;
    }
    create_contact(&app, &token, "Mary", Some("Jones")).await?;
    create_contact(&app, &token, "Zed", Some("Zulu")).await?;

    let mut sizes = Vec::new();
    for page in 1..=3 {
        let (status, body) = send(&app, "GET", &format!("/api/contacts?name=John&size=10&page={page}"), Some(&token), None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["paging"], json!({"current_page": page, "size": 10, "total_page": 3}));
        sizes.push(body["data"].as_array().map(Vec::len).unwrap_or_default());
    }
    assert_eq!(sizes, [10, 10, 5]);

    let (_, body) = send(&app, "GET", "/api/contacts?name=Jo&size=100", Some(&token), None).await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(26));

    let (_, body) = send(&app, "GET", "/api/contacts", Some(&token), None).await?;
    assert_eq!(body["paging"], json!({"current_page": 1, "size": 10, "total_page": 3}));

    let (status, body) = send(&app, "GET", "/api/contacts?size=0", Some(&token), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "size");

    let (status, _) = send(&app, "GET", "/api/contacts?page=abc", Some(&token), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn address_flow() -> anyhow::Result<()> {
    let app = build_app();
    let alice = session(&app, "alice").await?;
    let bob = session(&app, "bob").await?;
    let cid = create_contact(&app, &alice, "Eko", None).await?;
    let address = json!({"street": "Jalan", "city": "Jakarta", "province": "DKI", "country": "Indonesia", "postal_code": "12345"});

    let (status, _) = send(&app, "POST", &format!("/api/contacts/{cid}/addresses/create"), Some(&bob), Some(address.clone())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "POST", "/api/contacts/9999/addresses/create", Some(&alice), Some(address.clone())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = send(&app, "GET", &format!("/api/contacts/{cid}/addresses"), Some(&alice), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": []}));

    let (status, body) = send(&app, "POST", &format!("/api/contacts/{cid}/addresses/create"), Some(&alice), Some(address)).await?;
    assert_eq!(status, StatusCode::CREATED);
    let aid = body["data"]["id"].as_i64().unwrap_or_default();
    let uri = format!("/api/contacts/{cid}/addresses/{aid}");

    let (status, body) = send(&app, "PUT", &uri, Some(&alice), Some(json!({"city": "Bandung"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["city"], "Bandung");
    assert_eq!(body["data"]["postal_code"], "12345");

    let (status, body) = send(&app, "GET", &uri, Some(&alice), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["city"], "Bandung");

    let (status, _) = send(&app, "GET", &uri, Some(&bob), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", &uri, Some(&alice), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    let (status, body) = send(&app, "GET", &uri, Some(&alice), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], "Address is not found");
    Ok(())
}

#[tokio::test]
async fn address_validation_errors() -> anyhow::Result<()> {
    let app = build_app();
    let token = session(&app, "eko").await?;
    let cid = create_contact(&app, &token, "Eko", None).await?;
    let (status, body) = send(&app, "POST", &format!("/api/contacts/{cid}/addresses/create"), Some(&token), Some(json!({"postal_code": "12345678901"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["details"].as_array().into_iter().flatten().filter_map(|d| d["field"].as_str()).collect();
    assert_eq!(fields, ["country", "postal_code"]);
    Ok(())
}

#[tokio::test]
async fn unauthenticated_api_calls_get_401_before_routing() -> anyhow::Result<()> {
    let app = build_app();
    for (method, uri) in [("GET", "/api/contacts/create"), ("POST", "/api/contacts/1"), ("GET", "/api/nowhere")] {
        let (status, body) = send(&app, method, uri, None, None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["errors"], "Unauthorized");
    }

    let token = session(&app, "eko").await?;
    let (status, _) = send(&app, "GET", "/api/contacts/create", Some(&token), None).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, body) = send(&app, "GET", "/api/nowhere", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], "Not Found");

    let (status, _) = send(&app, "GET", "/nowhere", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn lowercase_bearer_scheme_is_accepted() -> anyhow::Result<()> {
    let app = build_app();
    let token = session(&app, "eko").await?;
    let (status, body) = send(&app, "GET", "/api/users/current", Some(&format!("bearer {token}")), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "eko");
    Ok(())
}

#[tokio::test]
async fn huge_page_number_returns_empty_page() -> anyhow::Result<()> {
    let app = build_app();
    let token = session(&app, "eko").await?;
    create_contact(&app, &token, "Eko", None).await?;
    let (status, body) = send(&app, "GET", "/api/contacts?page=1000000000000000000&size=100", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["paging"], json!({"current_page": 1_000_000_000_000_000_000u64, "size": 100, "total_page": 1}));
    Ok(())
}
