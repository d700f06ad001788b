use std::net::SocketAddr;

use axum::Router;
use configs::SearchConfig;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, auth::ServerState};

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }
}

/// Spin up the real stack on an ephemeral port; `None` when no database is reachable.
async fn start_server() -> Option<TestApp> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    // Use DATABASE_URL from environment; if not present, skip tests gracefully
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests");
        return None;
    }

    let db = match models::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("database unreachable, skip e2e tests: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await { eprintln!("migrations notice: {}", e); }

    let app: Router = routes::build_router(ServerState::from_db(db, SearchConfig::default()), cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.ok()?;
    let addr: SocketAddr = listener.local_addr().ok()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Some(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().build().expect("reqwest client")
}

async fn login(app: &TestApp, c: &reqwest::Client) -> anyhow::Result<String> {
    let username = format!("user_{}", Uuid::new_v4().simple());
    let res = c.post(app.url("/api/users"))
        .json(&json!({"username": username, "password": "rahasia", "name": "E2E"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let res = c.post(app.url("/api/users/auth"))
        .json(&json!({"username": username, "password": "rahasia"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    Ok(body["data"]["token"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let Some(app) = start_server().await else { return Ok(()) };
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_contact_and_address_lifecycle() -> anyhow::Result<()> {
    let Some(app) = start_server().await else { return Ok(()) };
    let c = client();
    let token = login(&app, &c).await?;

    let res = c.post(app.url("/api/contacts/create"))
        .header("Authorization", &token)
        .json(&json!({"first_name": "Eko", "last_name": "Khannedy", "email": "eko@example.com"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body: Value = res.json().await?;
    let cid = body["data"]["id"].as_i64().unwrap_or_default();

    let res = c.post(app.url(&format!("/api/contacts/{cid}/addresses/create")))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({"country": "Indonesia", "postal_code": "12345"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.get(app.url("/api/contacts?name=khan")).header("Authorization", &token).send().await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0), "search is case-sensitive by default");

    let res = c.get(app.url("/api/contacts?name=Khan")).header("Authorization", &token).send().await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    // deleting the contact cascades to its addresses
    let res = c.delete(app.url(&format!("/api/contacts/{cid}"))).header("Authorization", &token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.get(app.url(&format!("/api/contacts/{cid}/addresses"))).header("Authorization", &token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_logout_revokes_token() -> anyhow::Result<()> {
    let Some(app) = start_server().await else { return Ok(()) };
    let c = client();
    let token = login(&app, &c).await?;

    let res = c.delete(app.url("/api/users/current")).header("Authorization", &token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.get(app.url("/api/users/current")).header("Authorization", &token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}
