use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sea_orm::DatabaseConnection;

use configs::SearchConfig;
use service::address::{repo::seaorm::SeaOrmAddressRepository, repository::mock::MockAddressRepository, AddressService};
use service::contact::{repo::seaorm::SeaOrmContactRepository, repository::mock::MockContactRepository, ContactService};
use service::user::{repo::seaorm::SeaOrmUserRepository, repository::mock::MockUserRepository, UserService};

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<UserService>,
    pub contacts: Arc<ContactService>,
    pub addresses: Arc<AddressService>,
}

impl ServerState {
    /// Services backed by PostgreSQL through SeaORM.
    pub fn from_db(db: DatabaseConnection, search: SearchConfig) -> Self {
        let users = Arc::new(UserService::new(Arc::new(SeaOrmUserRepository { db: db.clone() })));
        let contacts = Arc::new(ContactService::new(Arc::new(SeaOrmContactRepository { db: db.clone() }), search));
        let addresses = Arc::new(AddressService::new(Arc::new(SeaOrmAddressRepository { db }), contacts.clone()));
        Self { users, contacts, addresses }
    }

    /// Services backed by in-memory repositories; nothing is persisted.
    pub fn in_memory(search: SearchConfig) -> Self {
        let users = Arc::new(UserService::new(Arc::new(MockUserRepository::default())));
        let contacts = Arc::new(ContactService::new(Arc::new(MockContactRepository::default()), search));
        let addresses = Arc::new(AddressService::new(Arc::new(MockAddressRepository::default()), contacts.clone()));
        Self { users, contacts, addresses }
    }
}

/// `Authorization: <token>` or `Authorization: Bearer <token>` (scheme in any case).
fn session_token(req: &Request) -> Option<&str> {
    let raw = req.headers().get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => raw,
    };
    (!token.is_empty()).then_some(token)
}

/// Paths that skip the session check: everything outside `/api`, plus register and login.
fn is_public(path: &str) -> bool {
    let under_api = path == "/api" || path.starts_with("/api/");
    !under_api || path == "/api/users" || path == "/api/users/auth"
}

/// 全局中间件：/api 下除注册与登录外一律校验会话 token，并把 User 注入请求扩展
/// 缺失或无效 token 返回 401，先于路由匹配结果（404/405）
pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    if is_public(&path) {
        return Ok(next.run(req).await);
    }
    let Some(token) = session_token(&req).map(str::to_owned) else {
        tracing::warn!(path = %path, "missing Authorization header");
        return Err(JsonApiError::unauthorized());
    };

    match state.users.authenticate(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "session token rejected");
            Err(e.into())
        }
    }
}
