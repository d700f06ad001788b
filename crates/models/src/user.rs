use sea_orm::{entity::prelude::*, sea_query::Expr, DatabaseConnection, Set};
use chrono::Utc;

use crate::contact;
use crate::errors::ModelError;

/// Account row. `password` holds an encoded password hash, never plain text.
#[derive(Clone, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub name: String,
    pub token: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("user::Model")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Contact,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Contact => Entity::has_many(contact::Entity).into() }
    }
}

impl Related<contact::Entity> for Entity {
    fn to() -> RelationDef { Relation::Contact.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, username: &str, name: &str, password_hash: &str) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        username: Set(username.to_string()),
        password: Set(password_hash.to_string()),
        name: Set(name.to_string()),
        token: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(username.to_string()).one(db).await?)
}

pub async fn find_by_token(db: &DatabaseConnection, token: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Token.eq(token)).one(db).await?)
}

/// Store or clear the session token; returns false when the user does not exist.
pub async fn set_token(db: &DatabaseConnection, username: &str, token: Option<String>) -> Result<bool, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Token, Expr::value(token))
        .col_expr(Column::UpdatedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())))
        .filter(Column::Username.eq(username))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

/// Apply the provided profile fields; `None` leaves a field untouched.
pub async fn update_profile(
    db: &DatabaseConnection,
    username: &str,
    name: Option<&str>,
    password_hash: Option<&str>,
) -> Result<Option<Model>, ModelError> {
    let Some(existing) = find_by_username(db, username).await? else { return Ok(None) };
    let mut am: ActiveModel = existing.into();
    if let Some(n) = name { am.name = Set(n.to_string()); }
    if let Some(h) = password_hash { am.password = Set(h.to_string()); }
    am.updated_at = Set(Utc::now().into());
    Ok(Some(am.update(db).await?))
}
