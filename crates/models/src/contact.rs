use sea_orm::{
    entity::prelude::*,
    sea_query::{extension::postgres::PgExpr, Expr, SimpleExpr},
    Condition, DatabaseConnection, QueryOrder, Set,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{address, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Address,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::Username)
                .to(user::Column::Username)
                .into(),
            Relation::Address => Entity::has_many(address::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef { Relation::Address.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields of a contact about to be inserted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactChanges {
    /// Apply onto an in-memory row (used by non-SQL stores).
    pub fn apply(&self, model: &mut Model) {
        if let Some(v) = &self.first_name { model.first_name = v.clone(); }
        if let Some(v) = &self.last_name { model.last_name = Some(v.clone()); }
        if let Some(v) = &self.email { model.email = Some(v.clone()); }
        if let Some(v) = &self.phone { model.phone = Some(v.clone()); }
        model.updated_at = Utc::now().into();
    }
}

/// Search filters; every present filter must match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactFilter {
    /// Substring of first_name OR last_name
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Escape LIKE metacharacters so user input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') { out.push('\\'); }
        out.push(c);
    }
    out
}

fn contains(col: Column, needle: &str, case_insensitive: bool) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    let expr = Expr::col((Entity, col));
    if case_insensitive { expr.ilike(pattern) } else { expr.like(pattern) }
}

/// Owner-scoped conjunctive condition for [`search`].
pub fn search_condition(username: &str, filter: &ContactFilter, case_insensitive: bool) -> Condition {
    let mut cond = Condition::all().add(Column::Username.eq(username));
    if let Some(name) = &filter.name {
        cond = cond.add(
            Condition::any()
                .add(contains(Column::FirstName, name, case_insensitive))
                .add(contains(Column::LastName, name, case_insensitive)),
        );
    }
    if let Some(email) = &filter.email {
        cond = cond.add(contains(Column::Email, email, case_insensitive));
    }
    if let Some(phone) = &filter.phone {
        cond = cond.add(contains(Column::Phone, phone, case_insensitive));
    }
    cond
}

pub async fn create(db: &DatabaseConnection, username: &str, input: NewContact) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        email: Set(input.email),
        phone: Set(input.phone),
        username: Set(username.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Find a contact only if it belongs to `username`.
pub async fn find_owned(db: &DatabaseConnection, username: &str, id: i32) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Id.eq(id))
        .filter(Column::Username.eq(username))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn update(db: &DatabaseConnection, existing: Model, changes: ContactChanges) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    if let Some(v) = changes.first_name { am.first_name = Set(v); }
    if let Some(v) = changes.last_name { am.last_name = Set(Some(v)); }
    if let Some(v) = changes.email { am.email = Set(Some(v)); }
    if let Some(v) = changes.phone { am.phone = Set(Some(v)); }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

/// Delete a contact owned by `username`; returns true if a row was removed.
pub async fn delete_owned(db: &DatabaseConnection, username: &str, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::Username.eq(username))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

/// Row offset of `page_index`, or `None` when the page starts past the last match
/// or does not fit a Postgres `OFFSET` (bigint).
pub fn page_offset(page_index: u64, size: u64, total: u64) -> Option<u64> {
    page_index
        .checked_mul(size)
        .filter(|offset| *offset < total && *offset <= i64::MAX as u64)
}

/// One page of the owner's contacts matching `filter`, plus the total match count.
pub async fn search(
    db: &DatabaseConnection,
    username: &str,
    filter: &ContactFilter,
    case_insensitive: bool,
    page_index: u64,
    size: u64,
) -> Result<(Vec<Model>, u64), ModelError> {
    let paginator = Entity::find()
        .filter(search_condition(username, filter, case_insensitive))
        .order_by_asc(Column::Id)
        .paginate(db, size);
    let total = paginator.num_items().await?;
    if page_offset(page_index, size, total).is_none() {
        return Ok((Vec::new(), total));
    }
    let rows = paginator.fetch_page(page_index).await?;
    Ok((rows, total))
}
