use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::contact;
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "address")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
    pub contact_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Contact }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Contact => Entity::belongs_to(contact::Entity)
                .from(Column::ContactId)
                .to(contact::Column::Id)
                .into(),
        }
    }
}

impl Related<contact::Entity> for Entity {
    fn to() -> RelationDef { Relation::Contact.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddressChanges {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl AddressChanges {
    pub fn apply(&self, model: &mut Model) {
        if let Some(v) = &self.street { model.street = Some(v.clone()); }
        if let Some(v) = &self.city { model.city = Some(v.clone()); }
        if let Some(v) = &self.province { model.province = Some(v.clone()); }
        if let Some(v) = &self.country { model.country = v.clone(); }
        if let Some(v) = &self.postal_code { model.postal_code = v.clone(); }
        model.updated_at = Utc::now().into();
    }
}

pub async fn create(db: &DatabaseConnection, contact_id: i32, input: NewAddress) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        street: Set(input.street),
        city: Set(input.city),
        province: Set(input.province),
        country: Set(input.country),
        postal_code: Set(input.postal_code),
        contact_id: Set(contact_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Find an address only if it hangs off `contact_id`.
pub async fn find_for_contact(db: &DatabaseConnection, contact_id: i32, id: i32) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Id.eq(id))
        .filter(Column::ContactId.eq(contact_id))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn list_for_contact(db: &DatabaseConnection, contact_id: i32) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .filter(Column::ContactId.eq(contact_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn update(db: &DatabaseConnection, existing: Model, changes: AddressChanges) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    if let Some(v) = changes.street { am.street = Set(Some(v)); }
    if let Some(v) = changes.city { am.city = Set(Some(v)); }
    if let Some(v) = changes.province { am.province = Set(Some(v)); }
    if let Some(v) = changes.country { am.country = Set(v); }
    if let Some(v) = changes.postal_code { am.postal_code = Set(v); }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

pub async fn delete_for_contact(db: &DatabaseConnection, contact_id: i32, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::ContactId.eq(contact_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}
