use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, QueryOrder, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::address;
use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub email_verification_token: Option<String>,
    pub email_verification_status: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Address,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Address => Entity::has_many(address::Entity).into(),
        }
    }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') || trimmed.starts_with('@') || trimmed.ends_with('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

/// Field set for inserting a new user row. The internal id and timestamps
/// are assigned here, not by the caller.
#[derive(Clone, Debug)]
pub struct NewUserRow {
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub email_verification_token: Option<String>,
}

pub async fn create<C: ConnectionTrait>(db: &C, row: NewUserRow) -> Result<Model, errors::ModelError> {
    validate_email(&row.email)?;
    validate_name(&row.first_name)?;
    validate_name(&row.last_name)?;
    if row.password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        public_id: Set(row.public_id),
        first_name: Set(row.first_name),
        last_name: Set(row.last_name),
        email: Set(row.email),
        password_hash: Set(row.password_hash),
        email_verification_token: Set(row.email_verification_token),
        email_verification_status: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(errors::ModelError::from_db)
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(errors::ModelError::from_db)
}

pub async fn find_by_public_id(db: &DatabaseConnection, public_id: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::PublicId.eq(public_id))
        .one(db)
        .await
        .map_err(errors::ModelError::from_db)
}

/// Page through users in insertion order. `page_idx` is 0-based.
pub async fn list_page(db: &DatabaseConnection, page_idx: u64, per_page: u64) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::CreatedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(errors::ModelError::from_db)
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(errors::ModelError::from_db)?;
    Ok(())
}
