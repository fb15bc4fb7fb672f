use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, QueryOrder, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "address")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub public_id: String,
    pub kind: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub street_name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Field set for inserting one address row under a user.
#[derive(Clone, Debug)]
pub struct NewAddressRow {
    pub public_id: String,
    pub kind: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub street_name: String,
}

pub async fn create_for_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    rows: Vec<NewAddressRow>,
) -> Result<Vec<Model>, errors::ModelError> {
    let mut created = Vec::with_capacity(rows.len());
    for row in rows {
        let am = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            public_id: Set(row.public_id),
            kind: Set(row.kind),
            city: Set(row.city),
            country: Set(row.country),
            postal_code: Set(row.postal_code),
            street_name: Set(row.street_name),
            created_at: Set(Utc::now().into()),
        };
        created.push(am.insert(db).await.map_err(errors::ModelError::from_db)?);
    }
    Ok(created)
}

/// Addresses of one user in insertion order.
pub async fn find_by_user(db: &DatabaseConnection, user_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(errors::ModelError::from_db)
}
