use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};

use models::{address, user};

use crate::pagination::Pagination;

use super::domain::{NewUser, StoredAddress, StoredUser};
use super::errors::RegistrationError;
use super::repository::UserRepository;

/// SeaORM-backed repository over the `user` and `address` tables.
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn hydrate(&self, model: user::Model) -> Result<StoredUser, RegistrationError> {
        let addresses = address::find_by_user(&self.db, model.id).await?;
        Ok(to_stored(model, addresses))
    }
}

fn to_stored(model: user::Model, addresses: Vec<address::Model>) -> StoredUser {
    StoredUser {
        id: model.id,
        public_id: model.public_id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        password_hash: model.password_hash,
        email_verification_token: model.email_verification_token,
        email_verification_status: model.email_verification_status,
        addresses: addresses
            .into_iter()
            .map(|a| StoredAddress {
                public_id: a.public_id,
                kind: a.kind,
                city: a.city,
                country: a.country,
                postal_code: a.postal_code,
                street_name: a.street_name,
            })
            .collect(),
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, RegistrationError> {
        match user::find_by_email(&self.db, email).await? {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_public_id(&self, public_id: &str) -> Result<Option<StoredUser>, RegistrationError> {
        match user::find_by_public_id(&self.db, public_id).await? {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    async fn save(&self, new_user: NewUser) -> Result<StoredUser, RegistrationError> {
        // User row and its addresses land together or not at all
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RegistrationError::Repository(e.to_string()))?;

        let row = user::NewUserRow {
            public_id: new_user.public_id,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            email_verification_token: Some(new_user.email_verification_token),
        };
        let created = user::create(&txn, row).await?;

        let rows = new_user
            .addresses
            .into_iter()
            .map(|a| address::NewAddressRow {
                public_id: a.public_id,
                kind: a.kind,
                city: a.city,
                country: a.country,
                postal_code: a.postal_code,
                street_name: a.street_name,
            })
            .collect();
        let addresses = address::create_for_user(&txn, created.id, rows).await?;

        txn.commit()
            .await
            .map_err(|e| RegistrationError::Repository(e.to_string()))?;

        Ok(to_stored(created, addresses))
    }

    async fn list(&self, page: Pagination) -> Result<Vec<StoredUser>, RegistrationError> {
        let (page_idx, per_page) = page.normalize();
        let models = user::list_page(&self.db, page_idx, per_page).await?;
        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(self.hydrate(model).await?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::registration::domain::NewAddress;
    use crate::test_support::try_db;

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            public_id: format!("pub{}", Uuid::new_v4().simple()),
            first_name: "Sergey".into(),
            last_name: "Kargopolov".into(),
            email: email.into(),
            password_hash: "argon2-hash-placeholder".into(),
            email_verification_token: format!("tok{}", Uuid::new_v4().simple()),
            addresses: vec![NewAddress {
                public_id: format!("adr{}", Uuid::new_v4().simple()),
                kind: "shipping".into(),
                city: "Vancouver".into(),
                country: "Canada".into(),
                postal_code: "ABC123".into(),
                street_name: "123 Street name".into(),
            }],
        }
    }

    #[tokio::test]
    async fn save_and_lookup_roundtrip() {
        let Some(db) = try_db().await else { return };
        let repo = SeaOrmUserRepository::new(db);

        let email = format!("repo_{}@example.com", Uuid::new_v4());
        let saved = repo.save(new_user(&email)).await.expect("save");
        assert_eq!(saved.addresses.len(), 1);
        assert!(!saved.email_verification_status);

        let by_email = repo.find_by_email(&email).await.expect("find").expect("present");
        assert_eq!(by_email.id, saved.id);
        assert_eq!(by_email.addresses.len(), 1);

        let by_public = repo
            .find_by_public_id(&saved.public_id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(by_public.id, saved.id);

        // Unique email constraint surfaces as DuplicateUser
        let dup = repo.save(new_user(&email)).await;
        assert!(matches!(dup, Err(RegistrationError::DuplicateUser)));

        user::hard_delete(&repo.db, saved.id).await.expect("cleanup");
    }
}
