use async_trait::async_trait;

use crate::pagination::Pagination;

use super::domain::{NewUser, StoredUser};
use super::errors::RegistrationError;

/// Repository abstraction over durable user storage.
///
/// `save` is the sole mutation entry point; email uniqueness is enforced by
/// the store itself so a concurrent duplicate registration fails there even
/// when both requests pass the `find_by_email` pre-check.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, RegistrationError>;
    async fn find_by_public_id(&self, public_id: &str) -> Result<Option<StoredUser>, RegistrationError>;
    async fn save(&self, user: NewUser) -> Result<StoredUser, RegistrationError>;
    async fn list(&self, page: Pagination) -> Result<Vec<StoredUser>, RegistrationError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::registration::domain::StoredAddress;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<Vec<StoredUser>>, // insertion order preserved for paging
    }

    impl MockUserRepository {
        pub fn user_count(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, RegistrationError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        async fn find_by_public_id(&self, public_id: &str) -> Result<Option<StoredUser>, RegistrationError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.public_id == public_id).cloned())
        }

        async fn save(&self, user: NewUser) -> Result<StoredUser, RegistrationError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(RegistrationError::DuplicateUser);
            }
            let stored = StoredUser {
                id: Uuid::new_v4(),
                public_id: user.public_id,
                first_name: user.first_name,
                last_name: user.last_name,
                email: user.email,
                password_hash: user.password_hash,
                email_verification_token: Some(user.email_verification_token),
                email_verification_status: false,
                addresses: user
                    .addresses
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
            };
            users.push(stored.clone());
            Ok(stored)
        }

        async fn list(&self, page: Pagination) -> Result<Vec<StoredUser>, RegistrationError> {
            let users = self.users.lock().unwrap();
            let (page_idx, per_page) = page.normalize();
            Ok(users
                .iter()
                .skip((page_idx * per_page) as usize)
                .take(per_page as usize)
                .cloned()
                .collect())
        }
    }
}
