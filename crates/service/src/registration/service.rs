use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::email::EmailNotifier;
use crate::ids::generate_id;
use crate::pagination::Pagination;
use crate::password::hash_password;

use super::domain::{
    NewAddress, NewUser, PublicAddressView, PublicUserView, RegistrationRequest,
};
use super::errors::RegistrationError;
use super::repository::UserRepository;

/// Lengths of the generated identifiers; user, address, and token lengths
/// are independent constants.
#[derive(Clone, Copy, Debug)]
pub struct RegistrationConfig {
    pub user_id_length: usize,
    pub address_id_length: usize,
    pub verification_token_length: usize,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self { user_id_length: 30, address_id_length: 30, verification_token_length: 40 }
    }
}

/// Registration business service independent of web framework
pub struct RegistrationService<R: UserRepository> {
    repo: Arc<R>,
    notifier: Arc<dyn EmailNotifier>,
    cfg: RegistrationConfig,
}

impl<R: UserRepository> RegistrationService<R> {
    pub fn new(repo: Arc<R>, notifier: Arc<dyn EmailNotifier>, cfg: RegistrationConfig) -> Self {
        Self { repo, notifier, cfg }
    }

    /// Register a new user: uniqueness check, id/token generation, password
    /// hashing, persistence, then the verification email.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::email::mock::MockNotifier;
    /// use service::registration::domain::RegistrationRequest;
    /// use service::registration::repository::mock::MockUserRepository;
    /// use service::registration::service::{RegistrationConfig, RegistrationService};
    /// let repo = Arc::new(MockUserRepository::default());
    /// let notifier = Arc::new(MockNotifier::new());
    /// let svc = RegistrationService::new(repo, notifier, RegistrationConfig::default());
    /// let request = RegistrationRequest {
    ///     first_name: "Sergey".into(),
    ///     last_name: "Kargopolov".into(),
    ///     email: "test@test.com".into(),
    ///     password: "12345678".into(),
    ///     addresses: vec![],
    /// };
    /// let view = tokio_test::block_on(svc.create_user(request)).unwrap();
    /// assert_eq!(view.email, "test@test.com");
    /// assert_eq!(view.public_id.len(), 30);
    /// ```
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_user(
        &self,
        request: RegistrationRequest,
    ) -> Result<PublicUserView, RegistrationError> {
        if let Some(existing) = self.repo.find_by_email(&request.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(RegistrationError::DuplicateUser);
        }

        let password_hash = hash_password(&request.password)?;

        let addresses = request
            .addresses
            .into_iter()
            .map(|a| NewAddress {
                public_id: generate_id(self.cfg.address_id_length),
                kind: a.kind,
                city: a.city,
                country: a.country,
                postal_code: a.postal_code,
                street_name: a.street_name,
            })
            .collect();

        let new_user = NewUser {
            public_id: generate_id(self.cfg.user_id_length),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash,
            email_verification_token: generate_id(self.cfg.verification_token_length),
            addresses,
        };

        let stored = self.repo.save(new_user).await?;

        // Best-effort: the record stays committed even when the send fails
        if let Some(token) = &stored.email_verification_token {
            if let Err(e) = self
                .notifier
                .send_verification_email(&stored.email, &stored.first_name, token)
                .await
            {
                warn!(
                    public_id = %stored.public_id,
                    error = %e,
                    "verification email failed; user remains unverified"
                );
            }
        }

        info!(public_id = %stored.public_id, email = %stored.email, "user_registered");
        Ok(PublicUserView::from_stored(&stored))
    }

    /// Look a user up by email.
    #[instrument(skip(self))]
    pub async fn get_user(&self, email: &str) -> Result<PublicUserView, RegistrationError> {
        let stored = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(RegistrationError::NotFound)?;
        Ok(PublicUserView::from_stored(&stored))
    }

    /// Look a user up by the generated public id.
    #[instrument(skip(self))]
    pub async fn get_user_by_public_id(
        &self,
        public_id: &str,
    ) -> Result<PublicUserView, RegistrationError> {
        let stored = self
            .repo
            .find_by_public_id(public_id)
            .await?
            .ok_or(RegistrationError::NotFound)?;
        Ok(PublicUserView::from_stored(&stored))
    }

    /// Page through registered users.
    pub async fn list_users(&self, page: Pagination) -> Result<Vec<PublicUserView>, RegistrationError> {
        let stored = self.repo.list(page).await?;
        Ok(stored.iter().map(PublicUserView::from_stored).collect())
    }

    /// All addresses of one user.
    pub async fn get_addresses(
        &self,
        public_id: &str,
    ) -> Result<Vec<PublicAddressView>, RegistrationError> {
        let stored = self
            .repo
            .find_by_public_id(public_id)
            .await?
            .ok_or(RegistrationError::NotFound)?;
        Ok(stored.addresses.iter().map(PublicAddressView::from_stored).collect())
    }

    /// One address of one user, by its own public id.
    pub async fn get_address(
        &self,
        public_id: &str,
        address_public_id: &str,
    ) -> Result<PublicAddressView, RegistrationError> {
        let stored = self
            .repo
            .find_by_public_id(public_id)
            .await?
            .ok_or(RegistrationError::NotFound)?;
        stored
            .addresses
            .iter()
            .find(|a| a.public_id == address_public_id)
            .map(PublicAddressView::from_stored)
            .ok_or(RegistrationError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::email::mock::MockNotifier;
    use crate::password::verify_password;
    use crate::registration::domain::AddressInput;
    use crate::registration::repository::mock::MockUserRepository;

    use super::*;

    fn sample_request() -> RegistrationRequest {
        RegistrationRequest {
            first_name: "Sergey".into(),
            last_name: "Kargopolov".into(),
            email: "test@test.com".into(),
            password: "12345678".into(),
            addresses: vec![
                AddressInput {
                    kind: "shipping".into(),
                    city: "Vancouver".into(),
                    country: "Canada".into(),
                    postal_code: "ABC123".into(),
                    street_name: "123 Street name".into(),
                },
                AddressInput {
                    kind: "billing".into(),
                    city: "Vancouver".into(),
                    country: "Canada".into(),
                    postal_code: "ABC123".into(),
                    street_name: "123 Street name".into(),
                },
            ],
        }
    }

    fn service(
        repo: Arc<MockUserRepository>,
        notifier: Arc<MockNotifier>,
    ) -> RegistrationService<MockUserRepository> {
        RegistrationService::new(repo, notifier, RegistrationConfig::default())
    }

    #[tokio::test]
    async fn create_user_returns_public_view() {
        let repo = Arc::new(MockUserRepository::default());
        let notifier = Arc::new(MockNotifier::new());
        let svc = service(repo.clone(), notifier.clone());

        let view = svc.create_user(sample_request()).await.unwrap();

        assert_eq!(view.first_name, "Sergey");
        assert_eq!(view.last_name, "Kargopolov");
        assert_eq!(view.addresses.len(), 2);
        assert!(!view.public_id.is_empty());
        assert_eq!(view.public_id.len(), 30);
        assert!(!view.email_verified);

        // Internal id stays internal
        let stored = repo.find_by_email("test@test.com").await.unwrap().unwrap();
        assert_ne!(stored.id.to_string(), view.public_id);
    }

    #[tokio::test]
    async fn address_ids_have_configured_length_and_fields_survive() {
        let repo = Arc::new(MockUserRepository::default());
        let notifier = Arc::new(MockNotifier::new());
        let svc = service(repo, notifier);

        let view = svc.create_user(sample_request()).await.unwrap();

        for addr in &view.addresses {
            assert_eq!(addr.public_id.len(), 30);
            assert_eq!(addr.city, "Vancouver");
            assert_eq!(addr.country, "Canada");
            assert_eq!(addr.postal_code, "ABC123");
            assert_eq!(addr.street_name, "123 Street name");
        }
        let kinds: Vec<_> = view.addresses.iter().map(|a| a.kind.as_str()).collect();
        assert!(kinds.contains(&"shipping"));
        assert!(kinds.contains(&"billing"));
        // Each address id generated independently
        assert_ne!(view.addresses[0].public_id, view.addresses[1].public_id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_touching_first_record() {
        let repo = Arc::new(MockUserRepository::default());
        let notifier = Arc::new(MockNotifier::new());
        let svc = service(repo.clone(), notifier);

        let first = svc.create_user(sample_request()).await.unwrap();
        let second = svc.create_user(sample_request()).await;

        assert!(matches!(second, Err(RegistrationError::DuplicateUser)));
        assert_eq!(repo.user_count(), 1);
        let kept = svc.get_user("test@test.com").await.unwrap();
        assert_eq!(kept.public_id, first.public_id);
    }

    #[tokio::test]
    async fn plaintext_password_is_never_stored() {
        let repo = Arc::new(MockUserRepository::default());
        let notifier = Arc::new(MockNotifier::new());
        let svc = service(repo.clone(), notifier);

        svc.create_user(sample_request()).await.unwrap();

        let stored = repo.find_by_email("test@test.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "12345678");
        assert!(verify_password("12345678", &stored.password_hash));
    }

    #[tokio::test]
    async fn verification_email_carries_the_stored_token() {
        let repo = Arc::new(MockUserRepository::default());
        let notifier = Arc::new(MockNotifier::new());
        let svc = service(repo.clone(), notifier.clone());

        svc.create_user(sample_request()).await.unwrap();

        let stored = repo.find_by_email("test@test.com").await.unwrap().unwrap();
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "test@test.com");
        assert_eq!(Some(sent[0].token.clone()), stored.email_verification_token);
        assert_eq!(sent[0].token.len(), 40);
    }

    #[tokio::test]
    async fn notifier_failure_does_not_undo_the_registration() {
        let repo = Arc::new(MockUserRepository::default());
        let notifier = Arc::new(MockNotifier::failing("ses unavailable"));
        let svc = service(repo.clone(), notifier);

        let view = svc.create_user(sample_request()).await.unwrap();

        assert_eq!(repo.user_count(), 1);
        let fetched = svc.get_user("test@test.com").await.unwrap();
        assert_eq!(fetched.public_id, view.public_id);
    }

    #[tokio::test]
    async fn get_user_unknown_email_is_not_found() {
        let repo = Arc::new(MockUserRepository::default());
        let notifier = Arc::new(MockNotifier::new());
        let svc = service(repo, notifier);

        let res = svc.get_user("nobody@test.com").await;
        assert!(matches!(res, Err(RegistrationError::NotFound)));
    }

    #[tokio::test]
    async fn lookup_by_public_id_matches_lookup_by_email() {
        let repo = Arc::new(MockUserRepository::default());
        let notifier = Arc::new(MockNotifier::new());
        let svc = service(repo, notifier);

        let created = svc.create_user(sample_request()).await.unwrap();
        let by_id = svc.get_user_by_public_id(&created.public_id).await.unwrap();
        assert_eq!(by_id.email, created.email);

        let missing = svc.get_user_by_public_id("does-not-exist").await;
        assert!(matches!(missing, Err(RegistrationError::NotFound)));
    }

    #[tokio::test]
    async fn addresses_are_retrievable_individually() {
        let repo = Arc::new(MockUserRepository::default());
        let notifier = Arc::new(MockNotifier::new());
        let svc = service(repo, notifier);

        let created = svc.create_user(sample_request()).await.unwrap();
        let addresses = svc.get_addresses(&created.public_id).await.unwrap();
        assert_eq!(addresses.len(), 2);

        let one = svc
            .get_address(&created.public_id, &addresses[1].public_id)
            .await
            .unwrap();
        assert_eq!(one.kind, addresses[1].kind);

        let missing = svc.get_address(&created.public_id, "nope").await;
        assert!(matches!(missing, Err(RegistrationError::NotFound)));
    }

    #[tokio::test]
    async fn list_users_pages_in_insertion_order() {
        let repo = Arc::new(MockUserRepository::default());
        let notifier = Arc::new(MockNotifier::new());
        let svc = service(repo, notifier);

        for i in 0..3 {
            let mut req = sample_request();
            req.email = format!("user{}@test.com", i);
            svc.create_user(req).await.unwrap();
        }

        let page1 = svc.list_users(Pagination { page: 1, per_page: 2 }).await.unwrap();
        assert_eq!(page1.len(), 2);
        let page2 = svc.list_users(Pagination { page: 2, per_page: 2 }).await.unwrap();
        assert_eq!(page2.len(), 1);
        assert_eq!(page1[0].email, "user0@test.com");
        assert_eq!(page2[0].email, "user2@test.com");
    }
}
