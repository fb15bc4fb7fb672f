use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input as submitted by the caller. The plaintext password
/// lives only for the duration of [`create_user`](super::service::RegistrationService::create_user).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub addresses: Vec<AddressInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub street_name: String,
}

/// Record handed to the repository for persistence. Public ids and the
/// verification token are already generated; the hash replaced the
/// plaintext before this type is built.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub email_verification_token: String,
    pub addresses: Vec<NewAddress>,
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub public_id: String,
    pub kind: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub street_name: String,
}

/// Persisted user as the repository reports it back (business view).
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: Uuid,
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub email_verification_token: Option<String>,
    pub email_verification_status: bool,
    pub addresses: Vec<StoredAddress>,
}

#[derive(Debug, Clone)]
pub struct StoredAddress {
    pub public_id: String,
    pub kind: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub street_name: String,
}

/// API-facing representation. Omits the password hash and the verification
/// token by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserView {
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub email_verified: bool,
    pub addresses: Vec<PublicAddressView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAddressView {
    pub public_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub street_name: String,
}

impl PublicUserView {
    /// Explicit entity-to-DTO conversion; no reflection-style mapping.
    pub fn from_stored(user: &StoredUser) -> Self {
        Self {
            public_id: user.public_id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            email_verified: user.email_verification_status,
            addresses: user.addresses.iter().map(PublicAddressView::from_stored).collect(),
        }
    }
}

impl PublicAddressView {
    pub fn from_stored(addr: &StoredAddress) -> Self {
        Self {
            public_id: addr.public_id.clone(),
            kind: addr.kind.clone(),
            city: addr.city.clone(),
            country: addr.country.clone(),
            postal_code: addr.postal_code.clone(),
            street_name: addr.street_name.clone(),
        }
    }
}
