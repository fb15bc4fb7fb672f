use thiserror::Error;

/// Business errors for the registration workflow
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user already registered")]
    DuplicateUser,
    #[error("user not found")]
    NotFound,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl RegistrationError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            RegistrationError::Validation(_) => 1001,
            RegistrationError::DuplicateUser => 1002,
            RegistrationError::NotFound => 1003,
            RegistrationError::Hash(_) => 1101,
            RegistrationError::Repository(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for RegistrationError {
    fn from(err: models::errors::ModelError) -> Self {
        match err {
            models::errors::ModelError::Validation(msg) => RegistrationError::Validation(msg),
            models::errors::ModelError::Duplicate(_) => RegistrationError::DuplicateUser,
            models::errors::ModelError::Db(msg) => RegistrationError::Repository(msg),
        }
    }
}
