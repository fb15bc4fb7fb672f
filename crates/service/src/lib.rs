//! Business layer for the user-registration backend.
//! - Separates the registration workflow from data access and transport.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod email;
pub mod ids;
pub mod pagination;
pub mod password;
pub mod registration;
#[cfg(test)]
pub mod test_support;
