//! Registration module: three-layer architecture (domain, repository, service).
//!
//! This module centralizes the create-user and fetch-user workflows under
//! the service crate.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use service::RegistrationService;
