use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use service::email::EmailNotifier;
use service::pagination::Pagination;
use service::registration::domain::{PublicAddressView, PublicUserView, RegistrationRequest};
use service::registration::seaorm::SeaOrmUserRepository;
use service::registration::service::{RegistrationConfig, RegistrationService};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub notifier: Arc<dyn EmailNotifier>,
    pub ids: RegistrationConfig,
}

impl ServerState {
    fn service(&self) -> RegistrationService<SeaOrmUserRepository> {
        let repo = Arc::new(SeaOrmUserRepository::new(self.db.clone()));
        RegistrationService::new(repo, Arc::clone(&self.notifier), self.ids)
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Boundary validation; the workflow core assumes well-formed input.
fn validate(input: &RegistrationRequest) -> Result<(), ApiError> {
    models::user::validate_email(&input.email)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    models::user::validate_name(&input.first_name)
        .map_err(|_| ApiError::bad_request("firstName required"))?;
    models::user::validate_name(&input.last_name)
        .map_err(|_| ApiError::bad_request("lastName required"))?;
    if input.password.len() < 8 {
        return Err(ApiError::bad_request("password too short (>=8)"));
    }
    Ok(())
}

#[utoipa::path(post, path = "/users", tag = "users", request_body = crate::openapi::RegistrationRequestDoc, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn create_user(
    State(state): State<ServerState>,
    Json(input): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<PublicUserView>), ApiError> {
    validate(&input)?;
    let view = state.service().create_user(input).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(get, path = "/users/{public_id}", tag = "users", responses((status = 200, description = "Found"), (status = 404, description = "Not Found")))]
pub async fn get_user(
    State(state): State<ServerState>,
    Path(public_id): Path<String>,
) -> Result<Json<PublicUserView>, ApiError> {
    let view = state.service().get_user_by_public_id(&public_id).await?;
    Ok(Json(view))
}

#[utoipa::path(get, path = "/users", tag = "users", responses((status = 200, description = "Page of users")))]
pub async fn list_users(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PublicUserView>>, ApiError> {
    let defaults = Pagination::default();
    let page = Pagination {
        page: params.page.unwrap_or(defaults.page),
        per_page: params.limit.unwrap_or(defaults.per_page),
    };
    let views = state.service().list_users(page).await?;
    Ok(Json(views))
}

#[utoipa::path(get, path = "/users/{public_id}/addresses", tag = "users", responses((status = 200, description = "Addresses"), (status = 404, description = "Not Found")))]
pub async fn get_addresses(
    State(state): State<ServerState>,
    Path(public_id): Path<String>,
) -> Result<Json<Vec<PublicAddressView>>, ApiError> {
    let views = state.service().get_addresses(&public_id).await?;
    Ok(Json(views))
}

#[utoipa::path(get, path = "/users/{public_id}/addresses/{address_id}", tag = "users", responses((status = 200, description = "Address"), (status = 404, description = "Not Found")))]
pub async fn get_address(
    State(state): State<ServerState>,
    Path((public_id, address_id)): Path<(String, String)>,
) -> Result<Json<PublicAddressView>, ApiError> {
    let view = state.service().get_address(&public_id, &address_id).await?;
    Ok(Json(view))
}
