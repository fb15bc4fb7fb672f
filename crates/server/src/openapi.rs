use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema, serde::Serialize)]
#[schema(as = RegistrationRequest)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequestDoc {
    #[schema(example = "Sergey")]
    pub first_name: String,
    #[schema(example = "Kargopolov")]
    pub last_name: String,
    #[schema(example = "test@test.com")]
    pub email: String,
    pub password: String,
    pub addresses: Vec<AddressInputDoc>,
}

#[derive(ToSchema, serde::Serialize)]
#[schema(as = AddressInput)]
#[serde(rename_all = "camelCase")]
pub struct AddressInputDoc {
    #[serde(rename = "type")]
    #[schema(example = "shipping")]
    pub kind: String,
    #[schema(example = "Vancouver")]
    pub city: String,
    #[schema(example = "Canada")]
    pub country: String,
    #[schema(example = "ABC123")]
    pub postal_code: String,
    #[schema(example = "123 Street name")]
    pub street_name: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create_user,
        crate::routes::users::get_user,
        crate::routes::users::list_users,
        crate::routes::users::get_addresses,
        crate::routes::users::get_address,
    ),
    components(
        schemas(
            HealthResponse,
            RegistrationRequestDoc,
            AddressInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;
