use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{IntoParams, Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    /// Human readable message
    pub errors: String,
    /// Present on validation failures only
    pub details: Option<Vec<FieldErrorDoc>>,
}

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct PagingDoc { pub current_page: u64, pub size: u64, pub total_page: u64 }

#[derive(ToSchema)]
pub struct RegisterUserDoc { pub username: String, pub password: String, pub name: String }

#[derive(ToSchema)]
pub struct LoginUserDoc { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct UpdateUserDoc { pub name: Option<String>, pub password: Option<String> }

#[derive(ToSchema)]
pub struct UserDoc { pub username: String, pub name: String, pub token: Option<String> }

#[derive(ToSchema)]
pub struct UserEnvelopeDoc { pub data: UserDoc }

#[derive(ToSchema)]
pub struct BoolEnvelopeDoc { pub data: bool }

#[derive(ToSchema)]
pub struct CreateContactDoc {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateContactDoc {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
pub struct ContactDoc {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
pub struct ContactEnvelopeDoc { pub data: ContactDoc }

#[derive(ToSchema)]
pub struct ContactPageDoc { pub data: Vec<ContactDoc>, pub paging: PagingDoc }

#[allow(dead_code)]
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchContactParams {
    /// Substring of first or last name
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// 1-based, defaults to 1
    pub page: Option<i64>,
    /// Defaults to 10, at most 100
    pub size: Option<i64>,
}

#[derive(ToSchema)]
pub struct CreateAddressDoc {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

#[derive(ToSchema)]
pub struct UpdateAddressDoc {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(ToSchema)]
pub struct AddressDoc {
    pub id: i32,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

#[derive(ToSchema)]
pub struct AddressEnvelopeDoc { pub data: AddressDoc }

#[derive(ToSchema)]
pub struct AddressListDoc { pub data: Vec<AddressDoc> }

struct SessionTokenScheme;

impl Modify for SessionTokenScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::register,
        crate::routes::users::login,
        crate::routes::users::current,
        crate::routes::users::update,
        crate::routes::users::logout,
        crate::routes::contacts::create,
        crate::routes::contacts::get,
        crate::routes::contacts::update,
        crate::routes::contacts::remove,
        crate::routes::contacts::search,
        crate::routes::addresses::create,
        crate::routes::addresses::get,
        crate::routes::addresses::update,
        crate::routes::addresses::remove,
        crate::routes::addresses::list,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            FieldErrorDoc,
            PagingDoc,
            RegisterUserDoc,
            LoginUserDoc,
            UpdateUserDoc,
            UserDoc,
            UserEnvelopeDoc,
            BoolEnvelopeDoc,
            CreateContactDoc,
            UpdateContactDoc,
            ContactDoc,
            ContactEnvelopeDoc,
            ContactPageDoc,
            CreateAddressDoc,
            UpdateAddressDoc,
            AddressDoc,
            AddressEnvelopeDoc,
            AddressListDoc,
        )
    ),
    modifiers(&SessionTokenScheme),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "contacts"),
        (name = "addresses")
    )
)]
pub struct ApiDoc;
