use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::{Length, Validate, ValidationErrors, Validator};

const NAME: Length = Length::between(1, 100);
const USERNAME: Length = Length::between(1, 100);
const PASSWORD: Length = Length::between(1, 100);

/// Authenticated user as seen by the services.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub token: Option<String>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl From<models::user::Model> for User {
    fn from(m: models::user::Model) -> Self {
        Self { username: m.username, name: m.name, password_hash: m.password, token: m.token }
    }
}

/// Public projection of a user; `token` only appears right after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self { username: u.username.clone(), name: u.name.clone(), token: None }
    }
}

/// Registration input
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl Validate for RegisterUserRequest {
    type Output = NewUser;

    fn validate(self) -> Result<NewUser, ValidationErrors> {
        let mut v = Validator::new();
        let username = v.required("username", self.username, USERNAME);
        let password = v.required("password", self.password, PASSWORD);
        let name = v.required("name", self.name, NAME);
        v.finish(NewUser { username, password, name })
    }
}

/// Login input
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl Validate for LoginUserRequest {
    type Output = LoginCredentials;

    fn validate(self) -> Result<LoginCredentials, ValidationErrors> {
        let mut v = Validator::new();
        let username = v.required("username", self.username, USERNAME);
        let password = v.required("password", self.password, PASSWORD);
        v.finish(LoginCredentials { username, password })
    }
}

/// Profile update; absent fields stay unchanged.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl Validate for UpdateUserRequest {
    type Output = ProfileChanges;

    fn validate(self) -> Result<ProfileChanges, ValidationErrors> {
        let mut v = Validator::new();
        let name = v.optional("name", self.name, NAME);
        let password = v.optional("password", self.password, PASSWORD);
        v.finish(ProfileChanges { name, password })
    }
}
