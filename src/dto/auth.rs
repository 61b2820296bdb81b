use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use validator::Validate;

use crate::{
    models::Role,
    validation::{EMAIL_MAX, NAME_MAX, PASSWORD_MIN, USERNAME_MAX, not_blank},
};

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(max = USERNAME_MAX), custom(function = "not_blank"))]
    pub username: String,
    #[validate(length(min = PASSWORD_MIN))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = EMAIL_MAX))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = NAME_MAX))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = NAME_MAX))]
    pub last_name: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}
