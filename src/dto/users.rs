use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use validator::Validate;

use crate::{
    models::User,
    validation::{EMAIL_MAX, NAME_MAX},
};

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = EMAIL_MAX))]
    pub email: Option<String>,
    #[validate(length(max = NAME_MAX))]
    pub first_name: Option<String>,
    #[validate(length(max = NAME_MAX))]
    pub last_name: Option<String>,
    /// Only admins may change this flag.
    pub is_active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}
