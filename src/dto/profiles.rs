use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::{Admin, Customer},
    validation::{ADMIN_CODE_MAX, PHONE_NUMBER_MAX, not_blank},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAdminRequest {
    pub user: Uuid,
    #[validate(length(max = ADMIN_CODE_MAX), custom(function = "not_blank"))]
    pub admin_code: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateAdminRequest {
    #[validate(length(max = ADMIN_CODE_MAX), custom(function = "not_blank"))]
    pub admin_code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCustomerRequest {
    /// Defaults to the caller. Only admins may name another user.
    pub user: Option<Uuid>,
    #[serde(default)]
    #[validate(length(max = PHONE_NUMBER_MAX))]
    pub phone_number: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(max = PHONE_NUMBER_MAX))]
    pub phone_number: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct AdminList {
    #[schema(value_type = Vec<Admin>)]
    pub items: Vec<Admin>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CustomerList {
    #[schema(value_type = Vec<Customer>)]
    pub items: Vec<Customer>,
}
