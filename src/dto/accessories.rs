use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::ProductAccessory;

fn default_required_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAccessoryRequest {
    pub accessory: Uuid,
    #[serde(default = "default_required_quantity")]
    #[validate(range(min = 0))]
    pub required_quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateAccessoryRequest {
    #[validate(range(min = 0))]
    pub required_quantity: i32,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct AccessoryList {
    #[schema(value_type = Vec<ProductAccessory>)]
    pub items: Vec<ProductAccessory>,
}
