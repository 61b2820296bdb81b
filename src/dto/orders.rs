use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use validator::{Validate, ValidationError};

use crate::{entity::orders::OrderStatus, models::Order};

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct OrderItemRequest {
    pub product: Uuid,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 0))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "distinct_products"))]
pub struct CreateOrderRequest {
    /// Defaults to the caller's customer profile. Only admins may name another customer.
    pub customer: Option<Uuid>,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
}

fn distinct_products(request: &CreateOrderRequest) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    match request.items.iter().find(|item| !seen.insert(item.product)) {
        Some(item) => Err(ValidationError::new("duplicate_product")
            .with_message(format!("product {} is listed twice", item.product).into())),
        None => Ok(()),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}
