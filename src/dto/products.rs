use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::nullable,
    entity::products::ProductType,
    models::Product,
    validation::{PRODUCT_IMAGE_MAX, PRODUCT_NAME_MAX, SKU_MAX, not_blank, price},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub product_type: ProductType,
    #[validate(length(max = PRODUCT_NAME_MAX), custom(function = "not_blank"))]
    pub product_name: String,
    #[serde(default)]
    pub product_description: String,
    #[validate(length(max = PRODUCT_IMAGE_MAX))]
    pub product_image: Option<String>,
    #[schema(value_type = String, example = "999.99")]
    #[validate(custom(function = "price"))]
    pub product_price: Decimal,
    pub product_color: Option<Uuid>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub product_quantity: i32,
    #[validate(length(max = SKU_MAX), custom(function = "not_blank"))]
    pub sku: String,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    pub product_type: Option<ProductType>,
    #[validate(length(max = PRODUCT_NAME_MAX), custom(function = "not_blank"))]
    pub product_name: Option<String>,
    pub product_description: Option<String>,
    /// `null` clears the image.
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = PRODUCT_IMAGE_MAX))]
    pub product_image: Option<Option<String>>,
    #[schema(value_type = Option<String>, example = "999.99")]
    #[validate(custom(function = "price"))]
    pub product_price: Option<Decimal>,
    /// `null` clears the color.
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub product_color: Option<Option<Uuid>>,
    #[validate(range(min = 0))]
    pub product_quantity: Option<i32>,
    #[validate(length(max = SKU_MAX), custom(function = "not_blank"))]
    pub sku: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
