use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use validator::Validate;

use crate::{
    models::Color,
    validation::{COLOR_NAME_MAX, HEX_CODE_MAX, not_blank},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateColorRequest {
    #[validate(length(max = COLOR_NAME_MAX), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = HEX_CODE_MAX), custom(function = "not_blank"))]
    pub hex_code: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateColorRequest {
    #[validate(length(max = COLOR_NAME_MAX), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = HEX_CODE_MAX), custom(function = "not_blank"))]
    pub hex_code: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ColorList {
    #[schema(value_type = Vec<Color>)]
    pub items: Vec<Color>,
}
