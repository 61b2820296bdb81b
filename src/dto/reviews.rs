use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use validator::Validate;

use crate::{models::Review, validation::not_blank};

pub const RATING_MIN: i16 = 1;
pub const RATING_MAX: i16 = 5;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = RATING_MIN, max = RATING_MAX))]
    pub rating: i16,
    #[validate(custom(function = "not_blank"))]
    pub comment: String,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ReviewList {
    #[schema(value_type = Vec<Review>)]
    pub items: Vec<Review>,
}
