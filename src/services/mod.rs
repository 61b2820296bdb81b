pub mod accessory_service;
pub mod auth_service;
pub mod color_service;
pub mod order_service;
pub mod product_service;
pub mod profile_service;
pub mod review_service;
pub mod user_service;
