use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    admins, colors, customers, order_items, orders, orders::OrderStatus, product_accessories,
    products, products::ProductType, reviews, users,
};

/// Role derived from which profile row a user owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Customer,
    Unassigned,
}

impl Role {
    pub fn from_flags(is_admin: bool, is_customer: bool) -> Self {
        if is_admin {
            Role::Admin
        } else if is_customer {
            Role::Customer
        } else {
            Role::Unassigned
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
            Role::Unassigned => "unassigned",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_admin: bool,
    pub is_customer: bool,
}

impl User {
    pub fn from_entity(model: users::Model, is_admin: bool, is_customer: bool) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            is_active: model.is_active,
            date_joined: model.date_joined.with_timezone(&Utc),
            last_login: model.last_login.map(|dt| dt.with_timezone(&Utc)),
            is_admin,
            is_customer,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Admin {
    pub id: Uuid,
    pub user: Option<Uuid>,
    pub admin_code: String,
}

impl From<admins::Model> for Admin {
    fn from(model: admins::Model) -> Self {
        Self {
            id: model.id,
            user: model.user_id,
            admin_code: model.admin_code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub user: Option<Uuid>,
    pub phone_number: String,
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            user: model.user_id,
            phone_number: model.phone_number,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Color {
    pub id: Uuid,
    pub name: String,
    pub hex_code: String,
}

impl From<colors::Model> for Color {
    fn from(model: colors::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            hex_code: model.hex_code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub product_type: ProductType,
    pub product_name: String,
    pub product_description: String,
    pub product_image: Option<String>,
    #[schema(value_type = String, example = "999.99")]
    pub product_price: Decimal,
    pub product_quantity: i32,
    pub sku: String,
    pub product_color: Option<Uuid>,
    /// Accessory product ids linked to this product.
    pub related_accessories: Vec<Uuid>,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

impl Product {
    pub fn from_entity(model: products::Model, related_accessories: Vec<Uuid>) -> Self {
        Self {
            in_stock: model.in_stock(),
            id: model.id,
            product_type: model.product_type,
            product_name: model.product_name,
            product_description: model.product_description,
            product_image: model.product_image,
            product_price: model.product_price,
            product_quantity: model.product_quantity,
            sku: model.sku,
            product_color: model.product_color_id,
            related_accessories,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            created_by: model.created_by,
            updated_by: model.updated_by,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductAccessory {
    pub id: Uuid,
    pub main_product: Uuid,
    pub accessory: Uuid,
    pub required_quantity: i32,
}

impl From<product_accessories::Model> for ProductAccessory {
    fn from(model: product_accessories::Model) -> Self {
        Self {
            id: model.id,
            main_product: model.main_product_id,
            accessory: model.accessory_id,
            required_quantity: model.required_quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub product: Uuid,
    pub rating: i16,
    pub comment: String,
    pub date_posted: DateTime<Utc>,
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            product: model.product_id,
            rating: model.rating,
            comment: model.comment,
            date_posted: model.date_posted.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user: Uuid,
    pub customer: Uuid,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Ordered product ids, one per line item.
    pub products: Vec<Uuid>,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn from_entity(model: orders::Model, items: Vec<OrderItem>) -> Self {
        Self {
            id: model.id,
            user: model.user_id,
            customer: model.customer_id,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
            products: items.iter().map(|item| item.product).collect(),
            items,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order: Uuid,
    pub product: Uuid,
    pub quantity: i32,
    #[schema(value_type = String, example = "1999.98")]
    pub sub_total: Decimal,
}

impl OrderItem {
    pub fn from_entity(model: order_items::Model, product_price: Decimal) -> Self {
        Self {
            sub_total: sub_total(product_price, model.quantity),
            id: model.id,
            order: model.order_id,
            product: model.product_id,
            quantity: model.quantity,
        }
    }
}

/// Line-item total; computed on read, never stored.
pub fn sub_total(product_price: Decimal, quantity: i32) -> Decimal {
    product_price * Decimal::from(quantity)
}
