use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize,
    Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum ProductType {
    #[sea_orm(string_value = "PH")]
    #[serde(rename = "PH")]
    Phone,
    #[sea_orm(string_value = "LT")]
    #[serde(rename = "LT")]
    Laptop,
    #[default]
    #[sea_orm(string_value = "AC")]
    #[serde(rename = "AC")]
    Accessory,
}

impl ProductType {
    /// Phones and laptops are the only products accessories attach to.
    pub fn accepts_accessories(self) -> bool {
        matches!(self, ProductType::Phone | ProductType::Laptop)
    }

    pub fn is_accessory(self) -> bool {
        self == ProductType::Accessory
    }

    pub fn label(self) -> &'static str {
        match self {
            ProductType::Phone => "Phone",
            ProductType::Laptop => "Laptop",
            ProductType::Accessory => "Accessory",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_type: ProductType,
    #[sea_orm(indexed)]
    pub product_name: String,
    #[sea_orm(column_type = "Text")]
    pub product_description: String,
    pub product_image: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub product_price: Decimal,
    pub product_color_id: Option<Uuid>,
    pub product_quantity: i32,
    #[sea_orm(unique)]
    pub sku: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

impl Model {
    pub fn in_stock(&self) -> bool {
        self.product_quantity > 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::colors::Entity",
        from = "Column::ProductColorId",
        to = "super::colors::Column::Id",
        on_delete = "SetNull"
    )]
    Color,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id",
        on_delete = "Restrict"
    )]
    CreatedBy,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UpdatedBy",
        to = "super::users::Column::Id",
        on_delete = "Restrict"
    )]
    UpdatedBy,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::colors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Color.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now().into());
        }
        Ok(self)
    }
}
