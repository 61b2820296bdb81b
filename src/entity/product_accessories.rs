use sea_orm::entity::prelude::*;

use super::products::{self, ProductType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product_accessories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub main_product_id: Uuid,
    pub accessory_id: Uuid,
    pub required_quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::MainProductId",
        to = "super::products::Column::Id",
        on_delete = "Cascade"
    )]
    MainProduct,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::AccessoryId",
        to = "super::products::Column::Id",
        on_delete = "Cascade"
    )]
    Accessory,
}

/// Main product -> its accessory products.
pub struct AccessoriesOf;

impl Linked for AccessoriesOf {
    type FromEntity = products::Entity;
    type ToEntity = products::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::MainProduct.def().rev(), Relation::Accessory.def()]
    }
}

/// Rejects pairs whose sides have the wrong product type.
pub fn check_pair(main: ProductType, accessory: ProductType) -> Result<(), String> {
    if !main.accepts_accessories() {
        return Err(format!(
            "main_product must be a Phone or Laptop, got {}",
            main.label()
        ));
    }
    if !accessory.is_accessory() {
        return Err(format!(
            "accessory must be an Accessory, got {}",
            accessory.label()
        ));
    }
    Ok(())
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !self.main_product_id.is_set() && !self.accessory_id.is_set() {
            return Ok(self);
        }
        let (Some(main_id), Some(accessory_id)) = (
            self.main_product_id.try_as_ref().copied(),
            self.accessory_id.try_as_ref().copied(),
        ) else {
            return Ok(self);
        };

        let main = products::Entity::find_by_id(main_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::Custom("main_product does not exist".into()))?;
        let accessory = products::Entity::find_by_id(accessory_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::Custom("accessory does not exist".into()))?;

        check_pair(main.product_type, accessory.product_type).map_err(DbErr::Custom)?;
        Ok(self)
    }
}
