use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_accounts::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Colors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Colors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Colors::Name).string_len(50).not_null().unique_key())
                    .col(ColumnDef::new(Colors::HexCode).string_len(7).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Products::ProductType)
                            .string_len(2)
                            .not_null()
                            .default("AC")
                            .check(Expr::col(Products::ProductType).is_in(["PH", "LT", "AC"])),
                    )
                    .col(ColumnDef::new(Products::ProductName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Products::ProductDescription)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Products::ProductImage).string_len(100).null())
                    .col(ColumnDef::new(Products::ProductPrice).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Products::ProductColorId).uuid().null())
                    .col(
                        ColumnDef::new(Products::ProductQuantity)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Products::ProductQuantity).gte(0)),
                    )
                    .col(ColumnDef::new(Products::Sku).string_len(50).not_null().unique_key())
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Products::CreatedBy).uuid().null())
                    .col(ColumnDef::new(Products::UpdatedBy).uuid().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_color")
                            .from(Products::Table, Products::ProductColorId)
                            .to(Colors::Table, Colors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_created_by")
                            .from(Products::Table, Products::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_updated_by")
                            .from(Products::Table, Products::UpdatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_product_name")
                    .table(Products::Table)
                    .col(Products::ProductName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductAccessories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductAccessories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductAccessories::MainProductId).uuid().not_null())
                    .col(ColumnDef::new(ProductAccessories::AccessoryId).uuid().not_null())
                    .col(
                        ColumnDef::new(ProductAccessories::RequiredQuantity)
                            .integer()
                            .not_null()
                            .default(1)
                            .check(Expr::col(ProductAccessories::RequiredQuantity).gte(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_accessories_main")
                            .from(ProductAccessories::Table, ProductAccessories::MainProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_accessories_accessory")
                            .from(ProductAccessories::Table, ProductAccessories::AccessoryId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_product_accessories_pair")
                    .table(ProductAccessories::Table)
                    .col(ProductAccessories::MainProductId)
                    .col(ProductAccessories::AccessoryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::ProductId).uuid().not_null())
                    .col(
                        ColumnDef::new(Reviews::Rating)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(Reviews::Rating).between(1, 5)),
                    )
                    .col(ColumnDef::new(Reviews::Comment).text().not_null())
                    .col(
                        ColumnDef::new(Reviews::DatePosted)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_product")
                            .from(Reviews::Table, Reviews::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_product_date_posted")
                    .table(Reviews::Table)
                    .col(Reviews::ProductId)
                    .col(Reviews::DatePosted)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductAccessories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Colors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Colors {
    Table,
    Id,
    Name,
    HexCode,
}

#[derive(DeriveIden)]
pub enum Products {
    Table,
    Id,
    ProductType,
    ProductName,
    ProductDescription,
    ProductImage,
    ProductPrice,
    ProductColorId,
    ProductQuantity,
    Sku,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}

#[derive(DeriveIden)]
enum ProductAccessories {
    Table,
    Id,
    MainProductId,
    AccessoryId,
    RequiredQuantity,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    ProductId,
    Rating,
    Comment,
    DatePosted,
}
