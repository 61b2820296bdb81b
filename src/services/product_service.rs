use std::collections::HashMap;

use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        colors::Entity as Colors,
        product_accessories::{AccessoriesOf, Column as LinkCol, Entity as ProductAccessories},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel, ProductType},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Deleted, Meta, deleted},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    state::AppState,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::ActiveValue::NotSet;

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(pattern) = query.search_pattern() {
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::ProductName).ilike(pattern.clone()))
                .add(Expr::col(Column::ProductDescription).ilike(pattern.clone()))
                .add(Expr::col(Column::Sku).ilike(pattern)),
        );
    }

    if let Some(product_type) = query.product_type {
        condition = condition.add(Column::ProductType.eq(product_type));
    }

    if let Some(color_id) = query.color_id {
        condition = condition.add(Column::ProductColorId.eq(color_id));
    }

    match query.in_stock {
        Some(true) => condition = condition.add(Column::ProductQuantity.gt(0)),
        Some(false) => condition = condition.add(Column::ProductQuantity.lte(0)),
        None => {}
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::ProductPrice.gte(min_price));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::ProductPrice.lte(max_price));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::ProductPrice,
        ProductSortBy::Name => Column::ProductName,
        ProductSortBy::Quantity => Column::ProductQuantity,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await?;

    let models = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let items = with_accessories(state, models).await?;
    Ok(ApiResponse::page("Products", ProductList { items }, page, limit, total))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let model = find_product(state, id).await?;
    let product = product_with_accessories(state, model).await?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    payload.validate()?;
    if let Some(color_id) = payload.product_color {
        ensure_color_exists(state, color_id).await?;
    }

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        product_type: Set(payload.product_type),
        product_name: Set(payload.product_name),
        product_description: Set(payload.product_description),
        product_image: Set(payload.product_image),
        product_price: Set(payload.product_price),
        product_color_id: Set(payload.product_color),
        product_quantity: Set(payload.product_quantity),
        sku: Set(payload.sku),
        created_at: NotSet,
        updated_at: NotSet,
        created_by: Set(Some(user.user_id)),
        updated_by: Set(Some(user.user_id)),
    };
    let product = active.insert(&state.orm).await?;

    tracing::info!(product_id = %product.id, sku = %product.sku, "product created");
    audit::record(
        state,
        Some(user.user_id),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        Product::from_entity(product, Vec::new()),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    payload.validate()?;
    let existing = find_product(state, id).await?;

    if let Some(Some(color_id)) = payload.product_color {
        ensure_color_exists(state, color_id).await?;
    }
    if let Some(product_type) = payload.product_type.filter(|t| *t != existing.product_type) {
        ensure_links_allow(state, id, product_type).await?;
    }

    let mut active: ActiveModel = existing.into();
    if let Some(product_type) = payload.product_type {
        active.product_type = Set(product_type);
    }
    if let Some(name) = payload.product_name {
        active.product_name = Set(name);
    }
    if let Some(description) = payload.product_description {
        active.product_description = Set(description);
    }
    if let Some(image) = payload.product_image {
        active.product_image = Set(image);
    }
    if let Some(price) = payload.product_price {
        active.product_price = Set(price);
    }
    if let Some(color) = payload.product_color {
        active.product_color_id = Set(color);
    }
    if let Some(quantity) = payload.product_quantity {
        active.product_quantity = Set(quantity);
    }
    if let Some(sku) = payload.sku {
        active.sku = Set(sku);
    }
    active.updated_by = Set(Some(user.user_id));

    let product = active.update(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    let product = product_with_accessories(state, product).await?;
    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

/// Cascades to accessory links, reviews and order items.
pub async fn delete_product(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<Deleted> {
    ensure_admin(user)?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state,
        Some(user.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(deleted("Deleted"))
}

pub async fn find_product(state: &AppState, id: Uuid) -> AppResult<ProductModel> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

async fn ensure_color_exists(state: &AppState, color_id: Uuid) -> AppResult<()> {
    if Colors::find_by_id(color_id).one(&state.orm).await?.is_none() {
        return Err(AppError::BadRequest(format!("color {color_id} does not exist")));
    }
    Ok(())
}

/// A retyped product must still fit both sides of the links it is part of.
async fn ensure_links_allow(state: &AppState, id: Uuid, product_type: ProductType) -> AppResult<()> {
    if !product_type.accepts_accessories() {
        let linked = ProductAccessories::find()
            .filter(LinkCol::MainProductId.eq(id))
            .count(&state.orm)
            .await?;
        if linked > 0 {
            return Err(AppError::BadRequest(format!(
                "product_type: product has {linked} accessories and cannot become {}",
                product_type.label()
            )));
        }
    }
    if !product_type.is_accessory() {
        let used = ProductAccessories::find()
            .filter(LinkCol::AccessoryId.eq(id))
            .count(&state.orm)
            .await?;
        if used > 0 {
            return Err(AppError::BadRequest(format!(
                "product_type: product is an accessory of {used} products and cannot become {}",
                product_type.label()
            )));
        }
    }
    Ok(())
}

async fn product_with_accessories(state: &AppState, model: ProductModel) -> AppResult<Product> {
    let accessories = model
        .find_linked(AccessoriesOf)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|accessory| accessory.id)
        .collect();
    Ok(Product::from_entity(model, accessories))
}

/// Resolves `related_accessories` for a page of products in one query.
async fn with_accessories(state: &AppState, models: Vec<ProductModel>) -> AppResult<Vec<Product>> {
    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let links: Vec<(Uuid, Uuid)> = ProductAccessories::find()
        .select_only()
        .column(LinkCol::MainProductId)
        .column(LinkCol::AccessoryId)
        .filter(LinkCol::MainProductId.is_in(ids))
        .into_tuple()
        .all(&state.orm)
        .await?;

    let mut by_main: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (main, accessory) in links {
        by_main.entry(main).or_default().push(accessory);
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let accessories = by_main.remove(&model.id).unwrap_or_default();
            Product::from_entity(model, accessories)
        })
        .collect())
}
