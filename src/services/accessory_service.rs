use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::accessories::{AccessoryList, CreateAccessoryRequest, UpdateAccessoryRequest},
    entity::product_accessories::{
        ActiveModel as LinkActive, Column as LinkCol, Entity as ProductAccessories, check_pair,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::ProductAccessory,
    response::{ApiResponse, Deleted, Meta, deleted},
    routes::params::Pagination,
    services::product_service::find_product,
    state::AppState,
};

pub async fn list_accessories(
    state: &AppState,
    main_product_id: Uuid,
    pagination: Pagination,
) -> AppResult<ApiResponse<AccessoryList>> {
    find_product(state, main_product_id).await?;
    let (page, limit, offset) = pagination.normalize();

    let finder = ProductAccessories::find().filter(LinkCol::MainProductId.eq(main_product_id));
    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ProductAccessory::from)
        .collect();

    Ok(ApiResponse::page("Accessories", AccessoryList { items }, page, limit, total))
}

pub async fn add_accessory(
    state: &AppState,
    user: &AuthUser,
    main_product_id: Uuid,
    payload: CreateAccessoryRequest,
) -> AppResult<ApiResponse<ProductAccessory>> {
    ensure_admin(user)?;
    payload.validate()?;

    let main = find_product(state, main_product_id).await?;
    let accessory = match find_product(state, payload.accessory).await {
        Ok(p) => p,
        Err(AppError::NotFound) => {
            return Err(AppError::BadRequest(format!(
                "accessory {} does not exist",
                payload.accessory
            )));
        }
        Err(err) => return Err(err),
    };
    check_pair(main.product_type, accessory.product_type).map_err(AppError::BadRequest)?;

    let link = LinkActive {
        id: Set(Uuid::new_v4()),
        main_product_id: Set(main.id),
        accessory_id: Set(accessory.id),
        required_quantity: Set(payload.required_quantity),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        state,
        Some(user.user_id),
        "accessory_link",
        "product_accessories",
        serde_json::json!({ "main_product_id": main.id, "accessory_id": accessory.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Accessory linked",
        link.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_accessory(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateAccessoryRequest,
) -> AppResult<ApiResponse<ProductAccessory>> {
    ensure_admin(user)?;
    payload.validate()?;
    let existing = ProductAccessories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: LinkActive = existing.into();
    active.required_quantity = Set(payload.required_quantity);
    let link = active.update(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "accessory_update",
        "product_accessories",
        serde_json::json!({ "link_id": link.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", link.into(), Some(Meta::empty())))
}

pub async fn remove_accessory(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<Deleted> {
    ensure_admin(user)?;
    let result = ProductAccessories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state,
        Some(user.user_id),
        "accessory_unlink",
        "product_accessories",
        serde_json::json!({ "link_id": id }),
    )
    .await;

    Ok(deleted("Accessory unlinked"))
}
