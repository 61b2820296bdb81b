use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::colors::{ColorList, CreateColorRequest, UpdateColorRequest},
    entity::colors::{ActiveModel as ColorActive, Column as ColorCol, Entity as Colors},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Color,
    response::{ApiResponse, Deleted, Meta, deleted},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_colors(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ColorList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Colors::find().order_by_asc(ColorCol::Name);
    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Color::from)
        .collect();
    Ok(ApiResponse::page("Colors", ColorList { items }, page, limit, total))
}

pub async fn get_color(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Color>> {
    let color = Colors::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Color", color.into(), None))
}

pub async fn create_color(
    state: &AppState,
    user: &AuthUser,
    payload: CreateColorRequest,
) -> AppResult<ApiResponse<Color>> {
    ensure_admin(user)?;
    payload.validate()?;
    let color = ColorActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        hex_code: Set(payload.hex_code),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        state,
        Some(user.user_id),
        "color_create",
        "colors",
        serde_json::json!({ "color_id": color.id }),
    )
    .await;

    Ok(ApiResponse::success("Color created", color.into(), Some(Meta::empty())))
}

pub async fn update_color(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateColorRequest,
) -> AppResult<ApiResponse<Color>> {
    ensure_admin(user)?;
    payload.validate()?;
    let existing = Colors::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ColorActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(hex_code) = payload.hex_code {
        active.hex_code = Set(hex_code);
    }
    let color = active.update(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "color_update",
        "colors",
        serde_json::json!({ "color_id": color.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", color.into(), Some(Meta::empty())))
}

/// Products using the color keep existing with `product_color` cleared.
pub async fn delete_color(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<Deleted> {
    ensure_admin(user)?;
    let result = Colors::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state,
        Some(user.user_id),
        "color_delete",
        "colors",
        serde_json::json!({ "color_id": id }),
    )
    .await;

    Ok(deleted("Deleted"))
}
