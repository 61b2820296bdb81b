use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::users::{UpdateUserRequest, UserList},
    entity::{
        admins::{Column as AdminCol, Entity as Admins},
        customers::{Column as CustomerCol, Entity as Customers},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_owner_or_admin},
    models::User,
    response::{ApiResponse, Deleted, Meta, deleted},
    routes::params::Pagination,
    state::AppState,
};

/// `(is_admin, is_customer)`: whether the user owns an admin or customer row.
pub async fn role_flags<C: ConnectionTrait>(db: &C, user_id: Uuid) -> AppResult<(bool, bool)> {
    let is_admin = Admins::find()
        .filter(AdminCol::UserId.eq(user_id))
        .count(db)
        .await?
        > 0;
    let is_customer = Customers::find()
        .filter(CustomerCol::UserId.eq(user_id))
        .count(db)
        .await?
        > 0;
    Ok((is_admin, is_customer))
}

async fn user_with_flags(state: &AppState, model: UserModel) -> AppResult<User> {
    let (is_admin, is_customer) = role_flags(&state.orm, model.id).await?;
    Ok(User::from_entity(model, is_admin, is_customer))
}

async fn find_user(state: &AppState, id: Uuid) -> AppResult<UserModel> {
    Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let model = find_user(state, user.user_id).await?;
    let data = user_with_flags(state, model).await?;
    Ok(ApiResponse::success("Current user", data, None))
}

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Users::find().order_by_asc(UserCol::Username);
    let total = finder.clone().count(&state.orm).await?;
    let models = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let admin_ids = profile_owners(state, &ids, true).await?;
    let customer_ids = profile_owners(state, &ids, false).await?;

    let items = models
        .into_iter()
        .map(|m| {
            let is_admin = admin_ids.contains(&m.id);
            let is_customer = customer_ids.contains(&m.id);
            User::from_entity(m, is_admin, is_customer)
        })
        .collect();

    Ok(ApiResponse::page("Users", UserList { items }, page, limit, total))
}

async fn profile_owners(state: &AppState, ids: &[Uuid], admins: bool) -> AppResult<HashSet<Uuid>> {
    let owners: Vec<Option<Uuid>> = if admins {
        Admins::find()
            .select_only()
            .column(AdminCol::UserId)
            .filter(AdminCol::UserId.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&state.orm)
            .await?
    } else {
        Customers::find()
            .select_only()
            .column(CustomerCol::UserId)
            .filter(CustomerCol::UserId.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&state.orm)
            .await?
    };
    Ok(owners.into_iter().flatten().collect())
}

pub async fn get_user(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<User>> {
    ensure_owner_or_admin(user, Some(id))?;
    let model = find_user(state, id).await?;
    let data = user_with_flags(state, model).await?;
    Ok(ApiResponse::success("User", data, None))
}

pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_owner_or_admin(user, Some(id))?;
    payload.validate()?;
    if payload.is_active.is_some() && !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    let existing = find_user(state, id).await?;
    let mut active: UserActive = existing.into();
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    let updated = active.update(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "user_update",
        "users",
        serde_json::json!({ "user_id": updated.id }),
    )
    .await;

    let data = user_with_flags(state, updated).await?;
    Ok(ApiResponse::success("Updated", data, Some(Meta::empty())))
}

/// Cascades to the admin/customer rows and orders; refused while the user
/// is recorded as a product's creator or updater.
pub async fn delete_user(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<Deleted> {
    ensure_admin(user)?;
    let result = Users::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = %id, "user deleted");
    audit::record(
        state,
        Some(user.user_id),
        "user_delete",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(deleted("Deleted"))
}
