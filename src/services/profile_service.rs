use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::profiles::{
        AdminList, CreateAdminRequest, CreateCustomerRequest, CustomerList, UpdateAdminRequest,
        UpdateCustomerRequest,
    },
    entity::{
        admins::{ActiveModel as AdminActive, Column as AdminCol, Entity as Admins},
        customers::{ActiveModel as CustomerActive, Column as CustomerCol, Entity as Customers},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_owner_or_admin},
    models::{Admin, Customer},
    response::{ApiResponse, Deleted, Meta, deleted},
    routes::params::Pagination,
    services::user_service::role_flags,
    state::AppState,
};

/// Locks the user row for the rest of `txn` and returns its `(is_admin, is_customer)` flags.
/// Profile creation for one user is serialized by this lock.
async fn lock_user_flags(txn: &DatabaseTransaction, user_id: Uuid) -> AppResult<(bool, bool)> {
    if Users::find_by_id(user_id).lock_exclusive().one(txn).await?.is_none() {
        return Err(AppError::BadRequest(format!("user {user_id} does not exist")));
    }
    role_flags(txn, user_id).await
}

pub async fn create_admin(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAdminRequest,
) -> AppResult<ApiResponse<Admin>> {
    ensure_admin(user)?;
    payload.validate()?;
    let txn = state.orm.begin().await?;
    let (is_admin, is_customer) = lock_user_flags(&txn, payload.user).await?;
    if is_admin {
        return Err(AppError::Conflict("user already has an admin profile".into()));
    }
    if is_customer {
        return Err(AppError::Conflict("user already has a customer profile".into()));
    }

    let admin = AdminActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(Some(payload.user)),
        admin_code: Set(payload.admin_code),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(admin_id = %admin.id, "admin profile created");
    audit::record(
        state,
        Some(user.user_id),
        "admin_create",
        "admins",
        serde_json::json!({ "admin_id": admin.id, "user_id": admin.user_id }),
    )
    .await;

    Ok(ApiResponse::success("Admin created", admin.into(), Some(Meta::empty())))
}

pub async fn list_admins(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<AdminList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();
    let finder = Admins::find().order_by_asc(AdminCol::AdminCode);
    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Admin::from)
        .collect();
    Ok(ApiResponse::page("Admins", AdminList { items }, page, limit, total))
}

pub async fn get_admin(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Admin>> {
    ensure_admin(user)?;
    let admin = Admins::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Admin", admin.into(), None))
}

pub async fn update_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateAdminRequest,
) -> AppResult<ApiResponse<Admin>> {
    ensure_admin(user)?;
    payload.validate()?;
    let existing = Admins::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: AdminActive = existing.into();
    if let Some(code) = payload.admin_code {
        active.admin_code = Set(code);
    }
    let admin = active.update(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "admin_update",
        "admins",
        serde_json::json!({ "admin_id": admin.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", admin.into(), Some(Meta::empty())))
}

pub async fn delete_admin(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<Deleted> {
    ensure_admin(user)?;
    let result = Admins::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state,
        Some(user.user_id),
        "admin_delete",
        "admins",
        serde_json::json!({ "admin_id": id }),
    )
    .await;

    Ok(deleted("Deleted"))
}

pub async fn create_customer(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    payload.validate()?;
    let owner = payload.user.unwrap_or(user.user_id);
    ensure_owner_or_admin(user, Some(owner))?;
    let txn = state.orm.begin().await?;
    let (is_admin, is_customer) = lock_user_flags(&txn, owner).await?;
    if is_customer {
        return Err(AppError::Conflict("user already has a customer profile".into()));
    }
    if is_admin {
        return Err(AppError::Conflict("user already has an admin profile".into()));
    }

    let customer = CustomerActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(Some(owner)),
        phone_number: Set(payload.phone_number),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(customer_id = %customer.id, "customer profile created");
    audit::record(
        state,
        Some(user.user_id),
        "customer_create",
        "customers",
        serde_json::json!({ "customer_id": customer.id, "user_id": owner }),
    )
    .await;

    Ok(ApiResponse::success(
        "Customer created",
        customer.into(),
        Some(Meta::empty()),
    ))
}

pub async fn list_customers(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<CustomerList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();
    let finder = Customers::find().order_by_asc(CustomerCol::Id);
    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Customer::from)
        .collect();
    Ok(ApiResponse::page("Customers", CustomerList { items }, page, limit, total))
}

pub async fn get_customer(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Customer>> {
    let customer = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner_or_admin(user, customer.user_id)?;
    Ok(ApiResponse::success("Customer", customer.into(), None))
}

pub async fn update_customer(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    payload.validate()?;
    let existing = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner_or_admin(user, existing.user_id)?;

    let mut active: CustomerActive = existing.into();
    if let Some(phone) = payload.phone_number {
        active.phone_number = Set(phone);
    }
    let customer = active.update(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "customer_update",
        "customers",
        serde_json::json!({ "customer_id": customer.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", customer.into(), Some(Meta::empty())))
}

/// Cascades to the customer's orders.
pub async fn delete_customer(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<Deleted> {
    let existing = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner_or_admin(user, existing.user_id)?;

    Customers::delete_by_id(id).exec(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "customer_delete",
        "customers",
        serde_json::json!({ "customer_id": id }),
    )
    .await;

    Ok(deleted("Deleted"))
}

/// Customer profile owned by `user_id`, if any.
pub async fn customer_for_user(
    state: &AppState,
    user_id: Uuid,
) -> AppResult<Option<crate::entity::customers::Model>> {
    let customer = Customers::find()
        .filter(CustomerCol::UserId.eq(user_id))
        .one(&state.orm)
        .await?;
    Ok(customer)
}
