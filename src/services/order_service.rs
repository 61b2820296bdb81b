use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::orders::{CreateOrderRequest, OrderItemRequest, OrderList, UpdateOrderStatusRequest},
    entity::{
        customers::{Entity as Customers, Model as CustomerModel},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_owner_or_admin},
    models::{Order, OrderItem},
    response::{ApiResponse, Deleted, Meta, deleted},
    routes::params::{OrderListQuery, SortOrder},
    services::profile_service::customer_for_user,
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if !user.is_admin() {
        condition = condition.add(OrderCol::UserId.eq(user.user_id));
    }
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await?;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let mut items_by_order = items_for_orders(&state.orm, ids).await?;
    let items = orders
        .into_iter()
        .map(|order| {
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            Order::from_entity(order, items)
        })
        .collect();

    Ok(ApiResponse::page("Ok", OrderList { items }, page, limit, total))
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    payload.validate()?;
    let customer = resolve_customer(state, user, payload.customer).await?;
    ensure_products_exist(state, &payload.items).await?;

    let owner = customer.user_id.unwrap_or(user.user_id);
    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(owner),
        customer_id: Set(customer.id),
        created_at: NotSet,
        status: NotSet,
    }
    .insert(&txn)
    .await?;

    for item in &payload.items {
        OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(item.product),
            quantity: Set(item.quantity),
        }
        .insert(&txn)
        .await?;
    }

    let items = load_items(&txn, order.id).await?;
    txn.commit().await?;

    tracing::info!(order_id = %order.id, items = items.len(), "order created");
    audit::record(
        state,
        Some(user.user_id),
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "customer_id": customer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        Order::from_entity(order, items),
        Some(Meta::empty()),
    ))
}

pub async fn get_order(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let order = find_order(state, user, id).await?;
    let items = load_items(&state.orm, order.id).await?;
    Ok(ApiResponse::success(
        "OK",
        Order::from_entity(order, items),
        Some(Meta::empty()),
    ))
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = existing.into();
    active.status = Set(payload.status);
    let order = active.update(&state.orm).await?;

    audit::record(
        state,
        Some(user.user_id),
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": order.id, "status": order.status }),
    )
    .await;

    let items = load_items(&state.orm, order.id).await?;
    Ok(ApiResponse::success(
        "Order updated",
        Order::from_entity(order, items),
        Some(Meta::empty()),
    ))
}

/// Cascades to the order's items.
pub async fn delete_order(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<Deleted> {
    ensure_admin(user)?;
    let result = Orders::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state,
        Some(user.user_id),
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": id }),
    )
    .await;

    Ok(deleted("Deleted"))
}

pub async fn add_item(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    payload: OrderItemRequest,
) -> AppResult<ApiResponse<OrderItem>> {
    payload.validate()?;
    let order = find_order(state, user, order_id).await?;
    let product = Products::find_by_id(payload.product)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("product {} does not exist", payload.product)))?;

    let item = OrderItemActive {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        product_id: Set(product.id),
        quantity: Set(payload.quantity),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        state,
        Some(user.user_id),
        "order_item_add",
        "order_items",
        serde_json::json!({ "order_id": order.id, "item_id": item.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Item added",
        OrderItem::from_entity(item, product.product_price),
        Some(Meta::empty()),
    ))
}

pub async fn remove_item(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    item_id: Uuid,
) -> AppResult<Deleted> {
    let order = find_order(state, user, order_id).await?;
    let result = OrderItems::delete_many()
        .filter(
            Condition::all()
                .add(OrderItemCol::Id.eq(item_id))
                .add(OrderItemCol::OrderId.eq(order.id)),
        )
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state,
        Some(user.user_id),
        "order_item_remove",
        "order_items",
        serde_json::json!({ "order_id": order.id, "item_id": item_id }),
    )
    .await;

    Ok(deleted("Item removed"))
}

/// Loads an order visible to `user`: its owner or any admin.
async fn find_order(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<OrderModel> {
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner_or_admin(user, Some(order.user_id))?;
    Ok(order)
}

async fn resolve_customer(
    state: &AppState,
    user: &AuthUser,
    requested: Option<Uuid>,
) -> AppResult<CustomerModel> {
    match requested {
        Some(customer_id) => {
            let customer = Customers::find_by_id(customer_id)
                .one(&state.orm)
                .await?
                .ok_or_else(|| {
                    AppError::BadRequest(format!("customer {customer_id} does not exist"))
                })?;
            ensure_owner_or_admin(user, customer.user_id)?;
            Ok(customer)
        }
        None => customer_for_user(state, user.user_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("user has no customer profile".into())),
    }
}

async fn ensure_products_exist(state: &AppState, items: &[OrderItemRequest]) -> AppResult<()> {
    let wanted: HashSet<Uuid> = items.iter().map(|item| item.product).collect();
    if wanted.is_empty() {
        return Ok(());
    }
    let found: HashSet<Uuid> = Products::find()
        .select_only()
        .column(ProdCol::Id)
        .filter(ProdCol::Id.is_in(wanted.iter().copied()))
        .into_tuple::<Uuid>()
        .all(&state.orm)
        .await?
        .into_iter()
        .collect();

    let mut missing: Vec<String> = wanted
        .difference(&found)
        .map(|id| id.to_string())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    missing.sort();
    Err(AppError::BadRequest(format!(
        "products do not exist: {}",
        missing.join(", ")
    )))
}

/// Items of one order with their sub-totals taken from the current product price.
async fn load_items<C: ConnectionTrait>(db: &C, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
    let mut by_order = items_for_orders(db, vec![order_id]).await?;
    Ok(by_order.remove(&order_id).unwrap_or_default())
}

async fn items_for_orders<C: ConnectionTrait>(
    db: &C,
    order_ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Vec<OrderItem>>> {
    let rows = OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(order_ids))
        .order_by_asc(OrderItemCol::Id)
        .find_also_related(Products)
        .all(db)
        .await?;

    let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for (item, product) in rows {
        let price = product.map(|p| p.product_price).unwrap_or_default();
        by_order
            .entry(item.order_id)
            .or_default()
            .push(OrderItem::from_entity(item, price));
    }
    Ok(by_order)
}
