mod common;

use inventory_api::{
    dto::orders::{CreateOrderRequest, OrderItemRequest, UpdateOrderStatusRequest},
    entity::{
        order_items::Entity as OrderItems,
        orders::OrderStatus,
        products::{ActiveModel as ProductActive, ProductType},
    },
    error::AppError,
    routes::params::OrderListQuery,
    services::order_service,
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

// Integration flow: customer orders two products -> adds and removes a line ->
// admin ships and deletes the order.
#[tokio::test]
async fn order_items_subtotals_and_admin_status_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let admin = common::create_admin(&state, "orders_admin").await?;
    let (customer, customer_id) = common::create_customer(&state, "orders_customer").await?;
    let (other, other_customer_id) = common::create_customer(&state, "orders_other").await?;

    let phone = seed_product(&state, ProductType::Phone, "PH-ORD", Decimal::new(99999, 2)).await?;
    let charger = seed_product(&state, ProductType::Accessory, "AC-ORD", Decimal::new(1999, 2)).await?;
    let case = seed_product(&state, ProductType::Accessory, "AC-CASE", Decimal::new(1500, 2)).await?;

    // Customer orders for themselves
    let order = order_service::create_order(
        &state,
        &customer,
        CreateOrderRequest {
            customer: None,
            items: vec![
                OrderItemRequest {
                    product: phone,
                    quantity: 2,
                },
                OrderItemRequest {
                    product: charger,
                    quantity: 1,
                },
            ],
        },
    )
    .await?
    .data
    .unwrap();

    assert_eq!(order.customer, customer_id);
    assert_eq!(order.user, customer.user_id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);
    let phone_line = order.items.iter().find(|i| i.product == phone).unwrap();
    assert_eq!(phone_line.sub_total, Decimal::new(199998, 2));
    assert!(order.products.contains(&charger));

    // Ordering for somebody else requires admin
    let foreign = order_service::create_order(
        &state,
        &customer,
        CreateOrderRequest {
            customer: Some(other_customer_id),
            items: vec![],
        },
    )
    .await;
    assert!(matches!(foreign, Err(AppError::Forbidden)));

    // Unknown products leave nothing behind
    let before = OrderItems::find().count(&state.orm).await?;
    let unknown = order_service::create_order(
        &state,
        &customer,
        CreateOrderRequest {
            customer: None,
            items: vec![OrderItemRequest {
                product: Uuid::new_v4(),
                quantity: 1,
            }],
        },
    )
    .await;
    assert!(matches!(unknown, Err(AppError::BadRequest(_))));
    assert_eq!(OrderItems::find().count(&state.orm).await?, before);

    // Other customers cannot see the order
    let hidden = order_service::get_order(&state, &other, order.id).await;
    assert!(matches!(hidden, Err(AppError::Forbidden)));

    // Add a line, then a duplicate of it
    let item = order_service::add_item(
        &state,
        &customer,
        order.id,
        OrderItemRequest {
            product: case,
            quantity: 3,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(item.sub_total, Decimal::new(4500, 2));

    // Lines come back in a stable order and `products` follows them
    let fetched = order_service::get_order(&state, &customer, order.id).await?.data.unwrap();
    let ids: Vec<Uuid> = fetched.items.iter().map(|i| i.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    let line_products: Vec<Uuid> = fetched.items.iter().map(|i| i.product).collect();
    assert_eq!(fetched.products, line_products);
    let again = order_service::get_order(&state, &customer, order.id).await?.data.unwrap();
    assert_eq!(again.items.iter().map(|i| i.id).collect::<Vec<_>>(), ids);

    let duplicate = order_service::add_item(
        &state,
        &customer,
        order.id,
        OrderItemRequest {
            product: case,
            quantity: 1,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    order_service::remove_item(&state, &customer, order.id, item.id).await?;
    let missing = order_service::remove_item(&state, &customer, order.id, item.id).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    // Status changes are admin only
    let denied = order_service::update_order_status(
        &state,
        &customer,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Shipped,
        },
    )
    .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    let shipped = order_service::update_order_status(
        &state,
        &admin,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Shipped,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(shipped.items.len(), 2);

    // Admin places one for the other customer
    order_service::create_order(
        &state,
        &admin,
        CreateOrderRequest {
            customer: Some(other_customer_id),
            items: vec![OrderItemRequest {
                product: case,
                quantity: 1,
            }],
        },
    )
    .await?;

    let own = order_service::list_orders(&state, &customer, OrderListQuery::default())
        .await?
        .data
        .unwrap();
    assert_eq!(own.items.len(), 1);

    let all = order_service::list_orders(&state, &admin, OrderListQuery::default()).await?;
    assert_eq!(all.meta.and_then(|m| m.total), Some(2));

    let pending = order_service::list_orders(
        &state,
        &admin,
        OrderListQuery {
            status: Some(OrderStatus::Pending),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(pending.items.len(), 1);
    assert_eq!(pending.items[0].customer, other_customer_id);

    // Deleting the order removes its items
    order_service::delete_order(&state, &admin, order.id).await?;
    let left = order_service::get_order(&state, &admin, order.id).await;
    assert!(matches!(left, Err(AppError::NotFound)));
    assert_eq!(OrderItems::find().count(&state.orm).await?, 1);

    Ok(())
}

async fn seed_product(
    state: &AppState,
    product_type: ProductType,
    sku: &str,
    price: Decimal,
) -> anyhow::Result<Uuid> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        product_type: Set(product_type),
        product_name: Set(format!("Test {sku}")),
        product_description: Set(String::new()),
        product_image: Set(None),
        product_price: Set(price),
        product_color_id: Set(None),
        product_quantity: Set(10),
        sku: Set(sku.to_string()),
        created_at: NotSet,
        updated_at: NotSet,
        created_by: Set(None),
        updated_by: Set(None),
    }
    .insert(&state.orm)
    .await?;

    Ok(product.id)
}
