use chrono::Utc;
use inventory_api::{
    dto::{
        orders::{CreateOrderRequest, OrderItemRequest},
        products::CreateProductRequest,
        reviews::CreateReviewRequest,
    },
    entity::{
        order_items, orders::OrderStatus, product_accessories::check_pair, products,
        products::ProductType,
    },
    error::AppError,
    models::{OrderItem, Product, Role, sub_total},
    routes::params::{MAX_PAGE, Pagination, ProductQuery},
    validation::price,
};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

fn check(payload: &impl Validate) -> Result<(), AppError> {
    payload.validate().map_err(AppError::from)
}

fn product(quantity: i32, price: Decimal) -> products::Model {
    let now = Utc::now().fixed_offset();
    products::Model {
        id: Uuid::new_v4(),
        product_type: ProductType::Phone,
        product_name: "Pixel".into(),
        product_description: String::new(),
        product_image: None,
        product_price: price,
        product_color_id: None,
        product_quantity: quantity,
        sku: "PH-1".into(),
        created_at: now,
        updated_at: now,
        created_by: None,
        updated_by: None,
    }
}

fn create_product_request(price: Decimal, quantity: i32) -> CreateProductRequest {
    CreateProductRequest {
        product_type: ProductType::Accessory,
        product_name: "Charger".into(),
        product_description: String::new(),
        product_image: None,
        product_price: price,
        product_color: None,
        product_quantity: quantity,
        sku: "AC-1".into(),
    }
}

#[test]
fn in_stock_follows_quantity() {
    for (quantity, expected) in [(0, false), (1, true), (42, true)] {
        let model = product(quantity, Decimal::new(100, 2));
        assert_eq!(model.in_stock(), expected, "quantity {quantity}");
        assert_eq!(Product::from_entity(model, Vec::new()).in_stock, expected);
    }
}

#[test]
fn sub_total_is_price_times_quantity() {
    assert_eq!(sub_total(Decimal::new(99999, 2), 2), Decimal::new(199998, 2));
    assert_eq!(sub_total(Decimal::new(1999, 2), 0), Decimal::ZERO);

    let item = order_items::Model {
        id: Uuid::new_v4(),
        order_id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        quantity: 3,
    };
    let item = OrderItem::from_entity(item, Decimal::new(1050, 2));
    assert_eq!(item.sub_total, Decimal::new(3150, 2));
}

#[test]
fn role_prefers_admin_profile() {
    assert_eq!(Role::from_flags(true, false), Role::Admin);
    assert_eq!(Role::from_flags(true, true), Role::Admin);
    assert_eq!(Role::from_flags(false, true), Role::Customer);
    assert_eq!(Role::from_flags(false, false), Role::Unassigned);
    assert_eq!(Role::Customer.as_str(), "customer");
}

#[test]
fn accessory_pairs_require_device_and_accessory() {
    assert!(check_pair(ProductType::Phone, ProductType::Accessory).is_ok());
    assert!(check_pair(ProductType::Laptop, ProductType::Accessory).is_ok());
    assert!(check_pair(ProductType::Accessory, ProductType::Accessory).is_err());
    assert!(check_pair(ProductType::Phone, ProductType::Laptop).is_err());
}

#[test]
fn type_and_status_codes_serialize_as_stored() {
    assert_eq!(serde_json::to_string(&ProductType::Phone).unwrap(), "\"PH\"");
    assert_eq!(serde_json::to_string(&ProductType::Laptop).unwrap(), "\"LT\"");
    assert_eq!(ProductType::default(), ProductType::Accessory);
    assert_eq!(OrderStatus::default(), OrderStatus::Pending);

    let status: OrderStatus = serde_json::from_str("\"Shipped\"").unwrap();
    assert_eq!(status, OrderStatus::Shipped);
    assert!(serde_json::from_str::<ProductType>("\"XX\"").is_err());
}

#[test]
fn pagination_is_clamped() {
    assert_eq!(Pagination::default().normalize(), (1, 20, 0));

    let pagination = Pagination {
        page: Some(3),
        per_page: Some(10),
    };
    assert_eq!(pagination.normalize(), (3, 10, 20));

    let pagination = Pagination {
        page: Some(0),
        per_page: Some(500),
    };
    assert_eq!(pagination.normalize(), (1, 100, 0));
}

#[test]
fn huge_page_number_does_not_overflow() {
    let pagination = Pagination {
        page: Some(i64::MAX),
        per_page: Some(100),
    };
    let (page, per_page, offset) = pagination.normalize();
    assert_eq!(page, MAX_PAGE);
    assert_eq!(per_page, 100);
    assert_eq!(offset, (MAX_PAGE - 1) * 100);

    let pagination = Pagination {
        page: Some(i64::MIN),
        per_page: Some(i64::MIN),
    };
    assert_eq!(pagination.normalize(), (1, 1, 0));
}

#[test]
fn search_wildcards_are_escaped() {
    let query = |q: &str| ProductQuery {
        q: Some(q.into()),
        ..Default::default()
    };
    assert_eq!(query("pixel").search_pattern().as_deref(), Some("%pixel%"));
    assert_eq!(query("100%").search_pattern().as_deref(), Some("%100\\%%"));
    assert_eq!(query("a_b").search_pattern().as_deref(), Some("%a\\_b%"));
    assert_eq!(query("c:\\x").search_pattern().as_deref(), Some("%c:\\\\x%"));
    assert_eq!(query("").search_pattern(), None);
    assert_eq!(ProductQuery::default().search_pattern(), None);
}

#[test]
fn rating_outside_range_is_rejected() {
    for rating in [0, 6, -1] {
        let request = CreateReviewRequest {
            rating,
            comment: "ok".into(),
        };
        assert!(matches!(check(&request), Err(AppError::BadRequest(_))));
    }
    let request = CreateReviewRequest {
        rating: 5,
        comment: "great".into(),
    };
    assert!(check(&request).is_ok());

    let request = CreateReviewRequest {
        rating: 4,
        comment: "  ".into(),
    };
    match check(&request) {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "comment: this field may not be blank"),
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[test]
fn negative_quantities_are_rejected() {
    assert!(check(&create_product_request(Decimal::new(1000, 2), -1)).is_err());
    assert!(check(&create_product_request(Decimal::new(1000, 2), 0)).is_ok());

    let item = OrderItemRequest {
        product: Uuid::new_v4(),
        quantity: -2,
    };
    match check(&item) {
        Err(AppError::BadRequest(msg)) => assert!(msg.starts_with("quantity: "), "{msg}"),
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[test]
fn order_item_errors_carry_their_path() {
    let request = CreateOrderRequest {
        customer: None,
        items: vec![OrderItemRequest {
            product: Uuid::new_v4(),
            quantity: -1,
        }],
    };
    match check(&request) {
        Err(AppError::BadRequest(msg)) => assert!(msg.contains("items.quantity: "), "{msg}"),
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[test]
fn duplicate_products_in_one_order_are_rejected() {
    let product = Uuid::new_v4();
    let request = CreateOrderRequest {
        customer: None,
        items: vec![
            OrderItemRequest {
                product,
                quantity: 1,
            },
            OrderItemRequest {
                product,
                quantity: 2,
            },
        ],
    };
    match check(&request) {
        Err(AppError::BadRequest(msg)) => {
            assert!(msg.contains(&format!("product {product} is listed twice")), "{msg}")
        }
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[test]
fn price_must_fit_decimal_10_2() {
    assert!(price(&Decimal::new(99_999_999_99, 2)).is_ok());
    assert!(price(&Decimal::new(0, 0)).is_ok());

    let too_large = price(&Decimal::new(100_000_000_00, 2)).unwrap_err();
    assert_eq!(too_large.code, "max_digits");
    let too_precise = price(&Decimal::new(1001, 3)).unwrap_err();
    assert_eq!(too_precise.code, "decimal_places");
    let negative = price(&Decimal::new(-1, 0)).unwrap_err();
    assert_eq!(negative.code, "range");
}

#[test]
fn field_errors_are_reported_together() {
    let mut request = create_product_request(Decimal::new(-500, 2), 1);
    request.product_name = "   ".into();
    request.sku = "X".repeat(51);
    match check(&request) {
        Err(AppError::BadRequest(msg)) => {
            assert!(msg.contains("product_name: this field may not be blank"), "{msg}");
            assert!(msg.contains("sku: ensure this field has no more than 50 characters"), "{msg}");
            assert!(msg.contains("product_price: "), "{msg}");
        }
        other => panic!("expected bad request, got {other:?}"),
    }
}
