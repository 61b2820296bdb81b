mod common;

use chrono::{Duration, Utc};
use inventory_api::{
    dto::{
        accessories::CreateAccessoryRequest,
        colors::CreateColorRequest,
        products::{CreateProductRequest, UpdateProductRequest},
        reviews::CreateReviewRequest,
    },
    entity::{
        admins::Entity as Admins,
        product_accessories::ActiveModel as LinkActive,
        products::{Entity as Products, ProductType},
        reviews::ActiveModel as ReviewActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{Pagination, ProductQuery},
    services::{
        accessory_service, color_service, product_service, review_service, user_service,
    },
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

// Catalog flow: colors, products, accessory links and reviews, plus the
// delete behaviours of users and colors.
#[tokio::test]
async fn catalog_links_reviews_and_delete_rules() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let admin = common::create_admin(&state, "catalog_admin").await?;
    let (customer, _) = common::create_customer(&state, "catalog_customer").await?;

    let black = color_service::create_color(
        &state,
        &admin,
        CreateColorRequest {
            name: "Black".into(),
            hex_code: "#000000".into(),
        },
    )
    .await?
    .data
    .unwrap();

    let phone = create_product(&state, &admin, ProductType::Phone, "PH-1", 5, Some(black.id)).await?;
    let laptop = create_product(&state, &admin, ProductType::Laptop, "LT-1", 0, None).await?;
    let charger = create_product(&state, &admin, ProductType::Accessory, "AC-1", 12, None).await?;

    assert_eq!(phone.created_by, Some(admin.user_id));
    assert_eq!(phone.product_color, Some(black.id));
    assert!(phone.in_stock);
    assert!(!laptop.in_stock);

    // SKU is unique
    let duplicate = create_product(&state, &admin, ProductType::Phone, "PH-1", 1, None).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    // Link an accessory, then reject the same pair again
    let link = accessory_service::add_accessory(
        &state,
        &admin,
        phone.id,
        CreateAccessoryRequest {
            accessory: charger.id,
            required_quantity: 2,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(link.main_product, phone.id);
    assert_eq!(link.required_quantity, 2);

    let again = accessory_service::add_accessory(
        &state,
        &admin,
        phone.id,
        CreateAccessoryRequest {
            accessory: charger.id,
            required_quantity: 1,
        },
    )
    .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    // Wrong sides: accessory as main product, laptop as accessory
    let wrong_main = accessory_service::add_accessory(
        &state,
        &admin,
        charger.id,
        CreateAccessoryRequest {
            accessory: charger.id,
            required_quantity: 1,
        },
    )
    .await;
    assert!(matches!(wrong_main, Err(AppError::BadRequest(_))));

    let wrong_accessory = accessory_service::add_accessory(
        &state,
        &admin,
        phone.id,
        CreateAccessoryRequest {
            accessory: laptop.id,
            required_quantity: 1,
        },
    )
    .await;
    assert!(matches!(wrong_accessory, Err(AppError::BadRequest(_))));

    // The save hook refuses the same pair when the service is bypassed
    let direct = LinkActive {
        id: Set(Uuid::new_v4()),
        main_product_id: Set(laptop.id),
        accessory_id: Set(phone.id),
        required_quantity: Set(1),
    }
    .insert(&state.orm)
    .await;
    assert!(direct.is_err());

    let fetched = product_service::get_product(&state, phone.id).await?.data.unwrap();
    assert_eq!(fetched.related_accessories, vec![charger.id]);

    // Linked products cannot be retyped out of their side of the link
    let phone_to_accessory = product_service::update_product(
        &state,
        &admin,
        phone.id,
        UpdateProductRequest {
            product_type: Some(ProductType::Accessory),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(phone_to_accessory, Err(AppError::BadRequest(_))));

    let charger_to_laptop = product_service::update_product(
        &state,
        &admin,
        charger.id,
        UpdateProductRequest {
            product_type: Some(ProductType::Laptop),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(charger_to_laptop, Err(AppError::BadRequest(_))));

    let phone_row = Products::find_by_id(phone.id).one(&state.orm).await?.unwrap();
    let charger_row = Products::find_by_id(charger.id).one(&state.orm).await?.unwrap();
    assert_eq!(phone_row.product_type, ProductType::Phone);
    assert_eq!(charger_row.product_type, ProductType::Accessory);

    // Phone to Laptop keeps the link valid
    let phone_to_laptop = product_service::update_product(
        &state,
        &admin,
        phone.id,
        UpdateProductRequest {
            product_type: Some(ProductType::Laptop),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(phone_to_laptop.product_type, ProductType::Laptop);
    assert_eq!(phone_to_laptop.related_accessories, vec![charger.id]);
    product_service::update_product(
        &state,
        &admin,
        phone.id,
        UpdateProductRequest {
            product_type: Some(ProductType::Phone),
            ..Default::default()
        },
    )
    .await?;

    // Filters
    let in_stock_phones = product_service::list_products(
        &state,
        ProductQuery {
            product_type: Some(ProductType::Phone),
            in_stock: Some(true),
            ..Default::default()
        },
    )
    .await?;
    let meta = in_stock_phones.meta.clone().unwrap();
    assert_eq!(meta.total, Some(1));
    assert_eq!(in_stock_phones.data.unwrap().items[0].id, phone.id);

    let search = product_service::list_products(
        &state,
        ProductQuery {
            q: Some("lt-".into()),
            ..Default::default()
        },
    )
    .await?;
    let found: Vec<Uuid> = search.data.unwrap().items.iter().map(|p| p.id).collect();
    assert_eq!(found, vec![laptop.id]);

    // Wildcard characters in `q` match literally
    for wildcard in ["_", "%"] {
        let search = product_service::list_products(
            &state,
            ProductQuery {
                q: Some(wildcard.into()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(search.meta.unwrap().total, Some(0), "q={wildcard}");
    }

    // Reviews come back newest first
    ReviewActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(phone.id),
        rating: Set(3),
        comment: Set("older".into()),
        date_posted: Set((Utc::now() - Duration::days(2)).fixed_offset()),
    }
    .insert(&state.orm)
    .await?;
    review_service::create_review(
        &state,
        &customer,
        phone.id,
        CreateReviewRequest {
            rating: 5,
            comment: "newer".into(),
        },
    )
    .await?;

    let reviews = review_service::list_reviews(&state, phone.id, Pagination::default())
        .await?
        .data
        .unwrap();
    let comments: Vec<&str> = reviews.items.iter().map(|r| r.comment.as_str()).collect();
    assert_eq!(comments, vec!["newer", "older"]);

    let bad_rating = review_service::create_review(
        &state,
        &customer,
        phone.id,
        CreateReviewRequest {
            rating: 0,
            comment: "nope".into(),
        },
    )
    .await;
    assert!(matches!(bad_rating, Err(AppError::BadRequest(_))));

    // Partial update only touches the given fields
    let restocked = product_service::update_product(
        &state,
        &admin,
        laptop.id,
        UpdateProductRequest {
            product_quantity: Some(4),
            product_image: Some(Some("laptop.png".into())),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert!(restocked.in_stock);
    assert_eq!(restocked.sku, "LT-1");
    assert_eq!(restocked.product_image.as_deref(), Some("laptop.png"));

    // Deleting a color leaves products without one
    color_service::delete_color(&state, &admin, black.id).await?;
    let phone_row = Products::find_by_id(phone.id).one(&state.orm).await?.unwrap();
    assert_eq!(phone_row.product_color_id, None);

    // A product creator cannot be deleted
    let blocked = user_service::delete_user(&state, &admin, admin.user_id).await;
    assert!(matches!(blocked, Err(AppError::Conflict(_))));

    // Any other user can, and their profile goes with them
    let other_admin = common::create_admin(&state, "catalog_admin_two").await?;
    user_service::delete_user(&state, &admin, other_admin.user_id).await?;
    let admins = Admins::find().all(&state.orm).await?;
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].user_id, Some(admin.user_id));

    Ok(())
}

async fn create_product(
    state: &AppState,
    admin: &AuthUser,
    product_type: ProductType,
    sku: &str,
    quantity: i32,
    color: Option<Uuid>,
) -> Result<inventory_api::models::Product, AppError> {
    let resp = product_service::create_product(
        state,
        admin,
        CreateProductRequest {
            product_type,
            product_name: format!("{} {sku}", product_type.label()),
            product_description: String::new(),
            product_image: None,
            product_price: Decimal::new(49999, 2),
            product_color: color,
            product_quantity: quantity,
            sku: sku.to_string(),
        },
    )
    .await?;
    Ok(resp.data.expect("product data"))
}
