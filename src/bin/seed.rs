use inventory_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    services::auth_service::hash_password,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    // Ensure migrations are applied.
    run_migrations(&create_orm_conn(&pool)).await?;

    let admin_user = ensure_user(&pool, "admin", "admin@example.com", "admin12345").await?;
    ensure_admin_profile(&pool, admin_user, "ADM-0001").await?;
    let customer_user = ensure_user(&pool, "customer", "customer@example.com", "customer123").await?;
    let customer_id = ensure_customer_profile(&pool, customer_user, "+15550100").await?;

    let black = ensure_color(&pool, "Black", "#000000").await?;
    let silver = ensure_color(&pool, "Silver", "#C0C0C0").await?;

    let phone = ensure_product(
        &pool,
        admin_user,
        ProductSeed {
            product_type: "PH",
            name: "Pixel Phone",
            description: "6.1 inch phone with 128GB storage",
            price: Decimal::new(69900, 2),
            quantity: 25,
            sku: "PH-PIXEL-128",
            color: Some(black),
        },
    )
    .await?;
    let laptop = ensure_product(
        &pool,
        admin_user,
        ProductSeed {
            product_type: "LT",
            name: "Ultrabook 14",
            description: "14 inch laptop, 16GB RAM",
            price: Decimal::new(129900, 2),
            quantity: 10,
            sku: "LT-ULTRA-14",
            color: Some(silver),
        },
    )
    .await?;
    let charger = ensure_product(
        &pool,
        admin_user,
        ProductSeed {
            product_type: "AC",
            name: "USB-C Charger 65W",
            description: "Fast charger for phones and laptops",
            price: Decimal::new(3999, 2),
            quantity: 100,
            sku: "AC-CHARGER-65W",
            color: Some(black),
        },
    )
    .await?;
    let case = ensure_product(
        &pool,
        admin_user,
        ProductSeed {
            product_type: "AC",
            name: "Phone Case",
            description: "Shock absorbing case",
            price: Decimal::new(1999, 2),
            quantity: 0,
            sku: "AC-CASE-PIXEL",
            color: None,
        },
    )
    .await?;

    link_accessory(&pool, phone, charger, 1).await?;
    link_accessory(&pool, phone, case, 1).await?;
    link_accessory(&pool, laptop, charger, 1).await?;

    seed_review(&pool, phone, 5, "Great battery life").await?;
    seed_order(&pool, customer_user, customer_id, &[(phone, 1), (charger, 2)]).await?;

    println!("Seed completed. Admin user: {admin_user}, customer user: {customer_user}");
    Ok(())
}

struct ProductSeed {
    product_type: &'static str,
    name: &'static str,
    description: &'static str,
    price: Decimal,
    quantity: i32,
    sku: &'static str,
    color: Option<Uuid>,
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, password_hash)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (username) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE username = $1")
                .bind(username)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {username}");
    Ok(user_id)
}

async fn ensure_admin_profile(pool: &sqlx::PgPool, user_id: Uuid, code: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO admins (id, user_id, admin_code)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(code)
    .execute(pool)
    .await?;
    Ok(())
}

async fn ensure_customer_profile(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    phone_number: &str,
) -> anyhow::Result<Uuid> {
    sqlx::query(
        r#"
        INSERT INTO customers (id, user_id, phone_number)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(phone_number)
    .execute(pool)
    .await?;

    let (id,): (Uuid,) = sqlx::query_as("SELECT id FROM customers WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn ensure_color(pool: &sqlx::PgPool, name: &str, hex_code: &str) -> anyhow::Result<Uuid> {
    sqlx::query(
        r#"
        INSERT INTO colors (id, name, hex_code)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(hex_code)
    .execute(pool)
    .await?;

    let (id,): (Uuid,) = sqlx::query_as("SELECT id FROM colors WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn ensure_product(
    pool: &sqlx::PgPool,
    created_by: Uuid,
    seed: ProductSeed,
) -> anyhow::Result<Uuid> {
    sqlx::query(
        r#"
        INSERT INTO products (
            id, product_type, product_name, product_description, product_price,
            product_color_id, product_quantity, sku, created_by, updated_by
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        ON CONFLICT (sku) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(seed.product_type)
    .bind(seed.name)
    .bind(seed.description)
    .bind(seed.price)
    .bind(seed.color)
    .bind(seed.quantity)
    .bind(seed.sku)
    .bind(created_by)
    .execute(pool)
    .await?;

    let (id,): (Uuid,) = sqlx::query_as("SELECT id FROM products WHERE sku = $1")
        .bind(seed.sku)
        .fetch_one(pool)
        .await?;
    println!("Ensured product {}", seed.sku);
    Ok(id)
}

async fn link_accessory(
    pool: &sqlx::PgPool,
    main_product: Uuid,
    accessory: Uuid,
    required_quantity: i32,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO product_accessories (id, main_product_id, accessory_id, required_quantity)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (main_product_id, accessory_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(main_product)
    .bind(accessory)
    .bind(required_quantity)
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_review(
    pool: &sqlx::PgPool,
    product_id: Uuid,
    rating: i16,
    comment: &str,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO reviews (id, product_id, rating, comment)
        SELECT $1, $2, $3, $4
        WHERE NOT EXISTS (SELECT 1 FROM reviews WHERE product_id = $2)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(product_id)
    .bind(rating)
    .bind(comment)
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_order(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    customer_id: Uuid,
    items: &[(Uuid, i32)],
) -> anyhow::Result<()> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM orders WHERE customer_id = $1")
        .bind(customer_id)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        println!("Sample order already present");
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    let order_id = Uuid::new_v4();
    sqlx::query("INSERT INTO orders (id, user_id, customer_id) VALUES ($1, $2, $3)")
        .bind(order_id)
        .bind(user_id)
        .bind(customer_id)
        .execute(&mut *tx)
        .await?;

    for (product_id, quantity) in items {
        sqlx::query(
            "INSERT INTO order_items (id, order_id, product_id, quantity) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    println!("Seeded order {order_id}");
    Ok(())
}
