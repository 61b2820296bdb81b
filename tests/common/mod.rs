#![allow(dead_code)]

use inventory_api::{
    db::{create_pool, run_migrations},
    entity::{
        admins::ActiveModel as AdminActive, customers::ActiveModel as CustomerActive,
        users::ActiveModel as UserActive,
    },
    middleware::auth::AuthUser,
    models::Role,
    state::{AppState, AuthSettings},
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";

pub fn auth_settings() -> AuthSettings {
    AuthSettings {
        jwt_secret: TEST_SECRET.to_string(),
        jwt_ttl_hours: 1,
    }
}

/// Database URL for flow tests; `None` means the caller should skip.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests.");
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url, 5).await?;
    let state = AppState::with_auth(pool, auth_settings());
    run_migrations(&state.orm).await?;

    // Clean tables between runs
    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "TRUNCATE TABLE order_items, orders, reviews, product_accessories, products, colors, \
             audit_logs, admins, customers, users RESTART IDENTITY CASCADE",
        ))
        .await?;

    Ok(state)
}

pub async fn create_user(state: &AppState, username: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        password_hash: Set("dummy".into()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        is_active: Set(true),
        date_joined: NotSet,
        last_login: Set(None),
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}

/// Unique code that fits the `varchar(20)` column.
pub fn admin_code() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("ADM-{}", &id[..8])
}

pub async fn create_admin(state: &AppState, username: &str) -> anyhow::Result<AuthUser> {
    let user_id = create_user(state, username).await?;
    AdminActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(Some(user_id)),
        admin_code: Set(admin_code()),
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id,
        role: Role::Admin,
    })
}

/// Returns the session and the customer profile id.
pub async fn create_customer(state: &AppState, username: &str) -> anyhow::Result<(AuthUser, Uuid)> {
    let user_id = create_user(state, username).await?;
    let customer = CustomerActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(Some(user_id)),
        phone_number: Set("+15550100".into()),
    }
    .insert(&state.orm)
    .await?;

    Ok((
        AuthUser {
            user_id,
            role: Role::Customer,
        },
        customer.id,
    ))
}
