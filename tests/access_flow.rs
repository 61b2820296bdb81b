mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use inventory_api::{
    dto::profiles::{CreateAdminRequest, CreateCustomerRequest},
    entity::{
        admins::{Column as AdminCol, Entity as Admins},
        customers::{Column as CustomerCol, Entity as Customers},
        users::{Column as UserCol, Entity as Users},
    },
    error::AppError,
    models::Role,
    routes::create_api_router,
    services::{auth_service::issue_token, profile_service},
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, sea_query::Expr};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn bearer(user_id: Uuid, role: Role) -> String {
    let token = issue_token(&common::auth_settings(), user_id, role).expect("token");
    format!("Bearer {token}")
}

fn json_request(method: &str, uri: &str, auth: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, auth)
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// Access flow: roles come from the profile rows on every request, payloads
// are checked before any write, and one user never ends up with both profiles.
#[tokio::test]
async fn roles_follow_profiles_and_payloads_are_checked() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;
    let app = Router::new()
        .nest("/api", create_api_router())
        .with_state(state.clone());

    assert!(common::admin_code().len() <= 20);
    let admin = common::create_admin(&state, "access_admin").await?;
    let (customer, _) = common::create_customer(&state, "access_customer").await?;
    let admin_auth = bearer(admin.user_id, Role::Admin);
    let customer_auth = bearer(customer.user_id, Role::Customer);

    let (status, _) = send(&app, json_request("GET", "/api/users", &admin_auth, Value::Null)).await;
    assert_eq!(status, StatusCode::OK);

    // Customers are kept out of admin routes
    let request = json_request(
        "POST",
        "/api/colors",
        &customer_auth,
        json!({ "name": "Red", "hex_code": "#FF0000" }),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden");

    let (status, _) = send(&app, json_request("GET", "/api/users", &customer_auth, Value::Null)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/orders/{}/status", Uuid::new_v4());
    let request = json_request("PATCH", &uri, &customer_auth, json!({ "status": "Shipped" }));
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A role claim the profiles do not back is ignored
    let forged = bearer(customer.user_id, Role::Admin);
    let (status, _) = send(&app, json_request("GET", "/api/users", &forged, Value::Null)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Payload checks
    let request = json_request(
        "POST",
        "/api/colors",
        &admin_auth,
        json!({ "name": " ", "hex_code": "#FF00000" }),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("name"), "{message}");
    assert!(message.contains("hex_code"), "{message}");

    let request = json_request(
        "POST",
        "/api/products",
        &admin_auth,
        json!({
            "product_type": "PH",
            "product_name": "Pixel",
            "product_price": "-1.00",
            "product_quantity": -3,
            "sku": "PH-1"
        }),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("product_price"), "{message}");
    assert!(message.contains("product_quantity"), "{message}");

    let request = json_request(
        "POST",
        "/api/products",
        &admin_auth,
        json!({
            "product_type": "TV",
            "product_name": "Screen",
            "product_price": "10.00",
            "sku": "TV-1"
        }),
    );
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let uri = format!("/api/products/{}/reviews", Uuid::new_v4());
    let request = json_request("POST", &uri, &customer_auth, json!({ "rating": 6, "comment": "wow" }));
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Profile creation for the same user is serialized
    let contested = common::create_user(&state, "access_contested").await?;
    let (as_admin, as_customer) = tokio::join!(
        profile_service::create_admin(
            &state,
            &admin,
            CreateAdminRequest {
                user: contested,
                admin_code: common::admin_code(),
            },
        ),
        profile_service::create_customer(
            &state,
            &admin,
            CreateCustomerRequest {
                user: Some(contested),
                phone_number: "+15550101".into(),
            },
        ),
    );
    assert!(as_admin.is_ok() != as_customer.is_ok());
    let loser = as_admin.err().or(as_customer.err());
    assert!(matches!(loser, Some(AppError::Conflict(_))), "{loser:?}");
    let admins = Admins::find().filter(AdminCol::UserId.eq(contested)).count(&state.orm).await?;
    let customers = Customers::find()
        .filter(CustomerCol::UserId.eq(contested))
        .count(&state.orm)
        .await?;
    assert_eq!(admins + customers, 1);

    // Removing the admin profile revokes admin access for live tokens
    Admins::delete_many()
        .filter(AdminCol::UserId.eq(admin.user_id))
        .exec(&state.orm)
        .await?;
    let (status, _) = send(&app, json_request("GET", "/api/users", &admin_auth, Value::Null)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, json_request("GET", "/api/users/me", &admin_auth, Value::Null)).await;
    assert_eq!(status, StatusCode::OK);

    // Deactivated and deleted users are unauthorized
    Users::update_many()
        .col_expr(UserCol::IsActive, Expr::value(false))
        .filter(UserCol::Id.eq(customer.user_id))
        .exec(&state.orm)
        .await?;
    let (status, _) = send(&app, json_request("GET", "/api/users/me", &customer_auth, Value::Null)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let ghost = bearer(Uuid::new_v4(), Role::Admin);
    let (status, _) = send(&app, json_request("GET", "/api/users", &ghost, Value::Null)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}
