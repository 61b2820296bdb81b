use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        accessories::{AccessoryList, CreateAccessoryRequest, UpdateAccessoryRequest},
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        colors::{ColorList, CreateColorRequest, UpdateColorRequest},
        orders::{CreateOrderRequest, OrderItemRequest, OrderList, UpdateOrderStatusRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        profiles::{
            AdminList, CreateAdminRequest, CreateCustomerRequest, CustomerList,
            UpdateAdminRequest, UpdateCustomerRequest,
        },
        reviews::{CreateReviewRequest, ReviewList},
        users::{UpdateUserRequest, UserList},
    },
    entity::{orders::OrderStatus, products::ProductType},
    models::{Admin, Color, Customer, Order, OrderItem, Product, ProductAccessory, Review, Role, User},
    response::{ApiResponse, Meta},
    routes::{
        accessories, admins, auth, colors, customers, health, orders, params, products, reviews,
        users,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        users::me,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        admins::create_admin,
        admins::list_admins,
        admins::get_admin,
        admins::update_admin,
        admins::delete_admin,
        customers::create_customer,
        customers::list_customers,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer,
        colors::list_colors,
        colors::get_color,
        colors::create_color,
        colors::update_color,
        colors::delete_color,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::list_accessories,
        products::add_accessory,
        products::list_reviews,
        products::create_review,
        accessories::update_accessory,
        accessories::remove_accessory,
        reviews::get_review,
        reviews::delete_review,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order_status,
        orders::delete_order,
        orders::add_item,
        orders::remove_item
    ),
    components(
        schemas(
            Role,
            User,
            Admin,
            Customer,
            Color,
            ProductType,
            Product,
            ProductAccessory,
            Review,
            OrderStatus,
            Order,
            OrderItem,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UpdateUserRequest,
            UserList,
            CreateAdminRequest,
            UpdateAdminRequest,
            AdminList,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CustomerList,
            CreateColorRequest,
            UpdateColorRequest,
            ColorList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateAccessoryRequest,
            UpdateAccessoryRequest,
            AccessoryList,
            CreateReviewRequest,
            ReviewList,
            CreateOrderRequest,
            OrderItemRequest,
            UpdateOrderStatusRequest,
            OrderList,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            health::HealthData,
            Meta,
            ApiResponse<User>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Order>,
            ApiResponse<OrderList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "User accounts"),
        (name = "Admins", description = "Admin profiles"),
        (name = "Customers", description = "Customer profiles"),
        (name = "Colors", description = "Product colors"),
        (name = "Products", description = "Product catalog"),
        (name = "Accessories", description = "Accessory links between products"),
        (name = "Reviews", description = "Product reviews"),
        (name = "Orders", description = "Orders and line items"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
