use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::profiles::{AdminList, CreateAdminRequest, UpdateAdminRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Admin,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_admins).post(create_admin))
        .route(
            "/{id}",
            get(get_admin).put(update_admin).delete(delete_admin),
        )
}

#[utoipa::path(
    post,
    path = "/api/admins",
    request_body = CreateAdminRequest,
    responses(
        (status = 200, description = "Create admin profile", body = ApiResponse<Admin>),
        (status = 409, description = "User already has a profile or admin code taken")
    ),
    tag = "Admins"
)]
pub async fn create_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAdminRequest>,
) -> AppResult<Json<ApiResponse<Admin>>> {
    let resp = profile_service::create_admin(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admins",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List admins", body = ApiResponse<AdminList>)
    ),
    tag = "Admins"
)]
pub async fn list_admins(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<AdminList>>> {
    let resp = profile_service::list_admins(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Get admin", body = ApiResponse<Admin>),
        (status = 404, description = "Admin not found")
    ),
    tag = "Admins"
)]
pub async fn get_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Admin>>> {
    let resp = profile_service::get_admin(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "Updated admin", body = ApiResponse<Admin>)
    ),
    tag = "Admins"
)]
pub async fn update_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAdminRequest>,
) -> AppResult<Json<ApiResponse<Admin>>> {
    let resp = profile_service::update_admin(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Deleted admin")
    ),
    tag = "Admins"
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Deleted>> {
    let resp = profile_service::delete_admin(&state, &user, id).await?;
    Ok(Json(resp))
}
