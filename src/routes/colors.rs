use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::colors::{ColorList, CreateColorRequest, UpdateColorRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Color,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::color_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_colors).post(create_color))
        .route(
            "/{id}",
            get(get_color).put(update_color).delete(delete_color),
        )
}

#[utoipa::path(
    get,
    path = "/api/colors",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List colors", body = ApiResponse<ColorList>)
    ),
    security(()),
    tag = "Colors"
)]
pub async fn list_colors(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ColorList>>> {
    let resp = color_service::list_colors(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/colors/{id}",
    params(("id" = Uuid, Path, description = "Color ID")),
    responses(
        (status = 200, description = "Get color", body = ApiResponse<Color>),
        (status = 404, description = "Color not found")
    ),
    security(()),
    tag = "Colors"
)]
pub async fn get_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Color>>> {
    let resp = color_service::get_color(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/colors",
    request_body = CreateColorRequest,
    responses(
        (status = 200, description = "Create color", body = ApiResponse<Color>),
        (status = 409, description = "Name or hex code already used")
    ),
    tag = "Colors"
)]
pub async fn create_color(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateColorRequest>,
) -> AppResult<Json<ApiResponse<Color>>> {
    let resp = color_service::create_color(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/colors/{id}",
    params(("id" = Uuid, Path, description = "Color ID")),
    request_body = UpdateColorRequest,
    responses(
        (status = 200, description = "Updated color", body = ApiResponse<Color>)
    ),
    tag = "Colors"
)]
pub async fn update_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateColorRequest>,
) -> AppResult<Json<ApiResponse<Color>>> {
    let resp = color_service::update_color(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/colors/{id}",
    params(("id" = Uuid, Path, description = "Color ID")),
    responses(
        (status = 200, description = "Deleted color; products keep no color")
    ),
    tag = "Colors"
)]
pub async fn delete_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Deleted>> {
    let resp = color_service::delete_color(&state, &user, id).await?;
    Ok(Json(resp))
}
