use axum::{
    Json, Router,
    extract::{Path, State},
    routing::put,
};
use uuid::Uuid;

use crate::{
    dto::accessories::UpdateAccessoryRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::ProductAccessory,
    response::{ApiResponse, Deleted},
    services::accessory_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(update_accessory).delete(remove_accessory))
}

#[utoipa::path(
    put,
    path = "/api/accessories/{id}",
    params(("id" = Uuid, Path, description = "Accessory link ID")),
    request_body = UpdateAccessoryRequest,
    responses(
        (status = 200, description = "Updated link", body = ApiResponse<ProductAccessory>),
        (status = 404, description = "Link not found")
    ),
    tag = "Accessories"
)]
pub async fn update_accessory(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAccessoryRequest>,
) -> AppResult<Json<ApiResponse<ProductAccessory>>> {
    let resp = accessory_service::update_accessory(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/accessories/{id}",
    params(("id" = Uuid, Path, description = "Accessory link ID")),
    responses(
        (status = 200, description = "Removed link")
    ),
    tag = "Accessories"
)]
pub async fn remove_accessory(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Deleted>> {
    let resp = accessory_service::remove_accessory(&state, &user, id).await?;
    Ok(Json(resp))
}
