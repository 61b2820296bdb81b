use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    dto::auth::Claims, entity::users::Entity as Users, error::AppError, models::Role,
    services::user_service::role_flags, state::AppState,
};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn ensure_role(user: &AuthUser, role: Role) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, Role::Admin)
}

/// Passes for admins and for the user owning the resource.
pub fn ensure_owner_or_admin(user: &AuthUser, owner: Option<Uuid>) -> Result<(), AppError> {
    if user.is_admin() || owner == Some(user.user_id) {
        return Ok(());
    }
    Err(AppError::Forbidden)
}

pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;
    Ok(decoded.claims)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::BadRequest("Invalid Authorization scheme".into()))?
            .trim();

        let claims = decode_claims(token, &state.auth.jwt_secret)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

        // The role claim is informational; profiles may have changed since login.
        Users::find_by_id(user_id)
            .one(&state.orm)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AppError::Unauthorized)?;
        let (is_admin, is_customer) = role_flags(&state.orm, user_id).await?;
        let role = Role::from_flags(is_admin, is_customer);

        if role != claims.role {
            tracing::debug!(
                %user_id,
                claimed = claims.role.as_str(),
                role = role.as_str(),
                "token role is stale"
            );
        }

        Ok(AuthUser { user_id, role })
    }
}
