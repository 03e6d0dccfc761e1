use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{error::AppError, services::Identity, AppState};

/// Any authenticated caller; holds the user id.
pub struct AuthUser(pub i32);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = authenticate(parts, state).await?;
        Ok(AuthUser(identity.user_id))
    }
}

/// Caller whose token carries the admin claim. Valid non-admin tokens are
/// rejected with 403, missing or invalid ones with 401.
pub struct AdminUser(pub i32);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = authenticate(parts, state).await?;
        if !identity.is_admin {
            tracing::warn!(user_id = identity.user_id, "Admin route denied");
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(identity.user_id))
    }
}

pub struct OptionalAuthUser(pub Option<i32>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(
            authenticate(parts, state).await.ok().map(|identity| identity.user_id),
        ))
    }
}

async fn authenticate(parts: &mut Parts, state: &AppState) -> Result<Identity, AppError> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| AppError::Unauthorized)?;

    state.auth_service.validate_token(bearer.token().trim())
}
