use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{FavoriteExistsResponse, FavoriteResponse, FavoritesPage, PageQuery},
    AppState,
};

pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<FavoritesPage>> {
    let page = state
        .engagement_service
        .list_favorites(user_id, query.into())
        .await?;

    Ok(Json(page))
}

pub async fn favorite_offer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(offer_id): Path<i32>,
) -> AppResult<(StatusCode, Json<FavoriteResponse>)> {
    let outcome = state.engagement_service.favorite(user_id, offer_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(FavoriteResponse {
            message: "Offer favorited".to_string(),
            offer_id: outcome.offer_id,
            likes: outcome.likes,
            featured: outcome.featured,
        }),
    ))
}

pub async fn unfavorite_offer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(offer_id): Path<i32>,
) -> AppResult<Json<FavoriteResponse>> {
    let outcome = state.engagement_service.unfavorite(user_id, offer_id).await?;

    Ok(Json(FavoriteResponse {
        message: "Offer unfavorited".to_string(),
        offer_id: outcome.offer_id,
        likes: outcome.likes,
        featured: outcome.featured,
    }))
}

pub async fn favorite_exists(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(offer_id): Path<i32>,
) -> AppResult<Json<FavoriteExistsResponse>> {
    let favorited = state
        .engagement_service
        .has_favorited(user_id, offer_id)
        .await?;

    Ok(Json(FavoriteExistsResponse { favorited }))
}
