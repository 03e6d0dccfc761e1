use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    middleware::{AdminUser, AuthUser, OptionalAuthUser},
    models::{
        AlertsResponse, CommentResponse, CommentsResponse, CreateCommentInput, CreateOfferInput,
        LikeResponse, ListOffersQuery, OfferResponse, OffersResponse, UpdateOfferInput,
    },
    services::alerts,
    AppState,
};

pub async fn list_offers(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Query(query): Query<ListOffersQuery>,
) -> AppResult<Json<OffersResponse>> {
    let response = state
        .offer_service
        .list(query.category.as_deref(), user_id)
        .await?;

    Ok(Json(response))
}

pub async fn create_offer(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(input): Json<CreateOfferInput>,
) -> AppResult<(StatusCode, Json<OfferResponse>)> {
    let response = state.offer_service.create(input).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_offer(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<i32>,
    Json(input): Json<UpdateOfferInput>,
) -> AppResult<Json<OfferResponse>> {
    let response = state.offer_service.update(id, input).await?;

    Ok(Json(response))
}

pub async fn delete_offer(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.offer_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn like_offer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LikeResponse>> {
    let response = state.offer_service.like(id).await?;

    Ok(Json(response))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(offer_id): Path<i32>,
) -> AppResult<Json<CommentsResponse>> {
    let comments = state.offer_service.list_comments(offer_id).await?;

    Ok(Json(CommentsResponse { comments }))
}

pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(offer_id): Path<i32>,
    Json(input): Json<CreateCommentInput>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let comment = state
        .offer_service
        .create_comment(user_id, offer_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

pub async fn check_alerts(AuthUser(_): AuthUser) -> Json<AlertsResponse> {
    Json(AlertsResponse {
        status: "alerts checked".to_string(),
        alerted_categories: alerts::check_category_alerts(),
    })
}
