use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult,
    middleware::{AdminUser, AuthUser},
    models::{
        AdminReport, CategoryEngagementResponse, FavoritesReport, FavoritesWindowQuery,
        FilteredOffersQuery, FilteredOffersResponse, StatsSummary, TopUsersResponse,
    },
    services::{parse_window, TOP_USERS_LIMIT},
    AppState,
};

pub async fn stats_summary(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> AppResult<Json<StatsSummary>> {
    Ok(Json(state.reporting_service.stats_summary().await?))
}

pub async fn top_users(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> AppResult<Json<TopUsersResponse>> {
    let top_users = state
        .reporting_service
        .top_users_by_favorites(TOP_USERS_LIMIT)
        .await?;

    Ok(Json(TopUsersResponse { top_users }))
}

pub async fn favorites_report(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(query): Query<FavoritesWindowQuery>,
) -> AppResult<Json<FavoritesReport>> {
    let (start, end) = parse_window(&query)?;

    Ok(Json(
        state
            .reporting_service
            .favorites_in_window(start, end)
            .await?,
    ))
}

pub async fn filtered_offers(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(query): Query<FilteredOffersQuery>,
) -> AppResult<Json<FilteredOffersResponse>> {
    let offers = state.reporting_service.filtered_offers(query).await?;

    Ok(Json(FilteredOffersResponse { offers }))
}

pub async fn engaged_categories(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> AppResult<Json<CategoryEngagementResponse>> {
    let categories = state.reporting_service.category_engagement().await?;

    Ok(Json(CategoryEngagementResponse { categories }))
}

pub async fn export_categories(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> AppResult<impl IntoResponse> {
    let csv = state.reporting_service.category_csv().await?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"categorias.csv\""),
        ],
        csv,
    ))
}

pub async fn admin_report(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> AppResult<Json<AdminReport>> {
    Ok(Json(state.reporting_service.admin_report().await?))
}
