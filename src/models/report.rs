use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OfferLikes {
    pub id: i32,
    pub title: String,
    pub store: String,
    pub likes: i32,
    pub featured: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserFavoriteCount {
    pub user_id: i32,
    pub name: String,
    pub total_favorites: i64,
}

#[derive(Debug, Serialize)]
pub struct TopUsersResponse {
    pub top_users: Vec<UserFavoriteCount>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryEngagement {
    pub category: String,
    pub favorites: i64,
    pub comments: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub total_users: i64,
    pub total_offers: i64,
    pub total_favorites: i64,
    pub featured_offers: Vec<OfferLikes>,
    pub most_liked_offers: Vec<OfferLikes>,
}

#[derive(Debug, Serialize)]
pub struct AdminReport {
    pub total_users: i64,
    pub total_offers: i64,
    pub top_offers: Vec<OfferLikes>,
}

#[derive(Debug, Deserialize)]
pub struct FavoritesWindowQuery {
    #[serde(alias = "inicio")]
    pub start: Option<String>,
    #[serde(alias = "fim")]
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportPeriod {
    pub start: String,
    pub end: String,
}

impl ReportPeriod {
    pub fn new(start: Date, end: Date) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct WindowFavoriteRow {
    pub id: i32,
    pub user_id: i32,
    pub offer_id: i32,
    pub created_at: OffsetDateTime,
    pub offer_title: Option<String>,
    pub offer_store: Option<String>,
    pub offer_likes: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct WindowFavorite {
    pub favorite_id: i32,
    pub user_id: i32,
    pub offer_id: i32,
    pub title: String,
    pub store: String,
    pub likes: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub favorited_at: OffsetDateTime,
}

impl WindowFavoriteRow {
    pub fn into_entry(self) -> Option<WindowFavorite> {
        Some(WindowFavorite {
            favorite_id: self.id,
            user_id: self.user_id,
            offer_id: self.offer_id,
            title: self.offer_title?,
            store: self.offer_store.unwrap_or_default(),
            likes: self.offer_likes.unwrap_or_default(),
            favorited_at: self.created_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FavoritesReport {
    pub total_favorites: usize,
    pub period: ReportPeriod,
    pub favorites: Vec<WindowFavorite>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilteredOffersQuery {
    #[serde(alias = "loja")]
    pub store: Option<String>,
    #[serde(alias = "categoria")]
    pub category: Option<String>,
    #[serde(alias = "data_min")]
    pub created_from: Option<String>,
    #[serde(alias = "data_max")]
    pub created_to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FilteredOffersResponse {
    pub offers: Vec<OfferLikes>,
}

#[derive(Debug, Serialize)]
pub struct CategoryEngagementResponse {
    pub categories: Vec<CategoryEngagement>,
}

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub status: String,
    pub alerted_categories: Vec<String>,
}
