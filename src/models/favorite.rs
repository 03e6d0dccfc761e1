use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, FromRow)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub offer_id: i32,
    pub created_at: OffsetDateTime,
}

/// A favorite row LEFT JOINed with its offer. The offer columns are `None`
/// when the offer row is gone.
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteWithOffer {
    pub id: i32,
    pub user_id: i32,
    pub offer_id: i32,
    pub created_at: OffsetDateTime,
    pub offer_title: Option<String>,
    pub offer_image: Option<String>,
    pub offer_store: Option<String>,
    pub offer_affiliate_link: Option<String>,
    pub offer_link: Option<String>,
    pub offer_price: Option<f64>,
    pub offer_likes: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct FavoritedOfferDto {
    pub favorite_id: i32,
    pub user_id: i32,
    pub offer_id: i32,
    pub title: String,
    pub image: String,
    pub store: String,
    pub affiliate_link: String,
    pub link: String,
    pub price: f64,
    pub likes: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub favorited_at: OffsetDateTime,
}

impl FavoriteWithOffer {
    /// Returns `None` for orphaned favorites.
    pub fn into_dto(self) -> Option<FavoritedOfferDto> {
        Some(FavoritedOfferDto {
            favorite_id: self.id,
            user_id: self.user_id,
            offer_id: self.offer_id,
            title: self.offer_title?,
            image: self.offer_image.unwrap_or_default(),
            store: self.offer_store.unwrap_or_default(),
            affiliate_link: self.offer_affiliate_link.unwrap_or_default(),
            link: self.offer_link.unwrap_or_default(),
            price: self.offer_price.unwrap_or_default(),
            likes: self.offer_likes.unwrap_or_default(),
            favorited_at: self.created_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Pages start at 1; the page size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.per_page - 1) / self.per_page
        }
    }
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        Self::new(query.page, query.per_page)
    }
}

#[derive(Debug, Serialize)]
pub struct FavoritesPage {
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub favorites: Vec<FavoritedOfferDto>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub message: String,
    pub offer_id: i32,
    pub likes: i32,
    pub featured: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoriteExistsResponse {
    pub favorited: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn favorite_row(title: Option<&str>) -> FavoriteWithOffer {
        FavoriteWithOffer {
            id: 3,
            user_id: 1,
            offer_id: 9,
            created_at: datetime!(2024-05-10 08:00:00 UTC),
            offer_title: title.map(str::to_string),
            offer_image: Some("img".to_string()),
            offer_store: Some("Loja".to_string()),
            offer_affiliate_link: None,
            offer_link: None,
            offer_price: Some(19.9),
            offer_likes: Some(4),
        }
    }

    #[test]
    fn test_page_request_clamps() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, per_page: 1 });
        assert_eq!(
            PageRequest::new(-3, 10_000),
            PageRequest {
                page: 1,
                per_page: MAX_PAGE_SIZE
            }
        );
        assert_eq!(PageRequest::new(4, 25), PageRequest { page: 4, per_page: 25 });
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_total_pages() {
        let page = PageRequest::new(1, 10);
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(1), 1);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
    }

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").expect("deserialization should succeed");
        assert_eq!(PageRequest::from(query), PageRequest::new(1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_orphaned_favorite_is_skipped() {
        assert!(favorite_row(None).into_dto().is_none());

        let dto = favorite_row(Some("Notebook")).into_dto().expect("offer present");
        assert_eq!(dto.title, "Notebook");
        assert_eq!(dto.likes, 4);
        assert_eq!(dto.affiliate_link, "");
    }
}
