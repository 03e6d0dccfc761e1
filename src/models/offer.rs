use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct Offer {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub store: String,
    pub affiliate_link: String,
    pub link: String,
    pub category: String,
    pub featured: bool,
    pub likes: i32,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct OfferDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub store: String,
    pub affiliate_link: String,
    pub link: String,
    pub category: String,
    pub featured: bool,
    pub likes: i32,
    pub favorited: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl OfferDto {
    pub fn from_offer(offer: Offer, favorited: bool) -> Self {
        Self {
            id: offer.id,
            title: offer.title,
            description: offer.description,
            price: offer.price,
            image: offer.image,
            store: offer.store,
            affiliate_link: offer.affiliate_link,
            link: offer.link,
            category: offer.category,
            featured: offer.featured,
            likes: offer.likes,
            favorited,
            created_at: offer.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OfferResponse {
    pub offer: OfferDto,
}

#[derive(Debug, Serialize)]
pub struct OffersResponse {
    pub offers: Vec<OfferDto>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct CreateOfferInput {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub affiliate_link: String,
    pub store: String,
    pub category: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOfferInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub affiliate_link: Option<String>,
    pub link: Option<String>,
    pub store: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListOffersQuery {
    #[serde(alias = "categoria")]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub offer_id: i32,
    pub likes: i32,
}
