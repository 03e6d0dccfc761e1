use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::instrument;

use crate::models::{CategoryEngagement, OfferLikes, UserFavoriteCount, WindowFavoriteRow};

#[derive(Debug, Default)]
pub struct OfferFilter<'a> {
    pub store: Option<&'a str>,
    pub category: Option<&'a str>,
    pub created_from: Option<OffsetDateTime>,
    pub created_before: Option<OffsetDateTime>,
    pub limit: i64,
}

/// Read-only aggregate queries. Nothing here takes row locks.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "db.report.count_users", skip(self))]
    pub async fn count_users(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }

    #[instrument(name = "db.report.count_offers", skip(self))]
    pub async fn count_offers(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM offers")
            .fetch_one(&self.pool)
            .await
    }

    #[instrument(name = "db.report.count_favorites", skip(self))]
    pub async fn count_favorites(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM favorites")
            .fetch_one(&self.pool)
            .await
    }

    #[instrument(name = "db.report.top_offers_by_likes", skip(self))]
    pub async fn top_offers_by_likes(&self, limit: i64) -> Result<Vec<OfferLikes>, sqlx::Error> {
        sqlx::query_as::<_, OfferLikes>(
            r#"
            SELECT id, title, store, likes, featured
            FROM offers
            ORDER BY likes DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.report.featured_offers", skip(self))]
    pub async fn featured_offers(&self) -> Result<Vec<OfferLikes>, sqlx::Error> {
        sqlx::query_as::<_, OfferLikes>(
            r#"
            SELECT id, title, store, likes, featured
            FROM offers
            WHERE featured
            ORDER BY likes DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.report.top_users_by_favorites", skip(self))]
    pub async fn top_users_by_favorites(
        &self,
        limit: i64,
    ) -> Result<Vec<UserFavoriteCount>, sqlx::Error> {
        sqlx::query_as::<_, UserFavoriteCount>(
            r#"
            SELECT f.user_id, u.name, COUNT(f.id) as total_favorites
            FROM favorites f
            JOIN users u ON f.user_id = u.id
            GROUP BY f.user_id, u.name
            ORDER BY total_favorites DESC, f.user_id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Favorites with `from <= created_at < until`, newest first.
    #[instrument(name = "db.report.favorites_between", skip(self))]
    pub async fn favorites_between(
        &self,
        from: OffsetDateTime,
        until: OffsetDateTime,
    ) -> Result<Vec<WindowFavoriteRow>, sqlx::Error> {
        sqlx::query_as::<_, WindowFavoriteRow>(
            r#"
            SELECT
                f.id, f.user_id, f.offer_id, f.created_at,
                o.title as offer_title, o.store as offer_store, o.likes as offer_likes
            FROM favorites f
            LEFT JOIN offers o ON f.offer_id = o.id
            WHERE f.created_at >= $1 AND f.created_at < $2
            ORDER BY f.created_at DESC, f.id DESC
            "#,
        )
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.report.filtered_offers", skip(self))]
    pub async fn filtered_offers(
        &self,
        filter: &OfferFilter<'_>,
    ) -> Result<Vec<OfferLikes>, sqlx::Error> {
        sqlx::query_as::<_, OfferLikes>(
            r#"
            SELECT id, title, store, likes, featured
            FROM offers
            WHERE ($1::text IS NULL OR store ILIKE '%' || $1 || '%' ESCAPE '\')
              AND ($2::text IS NULL OR category = $2)
              AND ($3::timestamptz IS NULL OR created_at >= $3)
              AND ($4::timestamptz IS NULL OR created_at < $4)
            ORDER BY likes DESC, id ASC
            LIMIT $5
            "#,
        )
        .bind(filter.store)
        .bind(filter.category)
        .bind(filter.created_from)
        .bind(filter.created_before)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.report.category_engagement", skip(self))]
    pub async fn category_engagement(&self) -> Result<Vec<CategoryEngagement>, sqlx::Error> {
        sqlx::query_as::<_, CategoryEngagement>(
            r#"
            SELECT
                o.category as category,
                COUNT(DISTINCT f.id) as favorites,
                COUNT(DISTINCT c.id) as comments
            FROM offers o
            LEFT JOIN favorites f ON f.offer_id = o.id
            LEFT JOIN comments c ON c.offer_id = o.id
            WHERE o.category <> ''
            GROUP BY o.category
            ORDER BY favorites DESC, category ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
