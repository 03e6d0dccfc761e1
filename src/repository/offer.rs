use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use crate::models::Offer;

#[derive(Debug)]
pub struct NewOffer<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub image: &'a str,
    pub store: &'a str,
    pub affiliate_link: &'a str,
    pub link: &'a str,
    pub category: &'a str,
    pub featured: bool,
}

#[derive(Debug, Default)]
pub struct OfferChanges<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: Option<f64>,
    pub image: Option<&'a str>,
    pub store: Option<&'a str>,
    pub affiliate_link: Option<&'a str>,
    pub link: Option<&'a str>,
    pub category: Option<&'a str>,
}

#[derive(Clone)]
pub struct OfferRepository {
    pool: PgPool,
}

impl OfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "db.offer.create", skip(self))]
    pub async fn create(&self, offer: &NewOffer<'_>) -> Result<Offer, sqlx::Error> {
        sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers
                (title, description, price, image, store, affiliate_link, link, category, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, price, image, store, affiliate_link, link,
                      category, featured, likes, created_at
            "#,
        )
        .bind(offer.title)
        .bind(offer.description)
        .bind(offer.price)
        .bind(offer.image)
        .bind(offer.store)
        .bind(offer.affiliate_link)
        .bind(offer.link)
        .bind(offer.category)
        .bind(offer.featured)
        .fetch_one(&self.pool)
        .await
    }

    #[instrument(name = "db.offer.find_by_id", skip(self))]
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, title, description, price, image, store, affiliate_link, link,
                   category, featured, likes, created_at
            FROM offers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    #[instrument(name = "db.offer.list", skip(self))]
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Offer>, sqlx::Error> {
        if let Some(category) = category {
            sqlx::query_as::<_, Offer>(
                r#"
                SELECT id, title, description, price, image, store, affiliate_link, link,
                       category, featured, likes, created_at
                FROM offers
                WHERE category = $1
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .bind(category)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, Offer>(
                r#"
                SELECT id, title, description, price, image, store, affiliate_link, link,
                       category, featured, likes, created_at
                FROM offers
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .fetch_all(&self.pool)
            .await
        }
    }

    /// Returns `None` when no offer has the given id.
    #[instrument(name = "db.offer.update", skip(self))]
    pub async fn update(
        &self,
        id: i32,
        changes: &OfferChanges<'_>,
    ) -> Result<Option<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>(
            r#"
            UPDATE offers
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                image = COALESCE($5, image),
                store = COALESCE($6, store),
                affiliate_link = COALESCE($7, affiliate_link),
                link = COALESCE($8, link),
                category = COALESCE($9, category)
            WHERE id = $1
            RETURNING id, title, description, price, image, store, affiliate_link, link,
                      category, featured, likes, created_at
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.price)
        .bind(changes.image)
        .bind(changes.store)
        .bind(changes.affiliate_link)
        .bind(changes.link)
        .bind(changes.category)
        .fetch_optional(&self.pool)
        .await
    }

    #[instrument(name = "db.offer.delete", skip(self))]
    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Direct like, outside any favorite relation. Returns the new count.
    #[instrument(name = "db.offer.like", skip(self))]
    pub async fn like(&self, id: i32) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE offers SET likes = likes + 1 WHERE id = $1 RETURNING likes",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Locks the offer row until the surrounding transaction ends.
    #[instrument(name = "db.offer.lock", skip(self, conn))]
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> Result<Option<Offer>, sqlx::Error> {
        sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, title, description, price, image, store, affiliate_link, link,
                   category, featured, likes, created_at
            FROM offers
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    #[instrument(name = "db.offer.increment_likes", skip(self, conn))]
    pub async fn increment_likes(
        &self,
        conn: &mut PgConnection,
        id: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE offers SET likes = likes + 1 WHERE id = $1 RETURNING likes",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    #[instrument(name = "db.offer.decrement_likes", skip(self, conn))]
    pub async fn decrement_likes(
        &self,
        conn: &mut PgConnection,
        id: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE offers SET likes = GREATEST(likes - 1, 0) WHERE id = $1 RETURNING likes",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    #[instrument(name = "db.offer.mark_featured", skip(self, conn))]
    pub async fn mark_featured(&self, conn: &mut PgConnection, id: i32) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE offers SET featured = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
