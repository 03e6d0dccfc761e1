use sqlx::{PgConnection, PgPool, Row};
use tracing::instrument;

use crate::models::{Favorite, FavoriteWithOffer};

#[derive(Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns `None` when the pair already exists.
    #[instrument(name = "db.favorite.create", skip(self, conn))]
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        user_id: i32,
        offer_id: i32,
    ) -> Result<Option<Favorite>, sqlx::Error> {
        sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (user_id, offer_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, offer_id) DO NOTHING
            RETURNING id, user_id, offer_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(offer_id)
        .fetch_optional(&mut *conn)
        .await
    }

    #[instrument(name = "db.favorite.delete", skip(self, conn))]
    pub async fn delete(
        &self,
        conn: &mut PgConnection,
        user_id: i32,
        offer_id: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND offer_id = $2")
            .bind(user_id)
            .bind(offer_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(name = "db.favorite.exists", skip(self))]
    pub async fn exists(&self, user_id: i32, offer_id: i32) -> Result<bool, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM favorites WHERE user_id = $1 AND offer_id = $2
            ) as exists
            "#,
        )
        .bind(user_id)
        .bind(offer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get::<bool, _>("exists"))
    }

    #[instrument(name = "db.favorite.is_favorited_batch", skip(self, offer_ids))]
    pub async fn is_favorited_batch(
        &self,
        user_id: i32,
        offer_ids: &[i32],
    ) -> Result<Vec<i32>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT offer_id
            FROM favorites
            WHERE user_id = $1 AND offer_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(offer_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|r| r.get::<i32, _>("offer_id")).collect())
    }

    #[instrument(name = "db.favorite.count_for_user", skip(self))]
    pub async fn count_for_user(&self, user_id: i32) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    #[instrument(name = "db.favorite.list_for_user", skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FavoriteWithOffer>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteWithOffer>(
            r#"
            SELECT
                f.id, f.user_id, f.offer_id, f.created_at,
                o.title as offer_title, o.image as offer_image, o.store as offer_store,
                o.affiliate_link as offer_affiliate_link, o.link as offer_link,
                o.price as offer_price, o.likes as offer_likes
            FROM favorites f
            LEFT JOIN offers o ON f.offer_id = o.id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC, f.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }
}
