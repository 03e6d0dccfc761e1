use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use crate::models::{Comment, CommentWithAuthor};

#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "db.comment.create", skip(self, text))]
    pub async fn create(
        &self,
        author_id: i32,
        offer_id: i32,
        text: &str,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (text, author_id, offer_id)
            VALUES ($1, $2, $3)
            RETURNING id, text, author_id, offer_id, created_at
            "#,
        )
        .bind(text)
        .bind(author_id)
        .bind(offer_id)
        .fetch_one(&self.pool)
        .await
    }

    #[instrument(name = "db.comment.list_for_offer", skip(self))]
    pub async fn list_for_offer(&self, offer_id: i32) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT
                c.id, c.text, c.author_id, c.offer_id, c.created_at,
                u.name as author_name
            FROM comments c
            JOIN users u ON c.author_id = u.id
            WHERE c.offer_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(offer_id)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.comment.count_for_offer", skip(self, conn))]
    pub async fn count_for_offer(
        &self,
        conn: &mut PgConnection,
        offer_id: i32,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE offer_id = $1")
            .bind(offer_id)
            .fetch_one(&mut *conn)
            .await
    }
}
