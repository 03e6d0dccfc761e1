use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub author_id: i32,
    pub offer_id: i32,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: i32,
    pub text: String,
    pub author_id: i32,
    pub offer_id: i32,
    pub created_at: OffsetDateTime,
    pub author_name: String,
}

#[derive(Debug, Serialize)]
pub struct CommentDto {
    pub id: i32,
    pub text: String,
    pub author_id: i32,
    pub author_name: Option<String>,
    pub offer_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<CommentWithAuthor> for CommentDto {
    fn from(comment: CommentWithAuthor) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_id: comment.author_id,
            author_name: Some(comment.author_name),
            offer_id: comment.offer_id,
            created_at: comment.created_at,
        }
    }
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_id: comment.author_id,
            author_name: None,
            offer_id: comment.offer_id,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: CommentDto,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentDto>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentInput {
    pub text: String,
}
