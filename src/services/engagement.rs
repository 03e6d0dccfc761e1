use sqlx::PgPool;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{FavoritesPage, PageRequest},
    repository::{CommentRepository, FavoriteRepository, OfferRepository, UserRepository},
    services::featuring,
    telemetry::{FAVORITES_ADDED, FAVORITES_REMOVED, OFFERS_FEATURED},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteOutcome {
    pub offer_id: i32,
    pub likes: i32,
    pub featured: bool,
}

/// Owns the consistency between favorite rows and `offers.likes`.
///
/// Every mutation opens its own transaction and hands the connection to each
/// repository call. The offer row is locked first, so favorites and
/// unfavorites on the same offer serialize on it and the counter never drifts.
#[derive(Clone)]
pub struct EngagementService {
    pool: PgPool,
    offer_repo: OfferRepository,
    favorite_repo: FavoriteRepository,
    comment_repo: CommentRepository,
    user_repo: UserRepository,
}

impl EngagementService {
    pub fn new(
        pool: PgPool,
        offer_repo: OfferRepository,
        favorite_repo: FavoriteRepository,
        comment_repo: CommentRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            pool,
            offer_repo,
            favorite_repo,
            comment_repo,
            user_repo,
        }
    }

    #[instrument(name = "engagement.favorite", skip(self))]
    pub async fn favorite(&self, user_id: i32, offer_id: i32) -> AppResult<FavoriteOutcome> {
        let mut tx = self.pool.begin().await?;

        let offer = self
            .offer_repo
            .lock(&mut *tx, offer_id)
            .await?
            .ok_or(AppError::NotFound("Offer not found".to_string()))?;

        if !self.user_repo.exists(&mut *tx, user_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        self.favorite_repo
            .create(&mut *tx, user_id, offer_id)
            .await?
            .ok_or(AppError::Conflict("Offer already favorited".to_string()))?;

        let likes = self
            .offer_repo
            .increment_likes(&mut *tx, offer_id)
            .await?
            .ok_or(AppError::Internal("Locked offer disappeared".to_string()))?;

        let comment_count = self.comment_repo.count_for_offer(&mut *tx, offer_id).await?;

        let promote = featuring::needs_promotion(likes, comment_count, offer.featured);
        if promote {
            self.offer_repo.mark_featured(&mut *tx, offer_id).await?;
        }

        tx.commit().await?;

        FAVORITES_ADDED.add(1, &[]);
        if promote {
            OFFERS_FEATURED.add(1, &[]);
            tracing::info!(offer_id, likes, comment_count, "Offer featured");
        }

        tracing::info!(offer_id, user_id, likes, "Offer favorited");

        Ok(FavoriteOutcome {
            offer_id,
            likes,
            featured: offer.featured || promote,
        })
    }

    /// Removes the favorite and gives the like back. `featured` is left as is.
    #[instrument(name = "engagement.unfavorite", skip(self))]
    pub async fn unfavorite(&self, user_id: i32, offer_id: i32) -> AppResult<FavoriteOutcome> {
        let mut tx = self.pool.begin().await?;

        // Favorites cascade with their offer, so a missing offer means a missing favorite.
        let offer = self
            .offer_repo
            .lock(&mut *tx, offer_id)
            .await?
            .ok_or(AppError::NotFound("Favorite not found".to_string()))?;

        if !self.favorite_repo.delete(&mut *tx, user_id, offer_id).await? {
            return Err(AppError::NotFound("Favorite not found".to_string()));
        }

        let likes = self
            .offer_repo
            .decrement_likes(&mut *tx, offer_id)
            .await?
            .ok_or(AppError::Internal("Locked offer disappeared".to_string()))?;

        tx.commit().await?;

        FAVORITES_REMOVED.add(1, &[]);
        tracing::info!(offer_id, user_id, likes, "Offer unfavorited");

        Ok(FavoriteOutcome {
            offer_id,
            likes,
            featured: offer.featured,
        })
    }

    #[instrument(name = "engagement.has_favorited", skip(self))]
    pub async fn has_favorited(&self, user_id: i32, offer_id: i32) -> AppResult<bool> {
        Ok(self.favorite_repo.exists(user_id, offer_id).await?)
    }

    #[instrument(name = "engagement.list_favorites", skip(self))]
    pub async fn list_favorites(&self, user_id: i32, page: PageRequest) -> AppResult<FavoritesPage> {
        let total = self.favorite_repo.count_for_user(user_id).await?;

        let rows = self
            .favorite_repo
            .list_for_user(user_id, page.per_page, page.offset())
            .await?;

        let favorites = rows
            .into_iter()
            .filter_map(|row| row.into_dto())
            .collect();

        Ok(FavoritesPage {
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(total),
            total,
            favorites,
        })
    }
}
