use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{
        CommentDto, CreateCommentInput, CreateOfferInput, LikeResponse, OfferDto, OfferResponse,
        OffersResponse, UpdateOfferInput,
    },
    repository::{
        CommentRepository, FavoriteRepository, NewOffer, OfferChanges, OfferRepository,
        UserRepository,
    },
    telemetry::{COMMENTS_CREATED, OFFERS_CREATED, OFFERS_DELETED, OFFERS_LIKED, OFFERS_UPDATED},
};

pub const MAX_COMMENT_LEN: usize = 1000;
/// Column widths of `offers` in the initial migration.
pub const MAX_SHORT_TEXT_LEN: usize = 100;
pub const MAX_URL_LEN: usize = 255;

#[derive(Clone)]
pub struct OfferService {
    offer_repo: OfferRepository,
    favorite_repo: FavoriteRepository,
    comment_repo: CommentRepository,
    user_repo: UserRepository,
}

impl OfferService {
    pub fn new(
        offer_repo: OfferRepository,
        favorite_repo: FavoriteRepository,
        comment_repo: CommentRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            offer_repo,
            favorite_repo,
            comment_repo,
            user_repo,
        }
    }

    #[instrument(name = "offer.list", skip(self))]
    pub async fn list(&self, category: Option<&str>, user_id: Option<i32>) -> AppResult<OffersResponse> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let offers = self.offer_repo.list(category).await?;

        let offer_ids: Vec<i32> = offers.iter().map(|o| o.id).collect();

        let favorited_ids = if let Some(uid) = user_id {
            self.favorite_repo.is_favorited_batch(uid, &offer_ids).await?
        } else {
            vec![]
        };

        let offers: Vec<OfferDto> = offers
            .into_iter()
            .map(|o| {
                let favorited = favorited_ids.contains(&o.id);
                OfferDto::from_offer(o, favorited)
            })
            .collect();

        Ok(OffersResponse {
            total: offers.len(),
            offers,
        })
    }

    #[instrument(name = "offer.create", skip(self, input))]
    pub async fn create(&self, input: CreateOfferInput) -> AppResult<OfferResponse> {
        validate_new_offer(&input)?;

        let offer = self
            .offer_repo
            .create(&NewOffer {
                title: input.title.trim(),
                description: input.description.trim(),
                price: input.price,
                image: input.image.trim(),
                store: input.store.trim(),
                affiliate_link: input.affiliate_link.trim(),
                link: input.link.as_deref().map(str::trim).unwrap_or(""),
                category: input.category.trim(),
                featured: input.featured,
            })
            .await?;

        OFFERS_CREATED.add(1, &[]);

        tracing::info!(offer_id = offer.id, title = %offer.title, "Offer created");

        Ok(OfferResponse {
            offer: OfferDto::from_offer(offer, false),
        })
    }

    #[instrument(name = "offer.update", skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateOfferInput) -> AppResult<OfferResponse> {
        validate_offer_changes(&input)?;

        let changes = OfferChanges {
            title: input.title.as_deref().map(str::trim),
            description: input.description.as_deref().map(str::trim),
            price: input.price,
            image: input.image.as_deref().map(str::trim),
            store: input.store.as_deref().map(str::trim),
            affiliate_link: input.affiliate_link.as_deref().map(str::trim),
            link: input.link.as_deref().map(str::trim),
            category: input.category.as_deref().map(str::trim),
        };

        let offer = self
            .offer_repo
            .update(id, &changes)
            .await?
            .ok_or(AppError::NotFound("Offer not found".to_string()))?;

        OFFERS_UPDATED.add(1, &[]);

        tracing::info!(offer_id = offer.id, "Offer updated");

        Ok(OfferResponse {
            offer: OfferDto::from_offer(offer, false),
        })
    }

    #[instrument(name = "offer.delete", skip(self))]
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.offer_repo.delete(id).await? {
            return Err(AppError::NotFound("Offer not found".to_string()));
        }

        OFFERS_DELETED.add(1, &[]);

        tracing::info!(offer_id = id, "Offer deleted");

        Ok(())
    }

    /// Anonymous like. Bumps the counter without a favorite row and does not
    /// run the featuring rule.
    #[instrument(name = "offer.like", skip(self))]
    pub async fn like(&self, id: i32) -> AppResult<LikeResponse> {
        let likes = self
            .offer_repo
            .like(id)
            .await?
            .ok_or(AppError::NotFound("Offer not found".to_string()))?;

        OFFERS_LIKED.add(1, &[]);

        Ok(LikeResponse {
            offer_id: id,
            likes,
        })
    }

    #[instrument(name = "offer.list_comments", skip(self))]
    pub async fn list_comments(&self, offer_id: i32) -> AppResult<Vec<CommentDto>> {
        if self.offer_repo.find_by_id(offer_id).await?.is_none() {
            return Err(AppError::NotFound("Offer not found".to_string()));
        }

        let comments = self.comment_repo.list_for_offer(offer_id).await?;

        Ok(comments.into_iter().map(CommentDto::from).collect())
    }

    #[instrument(name = "offer.create_comment", skip(self, input))]
    pub async fn create_comment(
        &self,
        author_id: i32,
        offer_id: i32,
        input: CreateCommentInput,
    ) -> AppResult<CommentDto> {
        let text = validate_comment_text(&input.text)?;

        if self.offer_repo.find_by_id(offer_id).await?.is_none() {
            return Err(AppError::NotFound("Offer not found".to_string()));
        }

        // Tokens outlive deleted accounts.
        if self.user_repo.find_by_id(author_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let comment = self.comment_repo.create(author_id, offer_id, text).await?;

        COMMENTS_CREATED.add(1, &[]);

        tracing::info!(comment_id = comment.id, offer_id, author_id, "Comment created");

        Ok(CommentDto::from(comment))
    }
}

fn require_text(field: &str, value: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("The field \"{field}\" is required")));
    }
    check_len(field, value, max_len)
}

fn check_len(field: &str, value: &str, max_len: usize) -> AppResult<()> {
    if value.trim().chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "The field \"{field}\" must be at most {max_len} characters"
        )));
    }
    Ok(())
}

fn require_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::Validation(
            "The field \"price\" must be a positive number".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_new_offer(input: &CreateOfferInput) -> AppResult<()> {
    require_text("title", &input.title, MAX_SHORT_TEXT_LEN)?;
    require_text("description", &input.description, usize::MAX)?;
    require_price(input.price)?;
    require_text("image", &input.image, MAX_URL_LEN)?;
    require_text("affiliate_link", &input.affiliate_link, MAX_URL_LEN)?;
    require_text("store", &input.store, MAX_SHORT_TEXT_LEN)?;
    require_text("category", &input.category, MAX_SHORT_TEXT_LEN)?;
    if let Some(link) = &input.link {
        check_len("link", link, MAX_URL_LEN)?;
    }
    Ok(())
}

/// Fields that are present must satisfy the same rules as on creation;
/// `link` may be cleared.
pub fn validate_offer_changes(input: &UpdateOfferInput) -> AppResult<()> {
    let required = [
        ("title", &input.title, MAX_SHORT_TEXT_LEN),
        ("description", &input.description, usize::MAX),
        ("image", &input.image, MAX_URL_LEN),
        ("affiliate_link", &input.affiliate_link, MAX_URL_LEN),
        ("store", &input.store, MAX_SHORT_TEXT_LEN),
        ("category", &input.category, MAX_SHORT_TEXT_LEN),
    ];

    for (field, value, max_len) in required {
        if let Some(value) = value {
            require_text(field, value, max_len)?;
        }
    }

    if let Some(link) = &input.link {
        check_len("link", link, MAX_URL_LEN)?;
    }

    if let Some(price) = input.price {
        require_price(price)?;
    }

    Ok(())
}

pub fn validate_comment_text(text: &str) -> AppResult<&str> {
    let text = text.trim();

    if text.is_empty() {
        return Err(AppError::Unprocessable("Comment text must not be empty".to_string()));
    }

    if text.chars().count() > MAX_COMMENT_LEN {
        return Err(AppError::Unprocessable(format!(
            "Comment text must be at most {MAX_COMMENT_LEN} characters"
        )));
    }

    Ok(text)
}
