mod comment;
mod favorite;
mod offer;
mod report;
mod user;

pub use comment::CommentRepository;
pub use favorite::FavoriteRepository;
pub use offer::{NewOffer, OfferChanges, OfferRepository};
pub use report::{OfferFilter, ReportRepository};
pub use user::UserRepository;
