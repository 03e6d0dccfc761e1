mod auth;
mod favorites;
mod health;
mod offers;
mod reports;

pub use auth::{login, profile, register};
pub use favorites::{favorite_exists, favorite_offer, list_favorites, unfavorite_offer};
pub use health::health_check;
pub use offers::{
    check_alerts, create_comment, create_offer, delete_offer, like_offer, list_comments,
    list_offers, update_offer,
};
pub use reports::{
    admin_report, engaged_categories, export_categories, favorites_report, filtered_offers,
    stats_summary, top_users,
};
