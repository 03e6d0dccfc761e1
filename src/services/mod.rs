pub mod alerts;
mod auth;
mod engagement;
pub mod featuring;
mod offer;
mod reporting;

pub use auth::{AuthService, Claims, Identity};
pub use engagement::{EngagementService, FavoriteOutcome};
pub use offer::OfferService;
pub use reporting::{ReportingService, TOP_USERS_LIMIT, parse_window};
