pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;

pub use config::Config;

use repository::{
    CommentRepository, FavoriteRepository, OfferRepository, ReportRepository, UserRepository,
};
use services::{AuthService, EngagementService, OfferService, ReportingService};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub offer_service: OfferService,
    pub engagement_service: EngagementService,
    pub reporting_service: ReportingService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let user_repo = UserRepository::new(pool.clone());
        let offer_repo = OfferRepository::new(pool.clone());
        let favorite_repo = FavoriteRepository::new(pool.clone());
        let comment_repo = CommentRepository::new(pool.clone());
        let report_repo = ReportRepository::new(pool.clone());

        Self {
            auth_service: AuthService::new(user_repo.clone(), config),
            offer_service: OfferService::new(
                offer_repo.clone(),
                favorite_repo.clone(),
                comment_repo.clone(),
                user_repo.clone(),
            ),
            engagement_service: EngagementService::new(
                pool.clone(),
                offer_repo,
                favorite_repo,
                comment_repo,
                user_repo,
            ),
            reporting_service: ReportingService::new(report_repo),
            pool,
        }
    }
}
