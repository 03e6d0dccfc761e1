use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{AppState, handlers};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .merge(offer_routes())
        .merge(user_routes())
        .route("/api/admin/relatorios", get(handlers::admin_report))
        .with_state(state)
}

fn offer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/ofertas",
            get(handlers::list_offers).post(handlers::create_offer),
        )
        .route("/api/ofertas/editar/{id}", put(handlers::update_offer))
        .route("/api/ofertas/deletar/{id}", delete(handlers::delete_offer))
        .route(
            "/api/ofertas/{id}/like",
            post(handlers::like_offer).patch(handlers::like_offer),
        )
        .route(
            "/api/ofertas/{id}/comentarios",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route(
            "/api/ofertas/categorias-mais-engajadas",
            get(handlers::engaged_categories),
        )
        .route("/api/ofertas/verificar-alertas", get(handlers::check_alerts))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/usuarios/cadastro", post(handlers::register))
        .route("/api/usuarios/login", post(handlers::login))
        .route("/api/usuarios/perfil", get(handlers::profile))
        .route("/api/usuarios/favoritos", get(handlers::list_favorites))
        .route(
            "/api/usuarios/favoritos/{offer_id}",
            post(handlers::favorite_offer).delete(handlers::unfavorite_offer),
        )
        .route(
            "/api/usuarios/favoritos/{offer_id}/existe",
            get(handlers::favorite_exists),
        )
        .route("/api/usuarios/estatisticas", get(handlers::stats_summary))
        .route("/api/usuarios/top-usuarios", get(handlers::top_users))
        .route(
            "/api/usuarios/relatorio-favoritos",
            get(handlers::favorites_report),
        )
        .route(
            "/api/usuarios/ofertas-filtradas",
            get(handlers::filtered_offers),
        )
        .route(
            "/api/usuarios/exportar-categorias",
            get(handlers::export_categories),
        )
        .route("/api/usuarios/verificar-alertas", get(handlers::check_alerts))
}
