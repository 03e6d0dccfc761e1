//! Router-level checks that are decided before any query runs.

mod common;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use serde_json::Value;
use tower::ServiceExt;

use deals_api::{AppState, routes};

fn bearer(state: &AppState, user_id: i32, is_admin: bool) -> String {
    let token = state
        .auth_service
        .issue_token(user_id, is_admin)
        .expect("issuing should succeed");
    format!("Bearer {token}")
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = routes::create_router(state)
        .oneshot(request)
        .await
        .expect("router should respond");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

#[tokio::test]
async fn create_offer_without_token_is_unauthorized() {
    let request = Request::post("/api/ofertas")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let (status, body) = send(common::lazy_state(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn create_offer_as_regular_user_is_forbidden() {
    let state = common::lazy_state();
    let request = Request::post("/api/ofertas")
        .header(AUTHORIZATION, bearer(&state, 1, false))
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], 403);
}

#[tokio::test]
async fn update_and_delete_offer_require_admin() {
    let state = common::lazy_state();

    let update = Request::put("/api/ofertas/editar/1")
        .header(AUTHORIZATION, bearer(&state, 2, false))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"title":"x"}"#))
        .unwrap();
    let (status, _) = send(state.clone(), update).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let delete = Request::delete("/api/ofertas/deletar/1")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(state, delete).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_report_rejects_regular_user() {
    let state = common::lazy_state();
    let request = Request::get("/api/admin/relatorios")
        .header(AUTHORIZATION, bearer(&state, 3, false))
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(state, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn favorite_routes_require_token() {
    let state = common::lazy_state();

    let exists = Request::get("/api/usuarios/favoritos/1/existe")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(state.clone(), exists).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let favorite = Request::post("/api/usuarios/favoritos/1")
        .header(AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(state.clone(), favorite).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let unfavorite = Request::delete("/api/usuarios/favoritos/1")
        .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(state, unfavorite).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn comment_creation_requires_token() {
    let request = Request::post("/api/ofertas/1/comentarios")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"text":"nice"}"#))
        .unwrap();

    let (status, _) = send(common::lazy_state(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn favorites_report_requires_both_dates() {
    let state = common::lazy_state();
    let request = Request::get("/api/usuarios/relatorio-favoritos?inicio=2024-01-01")
        .header(AUTHORIZATION, bearer(&state, 4, false))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn favorites_report_rejects_inverted_window() {
    let state = common::lazy_state();
    let request = Request::get("/api/usuarios/relatorio-favoritos?inicio=2024-02-01&fim=2024-01-01")
        .header(AUTHORIZATION, bearer(&state, 4, false))
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn alerts_check_lists_categories_over_limit() {
    let state = common::lazy_state();
    let request = Request::get("/api/usuarios/verificar-alertas")
        .header(AUTHORIZATION, bearer(&state, 5, false))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["alerted_categories"],
        serde_json::json!(["Moda", "Beleza", "Esportes"])
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let request = Request::get("/api/nao-existe").body(Body::empty()).unwrap();

    let (status, _) = send(common::lazy_state(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
