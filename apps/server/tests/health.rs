mod common;

use common::{body_string, spawn_app};

#[tokio::test]
async fn healthz_works() {
    let app = spawn_app().await;
    let response = app.get("/api/v1/healthz").await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn readyz_checks_the_database() {
    let app = spawn_app().await;
    let response = app.get("/api/v1/readyz").await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = spawn_app().await;
    let response = app.get("/api/v1/nope").await;
    assert_eq!(response.status(), 404);
}
