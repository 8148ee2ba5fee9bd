mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn health_endpoint_reports_store_status() -> Result<()> {
    let app = TestApp::spawn().await;

    let res = app.get("/health").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["status"], "ok");
    assert_eq!(res.body["data"]["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let app = TestApp::spawn().await;

    let res = app.get("/").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert!(res.body["data"]["endpoints"]["download"].is_string());
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let app = TestApp::spawn().await;
    let res = app.get("/api/nope").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}
