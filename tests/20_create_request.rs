mod common;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use common::TestApp;
use project_ready_api::database::models::{NewProjectRequest, ProjectRequest};

#[tokio::test]
async fn create_returns_pending_request_and_sends_both_emails() -> Result<()> {
    let app = TestApp::spawn().await;

    let res = app.post("/api/requests", app.request_body("Asha@Example.com")).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["success"], true);

    let request = &res.body["data"]["request"];
    assert_eq!(request["status"], "pending");
    assert_eq!(request["user_email"], "asha@example.com");
    assert_eq!(request["user_phone"], "9876543210");
    assert_eq!(request["downloads_count"], 0);
    assert!(request["download_link"].is_null());

    let whatsapp = res.body["data"]["whatsapp_link"].as_str().unwrap();
    assert!(whatsapp.starts_with("https://wa.me/"));

    let confirmations = app.mailer.sent_to("asha@example.com");
    assert_eq!(confirmations.len(), 1);
    assert!(confirmations[0].html.contains("Smart Parking System"));
    assert_eq!(app.mailer.sent().len(), 2);
    Ok(())
}

#[tokio::test]
async fn fourth_request_in_window_is_rate_limited() -> Result<()> {
    let app = TestApp::spawn().await;

    for _ in 0..3 {
        app.submit_request("busy@example.com").await?;
    }
    let res = app.post("/api/requests", app.request_body("busy@example.com")).await?;
    assert_eq!(res.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(res.body["code"], "TOO_MANY_REQUESTS");

    // Limit is per email
    app.submit_request("other@example.com").await?;
    Ok(())
}

#[tokio::test]
async fn requests_outside_the_window_do_not_count() -> Result<()> {
    let app = TestApp::spawn().await;

    let old = ProjectRequest::pending(
        NewProjectRequest {
            project_id: app.project.id,
            user_name: "Asha Verma".into(),
            user_email: "window@example.com".into(),
            user_phone: "9876543210".into(),
            college_name: "GEC".into(),
            branch: None,
            semester: None,
            message: None,
        },
        Utc::now() - Duration::hours(25),
    );
    app.store.seed_request(old).await;

    for _ in 0..3 {
        app.submit_request("window@example.com").await?;
    }
    let res = app.post("/api/requests", app.request_body("window@example.com")).await?;
    assert_eq!(res.status, StatusCode::TOO_MANY_REQUESTS);
    Ok(())
}

#[tokio::test]
async fn invalid_fields_are_reported_by_name() -> Result<()> {
    let app = TestApp::spawn().await;

    let mut body = app.request_body("not-an-email");
    let res = app.post("/api/requests", body.clone()).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(res.body["details"]["email"].is_string());

    body["email"] = json!("asha@example.com");
    body["phone"] = json!("12345");
    let res = app.post("/api/requests", body.clone()).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["details"]["phone"].is_string());

    body["phone"] = json!("9876543210");
    body["projectId"] = json!(uuid::Uuid::new_v4().to_string());
    let res = app.post("/api/requests", body).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["details"]["projectId"].is_string());

    assert!(app.mailer.sent().is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected() -> Result<()> {
    let app = TestApp::spawn().await;

    let res = app
        .request(
            Method::POST,
            "/api/requests",
            None,
            &[(header::CONTENT_TYPE, "application/json")],
        )
        .await?;
    assert!(res.status.is_client_error());
    Ok(())
}

#[tokio::test]
async fn mail_failure_does_not_fail_the_request() -> Result<()> {
    let app = TestApp::spawn().await;
    app.mailer.set_failing(true);

    let res = app.post("/api/requests", app.request_body("asha@example.com")).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["data"]["request"]["status"], "pending");
    Ok(())
}
