#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use project_ready_api::config::AppConfig;
use project_ready_api::database::models::Project;
use project_ready_api::database::{MemoryStore, Store};
use project_ready_api::notify::MemorySender;
use project_ready_api::{app, AppState};

pub const ADMIN_EMAIL: &str = "owner@projectready.test";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// In-process application wired to the memory store and a capturing mailer
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<MemorySender>,
    pub project: Project,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::with_config(AppConfig::development()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(MemorySender::new());

        let project = Project {
            id: Uuid::new_v4(),
            title: "Smart Parking System".to_string(),
            slug: "smart-parking-system".to_string(),
            price: Decimal::from(1999),
            discounted_price: Some(Decimal::from(1499)),
            github_repo_link: Some("https://github.com/acme/smart-parking".to_string()),
            created_at: Utc::now(),
        };
        store.seed_project(project.clone()).await;

        let dyn_store: Arc<dyn Store> = store.clone();
        let state = AppState::new(config, dyn_store, mailer.clone());
        let router = app(state.clone());

        Self {
            router,
            state,
            store,
            mailer,
            project,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(header::HeaderName, &str)],
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(name, *value);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("router failed")?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };

        Ok(TestResponse { status, headers, body })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::GET, uri, None, &[]).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, Some(body), &[]).await
    }

    /// Send with `Authorization: Bearer <token>`
    pub async fn authed(&self, method: Method, uri: &str, body: Option<Value>, token: &str) -> Result<TestResponse> {
        let bearer = format!("Bearer {}", token);
        self.request(method, uri, body, &[(header::AUTHORIZATION, bearer.as_str())])
            .await
    }

    /// Create the admin account on first use and log in
    pub async fn admin_token(&self) -> Result<String> {
        if self.state.admin.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.is_err() {
            self.state.admin.create_admin(ADMIN_EMAIL, ADMIN_PASSWORD).await?;
        }
        let res = self
            .post(
                "/api/auth/login",
                json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {}", res.body);
        res.body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    pub fn request_body(&self, email: &str) -> Value {
        json!({
            "projectId": self.project.id.to_string(),
            "projectTitle": self.project.title,
            "fullName": "Asha Verma",
            "email": email,
            "phone": "98765 43210",
            "college": "Government Engineering College",
            "branch": "CSE",
            "semester": "7",
            "message": "Need it before the viva"
        })
    }

    /// Submit a request and return its id
    pub async fn submit_request(&self, email: &str) -> Result<Uuid> {
        let res = self.post("/api/requests", self.request_body(email)).await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "create failed: {}", res.body);
        let id = res.body["data"]["request"]["id"]
            .as_str()
            .context("created request has no id")?;
        Ok(Uuid::parse_str(id)?)
    }

    pub async fn approve(&self, token: &str, request_id: Uuid, repo_link: &str) -> Result<TestResponse> {
        self.authed(
            Method::POST,
            "/api/approve",
            Some(json!({ "requestId": request_id.to_string(), "repoLink": repo_link })),
            token,
        )
        .await
    }
}
