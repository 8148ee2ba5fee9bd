use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Store;
use crate::notify::NotificationSender;
use crate::services::{AdminService, CatalogService, FeedbackService, RequestService};

/// Shared handler state; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub requests: Arc<RequestService>,
    pub feedback: Arc<FeedbackService>,
    pub catalog: Arc<CatalogService>,
    pub admin: Arc<AdminService>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>, sender: Arc<dyn NotificationSender>) -> Self {
        let requests = RequestService::new(store.clone(), sender, &config);
        let feedback = FeedbackService::new(store.clone());
        let catalog = CatalogService::new(store.clone());
        let admin = AdminService::new(
            store.clone(),
            config.security.jwt_secret.clone(),
            config.security.jwt_expiry_hours,
        );

        Self {
            config: Arc::new(config),
            store,
            requests: Arc::new(requests),
            feedback: Arc::new(feedback),
            catalog: Arc::new(catalog),
            admin: Arc::new(admin),
        }
    }
}
