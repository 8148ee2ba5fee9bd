use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Catalog entry. Read-only from the request workflow's point of view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub github_repo_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Price a requester pays: discounted price, else list price, else zero
    pub fn effective_price(&self) -> Decimal {
        match self.discounted_price {
            Some(discounted) if discounted > Decimal::ZERO => discounted,
            _ if self.price > Decimal::ZERO => self.price,
            _ => Decimal::ZERO,
        }
    }
}
