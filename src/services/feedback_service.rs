use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::error::WorkflowError;
use crate::database::models::CustomerFeedback;
use crate::database::Store;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub rating: i16,
    #[serde(default)]
    pub description: String,
}

/// Public testimonials, hidden until an admin approves them
pub struct FeedbackService {
    store: Arc<dyn Store>,
}

impl FeedbackService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn submit(&self, input: FeedbackInput) -> Result<CustomerFeedback, WorkflowError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(WorkflowError::validation("name", "Name is required"));
        }
        let email = input.email.trim();
        if !super::is_valid_email(email) {
            return Err(WorkflowError::validation("email", "Invalid email address"));
        }
        if !(1..=5).contains(&input.rating) {
            return Err(WorkflowError::validation("rating", "Rating must be between 1 and 5"));
        }
        let description = input.description.trim();
        if description.is_empty() {
            return Err(WorkflowError::validation("description", "Description is required"));
        }

        let feedback = CustomerFeedback {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_lowercase(),
            rating: input.rating,
            description: description.to_string(),
            approved: false,
            created_at: Utc::now(),
        };
        self.store.insert_feedback(&feedback).await?;
        tracing::info!(feedback_id = %feedback.id, rating = feedback.rating, "Feedback submitted");
        Ok(feedback)
    }

    pub async fn list(&self, approved: Option<bool>) -> Result<Vec<CustomerFeedback>, WorkflowError> {
        Ok(self.store.list_feedback(approved).await?)
    }

    pub async fn set_approved(&self, id: Uuid, approved: bool) -> Result<CustomerFeedback, WorkflowError> {
        self.store
            .set_feedback_approved(id, approved)
            .await?
            .ok_or(WorkflowError::NotFound("Feedback"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), WorkflowError> {
        if self.store.delete_feedback(id).await? {
            tracing::info!(feedback_id = %id, "Feedback deleted");
            Ok(())
        } else {
            Err(WorkflowError::NotFound("Feedback"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn input(rating: i16) -> FeedbackInput {
        FeedbackInput {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            rating,
            description: "Setup guide was clear".into(),
        }
    }

    #[tokio::test]
    async fn new_feedback_is_hidden_until_approved() {
        let service = FeedbackService::new(Arc::new(MemoryStore::new()));
        let fb = service.submit(input(5)).await.unwrap();
        assert!(!fb.approved);
        assert!(service.list(Some(true)).await.unwrap().is_empty());

        service.set_approved(fb.id, true).await.unwrap();
        assert_eq!(service.list(Some(true)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rating_must_be_in_range() {
        let service = FeedbackService::new(Arc::new(MemoryStore::new()));
        for rating in [0, 6] {
            let err = service.submit(input(rating)).await.unwrap_err();
            assert!(matches!(err, WorkflowError::Validation { field: "rating", .. }));
        }
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let service = FeedbackService::new(Arc::new(MemoryStore::new()));
        assert!(matches!(
            service.delete(Uuid::new_v4()).await,
            Err(WorkflowError::NotFound("Feedback"))
        ));
    }
}
