use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::storage::traits::UserStorage;
use shared::{CreateUserRequest, IdentityEvent, User};

/// Service mirroring identity-provider users into the local store
#[derive(Clone)]
pub struct UserService {
    storage: Arc<dyn UserStorage>,
}

impl UserService {
    pub fn new(storage: Arc<dyn UserStorage>) -> Self {
        Self { storage }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, ApiError> {
        if request.provider_user_id.trim().is_empty()
            || request.email.trim().is_empty()
            || request.name.trim().is_empty()
        {
            return Err(ApiError::InvalidRequest(
                "Missing required fields".to_string(),
            ));
        }

        Ok(self.storage.upsert_user(&request).await?)
    }

    pub async fn get_user(&self, provider_user_id: Option<&str>) -> Result<User, ApiError> {
        let provider_user_id = provider_user_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::InvalidRequest("Missing provider_user_id".to_string()))?;

        self.storage
            .get_user_by_provider_id(provider_user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    pub async fn get_user_role(
        &self,
        provider_user_id: Option<&str>,
    ) -> Result<Option<String>, ApiError> {
        let user = self.get_user(provider_user_id).await?;
        Ok(user.role)
    }

    /// Apply one verified identity-provider event. Only "user.created"
    /// is recognised; anything else is a caller error.
    pub async fn apply_identity_event(&self, event: IdentityEvent) -> Result<User, ApiError> {
        if event.event_type != "user.created" {
            warn!("Unhandled identity event type: {}", event.event_type);
            return Err(ApiError::InvalidRequest(format!(
                "Unhandled event type: {}",
                event.event_type
            )));
        }

        let email = event.data.primary_email().ok_or_else(|| {
            ApiError::InvalidRequest("Event carries no email address".to_string())
        })?;

        let user = self
            .storage
            .upsert_user(&CreateUserRequest {
                provider_user_id: event.data.id.clone(),
                email: email.to_string(),
                name: event.data.display_name(),
            })
            .await?;

        info!("Upserted user {} from identity event", user.provider_user_id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use crate::storage::UserRepository;
    use shared::{EmailAddress, IdentityEventData};

    async fn setup_test() -> UserService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        UserService::new(Arc::new(UserRepository::new(db)))
    }

    fn user_created_event(provider_id: &str) -> IdentityEvent {
        IdentityEvent {
            event_type: "user.created".to_string(),
            data: IdentityEventData {
                id: provider_id.to_string(),
                email_addresses: vec![EmailAddress {
                    email_address: "jo@example.com".to_string(),
                }],
                first_name: Some("Jo".to_string()),
                last_name: Some("Farmer".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_user_created_event_upserts() {
        let service = setup_test().await;

        let user = service
            .apply_identity_event(user_created_event("user_2abc"))
            .await
            .expect("event should apply");
        assert_eq!(user.email, "jo@example.com");
        assert_eq!(user.name, "Jo Farmer");

        let fetched = service
            .get_user(Some("user_2abc"))
            .await
            .expect("user should exist");
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_duplicate_delivery_does_not_duplicate() {
        let service = setup_test().await;

        let first = service
            .apply_identity_event(user_created_event("user_2abc"))
            .await
            .expect("first delivery");
        let second = service
            .apply_identity_event(user_created_event("user_2abc"))
            .await
            .expect("second delivery");
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_unrecognised_event_type_is_rejected() {
        let service = setup_test().await;

        let mut event = user_created_event("user_2abc");
        event.event_type = "user.deleted".to_string();

        let err = service
            .apply_identity_event(event)
            .await
            .expect_err("unknown event must be rejected");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_event_without_email_is_rejected() {
        let service = setup_test().await;

        let mut event = user_created_event("user_2abc");
        event.data.email_addresses.clear();

        let err = service
            .apply_identity_event(event)
            .await
            .expect_err("event without email must be rejected");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_not_found() {
        let service = setup_test().await;

        let err = service
            .get_user(Some("nobody"))
            .await
            .expect_err("must be NotFound");
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
