use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::rest::AppState;
use shared::{IdentityEvent, User};

const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Axum handler for POST /api/identity-webhook
///
/// The signature covers the raw request body, so the body is taken as a
/// plain string and deserialized only after verification.
pub async fn identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<User>), ApiError> {
    info!("POST /api/identity-webhook - {} bytes", body.len());

    // Startup refuses an empty secret, but a state built without going
    // through Config must not verify forgeries signed with an empty key
    if state.webhook_secret.trim().is_empty() {
        warn!("identity webhook rejected: no signing secret configured");
        return Err(ApiError::Unauthorized("Invalid signature".to_string()));
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Invalid signature".to_string()))?;

    if !verify_signature(&state.webhook_secret, &body, signature) {
        warn!("identity webhook rejected: signature mismatch");
        return Err(ApiError::Unauthorized("Invalid signature".to_string()));
    }

    let event: IdentityEvent = serde_json::from_str(&body)
        .map_err(|e| ApiError::InvalidRequest(format!("Malformed event payload: {e}")))?;

    let user = state.user_service.apply_identity_event(event).await?;
    Ok((StatusCode::OK, Json(user)))
}

/// Checks a base64-encoded HMAC-SHA256 of the raw body against the shared
/// secret. Returns false for undecodable signatures rather than erroring.
fn verify_signature(secret: &str, body: &str, signature: &str) -> bool {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body.as_bytes());
    let Ok(expected) = BASE64.decode(signature) else {
        return false;
    };
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::test_support::{test_state, TEST_WEBHOOK_SECRET};
    use axum::response::IntoResponse;

    fn sign(body: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(TEST_WEBHOOK_SECRET.as_bytes())
            .expect("hmac accepts any key length");
        mac.update(body.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }

    fn signed_headers(body: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, sign(body).parse().expect("valid header"));
        headers
    }

    const CREATED_EVENT: &str = r#"{
        "type": "user.created",
        "data": {
            "id": "user_2abc",
            "email_addresses": [{"email_address": "jo@example.com"}],
            "first_name": "Jo",
            "last_name": "Farmer"
        }
    }"#;

    #[tokio::test]
    async fn test_valid_signature_creates_user() {
        let state = test_state().await;

        let (status, Json(user)) = identity_webhook(
            State(state.clone()),
            signed_headers(CREATED_EVENT),
            CREATED_EVENT.to_string(),
        )
        .await
        .expect("signed event should be accepted");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user.provider_user_id, "user_2abc");
        assert_eq!(user.email, "jo@example.com");
        assert_eq!(user.name, "Jo Farmer");
    }

    #[tokio::test]
    async fn test_wrong_signature_is_401() {
        let state = test_state().await;

        let mut headers = HeaderMap::new();
        headers.insert(
            SIGNATURE_HEADER,
            sign("some other body").parse().expect("valid header"),
        );
        let err = identity_webhook(State(state), headers, CREATED_EVENT.to_string())
            .await
            .expect_err("tampered body must be rejected");
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_signature_is_401() {
        let state = test_state().await;

        let err = identity_webhook(State(state), HeaderMap::new(), CREATED_EVENT.to_string())
            .await
            .expect_err("unsigned request must be rejected");
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_event_type_is_400() {
        let state = test_state().await;

        let body = r#"{"type": "user.deleted", "data": {"id": "user_2abc"}}"#;
        let err = identity_webhook(State(state), signed_headers(body), body.to_string())
            .await
            .expect_err("unsupported event must be rejected");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_secret_rejects_forged_signature() {
        let mut state = test_state().await;
        state.webhook_secret = String::new();

        // A forger who knows the secret is unset can sign with the empty
        // key; that signature must still be refused
        let mut mac =
            Hmac::<Sha256>::new_from_slice(b"").expect("hmac accepts any key length");
        mac.update(CREATED_EVENT.as_bytes());
        let forged = BASE64.encode(mac.finalize().into_bytes());

        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, forged.parse().expect("valid header"));

        let err = identity_webhook(State(state), headers, CREATED_EVENT.to_string())
            .await
            .expect_err("empty secret must refuse all requests");
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_signature_is_401() {
        let state = test_state().await;

        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, "not-base64!!!".parse().expect("ascii"));
        let err = identity_webhook(State(state), headers, CREATED_EVENT.to_string())
            .await
            .expect_err("undecodable signature must be rejected");
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
