//! Newsletter signup validation and persistence.

use crate::store::{SignupStore, StoreError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

pub const MSG_REQUIRED: &str = "First name, last name, and email are required.";
pub const MSG_INVALID_EMAIL: &str = "Invalid email format.";
pub const MSG_DUPLICATE: &str = "This email is already registered.";
pub const MSG_SUCCESS: &str = "Thank you for signing up!";
pub const MSG_PERSISTENCE: &str = "Failed to save signup. Please try again later.";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
        .is_match(email)
}

/// A signup as submitted by a client. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub comments: Option<String>,
    pub timestamp: Option<String>,
}

/// A signup accepted by this service, in its stored form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub comments: String,
    pub timestamp: String,
}

/// Normalized email of a stored element, if it has one.
fn stored_email(record: &Value) -> Option<String> {
    record
        .get("email")
        .and_then(Value::as_str)
        .map(|email| email.trim().to_lowercase())
}

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("failed to persist signup: {0}")]
    Persistence(#[from] StoreError),
}

impl SignupError {
    pub fn status(&self) -> StatusCode {
        match self {
            SignupError::Validation(_) => StatusCode::BAD_REQUEST,
            SignupError::Conflict(_) => StatusCode::CONFLICT,
            SignupError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Persistence details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            SignupError::Validation(message) | SignupError::Conflict(message) => message.clone(),
            SignupError::Persistence(_) => MSG_PERSISTENCE.to_string(),
        }
    }
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        if let SignupError::Persistence(e) = &self {
            warn!("Signup persistence failed: {}", e);
        }
        let body = serde_json::json!({
            "success": false,
            "message": self.client_message(),
        });
        (self.status(), Json(body)).into_response()
    }
}

fn trimmed(field: Option<String>) -> String {
    field.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone)]
pub struct SignupService {
    store: SignupStore,
}

impl SignupService {
    pub fn new(store: SignupStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SignupStore {
        &self.store
    }

    /// Validate, normalize and append one signup.
    ///
    /// Nothing is written when validation fails or the email is taken.
    pub async fn submit(&self, request: SignupRequest) -> Result<SignupRecord, SignupError> {
        let first_name = trimmed(request.first_name);
        let last_name = trimmed(request.last_name);
        let email = trimmed(request.email);

        if first_name.is_empty() || last_name.is_empty() || email.is_empty() {
            return Err(SignupError::Validation(MSG_REQUIRED.to_string()));
        }
        if !is_valid_email(&email) {
            return Err(SignupError::Validation(MSG_INVALID_EMAIL.to_string()));
        }

        let timestamp = trimmed(request.timestamp);
        let record = SignupRecord {
            first_name,
            last_name,
            email: email.to_lowercase(),
            comments: trimmed(request.comments),
            timestamp: if timestamp.is_empty() { now_iso() } else { timestamp },
        };

        // Check and append are not atomic across requests.
        let mut records = self.store.load().await;
        if records
            .iter()
            .any(|existing| stored_email(existing).as_deref() == Some(record.email.as_str()))
        {
            info!("Rejected duplicate signup");
            return Err(SignupError::Conflict(MSG_DUPLICATE.to_string()));
        }

        records.push(serde_json::to_value(&record).map_err(StoreError::Encode)?);
        self.store.save(&records).await?;
        info!("✓ New signup stored ({} total)", records.len());
        Ok(record)
    }

    /// Every stored signup in insertion order, exactly as persisted.
    pub async fn list(&self) -> Vec<Value> {
        self.store.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn request(first: &str, last: &str, email: &str) -> SignupRequest {
        SignupRequest {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }
    }

    async fn service() -> (TempDir, SignupService) {
        let dir = TempDir::new().unwrap();
        let store = SignupStore::open(dir.path()).await.unwrap();
        (dir, SignupService::new(store))
    }

    // ==================== Email Validation Tests ====================

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("ada@x.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@x"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("ada @x.com"));
        assert!(!is_valid_email("ada@@x.com"));
        assert!(!is_valid_email(""));
    }

    // ==================== Submit Tests ====================

    #[tokio::test]
    async fn test_submit_normalizes_and_persists() {
        let (_dir, service) = service().await;

        let record = service
            .submit(request("  Ada ", "Lovelace", "  ADA@X.COM "))
            .await
            .unwrap();

        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.email, "ada@x.com");
        assert_eq!(record.comments, "");
        assert!(!record.timestamp.is_empty());
        assert_eq!(service.list().await, vec![serde_json::to_value(&record).unwrap()]);
    }

    #[tokio::test]
    async fn test_submit_keeps_client_timestamp() {
        let (_dir, service) = service().await;
        let mut req = request("Ada", "Lovelace", "ada@x.com");
        req.timestamp = Some("2024-03-01T10:00:00.000Z".to_string());
        req.comments = Some(" Hello ".to_string());

        let record = service.submit(req).await.unwrap();

        assert_eq!(record.timestamp, "2024-03-01T10:00:00.000Z");
        assert_eq!(record.comments, "Hello");
    }

    #[tokio::test]
    async fn test_submit_blank_timestamp_gets_server_time() {
        let (_dir, service) = service().await;
        let mut req = request("Ada", "Lovelace", "ada@x.com");
        req.timestamp = Some("   ".to_string());

        let record = service.submit(req).await.unwrap();

        assert!(chrono::DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
        assert!(record.timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_submit_missing_fields_rejected() {
        let (_dir, service) = service().await;
        let cases = [
            SignupRequest::default(),
            request("", "Lovelace", "ada@x.com"),
            request("Ada", "   ", "ada@x.com"),
            SignupRequest {
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                ..Default::default()
            },
        ];

        for case in cases {
            let err = service.submit(case).await.unwrap_err();
            assert!(matches!(err, SignupError::Validation(ref m) if m == MSG_REQUIRED));
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
        assert!(service.list().await.is_empty());
        assert!(!service.store().path().exists());
    }

    #[tokio::test]
    async fn test_submit_invalid_email_rejected() {
        let (_dir, service) = service().await;

        let err = service
            .submit(request("Ada", "Lovelace", "not-an-email"))
            .await
            .unwrap_err();

        assert_eq!(err.client_message(), MSG_INVALID_EMAIL);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_duplicate_email_case_insensitive() {
        let (_dir, service) = service().await;
        service
            .submit(request("Ada", "Lovelace", "ada@x.com"))
            .await
            .unwrap();

        let err = service
            .submit(request("Augusta", "King", "ADA@X.com"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.client_message(), MSG_DUPLICATE);
        assert_eq!(service.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_overwrites_corrupt_store() {
        let (_dir, service) = service().await;
        std::fs::write(service.store().path(), "{oops").unwrap();

        service
            .submit(request("Ada", "Lovelace", "ada@x.com"))
            .await
            .unwrap();

        assert_eq!(service.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_keeps_records_with_foreign_shapes() {
        let (_dir, service) = service().await;
        let legacy = serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "old@x.com",
            "timestamp": 1700000000000u64
        });
        let tagged = serde_json::json!({
            "firstName": "Kay",
            "lastName": "Lee",
            "email": "keep@x.com",
            "source": "fair"
        });
        std::fs::write(
            service.store().path(),
            Value::Array(vec![legacy.clone(), tagged.clone()]).to_string(),
        )
        .unwrap();

        let err = service
            .submit(request("Ada", "Lovelace", "OLD@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        service
            .submit(request("Grace", "Hopper", "grace@x.com"))
            .await
            .unwrap();

        let listed = service.list().await;
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0], legacy);
        assert_eq!(listed[1], tagged);
        assert_eq!(listed[2]["email"], "grace@x.com");
    }

    #[tokio::test]
    async fn test_submit_persistence_failure() {
        let (_dir, service) = service().await;
        std::fs::create_dir(service.store().path()).unwrap();

        let err = service
            .submit(request("Ada", "Lovelace", "ada@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, SignupError::Persistence(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), MSG_PERSISTENCE);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let (_dir, service) = service().await;
        for email in ["c@x.com", "a@x.com", "b@x.com"] {
            service.submit(request("Ada", "Lovelace", email)).await.unwrap();
        }

        let emails: Vec<Value> = service.list().await.into_iter().map(|r| r["email"].clone()).collect();

        assert_eq!(emails, ["c@x.com", "a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"a@x.com","extra":1}"#,
        )
        .unwrap();
        assert_eq!(req.first_name.as_deref(), Some("Ada"));
        assert_eq!(req.comments, None);
    }

    // ==================== Property Tests ====================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_valid_signup_is_listed_normalized(
            first in "[A-Za-z]{1,12}",
            last in "[A-Za-z]{1,12}",
            local in "[A-Za-z0-9]{1,10}",
            domain in "[A-Za-z]{1,10}",
        ) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                let (_dir, service) = service().await;
                let email = format!(" {}@{}.COM ", local, domain);

                service.submit(request(&first, &last, &email)).await.unwrap();

                let listed = service.list().await;
                assert_eq!(listed.len(), 1);
                assert_eq!(listed[0]["email"], format!("{}@{}.com", local, domain).to_lowercase());
            });
        }

        #[test]
        fn prop_missing_required_field_never_writes(
            which in 0usize..3,
            value in "[A-Za-z]{1,8}",
        ) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                let (_dir, service) = service().await;
                let mut req = request(&value, &value, "ada@x.com");
                match which {
                    0 => req.first_name = None,
                    1 => req.last_name = Some(String::new()),
                    _ => req.email = Some("  ".to_string()),
                }

                let err = service.submit(req).await.unwrap_err();

                assert!(matches!(err, SignupError::Validation(_)));
                assert!(!service.store().path().exists());
            });
        }
    }
}
