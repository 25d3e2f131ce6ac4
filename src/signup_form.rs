//! Client side of the signup page: field validation and submission.

use crate::signup::is_valid_email;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_SUCCESS_MESSAGE: &str =
    "Thank you for signing up! You will receive our newsletter soon.";
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Failed to submit form. Please check your connection and try again.";

/// How long a server-answered message stays visible.
pub const MESSAGE_DISMISS_AFTER: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Comments,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Comments,
    ];

    /// Element id of the input.
    pub fn id(self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Email => "email",
            FormField::Comments => "comments",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "First name",
            FormField::LastName => "Last name",
            FormField::Email => "Email",
            FormField::Comments => "Comments",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, FormField::Comments)
    }
}

/// One invalid field and the message to show beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.id(), self.message)
    }
}

/// Raw values typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub comments: String,
}

impl SignupForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Comments => &self.comments,
        }
    }

    /// Check a single field, as done when an input loses focus.
    pub fn validate_field(&self, field: FormField) -> Result<(), FieldError> {
        let value = self.value(field).trim();
        let fail = |message: String| -> Result<(), FieldError> {
            Err(FieldError { field, message })
        };

        if field.is_required() && value.is_empty() {
            return fail(format!("{} is required", field.label()));
        }
        if field == FormField::Email && !value.is_empty() && !is_valid_email(value) {
            return fail("Please enter a valid email address".to_string());
        }
        if matches!(field, FormField::FirstName | FormField::LastName)
            && !value.is_empty()
            && value.chars().count() < 2
        {
            return fail(format!("{} must be at least 2 characters", field.label()));
        }
        Ok(())
    }

    /// Check every field. Returns all errors, in form order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = FormField::ALL
            .iter()
            .filter_map(|field| self.validate_field(*field).err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Trimmed JSON payload stamped with the current time.
    pub fn payload(&self) -> SignupPayload {
        SignupPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            comments: self.comments.trim().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub comments: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Banner shown under the form after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
    /// `None` keeps the message until the next submission.
    pub dismiss_after: Option<Duration>,
}

impl FormMessage {
    fn answered(kind: MessageKind, text: String) -> Self {
        Self {
            kind,
            text,
            dismiss_after: Some(MESSAGE_DISMISS_AFTER),
        }
    }

    fn network_failure() -> Self {
        Self {
            kind: MessageKind::Error,
            text: NETWORK_ERROR_MESSAGE.to_string(),
            dismiss_after: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == MessageKind::Success
    }
}

/// What the form shows after the user presses submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(Vec<FieldError>),
    /// The request completed or failed in transport.
    Message(FormMessage),
}

#[derive(Debug, Deserialize)]
struct ServerReply {
    #[serde(default)]
    message: Option<String>,
}

/// Posts the signup form to `<base_url>/api/signup`.
#[derive(Debug, Clone)]
pub struct SignupClient {
    client: reqwest::Client,
    base_url: String,
}

impl SignupClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Validate `form` and, when it passes, submit it once.
    pub async fn submit(&self, form: &SignupForm) -> SubmitOutcome {
        if let Err(errors) = form.validate() {
            debug!("Form validation failed ({} fields)", errors.len());
            return SubmitOutcome::Invalid(errors);
        }
        SubmitOutcome::Message(self.post(&form.payload()).await)
    }

    /// Send an already validated payload.
    pub async fn post(&self, payload: &SignupPayload) -> FormMessage {
        let url = format!("{}/api/signup", self.base_url);

        let response = match self.client.post(&url).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Form submission error: {}", e);
                return FormMessage::network_failure();
            }
        };

        let status = response.status();
        debug!("Server response status: {}", status);
        let reply: ServerReply = match response.json().await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Unreadable reply from {}: {}", url, e);
                return FormMessage::network_failure();
            }
        };

        let server_message = reply.message.filter(|m| !m.is_empty());
        if status.as_u16() == 200 || status.as_u16() == 201 {
            info!("✓ Signup accepted");
            FormMessage::answered(
                MessageKind::Success,
                server_message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            )
        } else {
            FormMessage::answered(
                MessageKind::Error,
                server_message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            )
        }
    }
}
