//! Request and response bodies of the admissions REST API
//!
//! The API speaks camelCase JSON. Student records are owned by the API and
//! kept opaque here.

use admissions_core::SessionTokens;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Email/password sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// New applicant account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Exchange a refresh token for a new token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Revoke a refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Tokens issued by login, registration and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user_id: String,
}

impl From<AuthTokens> for SessionTokens {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user_id: tokens.user_id,
        }
    }
}

/// Student record as returned by the API, consumed read-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentProfile(pub JsonValue);

impl StudentProfile {
    /// Read a top-level string field
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(JsonValue::as_str)
    }

    /// Display name assembled from `firstName` and `lastName`
    pub fn display_name(&self) -> Option<String> {
        match (self.str_field("firstName"), self.str_field("lastName")) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.to_string()),
            (None, Some(last)) => Some(last.to_string()),
            (None, None) => None,
        }
    }
}

/// Where an application is in the review pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Draft,
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// Application summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub program: String,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub completed_steps: Vec<String>,
}

/// Start a new application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub student_id: String,
    pub program: String,
    pub intake: String,
}

/// Status of a task assigned to the student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Submitted,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// A document or action the student must complete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub requires_document: bool,
}

/// Request a pre-signed upload target for a task document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    pub file_name: String,
    pub content_type: String,
}

/// Pre-signed upload target. The browser uploads straight to storage, so
/// no storage credentials ever reach the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub upload_url: String,
    pub file_key: String,
}

/// Submission for a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payment method for the application fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
    Waiver,
}

/// Set up payment of the application fee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSetupRequest {
    pub application_id: String,
    pub method: PaymentMethod,
}

/// Result of a payment setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSetup {
    pub payment_id: String,
    pub amount_cents: u64,
    pub currency: String,
    #[serde(default)]
    pub checkout_url: Option<String>,
}
