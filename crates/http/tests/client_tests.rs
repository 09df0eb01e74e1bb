//! Integration tests for the admissions HTTP client

use admissions_core::SessionTokens;
use admissions_http::client::{
    AuthenticatedPortalClient, ClientError, PortalClient, PublicPortalClient, TypedClientBuilder,
    UnauthorizedHandler,
};
use admissions_http::types::{
    ApplicationStatus, LoginRequest, NewApplication, PaymentMethod, PaymentSetupRequest,
    TaskSubmission, UploadUrlRequest,
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Counts reload requests
#[derive(Default)]
struct CountingReloader {
    reloads: AtomicUsize,
}

impl UnauthorizedHandler for CountingReloader {
    fn on_unauthorized(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

impl CountingReloader {
    fn count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

fn authenticated(
    server: &MockServer,
    token: &str,
) -> (AuthenticatedPortalClient, Arc<CountingReloader>) {
    let reloader = Arc::new(CountingReloader::default());
    let client = TypedClientBuilder::new()
        .base_url(server.uri())
        .on_unauthorized(reloader.clone())
        .build_authenticated(token)
        .unwrap();
    (client, reloader)
}

#[tokio::test]
async fn test_client_builder() {
    let client = TypedClientBuilder::new()
        .base_url("http://localhost:8080/")
        .build_public();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = TypedClientBuilder::new().build_public();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/students/stu-1"))
        .and(header("authorization", "Bearer access-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "stu-1",
            "firstName": "Ada",
            "lastName": "Lovelace"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, reloader) = authenticated(&mock_server, "access-abc");
    let profile = client.student_profile("stu-1").await.unwrap();

    assert_eq!(profile.display_name().as_deref(), Some("Ada Lovelace"));
    assert_eq!(reloader.count(), 0);
}

#[tokio::test]
async fn test_public_client_sends_no_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ada@example.edu", "password": "pw"})))
        .respond_with(|request: &Request| {
            assert!(!request.headers.contains_key("authorization"));
            ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "a",
                "refreshToken": "r",
                "userId": "stu-1"
            }))
        })
        .mount(&mock_server)
        .await;

    let client = PublicPortalClient::new(mock_server.uri()).unwrap();
    let tokens = client
        .login(&LoginRequest {
            email: "ada@example.edu".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();

    assert_eq!(tokens.access_token, "a");
    assert_eq!(tokens.user_id, "stu-1");
}

#[tokio::test]
async fn test_unauthorized_triggers_exactly_one_reload_per_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/students/stu-1/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .mount(&mock_server)
        .await;

    let (client, reloader) = authenticated(&mock_server, "stale");

    let result = client.list_tasks("stu-1").await;
    assert!(matches!(result, Err(ClientError::SessionExpired)));
    assert_eq!(reloader.count(), 1);
    assert!(!client.is_authenticated());

    let result = client.list_tasks("stu-1").await;
    assert!(matches!(result, Err(ClientError::SessionExpired)));
    assert_eq!(reloader.count(), 2);
}

#[tokio::test]
async fn test_concurrent_unauthorized_each_reload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let (client, reloader) = authenticated(&mock_server, "stale");

    let (a, b) = tokio::join!(
        client.student_profile("stu-1"),
        client.list_applications("stu-1")
    );

    assert!(a.unwrap_err().is_auth_expired());
    assert!(b.unwrap_err().is_auth_expired());
    assert_eq!(reloader.count(), 2);
}

#[tokio::test]
async fn test_bearer_dropped_after_session_expired() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/students/stu-1"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/students/stu-1"))
        .respond_with(|request: &Request| {
            assert!(!request.headers.contains_key("authorization"));
            ResponseTemplate::new(401)
        })
        .mount(&mock_server)
        .await;

    let (client, _reloader) = authenticated(&mock_server, "stale");

    assert!(client.student_profile("stu-1").await.is_err());
    assert!(!client.is_authenticated());
    assert!(client.student_profile("stu-1").await.is_err());
}

#[tokio::test]
async fn test_public_unauthorized_is_plain_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&mock_server)
        .await;

    let client = PublicPortalClient::new(mock_server.uri()).unwrap();
    let result = client
        .login(&LoginRequest {
            email: "ada@example.edu".into(),
            password: "wrong".into(),
        })
        .await;

    match result {
        Err(ClientError::AuthenticationFailed(message)) => {
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("Expected AuthenticationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_body_extraction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/applications"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": [{"message": "intake is closed"}]
        })))
        .mount(&mock_server)
        .await;

    let (client, reloader) = authenticated(&mock_server, "token");
    let result = client
        .submit_application(&NewApplication {
            student_id: "stu-1".into(),
            program: "BSc Nursing".into(),
            intake: "2025-09".into(),
        })
        .await;

    assert!(matches!(result, Err(ClientError::Validation(ref m)) if m == "intake is closed"));
    assert_eq!(reloader.count(), 0);
}

#[tokio::test]
async fn test_network_failure_is_request_error() {
    // Nothing listens on this port once the server is dropped
    let uri = {
        let mock_server = MockServer::start().await;
        mock_server.uri()
    };

    let client = AuthenticatedPortalClient::new(uri, "token").unwrap();
    let result = client.student_profile("stu-1").await;

    let error = result.unwrap_err();
    assert!(matches!(error, ClientError::Request(_)));
    assert_eq!(error.status(), None);
}

#[tokio::test]
async fn test_application_workflow_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/students/stu-1/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "app-1", "program": "BSc Nursing", "status": "draft", "completedSteps": ["personal"]}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/applications/app-1/steps/education"))
        .and(body_json(json!({"school": "Central High"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "app-1",
            "program": "BSc Nursing",
            "status": "draft",
            "completedSteps": ["personal", "education"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/payments/setup"))
        .and(body_json(json!({"applicationId": "app-1", "method": "bank_transfer"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "paymentId": "pay-9",
            "amountCents": 5000,
            "currency": "USD"
        })))
        .mount(&mock_server)
        .await;

    let (client, _) = authenticated(&mock_server, "token");

    let applications = client.list_applications("stu-1").await.unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].status, ApplicationStatus::Draft);

    let updated = client
        .save_application_step("app-1", "education", &json!({"school": "Central High"}))
        .await
        .unwrap();
    assert_eq!(updated.completed_steps, vec!["personal", "education"]);

    let payment = client
        .setup_payment(&PaymentSetupRequest {
            application_id: "app-1".into(),
            method: PaymentMethod::BankTransfer,
        })
        .await
        .unwrap();
    assert_eq!(payment.amount_cents, 5000);
    assert_eq!(payment.checkout_url, None);
}

#[tokio::test]
async fn test_document_upload_goes_to_presigned_url_without_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tasks/task-3/upload-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uploadUrl": format!("{}/bucket/transcript.pdf?sig=xyz", mock_server.uri()),
            "fileKey": "uploads/stu-1/transcript.pdf"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/bucket/transcript.pdf"))
        .and(header("content-type", "application/pdf"))
        .respond_with(|request: &Request| {
            assert!(!request.headers.contains_key("authorization"));
            assert_eq!(request.body, b"%PDF-1.7");
            ResponseTemplate::new(200)
        })
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/tasks/task-3/submissions"))
        .and(body_json(json!({"fileKey": "uploads/stu-1/transcript.pdf"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "task-3",
            "title": "Upload transcript",
            "status": "submitted",
            "requiresDocument": true
        })))
        .mount(&mock_server)
        .await;

    let (client, _) = authenticated(&mock_server, "token");

    let target = client
        .request_upload_url(
            "task-3",
            &UploadUrlRequest {
                file_name: "transcript.pdf".into(),
                content_type: "application/pdf".into(),
            },
        )
        .await
        .unwrap();
    client
        .upload_document(&target, "application/pdf", b"%PDF-1.7".to_vec())
        .await
        .unwrap();
    let task = client
        .submit_task(
            "task-3",
            &TaskSubmission {
                file_key: Some(target.file_key),
                note: None,
            },
        )
        .await
        .unwrap();

    assert!(task.requires_document);
}

#[tokio::test]
async fn test_logout_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(body_json(json!({"refreshToken": "r"})))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let (client, _) = authenticated(&mock_server, "token");
    client.logout("r").await.unwrap();
}

#[tokio::test]
async fn test_logout_ignores_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Logged out"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, reloader) = authenticated(&mock_server, "token");
    client.logout("r").await.unwrap();
    assert_eq!(reloader.count(), 0);
}

#[tokio::test]
async fn test_portal_client_from_session() {
    let builder = TypedClientBuilder::new().base_url("http://localhost:1");

    let anonymous = PortalClient::from_session(builder.clone(), None).unwrap();
    assert!(!anonymous.is_authenticated());

    let empty = SessionTokens::default();
    let still_anonymous = PortalClient::from_session(builder.clone(), Some(&empty)).unwrap();
    assert!(still_anonymous.authenticated().is_none());

    let tokens = SessionTokens {
        access_token: "a".into(),
        refresh_token: "r".into(),
        user_id: "stu-1".into(),
    };
    let signed_in = PortalClient::from_session(builder, Some(&tokens)).unwrap();
    assert!(signed_in.is_authenticated());
    assert_eq!(signed_in.public().base_url(), "http://localhost:1");
}
