//! Student, application, task and payment endpoints

use super::{AuthenticatedPortalClient, ClientError};
use crate::types::{
    Application, NewApplication, PaymentSetup, PaymentSetupRequest, StudentProfile, Task,
    TaskSubmission, UploadTarget, UploadUrlRequest,
};
use reqwest::{Method, header};
use serde_json::Value as JsonValue;

impl AuthenticatedPortalClient {
    /// Fetch the student record
    pub async fn student_profile(&self, student_id: &str) -> Result<StudentProfile, ClientError> {
        let req = self.request(Method::GET, &format!("/students/{student_id}"));
        self.execute(req).await
    }

    /// List the student's applications
    pub async fn list_applications(
        &self,
        student_id: &str,
    ) -> Result<Vec<Application>, ClientError> {
        let req = self.request(Method::GET, &format!("/students/{student_id}/applications"));
        self.execute(req).await
    }

    /// Start a new application
    pub async fn submit_application(
        &self,
        application: &NewApplication,
    ) -> Result<Application, ClientError> {
        let req = self.request(Method::POST, "/applications").json(application);
        self.execute(req).await
    }

    /// Save the answers of one step of the multi-step application form
    pub async fn save_application_step(
        &self,
        application_id: &str,
        step: &str,
        answers: &JsonValue,
    ) -> Result<Application, ClientError> {
        let req = self
            .request(
                Method::PATCH,
                &format!("/applications/{application_id}/steps/{step}"),
            )
            .json(answers);
        self.execute(req).await
    }

    /// List tasks assigned to the student
    pub async fn list_tasks(&self, student_id: &str) -> Result<Vec<Task>, ClientError> {
        let req = self.request(Method::GET, &format!("/students/{student_id}/tasks"));
        self.execute(req).await
    }

    /// Ask the API for a pre-signed upload target for a task document
    pub async fn request_upload_url(
        &self,
        task_id: &str,
        request: &UploadUrlRequest,
    ) -> Result<UploadTarget, ClientError> {
        let req = self
            .request(Method::POST, &format!("/tasks/{task_id}/upload-url"))
            .json(request);
        self.execute(req).await
    }

    /// Upload document bytes to a pre-signed target. No bearer token is sent
    /// to the storage host.
    pub async fn upload_document(
        &self,
        target: &UploadTarget,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ClientError> {
        let response = self
            .http_client()
            .put(&target.upload_url)
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_status(status, &body))
        }
    }

    /// Submit a task, optionally referencing an uploaded document
    pub async fn submit_task(
        &self,
        task_id: &str,
        submission: &TaskSubmission,
    ) -> Result<Task, ClientError> {
        let req = self
            .request(Method::POST, &format!("/tasks/{task_id}/submissions"))
            .json(submission);
        self.execute(req).await
    }

    /// Set up payment of the application fee
    pub async fn setup_payment(
        &self,
        request: &PaymentSetupRequest,
    ) -> Result<PaymentSetup, ClientError> {
        let req = self.request(Method::POST, "/payments/setup").json(request);
        self.execute(req).await
    }
}
