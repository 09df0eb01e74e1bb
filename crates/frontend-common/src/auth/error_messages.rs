//! User-friendly error messages

use admissions_http::ClientError;

/// Message shown to the student for a failed request
pub fn user_message(error: &ClientError) -> String {
    match error {
        ClientError::AuthenticationFailed(_) => "Incorrect email or password.".to_string(),
        ClientError::SessionExpired => "Your session has expired. Reloading...".to_string(),
        ClientError::Request(_) => {
            "Could not reach the admissions service. Check your connection and try again."
                .to_string()
        }
        ClientError::ServerError { .. } => {
            "The admissions service is having trouble. Please try again later.".to_string()
        }
        ClientError::BadRequest(message)
        | ClientError::Validation(message)
        | ClientError::Forbidden(message)
        | ClientError::NotFound(message) => message.clone(),
        ClientError::Serialization(_) | ClientError::Configuration(_) => {
            "Something went wrong. Please reload the page.".to_string()
        }
    }
}
