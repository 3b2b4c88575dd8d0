use tracing::warn;

/// Error type shared by the HTTP collaborators
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 429 Too Many Requests (rate limited)
    RateLimited {
        retry_after_secs: Option<u64>,
    },
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited { retry_after_secs } => match retry_after_secs {
                Some(secs) => write!(f, "Rate Limited. Retry after {} s", secs),
                None => write!(f, "Rate Limited"),
            },
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Classify a non-success HTTP response
pub(crate) async fn handle_error_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let retry_after_secs = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok());
    let body_text = response.text().await.unwrap_or_default();

    classify_status(status, body_text, retry_after_secs)
}

fn classify_status(status: u16, body_text: String, retry_after_secs: Option<u64>) -> ApiError {
    match status {
        400 => {
            // Try to parse JSON error
            if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&body_text) {
                let message = err_json
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or(&body_text);
                ApiError::BadRequest(message.to_string())
            } else {
                ApiError::BadRequest(body_text)
            }
        }
        404 => ApiError::NotFound(body_text),
        429 => {
            warn!("Rate limited, retry after {:?} s", retry_after_secs);
            ApiError::RateLimited { retry_after_secs }
        }
        500..=599 => {
            warn!("Server error {}: {}", status, body_text);
            ApiError::ServerError(status, body_text)
        }
        _ => ApiError::HttpError(status, body_text),
    }
}
