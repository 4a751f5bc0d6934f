use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - sheet may no longer be published")]
    Unauthorized,

    #[error("Sheet not found: {0}")]
    NotFound(String),

    #[error("Rate limited by sheet host")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Received empty or too short CSV data ({len} bytes, need at least {min})")]
    BodyTooShort { len: usize, min: usize },
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl FetchError {
    /// Truncate a response body to avoid logging a whole error page
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..end],
            body.len()
        )
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => FetchError::Unauthorized,
            403 => FetchError::AccessDenied(truncated),
            404 => FetchError::NotFound(truncated),
            429 => FetchError::RateLimited,
            500..=599 => FetchError::ServerError(truncated),
            _ => FetchError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Map a transport error, keeping timeouts distinct from other failures.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            FetchError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            FetchError::ServerError(ref body) if body == "boom"
        ));
        assert!(matches!(
            FetchError::from_status(StatusCode::NOT_FOUND, ""),
            FetchError::NotFound(_)
        ));
        assert!(matches!(
            FetchError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            FetchError::RateLimited
        ));
        assert!(matches!(
            FetchError::from_status(StatusCode::IM_A_TEAPOT, "short and stout"),
            FetchError::InvalidResponse(ref msg) if msg.starts_with("Status 418")
        ));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // Arabic letters are two bytes each; 501 bytes would split one
        let body = "ج".repeat(400);
        let truncated = FetchError::truncate_body(&body);
        assert!(truncated.contains("truncated, 800 total bytes"));
    }
}
