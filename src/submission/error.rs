use http::StatusCode;
use thiserror::Error;

/// Why a request to the backend did not succeed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RequestError {
    #[error("the backend URL is not configured")]
    Unconfigured,

    #[error("the backend is unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("the request timed out")]
    Timeout,

    #[error("the backend responded with {0}")]
    NonSuccessStatus(StatusCode),

    #[error("the backend response is malformed: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for RequestError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if let Some(status) = error.status() {
            Self::NonSuccessStatus(status)
        } else if error.is_decode() {
            Self::MalformedResponse(error.to_string())
        } else {
            Self::NetworkUnavailable(error.to_string())
        }
    }
}

impl RequestError {
    /// Turn a response into an error unless its status is a success.
    pub fn check(response: reqwest::Response) -> Result<reqwest::Response, Self> {
        let status = response.status();
        if status.is_success() { Ok(response) } else { Err(Self::NonSuccessStatus(status)) }
    }
}
