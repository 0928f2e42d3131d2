use thiserror::Error;

/// Bad startup input. Fatal: the server refuses to start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("invalid unit of measurement: '{0}' (expected metric, imperial or standard)")]
    InvalidUnits(String),

    #[error("API key must not be empty")]
    EmptyApiKey,

    #[error("{0} value not set")]
    MissingApiKeyEnv(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Failure talking to the upstream weather provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream request timed out")]
    Timeout,

    #[error("unexpected upstream status code {code}")]
    UpstreamStatus { code: u16 },

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("error contacting upstream: {0}")]
    Transport(String),
}

/// Fieldless view of [`FetchError`], handy for matching and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Timeout,
    UpstreamStatus,
    MalformedResponse,
    Transport,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Timeout => FetchErrorKind::Timeout,
            FetchError::UpstreamStatus { .. } => FetchErrorKind::UpstreamStatus,
            FetchError::MalformedResponse(_) => FetchErrorKind::MalformedResponse,
            FetchError::Transport(_) => FetchErrorKind::Transport,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::UpstreamStatus { code: status.as_u16() }
        } else if err.is_decode() {
            FetchError::MalformedResponse(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(FetchError::Timeout.kind(), FetchErrorKind::Timeout);
        assert_eq!(
            FetchError::UpstreamStatus { code: 401 }.kind(),
            FetchErrorKind::UpstreamStatus
        );
        assert_eq!(
            FetchError::MalformedResponse("eof".into()).kind(),
            FetchErrorKind::MalformedResponse
        );
    }

    #[test]
    fn missing_env_message_names_variable() {
        let err = ConfigurationError::MissingApiKeyEnv("WEATHERAPI".into());
        assert_eq!(err.to_string(), "WEATHERAPI value not set");
    }
}
