use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("session expired, please log in again")]
    Unauthorized,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Application(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("missing required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("request cancelled")]
    Cancelled,

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("config error: {0}")]
    Config(String),
}

/// Coarse classification of a [`PanelError`], used when deciding how a
/// failure is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Status,
    Parse,
    Application,
    NotFound,
    Validation,
    Cancelled,
    Config,
}

impl PanelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PanelError::Request(e) if e.is_decode() => ErrorKind::Parse,
            PanelError::Request(_) => ErrorKind::Transport,
            PanelError::Http { .. } | PanelError::Unauthorized => ErrorKind::Status,
            PanelError::Json(_) => ErrorKind::Parse,
            PanelError::Application(_) => ErrorKind::Application,
            PanelError::NotFound(_) => ErrorKind::NotFound,
            PanelError::Validation(_) => ErrorKind::Validation,
            PanelError::Cancelled => ErrorKind::Cancelled,
            PanelError::Url(_) | PanelError::Config(_) => ErrorKind::Config,
        }
    }

    /// Whether this error came from a superseded request rather than a real
    /// failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PanelError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = PanelError::Validation(vec!["name".into(), "slug".into()]);
        assert_eq!(err.to_string(), "missing required fields: name, slug");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_kind_mapping() {
        let http = PanelError::Http {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(http.kind(), ErrorKind::Status);
        assert_eq!(PanelError::Unauthorized.kind(), ErrorKind::Status);
        assert_eq!(
            PanelError::Application("nope".into()).kind(),
            ErrorKind::Application
        );
        assert_eq!(PanelError::NotFound("tenant 3".into()).kind(), ErrorKind::NotFound);
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(PanelError::from(json).kind(), ErrorKind::Parse);
        assert!(PanelError::Cancelled.is_cancelled());
    }
}
