/// Failures surfaced to the user as a single status line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("no backend configuration available")]
    ConfigMissing,

    #[error("anonymous authentication failed: {0}")]
    AuthFailed(String),

    #[error("identity or store not ready")]
    NotReady,

    #[error("remote write failed: {0}")]
    SaveFailed(String),
}

impl BackendError {
    pub fn status_message(&self) -> &'static str {
        match self {
            BackendError::ConfigMissing => {
                "Backend configuration not found. Data saving is disabled."
            }
            BackendError::AuthFailed(_) => "Authentication failed. Data saving is not possible.",
            BackendError::NotReady => "Application is not ready to save data. Please wait.",
            BackendError::SaveFailed(_) => "Failed to save form. Please try again.",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("identity service rejected sign-in ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed sign-in response: {0}")]
    Malformed(String),
}

impl From<AuthError> for BackendError {
    fn from(e: AuthError) -> Self {
        BackendError::AuthFailed(e.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store rejected write ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid collection path: {0}")]
    InvalidPath(String),

    #[error("record is not a JSON object")]
    NotAnObject,
}

impl From<StoreError> for BackendError {
    fn from(e: StoreError) -> Self {
        BackendError::SaveFailed(e.to_string())
    }
}
