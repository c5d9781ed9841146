use super::error::{AuthError, BackendError};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::sync::mpsc;

const SIGN_UP_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:signUp";

/// Anonymous identity scoping every record saved during this launch.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub uid: String,
    /// Bearer token for stores that authorize requests.
    pub token: Option<String>,
}

impl SessionIdentity {
    pub fn anonymous(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            token: None,
        }
    }
}

impl std::fmt::Debug for SessionIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIdentity")
            .field("uid", &self.uid)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Readiness {
    #[default]
    Uninitialized,
    Ready(SessionIdentity),
    Failed(BackendError),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready(_))
    }
}

pub trait IdentityProvider: Send {
    fn authenticate_anonymously(&self) -> Result<SessionIdentity, AuthError>;
}

/// Issues a random uid without contacting any service.
#[derive(Debug, Default)]
pub struct LocalIdentity;

impl IdentityProvider for LocalIdentity {
    fn authenticate_anonymously(&self) -> Result<SessionIdentity, AuthError> {
        Ok(SessionIdentity::anonymous(uuid::Uuid::new_v4().simple().to_string()))
    }
}

/// Anonymous sign-up against the Firebase Identity Toolkit REST API.
pub struct FirebaseIdentity {
    api_key: String,
    client: Client,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
    id_token: String,
}

impl FirebaseIdentity {
    pub fn new(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
        }
    }
}

impl IdentityProvider for FirebaseIdentity {
    fn authenticate_anonymously(&self) -> Result<SessionIdentity, AuthError> {
        let resp = self
            .client
            .post(SIGN_UP_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({ "returnSecureToken": true }))
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        let body: SignUpResponse = resp
            .json()
            .map_err(|e| AuthError::Malformed(e.to_string()))?;
        if body.local_id.is_empty() {
            return Err(AuthError::Malformed("empty localId".into()));
        }
        Ok(SessionIdentity {
            uid: body.local_id,
            token: Some(body.id_token),
        })
    }
}

/// Runs anonymous sign-in once on a worker thread. The receiver yields a
/// single `Ready` or `Failed` update.
pub fn spawn_bootstrap(provider: Box<dyn IdentityProvider>) -> mpsc::Receiver<Readiness> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let readiness = match provider.authenticate_anonymously() {
            Ok(identity) => {
                tracing::info!(uid = %identity.uid, "anonymous session established");
                Readiness::Ready(identity)
            }
            Err(e) => {
                tracing::error!(error = %e, "anonymous authentication failed");
                Readiness::Failed(e.into())
            }
        };
        let _ = tx.send(readiness);
    });
    rx
}
