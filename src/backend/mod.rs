//! Session identity, document stores and the save path.

pub mod error;
pub mod gateway;
pub mod identity;
pub mod store;

pub use error::{AuthError, BackendError, StoreError};
pub use gateway::{FormRecord, PersistenceGateway};
pub use identity::{
    FirebaseIdentity, IdentityProvider, LocalIdentity, Readiness, SessionIdentity,
    spawn_bootstrap,
};
pub use store::{DocumentRef, DocumentStore, FirestoreStore, LocalStore};

use crate::settings::BackendSettings;
use std::sync::Arc;

/// Builds the gateway and identity provider described by the settings.
/// `None` yields a gateway that reports `ConfigMissing`.
pub fn connect(
    settings: Option<&BackendSettings>,
) -> (PersistenceGateway, Option<Box<dyn IdentityProvider>>) {
    match settings {
        None => {
            tracing::warn!("no backend configured; saving is disabled");
            (PersistenceGateway::unconfigured(), None)
        }
        Some(BackendSettings::Local { root, app_id }) => {
            tracing::info!(root = %root, "using local document store");
            let store = Arc::new(LocalStore::new(root.as_str()));
            let provider: Box<dyn IdentityProvider> = Box::new(LocalIdentity);
            (PersistenceGateway::new(app_id.clone(), store), Some(provider))
        }
        Some(BackendSettings::Firebase {
            api_key,
            project_id,
            app_id,
        }) => {
            tracing::info!(project = %project_id, "using Firestore document store");
            let client = reqwest::blocking::Client::new();
            let store = Arc::new(FirestoreStore::new(project_id.clone(), client.clone()));
            let provider: Box<dyn IdentityProvider> =
                Box::new(FirebaseIdentity::new(api_key.clone(), client));
            (PersistenceGateway::new(app_id.clone(), store), Some(provider))
        }
    }
}
