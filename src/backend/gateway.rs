use super::error::BackendError;
use super::identity::Readiness;
use super::store::{DocumentRef, DocumentStore};
use crate::form::FormValue;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One form submission: field answers and annotation encodings flattened
/// into a single object next to `timestamp`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FormRecord {
    #[serde(flatten)]
    pub fields: BTreeMap<String, FormValue>,
    #[serde(flatten)]
    pub annotations: BTreeMap<String, String>,
    pub timestamp: String,
}

impl FormRecord {
    pub fn new(
        fields: BTreeMap<String, FormValue>,
        annotations: BTreeMap<String, String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            fields,
            annotations,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Checks readiness and hands complete records to the document store.
#[derive(Clone)]
pub struct PersistenceGateway {
    app_id: String,
    store: Option<Arc<dyn DocumentStore>>,
    readiness: Readiness,
}

impl PersistenceGateway {
    pub fn new(app_id: impl Into<String>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            app_id: app_id.into(),
            store: Some(store),
            readiness: Readiness::Uninitialized,
        }
    }

    /// A gateway with no store. Its readiness carries `ConfigMissing` for the
    /// status line; saves report `NotReady`.
    pub fn unconfigured() -> Self {
        Self {
            app_id: String::new(),
            store: None,
            readiness: Readiness::Failed(BackendError::ConfigMissing),
        }
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    pub fn set_readiness(&mut self, readiness: Readiness) {
        if self.store.is_none() {
            return;
        }
        self.readiness = readiness;
    }

    pub fn collection_path(&self, uid: &str) -> Vec<String> {
        ["artifacts", self.app_id.as_str(), "users", uid, "forms"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Writes one record. Fails without touching the store unless an
    /// identity has been established.
    pub fn save(
        &self,
        fields: BTreeMap<String, FormValue>,
        annotations: BTreeMap<String, String>,
        now: DateTime<Utc>,
    ) -> Result<DocumentRef, BackendError> {
        let (Some(store), Readiness::Ready(identity)) = (&self.store, &self.readiness) else {
            return Err(BackendError::NotReady);
        };

        let record = FormRecord::new(fields, annotations, now);
        let value = serde_json::to_value(&record)
            .map_err(|e| BackendError::SaveFailed(e.to_string()))?;
        let path = self.collection_path(&identity.uid);
        tracing::info!(
            collection = %path.join("/"),
            fields = record.fields.len(),
            annotations = record.annotations.len(),
            "saving form record"
        );
        let doc = store.append(identity, &path, &value).map_err(|e| {
            tracing::error!(error = %e, "saving form record failed");
            BackendError::from(e)
        })?;
        tracing::info!(document = %doc.path, "form record saved");
        Ok(doc)
    }
}
