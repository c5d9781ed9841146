use super::error::StoreError;
use super::identity::SessionIdentity;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Store-assigned location of a written record, e.g.
/// `artifacts/<app>/users/<uid>/forms/<id>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRef {
    pub path: String,
}

/// Appends whole documents to a collection. A failed append leaves nothing
/// behind.
pub trait DocumentStore: Send + Sync {
    fn append(
        &self,
        identity: &SessionIdentity,
        collection_path: &[String],
        record: &Value,
    ) -> Result<DocumentRef, StoreError>;
}

fn validate_collection_path(path: &[String]) -> Result<(), StoreError> {
    let bad_segment = path
        .iter()
        .any(|s| s.is_empty() || s == "." || s == ".." || s.contains('/') || s.contains('\\'));
    if path.is_empty() || path.len() % 2 == 0 || bad_segment {
        return Err(StoreError::InvalidPath(path.join("/")));
    }
    Ok(())
}

/// Writes each record as `<root>/<collection path>/<uuid>.json`.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Writes `bytes` to `tmp` and renames it over `dest`. On any failure the
/// temp file is removed.
fn write_atomically(tmp: &Path, dest: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let written = (|| -> std::io::Result<()> {
        let mut f = fs::File::create(tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
        fs::rename(tmp, dest)
    })();
    if written.is_err() {
        let _ = fs::remove_file(tmp);
    }
    written
}

fn file_safe(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl DocumentStore for LocalStore {
    fn append(
        &self,
        _identity: &SessionIdentity,
        collection_path: &[String],
        record: &Value,
    ) -> Result<DocumentRef, StoreError> {
        validate_collection_path(collection_path)?;
        if !record.is_object() {
            return Err(StoreError::NotAnObject);
        }
        let dir = collection_path
            .iter()
            .fold(self.root.clone(), |dir, s| dir.join(file_safe(s)));
        fs::create_dir_all(&dir)?;

        let id = uuid::Uuid::new_v4().simple().to_string();
        let tmp = dir.join(format!(".{id}.json.tmp"));
        let dest = dir.join(format!("{id}.json"));
        let bytes = serde_json::to_vec_pretty(record)?;
        write_atomically(&tmp, &dest, &bytes)?;
        tracing::debug!(path = %dest.display(), "record written");
        Ok(DocumentRef {
            path: format!("{}/{id}", collection_path.join("/")),
        })
    }
}

/// Creates documents through the Firestore REST API, authorized with the
/// session's bearer token.
pub struct FirestoreStore {
    project_id: String,
    client: Client,
}

#[derive(Deserialize)]
struct CreatedDocument {
    name: String,
}

impl FirestoreStore {
    pub fn new(project_id: impl Into<String>, client: Client) -> Self {
        Self {
            project_id: project_id.into(),
            client,
        }
    }

    fn collection_url(&self, collection_path: &[String]) -> String {
        format!(
            "{FIRESTORE_URL}/projects/{}/databases/(default)/documents/{}",
            self.project_id,
            collection_path.join("/")
        )
    }
}

impl DocumentStore for FirestoreStore {
    fn append(
        &self,
        identity: &SessionIdentity,
        collection_path: &[String],
        record: &Value,
    ) -> Result<DocumentRef, StoreError> {
        validate_collection_path(collection_path)?;
        let body = to_firestore_document(record)?;
        let mut req = self.client.post(self.collection_url(collection_path)).json(&body);
        if let Some(token) = &identity.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        let created: CreatedDocument = resp.json()?;
        let path = match created.name.split_once("/documents/") {
            Some((_, p)) => p.to_string(),
            None => created.name.clone(),
        };
        Ok(DocumentRef { path })
    }
}

/// Wraps a JSON object in Firestore's typed-value document format.
pub fn to_firestore_document(record: &Value) -> Result<Value, StoreError> {
    let Value::Object(fields) = record else {
        return Err(StoreError::NotAnObject);
    };
    Ok(json!({ "fields": firestore_fields(fields) }))
}

fn firestore_fields(fields: &Map<String, Value>) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), firestore_value(v)))
            .collect(),
    )
}

fn firestore_value(v: &Value) -> Value {
    match v {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // int64 values travel as decimal strings
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) if items.is_empty() => json!({ "arrayValue": {} }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(firestore_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": firestore_fields(map) } }),
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use std::sync::Mutex;

    /// Records every append; optionally fails them all.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub writes: Mutex<Vec<(Vec<String>, Value)>>,
        pub fail: bool,
    }

    impl MemoryStore {
        pub(crate) fn failing() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub(crate) fn write_count(&self) -> usize {
            self.writes.lock().expect("store lock").len()
        }
    }

    impl DocumentStore for MemoryStore {
        fn append(
            &self,
            _identity: &SessionIdentity,
            collection_path: &[String],
            record: &Value,
        ) -> Result<DocumentRef, StoreError> {
            if self.fail {
                return Err(StoreError::Rejected {
                    status: 503,
                    body: "unavailable".into(),
                });
            }
            let mut writes = self.writes.lock().expect("store lock");
            writes.push((collection_path.to_vec(), record.clone()));
            Ok(DocumentRef {
                path: format!("{}/{}", collection_path.join("/"), writes.len()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn identity() -> SessionIdentity {
        SessionIdentity::anonymous("uid-1")
    }

    #[test]
    fn collection_paths_need_odd_non_empty_segments() {
        assert!(validate_collection_path(&path(&["a", "b", "c"])).is_ok());
        assert!(validate_collection_path(&path(&["a", "b"])).is_err());
        assert!(validate_collection_path(&path(&[])).is_err());
        assert!(validate_collection_path(&path(&["a", "", "c"])).is_err());
        assert!(validate_collection_path(&path(&["a", "..", "c"])).is_err());
        assert!(validate_collection_path(&path(&["a", "b/c", "d"])).is_err());
    }

    #[test]
    fn local_store_writes_one_file_per_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::new(dir.path());
        let p = path(&["artifacts", "1:app:web", "users", "uid-1", "forms"]);
        let record = json!({ "ciName": "Dana", "timestamp": "2026-01-01T00:00:00.000Z" });

        let doc = store.append(&identity(), &p, &record).expect("append");
        assert!(doc.path.starts_with("artifacts/1:app:web/users/uid-1/forms/"));

        let forms = dir
            .path()
            .join("artifacts")
            .join("1_app_web")
            .join("users")
            .join("uid-1")
            .join("forms");
        let files: Vec<_> = fs::read_dir(&forms)
            .expect("forms dir")
            .flatten()
            .map(|e| e.path())
            .collect();
        assert_eq!(files.len(), 1);
        let saved: Value =
            serde_json::from_slice(&fs::read(&files[0]).expect("read")).expect("json");
        assert_eq!(saved, record);
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tmp = dir.path().join(".rec.json.tmp");
        let dest = dir.path().join("rec.json");
        // a non-empty directory cannot be replaced by a file
        fs::create_dir_all(dest.join("occupied")).expect("mkdir");
        assert!(write_atomically(&tmp, &dest, b"{}").is_err());
        assert!(!tmp.exists());
        assert!(dest.is_dir());
    }

    #[test]
    fn local_store_rejects_non_objects() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::new(dir.path());
        let err = store
            .append(&identity(), &path(&["forms"]), &json!([1, 2]))
            .expect_err("array record");
        assert!(matches!(err, StoreError::NotAnObject));
        assert_eq!(fs::read_dir(dir.path()).expect("root").count(), 0);
    }

    #[test]
    fn firestore_document_uses_typed_values() {
        let record = json!({
            "ciLicense": "Physical Therapist",
            "contactMethod": ["Phone", "Email"],
            "specializations": [],
            "count": 3,
            "ratio": 0.5,
            "flag": true,
            "nothing": null,
            "nested": { "a": "b" },
        });
        let doc = to_firestore_document(&record).expect("document");
        let f = &doc["fields"];
        assert_eq!(f["ciLicense"], json!({ "stringValue": "Physical Therapist" }));
        assert_eq!(
            f["contactMethod"],
            json!({ "arrayValue": { "values": [
                { "stringValue": "Phone" },
                { "stringValue": "Email" }
            ] } })
        );
        assert_eq!(f["specializations"], json!({ "arrayValue": {} }));
        assert_eq!(f["count"], json!({ "integerValue": "3" }));
        assert_eq!(f["ratio"], json!({ "doubleValue": 0.5 }));
        assert_eq!(f["flag"], json!({ "booleanValue": true }));
        assert_eq!(f["nothing"], json!({ "nullValue": null }));
        assert_eq!(
            f["nested"],
            json!({ "mapValue": { "fields": { "a": { "stringValue": "b" } } } })
        );
    }

    #[test]
    fn firestore_url_targets_collection() {
        let store = FirestoreStore::new("my-clinical-forms", Client::new());
        assert_eq!(
            store.collection_url(&path(&["artifacts", "app", "users", "u", "forms"])),
            "https://firestore.googleapis.com/v1/projects/my-clinical-forms/databases/(default)/documents/artifacts/app/users/u/forms"
        );
    }
}
