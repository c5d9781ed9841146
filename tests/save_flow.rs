use chrono::{SubsecRound, Utc};
use serde_json::Value;
use site_contact_form::annotation::{self, Pixmap, StrokeRecorder, SurfaceRegistry};
use site_contact_form::backend::{
    BackendError, IdentityProvider, LocalIdentity, LocalStore, PersistenceGateway, Readiness,
};
use site_contact_form::catalog;
use site_contact_form::form::FormState;
use site_contact_form::model::{Point, StrokeStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const WIDTH: u32 = 120;
const HEIGHT: u32 = 48;

fn mounted_surfaces() -> SurfaceRegistry {
    let mut surfaces = SurfaceRegistry::new();
    for q in catalog::questions() {
        let key = catalog::surface_key(q.id);
        surfaces.register(key.clone(), StrokeStyle::default());
        surfaces.dimension(&key, (WIDTH, HEIGHT), StrokeStyle::default());
    }
    surfaces
}

fn all_annotations(surfaces: &SurfaceRegistry) -> BTreeMap<String, String> {
    let keys = catalog::questions().iter().map(|q| catalog::surface_key(q.id)).collect::<Vec<_>>();
    annotation::encode_all(surfaces, keys)
}

fn saved_records(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir).expect("read dir").flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|e| e == "json") {
                found.push(path);
            }
        }
    }
    found
}

#[test]
fn annotated_answer_is_saved_as_one_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let questions = catalog::questions();
    let mut form = FormState::from_questions(&questions);
    let mut surfaces = mounted_surfaces();
    let mut recorder = StrokeRecorder::new();

    form.set("ciLicense", "Physical Therapist");
    form.toggle_in_set("contactMethod", "Phone", true);
    form.toggle_in_set("contactMethod", "Phone", false);

    assert!(recorder.begin(&surfaces, "ciLicenseCanvas", Point::new(10.0, 10.0)));
    recorder.extend(&mut surfaces, "ciLicenseCanvas", Point::new(60.0, 30.0));
    recorder.extend(&mut surfaces, "ciLicenseCanvas", Point::new(100.0, 20.0));
    recorder.end();

    let identity = LocalIdentity.authenticate_anonymously().expect("identity");
    let mut gateway = PersistenceGateway::new("site-contact", Arc::new(LocalStore::new(dir.path())));
    gateway.set_readiness(Readiness::Ready(identity.clone()));

    let started = Utc::now();
    let doc = gateway
        .save(form.snapshot(), all_annotations(&surfaces), Utc::now())
        .expect("save");
    assert_eq!(
        doc.path.rsplit_once('/').map(|(parent, _)| parent.to_string()),
        Some(format!("artifacts/site-contact/users/{}/forms", identity.uid))
    );

    let files = saved_records(dir.path());
    assert_eq!(files.len(), 1);
    let record: Value =
        serde_json::from_slice(&std::fs::read(&files[0]).expect("read")).expect("json");

    assert_eq!(record["ciLicense"], "Physical Therapist");
    assert_eq!(record["contactMethod"], serde_json::json!([]));
    for q in &questions {
        assert!(record.get(q.id).is_some(), "missing field {}", q.id);
        assert!(
            record.get(catalog::surface_key(q.id)).is_some(),
            "missing surface {}",
            q.id
        );
    }

    let blank = annotation::encode::encode_pixmap(&Pixmap::new(WIDTH, HEIGHT));
    assert_ne!(record["ciLicenseCanvas"], blank.as_str());
    assert_eq!(record["ciNameCanvas"], blank.as_str());

    let png = annotation::encode::png_bytes(record["ciLicenseCanvas"].as_str().expect("str"))
        .expect("png");
    let img = image::load_from_memory(&png).expect("decode").to_rgba8();
    assert!(img.pixels().any(|p| p.0[3] != 0));

    let ts = chrono::DateTime::parse_from_rfc3339(record["timestamp"].as_str().expect("ts"))
        .expect("rfc3339")
        .with_timezone(&Utc);
    // stored timestamps carry millisecond resolution
    assert!(ts >= started.trunc_subsecs(3));
}

#[test]
fn save_without_identity_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let form = FormState::from_questions(&catalog::questions());
    let surfaces = mounted_surfaces();
    let gateway = PersistenceGateway::new("site-contact", Arc::new(LocalStore::new(dir.path())));

    let err = gateway
        .save(form.snapshot(), all_annotations(&surfaces), Utc::now())
        .expect_err("not ready");
    assert_eq!(err, BackendError::NotReady);
    assert!(saved_records(dir.path()).is_empty());
}

#[test]
fn each_save_creates_a_new_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let form = FormState::from_questions(&catalog::questions());
    let surfaces = mounted_surfaces();
    let mut gateway = PersistenceGateway::new("site-contact", Arc::new(LocalStore::new(dir.path())));
    gateway.set_readiness(Readiness::Ready(
        LocalIdentity.authenticate_anonymously().expect("identity"),
    ));

    for _ in 0..2 {
        gateway
            .save(form.snapshot(), all_annotations(&surfaces), Utc::now())
            .expect("save");
    }
    assert_eq!(saved_records(dir.path()).len(), 2);
}
