use crate::annotation::{self, StrokeRecorder, SurfaceRegistry};
use crate::backend::{self, BackendError, DocumentRef, PersistenceGateway, Readiness};
use crate::catalog::{self, Question};
use crate::form::FormState;
use crate::model::{Rgba, StrokeStyle};
use crate::settings::AppSettings;
use eframe::egui;
use std::collections::HashMap;
use std::sync::mpsc;

mod render;
mod update;

const SAVING: &str = "Saving form data...";
const SAVED: &str = "Form successfully saved! ✅";
const AUTHENTICATING: &str = "Authenticating...";

type SaveResult = Result<DocumentRef, BackendError>;

pub struct FormApp {
    questions: Vec<Question>,
    form: FormState,
    surfaces: SurfaceRegistry,
    recorder: StrokeRecorder,
    /// Uploaded canvas textures and the surface revision they show.
    textures: HashMap<String, (egui::TextureHandle, u64)>,
    pen: StrokeStyle,
    canvas_height: f32,
    gateway: PersistenceGateway,
    bootstrap: Option<mpsc::Receiver<Readiness>>,
    pending_save: Option<mpsc::Receiver<SaveResult>>,
    status: Option<String>,
}

impl FormApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        Self::from_settings(settings)
    }

    fn from_settings(settings: AppSettings) -> Self {
        let questions = catalog::questions();
        let form = FormState::from_questions(&questions);
        let pen = settings.stroke_style();

        let mut surfaces = SurfaceRegistry::new();
        for q in &questions {
            surfaces.register(catalog::surface_key(q.id), pen);
        }

        let (gateway, provider) = backend::connect(settings.backend.as_ref());
        let mut status = None;
        let bootstrap = match provider {
            Some(provider) => Some(backend::spawn_bootstrap(provider)),
            None => {
                status = Some(BackendError::ConfigMissing.status_message().to_string());
                None
            }
        };

        Self {
            questions,
            form,
            surfaces,
            recorder: StrokeRecorder::new(),
            textures: HashMap::new(),
            pen,
            canvas_height: settings.canvas_height.max(16.0),
            gateway,
            bootstrap,
            pending_save: None,
            status,
        }
    }

    fn set_pen_color(&mut self, color: Rgba) {
        if self.pen.color == color {
            return;
        }
        self.pen.color = color;
        self.surfaces.restyle_all(self.pen);
    }

    fn user_id_label(&self) -> String {
        match self.gateway.readiness() {
            Readiness::Ready(identity) => identity.uid.clone(),
            // the failure itself is on the status line
            Readiness::Uninitialized | Readiness::Failed(_) => AUTHENTICATING.to_string(),
        }
    }

    fn is_busy(&self) -> bool {
        self.bootstrap.is_some() || self.pending_save.is_some()
    }

    /// Picks up results from the bootstrap and save workers.
    fn poll_workers(&mut self) {
        if let Some(rx) = &self.bootstrap {
            match rx.try_recv() {
                Ok(readiness) => {
                    if let Readiness::Failed(e) = &readiness {
                        self.status = Some(e.status_message().to_string());
                    }
                    self.gateway.set_readiness(readiness);
                    self.bootstrap = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    let e = BackendError::AuthFailed("identity worker exited".into());
                    self.status = Some(e.status_message().to_string());
                    self.gateway.set_readiness(Readiness::Failed(e));
                    self.bootstrap = None;
                }
            }
        }

        if let Some(rx) = &self.pending_save {
            let outcome = match rx.try_recv() {
                Ok(result) => Some(result),
                Err(mpsc::TryRecvError::Empty) => None,
                Err(mpsc::TryRecvError::Disconnected) => Some(Err(BackendError::SaveFailed(
                    "save worker exited".into(),
                ))),
            };
            if let Some(result) = outcome {
                self.status = Some(match result {
                    Ok(_) => SAVED.to_string(),
                    Err(e) => e.status_message().to_string(),
                });
                self.pending_save = None;
            }
        }
    }

    /// Snapshots answers and drawings on the UI thread and writes them from a
    /// worker. Ignored while a previous save is still in flight.
    fn save(&mut self) {
        if self.pending_save.is_some() {
            return;
        }
        if !self.gateway.readiness().is_ready() {
            self.status = Some(BackendError::NotReady.status_message().to_string());
            return;
        }

        let fields = self.form.snapshot();
        let keys = self.questions.iter().map(|q| catalog::surface_key(q.id));
        let annotations = annotation::encode_all(&self.surfaces, keys);
        let gateway = self.gateway.clone();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = gateway.save(fields, annotations, chrono::Utc::now());
            let _ = tx.send(result);
        });
        self.status = Some(SAVING.to_string());
        self.pending_save = Some(rx);
    }
}
