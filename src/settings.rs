use crate::model::{Rgba, StrokeStyle};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendSettings {
    /// JSON files under `root`, one per saved record.
    Local { root: String, app_id: String },
    /// Firebase anonymous auth + Firestore over REST.
    Firebase {
        api_key: String,
        project_id: String,
        app_id: String,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub backend: Option<BackendSettings>,
    pub pen_color: String,
    pub stroke_width: f32,
    pub canvas_height: f32,
    pub debug_logging: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend: None,
            pen_color: "#000000".to_string(),
            stroke_width: 4.0,
            canvas_height: 96.0,
            debug_logging: false,
        }
    }
}

impl AppSettings {
    /// Pen style from the configured color, falling back to black.
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: Rgba::from_hex(&self.pen_color).unwrap_or(Rgba::BLACK),
            width: self.stroke_width.max(1.0),
        }
    }
}

pub fn config_path() -> Option<String> {
    if let Some(home) = std::env::var_os("HOME") {
        let path = std::path::PathBuf::from(home)
            .join(".config")
            .join("site_contact_form.toml");
        if path.exists() {
            return Some(path.display().to_string());
        }
    }
    if std::path::Path::new("settings.toml").exists() {
        return Some("settings.toml".to_string());
    }
    None
}

pub fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    parse_settings(path, &s)
}

fn parse_settings(path: &str, s: &str) -> Option<AppSettings> {
    if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(s).ok())
    } else {
        serde_json::from_str::<AppSettings>(s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(s).ok())
    }
}

/// Settings from the first config file found, or defaults.
pub fn load() -> AppSettings {
    config_path()
        .and_then(|p| load_settings(&p))
        .or_else(|| load_settings("settings.json"))
        .unwrap_or_default()
}
