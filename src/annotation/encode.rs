use super::raster::Pixmap;
use super::registry::{Surface, SurfaceRegistry};
use base64::{Engine as _, engine::general_purpose};
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use std::collections::BTreeMap;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";
/// What a browser canvas with no pixels serializes to.
const EMPTY_DATA_URL: &str = "data:,";

pub fn encode_pixmap(pixmap: &Pixmap) -> String {
    if pixmap.is_empty() {
        return EMPTY_DATA_URL.to_string();
    }
    let mut png = Vec::new();
    let encoded = PngEncoder::new(&mut png).write_image(
        pixmap.pixels(),
        pixmap.width(),
        pixmap.height(),
        image::ExtendedColorType::Rgba8,
    );
    if let Err(e) = encoded {
        tracing::error!(error = %e, "png encoding failed");
        return EMPTY_DATA_URL.to_string();
    }
    format!("{PNG_DATA_URL_PREFIX}{}", general_purpose::STANDARD.encode(png))
}

/// Self-contained PNG data URL of the surface exactly as currently drawn.
pub fn encode(surface: &Surface) -> String {
    encode_pixmap(surface.pixmap())
}

/// Encodes the surface behind each key. Keys without a surface are skipped
/// so one missing canvas never blocks the rest of the record.
pub fn encode_all<K: AsRef<str>>(
    registry: &SurfaceRegistry,
    keys: impl IntoIterator<Item = K>,
) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for key in keys {
        let key = key.as_ref();
        match registry.get(key) {
            Some(surface) => {
                out.insert(key.to_string(), encode(surface));
            }
            None => tracing::warn!(key, "no surface registered; annotation skipped"),
        }
    }
    out
}

/// Decodes a data URL produced by [`encode_pixmap`] back into PNG bytes.
pub fn png_bytes(data_url: &str) -> Option<Vec<u8>> {
    let payload = data_url.strip_prefix(PNG_DATA_URL_PREFIX)?;
    general_purpose::STANDARD.decode(payload).ok()
}
