use super::raster::Pixmap;
use crate::model::{Point, StrokeStyle};
use std::collections::BTreeMap;

pub type SurfaceKey = String;

/// One annotation canvas. `revision` changes whenever the pixels do.
#[derive(Clone, Debug)]
pub struct Surface {
    key: SurfaceKey,
    style: StrokeStyle,
    pixmap: Pixmap,
    revision: u64,
}

impl Surface {
    fn new(key: SurfaceKey, style: StrokeStyle) -> Self {
        Self {
            key,
            style,
            pixmap: Pixmap::new(0, 0),
            revision: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn size(&self) -> (u32, u32) {
        self.pixmap.size()
    }

    pub fn is_dimensioned(&self) -> bool {
        !self.pixmap.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(super) fn stroke(&mut self, start: Point, end: Point) {
        if self.pixmap.stroke_segment(start, end, self.style) > 0 {
            self.revision += 1;
        }
    }

    fn clear(&mut self) {
        self.pixmap.clear();
        self.revision += 1;
    }
}

/// Owns every annotation surface, keyed by surface key.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: BTreeMap<SurfaceKey, Surface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an undimensioned surface. Registering a live key keeps the
    /// existing surface and its drawing.
    pub fn register(&mut self, key: impl Into<SurfaceKey>, style: StrokeStyle) {
        let key = key.into();
        self.surfaces
            .entry(key.clone())
            .or_insert_with(|| Surface::new(key, style));
    }

    pub fn unregister(&mut self, key: &str) -> Option<Surface> {
        self.surfaces.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.surfaces.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Surface> {
        self.surfaces.get(key)
    }

    pub(super) fn get_mut(&mut self, key: &str) -> Option<&mut Surface> {
        self.surfaces.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Matches the backing buffer to `size` and applies `style`. Calling it
    /// again with the same size keeps the drawing; a new size reallocates a
    /// blank buffer. Returns `false` for unknown keys.
    pub fn dimension(&mut self, key: &str, size: (u32, u32), style: StrokeStyle) -> bool {
        let Some(surface) = self.surfaces.get_mut(key) else {
            return false;
        };
        if surface.pixmap.size() != size {
            tracing::debug!(
                surface = key,
                width = size.0,
                height = size.1,
                "resizing annotation surface"
            );
            surface.pixmap = Pixmap::new(size.0, size.1);
            surface.revision += 1;
        }
        surface.style = style;
        true
    }

    /// Applies a new pen style to every surface without touching pixels.
    pub fn restyle_all(&mut self, style: StrokeStyle) {
        for surface in self.surfaces.values_mut() {
            surface.style = style;
        }
    }

    pub fn clear(&mut self, key: &str) -> bool {
        match self.surfaces.get_mut(key) {
            Some(surface) => {
                surface.clear();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.values()
    }

    pub fn for_each(&self, mut visit: impl FnMut(&Surface)) {
        for surface in self.surfaces.values() {
            visit(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rgba;

    fn red() -> StrokeStyle {
        StrokeStyle {
            color: Rgba {
                r: 255,
                g: 0,
                b: 0,
                a: 255,
            },
            width: 4.0,
        }
    }

    fn drawn_registry() -> SurfaceRegistry {
        let mut reg = SurfaceRegistry::new();
        reg.register("aCanvas", StrokeStyle::default());
        reg.dimension("aCanvas", (40, 20), StrokeStyle::default());
        reg.get_mut("aCanvas")
            .expect("registered")
            .stroke(Point::new(2.0, 2.0), Point::new(30.0, 10.0));
        reg
    }

    #[test]
    fn register_is_idempotent_and_keeps_drawing() {
        let mut reg = drawn_registry();
        let before = reg.get("aCanvas").map(|s| s.pixmap().clone());
        reg.register("aCanvas", red());
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("aCanvas").map(|s| s.pixmap().clone()), before);
    }

    #[test]
    fn redimension_with_same_size_keeps_content() {
        let mut reg = drawn_registry();
        assert!(reg.dimension("aCanvas", (40, 20), red()));
        let s = reg.get("aCanvas").expect("surface");
        assert!(!s.pixmap().is_blank());
        assert_eq!(s.style(), red());
    }

    #[test]
    fn resize_reallocates_blank_buffer() {
        let mut reg = drawn_registry();
        assert!(reg.dimension("aCanvas", (50, 20), StrokeStyle::default()));
        let s = reg.get("aCanvas").expect("surface");
        assert_eq!(s.size(), (50, 20));
        assert!(s.pixmap().is_blank());
    }

    #[test]
    fn restyle_all_changes_style_only() {
        let mut reg = drawn_registry();
        reg.register("bCanvas", StrokeStyle::default());
        let rev = reg.get("aCanvas").map(Surface::revision);
        reg.restyle_all(red());
        assert!(reg.iter().all(|s| s.style() == red()));
        assert_eq!(reg.get("aCanvas").map(Surface::revision), rev);
        assert!(!reg.get("aCanvas").expect("surface").pixmap().is_blank());
    }

    #[test]
    fn unknown_keys_are_reported() {
        let mut reg = SurfaceRegistry::new();
        assert!(!reg.dimension("nope", (1, 1), StrokeStyle::default()));
        assert!(!reg.clear("nope"));
        assert!(reg.unregister("nope").is_none());
    }

    #[test]
    fn iteration_is_ordered_by_key() {
        let mut reg = SurfaceRegistry::new();
        for key in ["zCanvas", "aCanvas", "mCanvas"] {
            reg.register(key, StrokeStyle::default());
        }
        let mut keys = Vec::new();
        reg.for_each(|s| keys.push(s.key().to_string()));
        assert_eq!(keys, ["aCanvas", "mCanvas", "zCanvas"]);
    }
}
