use super::registry::{SurfaceKey, SurfaceRegistry};
use crate::model::Point;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureState {
    Idle,
    Active { last: Point },
}

/// Tracks freehand gestures per surface and renders each new segment into
/// the surface buffer as it arrives. Surfaces are looked up by key in the
/// registry passed to each call; the recorder never owns them.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    active: HashMap<SurfaceKey, Point>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: &str) -> GestureState {
        match self.active.get(key) {
            Some(&last) => GestureState::Active { last },
            None => GestureState::Idle,
        }
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active.contains_key(key)
    }

    pub fn is_drawing(&self) -> bool {
        !self.active.is_empty()
    }

    /// Starts a new path on `key` anchored at `point`. Nothing is drawn until
    /// the first `extend`. Returns `false` when the surface is missing or has
    /// no pixels yet.
    pub fn begin(&mut self, registry: &SurfaceRegistry, key: &str, point: Point) -> bool {
        let ready = registry.get(key).is_some_and(|s| s.is_dimensioned());
        if !ready {
            tracing::debug!(surface = key, "ignoring stroke start on undimensioned surface");
            return false;
        }
        self.active.insert(key.to_string(), point);
        true
    }

    /// Draws from the last point of the active path to `point`. No-op unless
    /// `key` has an active gesture.
    pub fn extend(&mut self, registry: &mut SurfaceRegistry, key: &str, point: Point) {
        let Some(last) = self.active.get_mut(key) else {
            return;
        };
        match registry.get_mut(key) {
            Some(surface) => {
                surface.stroke(*last, point);
                *last = point;
            }
            None => {
                self.active.remove(key);
            }
        }
    }

    pub fn end_surface(&mut self, key: &str) {
        self.active.remove(key);
    }

    /// Closes every open path.
    pub fn end(&mut self) {
        self.active.clear();
    }
}
