use crate::model::{Point, RectF};

/// Coordinates captured from one input event, in window space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub pointer: Option<Point>,
    /// Active touch points, in the order the platform reports them.
    pub touches: Vec<Point>,
}

impl PointerSample {
    pub fn pointer(p: Point) -> Self {
        Self {
            pointer: Some(p),
            touches: Vec::new(),
        }
    }

    pub fn touch(touches: Vec<Point>) -> Self {
        Self {
            pointer: None,
            touches,
        }
    }

    fn position(&self) -> Option<Point> {
        self.touches.first().copied().or(self.pointer)
    }
}

/// Position of `sample` relative to the top-left corner of `bounds`. The
/// first touch point takes precedence over the pointer position.
pub fn map_to_surface(sample: &PointerSample, bounds: RectF) -> Option<Point> {
    let p = sample.position()?;
    Some(Point::new(p.x - bounds.min.x, p.y - bounds.min.y))
}
