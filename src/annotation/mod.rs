//! Freehand annotation capture: one raster surface per form field, gesture
//! tracking, and PNG data-URL serialization for the saved record.

pub mod encode;
pub mod mapper;
pub mod raster;
pub mod recorder;
pub mod registry;

pub use encode::{encode, encode_all};
pub use mapper::{PointerSample, map_to_surface};
pub use raster::Pixmap;
pub use recorder::{GestureState, StrokeRecorder};
pub use registry::{Surface, SurfaceKey, SurfaceRegistry};
