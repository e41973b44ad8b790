use std::sync::Arc;

use foundation::geo::{Coordinate, Projection};

/// Screen size in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Shared handle to the projection service used by a map view.
pub type ProjectionRef = Arc<dyn Projection + Send + Sync>;

/// Complete camera description for one map view.
///
/// Replaced wholesale on every change; the engine compares old and new
/// values to skip no-op updates. Two states count as equal when every
/// field matches and both point at the same projection service.
#[derive(Clone)]
pub struct CameraData {
    pub center: Coordinate,
    pub bearing: f64,
    pub tilt: f64,
    pub roll: f64,
    pub distance: f64,
    pub zoom_level: i32,
    pub zoom_factor: f64,
    pub aspect_ratio: f64,
    pub projection: ProjectionRef,
}

impl CameraData {
    pub fn new(projection: ProjectionRef) -> Self {
        Self {
            center: Coordinate::new(0.0, 0.0),
            bearing: 0.0,
            tilt: 0.0,
            roll: 0.0,
            distance: 0.0,
            zoom_level: 0,
            zoom_factor: 0.0,
            aspect_ratio: 1.0,
            projection,
        }
    }
}

impl PartialEq for CameraData {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center
            && self.bearing == other.bearing
            && self.tilt == other.tilt
            && self.roll == other.roll
            && self.distance == other.distance
            && self.zoom_level == other.zoom_level
            && self.zoom_factor == other.zoom_factor
            && self.aspect_ratio == other.aspect_ratio
            && Arc::ptr_eq(&self.projection, &other.projection)
    }
}

impl std::fmt::Debug for CameraData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraData")
            .field("center", &self.center)
            .field("bearing", &self.bearing)
            .field("tilt", &self.tilt)
            .field("roll", &self.roll)
            .field("distance", &self.distance)
            .field("zoom_level", &self.zoom_level)
            .field("zoom_factor", &self.zoom_factor)
            .field("aspect_ratio", &self.aspect_ratio)
            .finish_non_exhaustive()
    }
}
