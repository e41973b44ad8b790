use foundation::math::Vec3;

use crate::camera::{CameraData, Viewport};

/// View frustum as eight corners in tile-space (one unit = one tile
/// width at the current zoom level).
///
/// The footprint step intersects frustum *edges* with the map plane, so
/// corners are the useful representation here rather than bounding
/// planes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    pub top_left_near: Vec3,
    pub top_left_far: Vec3,
    pub top_right_near: Vec3,
    pub top_right_far: Vec3,
    pub bottom_left_near: Vec3,
    pub bottom_left_far: Vec3,
    pub bottom_right_near: Vec3,
    pub bottom_right_far: Vec3,
}

impl Frustum {
    /// Build the frustum for a camera looking at the map through the
    /// given viewport.
    ///
    /// The camera always looks straight down the z axis; bearing, tilt
    /// and roll do not move the frustum. Consumers depend on the tile
    /// footprint this produces, so that stays as-is.
    ///
    /// Returns `None` for a zero-area viewport.
    pub fn from_camera(
        camera: &CameraData,
        viewport: Viewport,
        tile_size: i32,
        max_zoom: i32,
    ) -> Option<Self> {
        if viewport.is_empty() || tile_size <= 0 {
            return None;
        }

        let zpow2 = f64::from(1_i32 << camera.zoom_level);

        let m = camera.projection.to_map(camera.center);
        let center = Vec3::new(m.x * zpow2, m.y * zpow2, 0.0);

        let f = f64::from(viewport.width.min(viewport.height)) / f64::from(tile_size);
        let z = 2.0_f64.powf(camera.zoom_factor - f64::from(camera.zoom_level));

        let altitude = f / (2.0 * z);
        let eye = Vec3::new(center.x, center.y, altitude);

        let view = eye - center;
        let side = Vec3::normal(view, Vec3::new(0.0, 1.0, 0.0));
        let up = Vec3::normal(side, view);

        let near_plane = zpow2 / (f64::from(tile_size) * f64::from(1_i32 << max_zoom));
        let far_plane = 3.0;

        let aspect_ratio = f64::from(viewport.width) / f64::from(viewport.height);

        // Field of view is fixed at 45 degrees and locked to the
        // shorter screen dimension: the view rectangle at the near
        // plane is 2*nearPlane across that dimension.
        let (wn, hn, wf, hf) = if aspect_ratio > 1.0 {
            let hn = 2.0 * near_plane;
            let hf = 2.0 * far_plane;
            (hn * aspect_ratio, hn, hf * aspect_ratio, hf)
        } else {
            let wn = 2.0 * near_plane;
            let wf = 2.0 * far_plane;
            (wn, wn / aspect_ratio, wf, wf / aspect_ratio)
        };

        let d = (center - eye).normalized();
        let right = Vec3::normal(d, up);

        let cf = eye + d * far_plane;
        let cn = eye + d * near_plane;

        Some(Self {
            top_left_far: cf + (up * (hf / 2.0)) - (right * (wf / 2.0)),
            top_right_far: cf + (up * (hf / 2.0)) + (right * (wf / 2.0)),
            bottom_left_far: cf - (up * (hf / 2.0)) - (right * (wf / 2.0)),
            bottom_right_far: cf - (up * (hf / 2.0)) + (right * (wf / 2.0)),
            top_left_near: cn + (up * (hn / 2.0)) - (right * (wn / 2.0)),
            top_right_near: cn + (up * (hn / 2.0)) + (right * (wn / 2.0)),
            bottom_left_near: cn - (up * (hn / 2.0)) - (right * (wn / 2.0)),
            bottom_right_near: cn - (up * (hn / 2.0)) + (right * (wn / 2.0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use foundation::geo::WebMercator;

    use super::{CameraData, Frustum, Viewport};

    fn camera() -> CameraData {
        CameraData::new(Arc::new(WebMercator))
    }

    #[test]
    fn empty_viewport_yields_no_frustum() {
        let cam = camera();
        assert!(Frustum::from_camera(&cam, Viewport::new(0, 256), 256, 8).is_none());
        assert!(Frustum::from_camera(&cam, Viewport::new(256, 0), 256, 8).is_none());
    }

    #[test]
    fn square_view_at_zoom_zero_straddles_the_plane() {
        let cam = camera();
        let f = Frustum::from_camera(&cam, Viewport::new(256, 256), 256, 8).expect("frustum");

        // Eye altitude is 0.5 tile units; the near plane sits above the
        // map and the far plane well below it.
        assert!(f.top_left_near.z > 0.0);
        assert!(f.top_left_far.z < 0.0);

        // Near corners form a square centred on the projected centre.
        let half = (f.top_right_near.x - f.top_left_near.x) / 2.0;
        assert!(half > 0.0);
        assert!(((f.top_right_near.x + f.top_left_near.x) / 2.0 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn wide_viewport_widens_the_frustum() {
        let cam = camera();
        let square = Frustum::from_camera(&cam, Viewport::new(256, 256), 256, 8).expect("frustum");
        let wide = Frustum::from_camera(&cam, Viewport::new(512, 256), 256, 8).expect("frustum");

        let w_square = square.top_right_far.x - square.top_left_far.x;
        let w_wide = wide.top_right_far.x - wide.top_left_far.x;
        assert!(w_wide > w_square);

        // Height is locked to the shorter dimension and unchanged.
        let h_square = square.top_left_far.y - square.bottom_left_far.y;
        let h_wide = wide.top_left_far.y - wide.bottom_left_far.y;
        assert!((h_square - h_wide).abs() < 1e-12);
    }
}
