use crate::math::Vec2;

/// Latitude where the square Web-Mercator projection cuts off (degrees).
pub const MERCATOR_MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Geographic coordinate in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Planar map projection service.
///
/// Maps a geographic coordinate into the unit square: x grows east from
/// the antimeridian, y grows south from the north cutoff, both in
/// `[0, 1]`. Shared read-only between the camera state and whatever
/// else renders the same map.
pub trait Projection {
    fn to_map(&self, coord: Coordinate) -> Vec2;
}

/// Spherical Web-Mercator projection onto the unit square.
#[derive(Debug, Default, Copy, Clone)]
pub struct WebMercator;

impl Projection for WebMercator {
    fn to_map(&self, coord: Coordinate) -> Vec2 {
        let lat = coord
            .latitude
            .clamp(-MERCATOR_MAX_LATITUDE, MERCATOR_MAX_LATITUDE)
            .to_radians();

        let x = coord.longitude / 360.0 + 0.5;
        let y = 0.5
            - (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln()
                / (2.0 * std::f64::consts::PI);

        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, MERCATOR_MAX_LATITUDE, Projection, WebMercator};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn null_island_maps_to_center() {
        let p = WebMercator.to_map(Coordinate::new(0.0, 0.0));
        assert_close(p.x, 0.5, 1e-12);
        assert_close(p.y, 0.5, 1e-12);
    }

    #[test]
    fn antimeridian_maps_to_edges() {
        let west = WebMercator.to_map(Coordinate::new(0.0, -180.0));
        let east = WebMercator.to_map(Coordinate::new(0.0, 180.0));
        assert_close(west.x, 0.0, 1e-12);
        assert_close(east.x, 1.0, 1e-12);
    }

    #[test]
    fn latitude_cutoff_maps_to_top_and_bottom() {
        let north = WebMercator.to_map(Coordinate::new(MERCATOR_MAX_LATITUDE, 0.0));
        let south = WebMercator.to_map(Coordinate::new(-MERCATOR_MAX_LATITUDE, 0.0));
        assert_close(north.y, 0.0, 1e-9);
        assert_close(south.y, 1.0, 1e-9);
    }

    #[test]
    fn out_of_range_latitude_is_clamped() {
        let p = WebMercator.to_map(Coordinate::new(90.0, 0.0));
        assert!(p.y.is_finite());
        assert_close(p.y, 0.0, 1e-9);
    }

    #[test]
    fn northern_hemisphere_is_upper_half() {
        let p = WebMercator.to_map(Coordinate::new(45.0, 0.0));
        assert!(p.y < 0.5);
    }
}
