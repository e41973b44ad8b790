use foundation::math::Vec3;

use crate::frustum::Frustum;

/// Ordered, planar, right-handed polygon in tile-space.
pub type Polygon = Vec<Vec3>;

/// Collect the intersection of the segment `start`..`end` with the
/// horizontal plane at height `z`.
///
/// A segment lying in the plane contributes both endpoints; a crossing
/// segment contributes the interpolated point. A segment parallel to
/// the plane but off it contributes nothing, which also covers the
/// zero-denominator case.
fn append_z_intersects(start: Vec3, end: Vec3, z: f64, out: &mut Vec<Vec3>) {
    if start.z == end.z {
        if start.z == z {
            out.push(start);
            out.push(end);
        }
    } else {
        let f = (start.z - z) / (start.z - end.z);
        if (0.0..=1.0).contains(&f) {
            out.push(start * (1.0 - f) + end * f);
        }
    }
}

/// Intersection of the frustum with the map plane, as a right-handed
/// polygon. Empty when the frustum misses the plane or the intersection
/// degenerates below three distinct vertices.
pub fn frustum_footprint(frustum: &Frustum) -> Polygon {
    let mut points: Polygon = Vec::with_capacity(24);

    append_z_intersects(frustum.top_left_near, frustum.top_left_far, 0.0, &mut points);
    append_z_intersects(frustum.top_right_near, frustum.top_right_far, 0.0, &mut points);
    append_z_intersects(frustum.bottom_left_near, frustum.bottom_left_far, 0.0, &mut points);
    append_z_intersects(frustum.bottom_right_near, frustum.bottom_right_far, 0.0, &mut points);

    append_z_intersects(frustum.top_left_near, frustum.bottom_left_near, 0.0, &mut points);
    append_z_intersects(frustum.bottom_left_near, frustum.bottom_right_near, 0.0, &mut points);
    append_z_intersects(frustum.bottom_right_near, frustum.top_right_near, 0.0, &mut points);
    append_z_intersects(frustum.top_right_near, frustum.top_left_near, 0.0, &mut points);

    append_z_intersects(frustum.top_left_far, frustum.bottom_left_far, 0.0, &mut points);
    append_z_intersects(frustum.bottom_left_far, frustum.bottom_right_far, 0.0, &mut points);
    append_z_intersects(frustum.bottom_right_far, frustum.top_right_far, 0.0, &mut points);
    append_z_intersects(frustum.top_right_far, frustum.top_left_far, 0.0, &mut points);

    if points.is_empty() {
        return points;
    }

    // Initial distance sort from the first point so exact duplicates
    // land next to each other and can be dropped.
    let base = points[0];
    points.sort_by(|a, b| {
        (*a - base)
            .length_squared()
            .total_cmp(&(*b - base).length_squared())
    });
    points.dedup();

    // Nearest-neighbour chaining: grow the ordered prefix by pulling
    // the closest remaining point to the end of it. Point counts here
    // are at most 12, so the quadratic walk is fine.
    for i in 0..points.len() {
        let base = points[i];
        points[i + 1..].sort_by(|a, b| {
            (*a - base)
                .length_squared()
                .total_cmp(&(*b - base).length_squared())
        });
    }

    if points.len() < 3 {
        return Vec::new();
    }

    // Enforce right-handedness (counter-clockwise seen from +z).
    let normal = Vec3::normal(points[1] - points[0], points[2] - points[1]);
    if normal.z < 0.0 {
        points.reverse();
    }

    points
}
