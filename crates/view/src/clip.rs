use foundation::math::{Vec3, fuzzy_eq_near_zero};

use crate::footprint::Polygon;

/// Splitting axis for [`split_at_axis_value`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn get(self, p: Vec3) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

/// Split a closed polygon along `axis == value` into the part below the
/// line and the part above it.
///
/// Vertices fuzzily on the line go to whichever side(s) keep the output
/// polygons closed; edges crossing the line get an interpolated vertex
/// inserted into both halves.
pub fn split_at_axis_value(polygon: &Polygon, axis: Axis, value: f64) -> (Polygon, Polygon) {
    let size = polygon.len();

    let mut below: Polygon = Vec::new();
    let mut above: Polygon = Vec::new();

    if size == 0 {
        return (below, above);
    }

    // -1 below, 0 on the line, 1 above.
    let comparisons: Vec<i32> = polygon
        .iter()
        .map(|p| {
            let v = axis.get(*p);
            if fuzzy_eq_near_zero(v, value) {
                0
            } else if v < value {
                -1
            } else {
                1
            }
        })
        .collect();

    for index in 0..size {
        let prev_index = (index + size - 1) % size;
        let next_index = (index + 1) % size;

        let prev_comp = comparisons[prev_index];
        let comp = comparisons[index];
        let next_comp = comparisons[next_index];

        if comp == 0 {
            match prev_comp {
                -1 => {
                    below.push(polygon[index]);
                    if next_comp == 1 {
                        above.push(polygon[index]);
                    }
                }
                1 => {
                    above.push(polygon[index]);
                    if next_comp == -1 {
                        below.push(polygon[index]);
                    }
                }
                _ => {
                    // Run of on-line vertices: only the one where the
                    // polygon leaves the line gets emitted.
                    if next_comp == -1 {
                        below.push(polygon[index]);
                    } else if next_comp == 1 {
                        above.push(polygon[index]);
                    }
                }
            }
        } else {
            if comp == -1 {
                below.push(polygon[index]);
            } else {
                above.push(polygon[index]);
            }

            // The edge to the next vertex crosses the line; the crossing
            // point belongs to both output polygons.
            if next_comp != 0 && next_comp != comp {
                let p1 = polygon[index];
                let p2 = polygon[next_index];

                let p1v = axis.get(p1);
                let p2v = axis.get(p2);

                let f = (p1v - value) / (p1v - p2v);

                if (0.0..=1.0).contains(&f)
                    || fuzzy_eq_near_zero(f, 0.0)
                    || fuzzy_eq_near_zero(f, 1.0)
                {
                    let mid = p1 * (1.0 - f) + p2 * f;
                    below.push(mid);
                    above.push(mid);
                }
            }
        }
    }

    (below, above)
}

/// Clip a footprint polygon to the map square `[0, side]²`.
///
/// Returns `(primary, secondary)`. The secondary polygon is non-empty
/// only when the footprint wraps across the antimeridian, in which case
/// the out-of-range band is shifted by ±`side` back onto the map. A
/// footprint spilling over both x edges at once is treated as spanning
/// the full map width.
pub fn clip_footprint_to_map(footprint: &Polygon, side: f64) -> (Polygon, Polygon) {
    let mut clip_x0 = false;
    let mut clip_x1 = false;
    let mut clip_y0 = false;
    let mut clip_y1 = false;

    for p in footprint {
        if p.x < 0.0 {
            clip_x0 = true;
        }
        if side < p.x {
            clip_x1 = true;
        }
        if p.y < 0.0 {
            clip_y0 = true;
        }
        if side < p.y {
            clip_y1 = true;
        }
    }

    let mut results = footprint.clone();

    if clip_y0 {
        results = split_at_axis_value(&results, Axis::Y, 0.0).1;
    }

    if clip_y1 {
        results = split_at_axis_value(&results, Axis::Y, side).0;
    }

    if clip_x0 {
        if clip_x1 {
            results = split_at_axis_value(&results, Axis::X, 0.0).1;
            results = split_at_axis_value(&results, Axis::X, side).0;
            (results, Vec::new())
        } else {
            let (mut below, above) = split_at_axis_value(&results, Axis::X, 0.0);
            for p in &mut below {
                p.x += side;
            }
            (below, above)
        }
    } else if clip_x1 {
        let (below, mut above) = split_at_axis_value(&results, Axis::X, side);
        for p in &mut above {
            p.x -= side;
        }
        (below, above)
    } else {
        (results, Vec::new())
    }
}
