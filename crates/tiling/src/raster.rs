//! Scanline rasterization of a clipped footprint polygon into tiles.

use std::collections::HashSet;

use foundation::math::fuzzy_eq;
use view::footprint::Polygon;

use crate::tile::TileSpec;

/// Row-wise min/max accumulator over a fixed row range.
///
/// Marking any cell of a row widens that row's span; because the input
/// polygon is convex, the touched cells of a row are always one
/// contiguous interval.
struct TileMap {
    min_y: i32,
    spans: Vec<Option<(i32, i32)>>,
}

impl TileMap {
    fn new(min_y: i32, max_y: i32) -> Self {
        Self {
            min_y,
            spans: vec![None; (max_y - min_y + 1) as usize],
        }
    }

    fn add(&mut self, tile_x: i32, tile_y: i32) {
        let index = tile_y - self.min_y;
        if index < 0 || index as usize >= self.spans.len() {
            return;
        }
        let span = &mut self.spans[index as usize];
        *span = match *span {
            None => Some((tile_x, tile_x)),
            Some((min_x, max_x)) => Some((min_x.min(tile_x), max_x.max(tile_x))),
        };
    }
}

/// Ordered `(fraction along the edge, tile index)` pairs for every
/// grid-line crossing between the edge endpoints, starting with the
/// edge's own start tile at fraction 0.
///
/// `p1`/`p2` are the endpoint coordinates on one axis and `t1`/`t2`
/// their tile indices on that axis. A degenerate edge (equal
/// coordinates with distinct tile indices, possible at a fuzzily
/// clamped map edge) contributes no interpolated crossings.
fn tile_crossings(p1: f64, t1: i32, p2: f64, t2: i32) -> Vec<(f64, i32)> {
    let mut results = vec![(0.0, t1)];

    if t1 == t2 || p1 == p2 {
        return results;
    }

    let step: i32 = if t1 > t2 { -1 } else { 1 };
    let count = (t2 - t1) / step;

    if step == 1 {
        for i in 1..=count {
            let f = (f64::from(t1 + i) - p1) / (p2 - p1);
            results.push((f, t1 + i));
        }
    } else {
        for i in 1..=count {
            let f = (f64::from(t1 - i + 1) - p1) / (p2 - p1);
            results.push((f, t1 - i));
        }
    }

    results
}

/// Scan-convert one convex, right-handed, clipped polygon into the set
/// of tiles it touches.
///
/// Vertices sitting fuzzily on the far map edge are clamped into the
/// last tile, and tile indices are reduced modulo the grid size.
pub fn tiles_from_polygon(
    polygon: &Polygon,
    plugin: &str,
    map_id: i32,
    zoom: i32,
) -> HashSet<TileSpec> {
    let num_points = polygon.len();

    if num_points < 3 {
        return HashSet::new();
    }

    let zpow2 = 1_i32 << zoom;
    let side = f64::from(zpow2);

    let mut tiles_x = Vec::with_capacity(num_points);
    let mut tiles_y = Vec::with_capacity(num_points);

    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;

    for p in polygon {
        let p = p.xy();

        let x = if fuzzy_eq(p.x, side) {
            zpow2 - 1
        } else {
            (p.x as i32) % zpow2
        };

        let y = if fuzzy_eq(p.y, side) {
            zpow2 - 1
        } else {
            (p.y as i32) % zpow2
        };

        min_y = min_y.min(y);
        max_y = max_y.max(y);

        tiles_x.push(x);
        tiles_y.push(y);
    }

    let mut map = TileMap::new(min_y, max_y);

    for i1 in 0..num_points {
        let i2 = (i1 + 1) % num_points;

        let x_crossings = tile_crossings(polygon[i1].x, tiles_x[i1], polygon[i2].x, tiles_x[i2]);
        let y_crossings = tile_crossings(polygon[i1].y, tiles_y[i1], polygon[i2].y, tiles_y[i2]);

        let mut x = x_crossings[0].1;
        let mut y = y_crossings[0].1;
        map.add(x, y);

        // Merge-walk both crossing lists in fraction order. A tie means
        // the edge runs exactly through a grid corner; mark all cells
        // around the corner so no row is left with a gap.
        let mut xi = 1;
        let mut yi = 1;
        while xi < x_crossings.len() && yi < y_crossings.len() {
            let (fx, tx) = x_crossings[xi];
            let (fy, ty) = y_crossings[yi];
            if fx < fy {
                x = tx;
                map.add(x, y);
                xi += 1;
            } else if fy < fx {
                y = ty;
                map.add(x, y);
                yi += 1;
            } else {
                map.add(x, ty);
                map.add(tx, y);
                x = tx;
                y = ty;
                map.add(x, y);
                xi += 1;
                yi += 1;
            }
        }

        while xi < x_crossings.len() {
            x = x_crossings[xi].1;
            map.add(x, y);
            xi += 1;
        }

        while yi < y_crossings.len() {
            y = y_crossings[yi].1;
            map.add(x, y);
            yi += 1;
        }
    }

    let mut results = HashSet::new();

    for (i, span) in map.spans.iter().enumerate() {
        let Some((min_x, max_x)) = span else {
            continue;
        };
        let y = map.min_y + i as i32;
        for x in *min_x..=*max_x {
            results.insert(TileSpec::new(plugin, map_id, zoom, x, y));
        }
    }

    results
}
