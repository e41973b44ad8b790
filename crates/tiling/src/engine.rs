//! Per-view orchestration: camera/screen state in, visible tile set out.

use std::collections::HashSet;

use tracing::{debug, trace};
use view::camera::{CameraData, Viewport};
use view::clip::clip_footprint_to_map;
use view::footprint::frustum_footprint;
use view::frustum::Frustum;

use crate::raster::tiles_from_polygon;
use crate::tile::{MapType, TileSpec};

/// Deterministic pass counters.
///
/// `geometry_passes` counts full frustum→footprint→clip→raster runs;
/// `metadata_passes` counts plugin/map-id remaps that touched no
/// geometry. Tests use these to prove that metadata updates stay cheap.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PipelineStats {
    pub geometry_passes: u64,
    pub metadata_passes: u64,
}

/// Derives the set of tiles visible to a camera through a screen.
///
/// One instance per map view. Setters that affect geometry rerun the
/// whole pipeline synchronously and replace the tile set atomically;
/// plugin/map-type setters only rewrite the identity fields of the
/// existing set. Every setter is a no-op when handed an equal value.
pub struct CameraTiles {
    plugin: String,
    map_type: MapType,
    camera: CameraData,
    viewport: Viewport,
    tile_size: i32,
    max_zoom: i32,
    tiles: HashSet<TileSpec>,
    stats: PipelineStats,
}

impl CameraTiles {
    pub fn new(camera: CameraData, viewport: Viewport, tile_size: i32, max_zoom: i32) -> Self {
        let mut this = Self {
            plugin: String::new(),
            map_type: MapType::default(),
            camera,
            viewport,
            tile_size,
            max_zoom,
            tiles: HashSet::new(),
            stats: PipelineStats::default(),
        };
        this.update_geometry();
        this
    }

    /// Current visible tile set.
    pub fn tiles(&self) -> &HashSet<TileSpec> {
        &self.tiles
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn camera(&self) -> &CameraData {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: CameraData) {
        if self.camera == camera {
            return;
        }
        self.camera = camera;
        self.update_geometry();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.update_geometry();
    }

    pub fn set_tile_size(&mut self, tile_size: i32) {
        if self.tile_size == tile_size {
            return;
        }
        self.tile_size = tile_size;
        self.update_geometry();
    }

    pub fn set_maximum_zoom_level(&mut self, max_zoom: i32) {
        if self.max_zoom == max_zoom {
            return;
        }
        self.max_zoom = max_zoom;
        self.update_geometry();
    }

    pub fn set_plugin(&mut self, plugin: impl Into<String>) {
        let plugin = plugin.into();
        if self.plugin == plugin {
            return;
        }
        self.plugin = plugin;
        self.update_metadata();
    }

    pub fn set_map_type(&mut self, map_type: MapType) {
        if self.map_type == map_type {
            return;
        }
        self.map_type = map_type;
        self.update_metadata();
    }

    /// Rewrite the identity fields of every tile in place; the grid
    /// addresses are still valid because no geometry input changed.
    fn update_metadata(&mut self) {
        self.stats.metadata_passes += 1;

        let old = std::mem::take(&mut self.tiles);
        self.tiles = old
            .into_iter()
            .map(|t| TileSpec::new(self.plugin.clone(), self.map_type.map_id, t.zoom, t.x, t.y))
            .collect();

        trace!(tiles = self.tiles.len(), "remapped tile identities");
    }

    fn update_geometry(&mut self) {
        self.stats.geometry_passes += 1;

        let Some(frustum) =
            Frustum::from_camera(&self.camera, self.viewport, self.tile_size, self.max_zoom)
        else {
            self.tiles = HashSet::new();
            return;
        };

        let footprint = frustum_footprint(&frustum);

        let side = f64::from(1_i32 << self.camera.zoom_level);
        let (primary, secondary) = clip_footprint_to_map(&footprint, side);

        let mut tiles = tiles_from_polygon(
            &primary,
            &self.plugin,
            self.map_type.map_id,
            self.camera.zoom_level,
        );
        tiles.extend(tiles_from_polygon(
            &secondary,
            &self.plugin,
            self.map_type.map_id,
            self.camera.zoom_level,
        ));

        debug!(tiles = tiles.len(), "recomputed visible tile set");
        self.tiles = tiles;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use foundation::geo::{Coordinate, WebMercator};
    use view::camera::{CameraData, Viewport};

    use super::{CameraTiles, MapType, TileSpec};
    use crate::tile::MapStyle;

    fn camera(zoom: i32) -> CameraData {
        let mut cam = CameraData::new(Arc::new(WebMercator));
        cam.zoom_level = zoom;
        cam.zoom_factor = f64::from(zoom);
        cam
    }

    fn cells(tiles: &HashSet<TileSpec>) -> HashSet<(i32, i32, i32)> {
        tiles.iter().map(|t| (t.zoom, t.x, t.y)).collect()
    }

    #[test]
    fn unit_view_is_exactly_the_root_tile() {
        let engine = CameraTiles::new(camera(0), Viewport::new(256, 256), 256, 8);
        let want: HashSet<_> = [(0, 0, 0)].into_iter().collect();
        assert_eq!(cells(engine.tiles()), want);
    }

    #[test]
    fn recompute_with_restored_inputs_matches() {
        let mut engine = CameraTiles::new(camera(3), Viewport::new(640, 480), 256, 8);
        let before = engine.tiles().clone();

        engine.set_camera(camera(4));
        assert_ne!(engine.tiles(), &before);

        engine.set_camera(camera(3));
        assert_eq!(engine.tiles(), &before);
    }

    #[test]
    fn equal_camera_is_a_no_op() {
        let cam = camera(3);
        let mut engine = CameraTiles::new(cam.clone(), Viewport::new(640, 480), 256, 8);
        let passes = engine.stats().geometry_passes;

        engine.set_camera(cam);
        assert_eq!(engine.stats().geometry_passes, passes);
    }

    #[test]
    fn growing_the_screen_never_drops_tiles() {
        let mut engine = CameraTiles::new(camera(2), Viewport::new(256, 256), 256, 8);
        let small = engine.tiles().clone();

        engine.set_viewport(Viewport::new(512, 256));
        let wide = engine.tiles().clone();
        assert!(small.is_subset(&wide));

        engine.set_viewport(Viewport::new(512, 512));
        assert!(wide.is_subset(engine.tiles()));
    }

    #[test]
    fn antimeridian_view_wraps_into_both_edge_columns() {
        let mut cam = camera(1);
        cam.center = Coordinate::new(0.0, 180.0);
        let engine = CameraTiles::new(cam, Viewport::new(256, 256), 256, 8);

        let got = cells(engine.tiles());
        assert!(got.contains(&(1, 1, 0)), "missing x = side-1: {got:?}");
        assert!(got.contains(&(1, 0, 0)), "missing wrapped x = 0: {got:?}");
        assert!(got.iter().all(|&(_, x, _)| x == 0 || x == 1));
    }

    #[test]
    fn zero_area_screen_yields_no_tiles() {
        let engine = CameraTiles::new(camera(4), Viewport::new(0, 0), 256, 8);
        assert!(engine.tiles().is_empty());

        let mut engine = CameraTiles::new(camera(4), Viewport::new(640, 480), 256, 8);
        assert!(!engine.tiles().is_empty());
        engine.set_viewport(Viewport::new(640, 0));
        assert!(engine.tiles().is_empty());
    }

    #[test]
    fn metadata_remap_rewrites_identity_only() {
        let mut engine = CameraTiles::new(camera(3), Viewport::new(640, 480), 256, 8);
        let before = engine.tiles().clone();
        let geometry_passes = engine.stats().geometry_passes;

        engine.set_plugin("osm");
        engine.set_map_type(MapType::new(MapStyle::Street, 7));

        assert_eq!(engine.tiles().len(), before.len());
        assert_eq!(cells(engine.tiles()), cells(&before));
        assert!(
            engine
                .tiles()
                .iter()
                .all(|t| t.plugin == "osm" && t.map_id == 7)
        );

        // No geometry work happened.
        assert_eq!(engine.stats().geometry_passes, geometry_passes);
        assert_eq!(engine.stats().metadata_passes, 2);
    }

    #[test]
    fn equal_metadata_is_a_no_op() {
        let mut engine = CameraTiles::new(camera(2), Viewport::new(256, 256), 256, 8);
        engine.set_plugin("osm");
        let stats = engine.stats();

        engine.set_plugin("osm");
        engine.set_map_type(MapType::default());
        assert_eq!(engine.stats(), stats);
    }

    #[test]
    fn new_tiles_carry_the_current_identity() {
        let mut engine = CameraTiles::new(camera(2), Viewport::new(256, 256), 256, 8);
        engine.set_plugin("osm");
        engine.set_map_type(MapType::new(MapStyle::Terrain, 3));

        engine.set_camera(camera(3));
        assert!(!engine.tiles().is_empty());
        assert!(
            engine
                .tiles()
                .iter()
                .all(|t| t.plugin == "osm" && t.map_id == 3 && t.zoom == 3)
        );
    }

    #[test]
    fn tile_addresses_stay_in_grid() {
        for zoom in 0..6 {
            let mut cam = camera(zoom);
            cam.center = Coordinate::new(66.0, -179.0);
            let engine = CameraTiles::new(cam, Viewport::new(800, 600), 256, 8);
            let side = 1 << zoom;
            for t in engine.tiles() {
                assert!((0..side).contains(&t.x), "x out of grid: {t:?}");
                assert!((0..side).contains(&t.y), "y out of grid: {t:?}");
            }
        }
    }
}
