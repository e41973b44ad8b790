//! Tile identity types shared with the fetch/render side.
//!
//! `TileSpec` is the key a tile-fetch layer requests and caches by, so
//! it carries the provider identity (plugin string + map id) alongside
//! the grid address.

use serde::{Deserialize, Serialize};

/// Rendering style of a map type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapStyle {
    NoMap,
    Street,
    SatelliteDay,
    SatelliteNight,
    Terrain,
    Hybrid,
    Transit,
    GrayStreet,
    Custom,
}

/// Identifies one map type offered by a plugin.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapType {
    pub style: MapStyle,
    pub map_id: i32,
}

impl MapType {
    pub fn new(style: MapStyle, map_id: i32) -> Self {
        Self { style, map_id }
    }
}

impl Default for MapType {
    fn default() -> Self {
        Self::new(MapStyle::NoMap, 0)
    }
}

/// Fully-qualified tile address: provider identity plus ZXY grid cell.
///
/// Value equality and the hash cover all five fields; a set of these
/// deduplicates complete requests, not just grid cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSpec {
    pub plugin: String,
    pub map_id: i32,
    pub zoom: i32,
    pub x: i32,
    pub y: i32,
}

impl TileSpec {
    pub fn new(plugin: impl Into<String>, map_id: i32, zoom: i32, x: i32, y: i32) -> Self {
        Self {
            plugin: plugin.into(),
            map_id,
            zoom,
            x,
            y,
        }
    }
}
