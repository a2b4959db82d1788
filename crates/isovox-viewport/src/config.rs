use std::error::Error;

use isovox_geom::ViewOrientation;
use serde::Deserialize;

use crate::mouse::MouseMode;

/// `[viewport]` section.
#[derive(Clone, Debug, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_tile_width")]
    pub tile_width: u16,
    /// Tile widths the wheel steps through; empty means every width the
    /// sprites were built for.
    #[serde(default)]
    pub zoom_levels: Vec<u16>,
    #[serde(default = "default_orientation")]
    pub orientation: String,
    /// Height of the view center, in voxel levels.
    #[serde(default = "default_z")]
    pub z: i32,
    #[serde(default = "default_mouse_mode")]
    pub mouse_mode: String,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            tile_width: default_tile_width(),
            zoom_levels: Vec::new(),
            orientation: default_orientation(),
            z: default_z(),
            mouse_mode: default_mouse_mode(),
        }
    }
}

fn default_tile_width() -> u16 {
    64
}
fn default_orientation() -> String {
    "north".into()
}
fn default_z() -> i32 {
    8
}
fn default_mouse_mode() -> String {
    "inactive".into()
}

/// Validated viewport settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewportParams {
    pub tile_width: u16,
    /// Sorted, without duplicates; contains `tile_width`.
    pub zoom_levels: Vec<u16>,
    pub orientation: ViewOrientation,
    pub z: i32,
    pub mouse_mode: MouseMode,
    /// Fill color behind the world, `0xAARRGGBB`.
    pub background: u32,
}

impl Default for ViewportParams {
    fn default() -> Self {
        Self {
            tile_width: 64,
            zoom_levels: vec![64],
            orientation: ViewOrientation::North,
            z: 8,
            mouse_mode: MouseMode::Inactive,
            background: 0xFF00_0000,
        }
    }
}

impl ViewportParams {
    /// `available` lists the tile widths sprites exist for.
    pub fn from_config(
        cfg: &ViewportConfig,
        available: &[u16],
        background: u32,
    ) -> Result<Self, Box<dyn Error>> {
        let orientation = ViewOrientation::from_name(&cfg.orientation)
            .ok_or_else(|| format!("unknown view orientation '{}'", cfg.orientation))?;
        let mouse_mode = MouseMode::from_name(&cfg.mouse_mode)
            .ok_or_else(|| format!("unknown mouse mode '{}'", cfg.mouse_mode))?;
        let mut zoom_levels = if cfg.zoom_levels.is_empty() {
            available.to_vec()
        } else {
            cfg.zoom_levels.clone()
        };
        zoom_levels.sort_unstable();
        zoom_levels.dedup();
        if let Some(missing) = zoom_levels.iter().find(|w| !available.contains(*w)) {
            return Err(format!("zoom level {missing} has no sprites").into());
        }
        if !zoom_levels.contains(&cfg.tile_width) {
            return Err(format!(
                "tile width {} is not one of the zoom levels {:?}",
                cfg.tile_width, zoom_levels
            )
            .into());
        }
        Ok(Self {
            tile_width: cfg.tile_width,
            zoom_levels,
            orientation,
            z: cfg.z,
            mouse_mode,
            background,
        })
    }
}
