use std::error::Error;

use hashbrown::HashMap;
use isovox_geom::ViewOrientation;
use isovox_world::{GroundType, Slope};

use crate::config::SpritesConfig;
use crate::palette::{CURSOR_INDEX, Palette};
use crate::raster;
use crate::sprite::{Sprite, SpriteProvider};

const MIN_TILE_WIDTH: u16 = 8;
const MAX_TILE_WIDTH: u16 = 256;

/// Every surface and cursor image for the configured zoom levels, built once.
///
/// Images are keyed by the slope as seen on screen, so each one serves all
/// four view orientations.
#[derive(Clone, Debug)]
pub struct SpriteStore {
    palette: Palette,
    tile_widths: Vec<u16>,
    surfaces: HashMap<(GroundType, Slope, u16), Sprite>,
    cursors: HashMap<(Slope, u16), Sprite>,
}

impl SpriteStore {
    pub fn new(cfg: &SpritesConfig) -> Result<Self, Box<dyn Error>> {
        if cfg.tile_widths.is_empty() {
            return Err("no tile widths configured".into());
        }
        let mut tile_widths = cfg.tile_widths.clone();
        tile_widths.sort_unstable();
        tile_widths.dedup();
        for &w in &tile_widths {
            if w % 4 != 0 || !(MIN_TILE_WIDTH..=MAX_TILE_WIDTH).contains(&w) {
                return Err(format!(
                    "tile width {w} must be a multiple of 4 in {MIN_TILE_WIDTH}..={MAX_TILE_WIDTH}"
                )
                .into());
            }
        }
        let colors = cfg.ground_colors()?;
        let palette = Palette::new(cfg.cursor, |g| colors.get(&g).copied().unwrap_or([0, 0, 0]));

        let mut surfaces = HashMap::new();
        let mut cursors = HashMap::new();
        for &w in &tile_widths {
            for slope in Slope::all() {
                cursors.insert((slope, w), raster::cursor_sprite(w, slope, CURSOR_INDEX));
                for ground in GroundType::VALID {
                    let sprite = raster::surface_sprite(w, slope, |shade| {
                        Palette::ground_index(ground, shade).unwrap_or(0)
                    });
                    surfaces.insert((ground, slope, w), sprite);
                }
            }
        }
        log::info!(
            "built {} surface and {} cursor sprites for tile widths {:?}",
            surfaces.len(),
            cursors.len(),
            tile_widths
        );
        Ok(Self {
            palette,
            tile_widths,
            surfaces,
            cursors,
        })
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: SpritesConfig = toml::from_str(toml_str)?;
        Self::new(&cfg)
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Available zoom levels, smallest first.
    #[inline]
    pub fn tile_widths(&self) -> &[u16] {
        &self.tile_widths
    }

    #[inline]
    pub fn has_tile_width(&self, tile_width: u16) -> bool {
        self.tile_widths.binary_search(&tile_width).is_ok()
    }
}

impl SpriteProvider for SpriteStore {
    fn surface_sprite(
        &self,
        ground: GroundType,
        slope: Slope,
        tile_width: u16,
        orient: ViewOrientation,
    ) -> Option<&Sprite> {
        if !ground.is_valid() {
            return None;
        }
        self.surfaces.get(&(ground, slope.to_view(orient), tile_width))
    }

    fn cursor_sprite(
        &self,
        slope: Slope,
        tile_width: u16,
        orient: ViewOrientation,
    ) -> Option<&Sprite> {
        self.cursors.get(&(slope.to_view(orient), tile_width))
    }
}
