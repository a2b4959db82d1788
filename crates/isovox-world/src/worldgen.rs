use std::error::Error;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;

use crate::voxel::{GroundType, Slope};
use crate::world::VoxelWorld;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_size")]
    pub x_size: u16,
    #[serde(default = "default_size")]
    pub y_size: u16,
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default)]
    pub flat: Flat,
    #[serde(default)]
    pub terrain: Terrain,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            x_size: default_size(),
            y_size: default_size(),
            mode: default_mode(),
            flat: Flat::default(),
            terrain: Terrain::default(),
        }
    }
}

fn default_size() -> u16 {
    64
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Flat,
    Noise,
}

fn default_mode() -> Mode {
    Mode::Noise
}

#[derive(Clone, Debug, Deserialize)]
pub struct Flat {
    #[serde(default = "default_flat_height")]
    pub height: i32,
    #[serde(default = "default_flat_ground")]
    pub ground: String,
}
fn default_flat_height() -> i32 {
    2
}
fn default_flat_ground() -> String {
    "grass".into()
}
impl Default for Flat {
    fn default() -> Self {
        Self {
            height: default_flat_height(),
            ground: default_flat_ground(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Terrain {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default)]
    pub min_height: i32,
    #[serde(default = "default_max_height")]
    pub max_height: i32,
    #[serde(default = "default_bands")]
    pub bands: Vec<Band>,
}
fn default_seed() -> i32 {
    1337
}
fn default_frequency() -> f32 {
    0.045
}
fn default_max_height() -> i32 {
    12
}
fn default_bands() -> Vec<Band> {
    vec![
        Band {
            up_to: Some(1),
            ground: "sand".into(),
        },
        Band {
            up_to: Some(6),
            ground: "grass".into(),
        },
        Band {
            up_to: Some(9),
            ground: "dry".into(),
        },
        Band {
            up_to: None,
            ground: "rock".into(),
        },
    ]
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            frequency: default_frequency(),
            min_height: 0,
            max_height: default_max_height(),
            bands: default_bands(),
        }
    }
}

/// Ground used for tiles whose base height is at most `up_to` (no limit when absent).
#[derive(Clone, Debug, Deserialize)]
pub struct Band {
    #[serde(default)]
    pub up_to: Option<i32>,
    pub ground: String,
}

#[derive(Clone, Debug)]
pub struct WorldGenParams {
    pub x_size: u16,
    pub y_size: u16,
    pub mode: Mode,
    pub flat_height: i32,
    pub flat_ground: GroundType,
    pub seed: i32,
    pub frequency: f32,
    pub min_height: i32,
    pub max_height: i32,
    pub bands: Vec<(Option<i32>, GroundType)>,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        match Self::from_config(&WorldGenConfig::default()) {
            Ok(p) => p,
            Err(e) => unreachable!("built-in worldgen defaults are invalid: {e}"),
        }
    }
}

fn resolve_ground(name: &str) -> Result<GroundType, Box<dyn Error>> {
    GroundType::from_name(name).ok_or_else(|| format!("unknown ground type '{name}'").into())
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Result<Self, Box<dyn Error>> {
        if cfg.x_size == 0 || cfg.y_size == 0 {
            return Err(format!("world size {}x{} is empty", cfg.x_size, cfg.y_size).into());
        }
        let t = &cfg.terrain;
        if t.max_height < t.min_height {
            return Err(format!(
                "terrain max_height {} below min_height {}",
                t.max_height, t.min_height
            )
            .into());
        }
        let mut bands = Vec::with_capacity(t.bands.len());
        for b in &t.bands {
            bands.push((b.up_to, resolve_ground(&b.ground)?));
        }
        Ok(Self {
            x_size: cfg.x_size,
            y_size: cfg.y_size,
            mode: cfg.mode,
            flat_height: cfg.flat.height,
            flat_ground: resolve_ground(&cfg.flat.ground)?,
            seed: t.seed,
            frequency: t.frequency,
            min_height: t.min_height,
            max_height: t.max_height,
            bands,
        })
    }

    /// Ground for a tile whose base sits at `height`.
    pub fn ground_at(&self, height: i32) -> GroundType {
        self.bands
            .iter()
            .find(|(up_to, _)| up_to.is_none_or(|limit| height <= limit))
            .or(self.bands.last())
            .map(|(_, g)| *g)
            .unwrap_or(GroundType::Grass)
    }
}

pub fn load_params_from_str(toml_str: &str) -> Result<WorldGenParams, Box<dyn Error>> {
    let cfg: WorldGenConfig = toml::from_str(toml_str)?;
    WorldGenParams::from_config(&cfg)
}

/// Height of every tile corner, `(x_size + 1) * (y_size + 1)` values, row-major
/// by y. Neighbouring corners differ by at most one level.
fn corner_heights(params: &WorldGenParams) -> Vec<i32> {
    let cw = params.x_size as usize + 1;
    let ch = params.y_size as usize + 1;
    let mut noise = FastNoiseLite::with_seed(params.seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(params.frequency));
    let span = (params.max_height - params.min_height) as f32;
    let mut h: Vec<i32> = (0..cw * ch)
        .map(|i| {
            let (cx, cy) = (i % cw, i / cw);
            let n = noise.get_noise_2d(cx as f32, cy as f32);
            let t = ((n + 1.0) * 0.5).clamp(0.0, 1.0);
            params.min_height + (t * span).round() as i32
        })
        .collect();

    // Lower peaks until every corner is within one level of its neighbours.
    let mut changed = true;
    while changed {
        changed = false;
        for i in (0..cw * ch).chain((0..cw * ch).rev()) {
            let (cx, cy) = (i % cw, i / cw);
            let mut lowest = h[i];
            if cx > 0 {
                lowest = lowest.min(h[i - 1]);
            }
            if cx + 1 < cw {
                lowest = lowest.min(h[i + 1]);
            }
            if cy > 0 {
                lowest = lowest.min(h[i - cw]);
            }
            if cy + 1 < ch {
                lowest = lowest.min(h[i + cw]);
            }
            if h[i] > lowest + 1 {
                h[i] = lowest + 1;
                changed = true;
            }
        }
    }
    h
}

/// Base height and slope of a tile from its corner heights (north, east, south, west).
fn tile_shape(corners: [i32; 4]) -> (i32, Slope) {
    let base = *corners.iter().min().unwrap_or(&0);
    let rel = corners.map(|c| c - base);
    if let Some(top) = rel.iter().position(|&r| r >= 2) {
        return (base, Slope(Slope::STEEP | (1 << top)));
    }
    let bits = rel
        .iter()
        .enumerate()
        .filter(|(_, r)| **r == 1)
        .fold(0u8, |acc, (i, _)| acc | (1 << i));
    (base, Slope(bits))
}

pub fn generate_world(params: &WorldGenParams) -> VoxelWorld {
    match params.mode {
        Mode::Flat => {
            log::info!(
                "flat world {}x{} at height {} ({})",
                params.x_size,
                params.y_size,
                params.flat_height,
                params.flat_ground.name()
            );
            VoxelWorld::flat(
                params.x_size,
                params.y_size,
                params.flat_height,
                params.flat_ground,
            )
        }
        Mode::Noise => {
            let heights = corner_heights(params);
            let cw = params.x_size as usize + 1;
            let at = |x: usize, y: usize| heights[y * cw + x];
            let mut world = VoxelWorld::new(params.x_size, params.y_size);
            for y in 0..params.y_size as usize {
                for x in 0..params.x_size as usize {
                    // North (x,y), east (x,y+1), south (x+1,y+1), west (x+1,y).
                    let (base, slope) =
                        tile_shape([at(x, y), at(x, y + 1), at(x + 1, y + 1), at(x + 1, y)]);
                    world.set_surface(x as u16, y as u16, base, params.ground_at(base), slope);
                }
            }
            if let Some((lo, hi)) = world.height_range() {
                log::info!(
                    "generated {}x{} world (seed {}), heights {}..={}",
                    params.x_size,
                    params.y_size,
                    params.seed,
                    lo,
                    hi
                );
            }
            world
        }
    }
}
