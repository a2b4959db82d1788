use std::collections::HashMap;
use std::error::Error;

use isovox_world::GroundType;
use serde::Deserialize;

/// `[sprites]` section: which zoom levels to build and how to color them.
#[derive(Clone, Debug, Deserialize)]
pub struct SpritesConfig {
    #[serde(default = "default_tile_widths")]
    pub tile_widths: Vec<u16>,
    #[serde(default = "default_cursor")]
    pub cursor: [u8; 3],
    /// Base color overrides keyed by ground name.
    #[serde(default)]
    pub grounds: HashMap<String, [u8; 3]>,
}

impl Default for SpritesConfig {
    fn default() -> Self {
        Self {
            tile_widths: default_tile_widths(),
            cursor: default_cursor(),
            grounds: HashMap::new(),
        }
    }
}

fn default_tile_widths() -> Vec<u16> {
    vec![16, 32, 64, 128]
}

fn default_cursor() -> [u8; 3] {
    [255, 230, 0]
}

pub fn default_ground_color(ground: GroundType) -> [u8; 3] {
    match ground {
        GroundType::Grass => [76, 140, 52],
        GroundType::Dry => [150, 140, 70],
        GroundType::Sand => [214, 196, 128],
        GroundType::Rock => [128, 124, 118],
        GroundType::Invalid => [0, 0, 0],
    }
}

impl SpritesConfig {
    /// Base color of every drawable ground, defaults overlaid with `grounds`.
    pub fn ground_colors(&self) -> Result<HashMap<GroundType, [u8; 3]>, Box<dyn Error>> {
        let mut colors: HashMap<GroundType, [u8; 3]> = GroundType::VALID
            .iter()
            .map(|g| (*g, default_ground_color(*g)))
            .collect();
        let mut names: Vec<&String> = self.grounds.keys().collect();
        names.sort();
        for name in names {
            let ground = GroundType::from_name(name)
                .ok_or_else(|| format!("unknown ground type '{name}' in [sprites.grounds]"))?;
            colors.insert(ground, self.grounds[name]);
        }
        Ok(colors)
    }
}
