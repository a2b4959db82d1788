use std::error::Error;
use std::fs;
use std::path::Path;

use isovox_sprites::SpritesConfig;
use isovox_viewport::ViewportConfig;
use isovox_world::WorldGenConfig;
use isovox_world::worldgen::{Flat, Mode, Terrain};
use serde::Deserialize;

/// Contents of `isovox.toml`. Every section may be left out.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub sprites: SpritesConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

fn default_width() -> i32 {
    1024
}
fn default_height() -> i32 {
    768
}
fn default_background() -> [u8; 3] {
    [0, 0, 0]
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_world_size")]
    pub x_size: u16,
    #[serde(default = "default_world_size")]
    pub y_size: u16,
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default)]
    pub flat: Flat,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            x_size: default_world_size(),
            y_size: default_world_size(),
            mode: default_mode(),
            flat: Flat::default(),
        }
    }
}

fn default_world_size() -> u16 {
    64
}
fn default_mode() -> Mode {
    Mode::Noise
}

/// Command line values that take precedence over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub seed: Option<i32>,
    pub world_size: Option<u16>,
    pub flat: bool,
    pub tile_width: Option<u16>,
}

impl AppConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
        Self::from_toml_str(&s)
    }

    /// The file at `path` if given, otherwise `isovox.toml` when present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(p) => Self::from_path(p),
            None if Path::new("isovox.toml").exists() => Self::from_path("isovox.toml"),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(&mut self, o: &Overrides) {
        if let Some(w) = o.width {
            self.window.width = w;
        }
        if let Some(h) = o.height {
            self.window.height = h;
        }
        if let Some(seed) = o.seed {
            self.terrain.seed = seed;
        }
        if let Some(size) = o.world_size {
            self.world.x_size = size;
            self.world.y_size = size;
        }
        if o.flat {
            self.world.mode = Mode::Flat;
        }
        if let Some(tw) = o.tile_width {
            self.viewport.tile_width = tw;
        }
    }

    pub fn world_gen(&self) -> WorldGenConfig {
        WorldGenConfig {
            x_size: self.world.x_size,
            y_size: self.world.y_size,
            mode: self.world.mode,
            flat: self.world.flat.clone(),
            terrain: self.terrain.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.window.width <= 0 || self.window.height <= 0 {
            return Err(format!(
                "window size {}x{} is empty",
                self.window.width, self.window.height
            )
            .into());
        }
        Ok(())
    }
}
