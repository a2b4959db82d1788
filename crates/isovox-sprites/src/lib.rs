//! Palette sprites for surface tiles and the mouse cursor, and the provider the renderer queries.
#![forbid(unsafe_code)]

pub mod config;
pub mod palette;
pub mod raster;
pub mod sprite;
pub mod store;

pub use config::SpritesConfig;
pub use palette::{Palette, PixelClass};
pub use sprite::{Sprite, SpriteProvider};
pub use store::SpriteStore;
