//! Visibility culling, depth-ordered sprite collection and pixel picking over a voxel world.
#![forbid(unsafe_code)]

pub mod collector;
pub mod pixel_finder;
pub mod sprite_collector;

pub use collector::{CollectStats, ViewCenter, VoxelCollector, VoxelVisitor};
pub use pixel_finder::{PickResult, PixelFinder};
pub use sprite_collector::{DrawCommand, DrawImages, SpriteCollector};
