//! Voxel world storage, the read-only accessor the renderer walks, and terrain generation.
#![forbid(unsafe_code)]

pub mod voxel;
pub mod world;
pub mod worldgen;

pub use voxel::{GroundType, Slope, SurfaceVoxel, Voxel, VoxelStack};
pub use world::{VoxelWorld, WorldAccess};
pub use worldgen::{
    Mode as WorldGenMode, WorldGenConfig, WorldGenParams, generate_world, load_params_from_str,
};
