//! Viewport controller: view state, pointer handling and compositing onto a surface.
#![forbid(unsafe_code)]

pub mod config;
pub mod mouse;
pub mod surface;
pub mod viewport;

pub use config::{ViewportConfig, ViewportParams};
pub use mouse::{MouseButtons, MouseMode};
pub use surface::{SoftwareSurface, Surface, SurfaceGuard};
pub use viewport::{FrameStats, RenderContext, Viewport};
