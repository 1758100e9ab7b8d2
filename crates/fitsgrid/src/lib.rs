//! Nine-cutout quality-inspection grids for astronomical images.
//!
//! [`GridRenderer`] samples fixed-size cutouts at the corners, edge
//! midpoints and center of an image, subtracts each cutout's own median and
//! maps the result through a symmetric logarithmic scale into a single
//! 3x3 grayscale canvas.

pub mod config;
pub mod cutout;
pub mod error;
pub mod geometry;
pub mod norm;
pub mod output;
pub mod render;
pub mod stats;

pub use config::{BoundaryMode, CutoutSize, GridConfig};
pub use error::{Error, Result};
pub use norm::SymLogNorm;
pub use render::{GridRenderer, RenderedGrid};
