//! 8-bit RGB raster module
//!
//! The developed image lives here between the develop stage and the JPEG
//! encoder: it is turned upright, then downscaled for the web.

mod orientation;
mod resize;
pub mod types;

pub use orientation::apply_orientation;
pub use resize::{fit_to_width, fit_width_dimensions, resize};
pub use types::RasterImage;
