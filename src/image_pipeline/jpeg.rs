//! JPEG writing module
//!
//! This module provides baseline JFIF encoding for the developed raster.

mod writer;
mod standard_jpeg_writer;

pub use writer::JpegWriter;
pub use standard_jpeg_writer::StandardJpegWriter;
