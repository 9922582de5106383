//! Develop module
//!
//! Turns linear camera RGB into a display-ready 8-bit sRGB raster: colour
//! matrix, auto-brightening and the gamma curve, the way a RAW developer's
//! default post-processing does.

pub mod color;
pub mod tone;

use tracing::debug;

use crate::image_pipeline::common::{ConversionConfig, ConversionError, Result};
use crate::image_pipeline::debayer::RgbImageData;
use crate::image_pipeline::raster::RasterImage;

pub fn develop(
    mut rgb: RgbImageData,
    cam_to_xyz: &[[f32; 3]; 3],
    config: &ConversionConfig,
) -> Result<RasterImage> {
    let matrix = color::camera_to_srgb(cam_to_xyz);
    color::convert_in_place(&mut rgb, &matrix);

    let white = if config.auto_bright {
        tone::auto_white_point(&rgb, config.auto_bright_threshold)
    } else {
        u16::MAX as u32
    };
    debug!("White point {} ({:.2}x)", white, u16::MAX as f32 / white as f32);

    let lut = tone::tone_lut(white);
    let pixels: Vec<u8> = rgb.data.iter().map(|&v| lut[v as usize]).collect();

    let width = u32::try_from(rgb.width)
        .map_err(|_| ConversionError::InvalidDimensions(rgb.width, rgb.height))?;
    let height = u32::try_from(rgb.height)
        .map_err(|_| ConversionError::InvalidDimensions(rgb.width, rgb.height))?;

    Ok(RasterImage::new(width, height, pixels))
}
