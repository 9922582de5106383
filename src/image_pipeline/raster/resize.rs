//! Downscaling for web delivery.
//!
//! Uses the `image` crate's resampling filters. Images are never upscaled.

use tracing::debug;

use crate::image_pipeline::common::{ConversionError, ResizeFilter, Result};
use crate::image_pipeline::raster::RasterImage;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `ConversionError::InvalidDimensions` for a zero target size, and
/// `ConversionError::EncodeError` when the pixel buffer doesn't match the
/// image's dimensions.
pub fn resize(
    image: RasterImage,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> Result<RasterImage> {
    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidDimensions(
            width as usize,
            height as usize,
        ));
    }

    if image.width == width && image.height == height {
        return Ok(image);
    }

    let rgb_image = image.into_rgb_image().ok_or_else(|| {
        ConversionError::EncodeError("pixel buffer does not match dimensions".to_string())
    })?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgb_image(resized))
}

/// Downscale so the image is at most `max_width` wide, preserving aspect ratio.
///
/// Images already within `max_width` are returned unchanged.
pub fn fit_to_width(image: RasterImage, max_width: u32, filter: ResizeFilter) -> Result<RasterImage> {
    if max_width == 0 {
        return Err(ConversionError::InvalidDimensions(0, image.height as usize));
    }

    let (width, height) = fit_width_dimensions(image.width, image.height, max_width);
    if (width, height) == (image.width, image.height) {
        return Ok(image);
    }

    debug!(
        "Resizing {}x{} -> {}x{} ({:?})",
        image.width, image.height, width, height, filter
    );
    resize(image, width, height, filter)
}

/// Target dimensions for `fit_to_width`: width `max_width` and height
/// `round(max_width * height / width)`, or the input when it already fits.
pub fn fit_width_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }

    // round half up, in integers so large images don't lose precision
    let (w, h, m) = (width as u64, height as u64, max_width as u64);
    let new_height = (2 * m * h + w) / (2 * w);

    (max_width, (new_height as u32).max(1))
}
