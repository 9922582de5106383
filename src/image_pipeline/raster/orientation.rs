use image::imageops;

use crate::image_pipeline::common::{ConversionError, Result};
use crate::image_pipeline::raster::RasterImage;
use crate::image_pipeline::raw::Orientation;

/// Rotate/flip the image so it displays upright.
pub fn apply_orientation(image: RasterImage, orientation: Orientation) -> Result<RasterImage> {
    if orientation == Orientation::Normal {
        return Ok(image);
    }

    let img = image.into_rgb_image().ok_or_else(|| {
        ConversionError::EncodeError("pixel buffer does not match dimensions".to_string())
    })?;

    let oriented = match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => imageops::flip_horizontal(&img),
        Orientation::Rotate180 => imageops::rotate180(&img),
        Orientation::FlipVertical => imageops::flip_vertical(&img),
        Orientation::Transpose => imageops::flip_horizontal(&imageops::rotate90(&img)),
        Orientation::Rotate90CW => imageops::rotate90(&img),
        Orientation::Transverse => imageops::flip_horizontal(&imageops::rotate270(&img)),
        Orientation::Rotate270CW => imageops::rotate270(&img),
    };

    Ok(RasterImage::from_rgb_image(oriented))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x2 image whose red channel numbers the pixels 0..6 row by row.
    fn numbered() -> RasterImage {
        let pixels = (0..6u8).flat_map(|i| [i, 0, 0]).collect();
        RasterImage::new(3, 2, pixels)
    }

    fn reds(image: &RasterImage) -> Vec<u8> {
        image.pixels.chunks_exact(3).map(|px| px[0]).collect()
    }

    #[test]
    fn test_normal_is_untouched() {
        let out = apply_orientation(numbered(), Orientation::Normal).unwrap();
        assert_eq!(out, numbered());
    }

    #[test]
    fn test_rotations_swap_dimensions() {
        for orientation in [
            Orientation::Transpose,
            Orientation::Rotate90CW,
            Orientation::Transverse,
            Orientation::Rotate270CW,
        ] {
            let out = apply_orientation(numbered(), orientation).unwrap();
            assert_eq!((out.width, out.height), (2, 3), "{:?}", orientation);
        }
    }

    #[test]
    fn test_pixel_placement() {
        // 0 1 2
        // 3 4 5
        let rot90 = apply_orientation(numbered(), Orientation::Rotate90CW).unwrap();
        assert_eq!(reds(&rot90), vec![3, 0, 4, 1, 5, 2]);

        let rot270 = apply_orientation(numbered(), Orientation::Rotate270CW).unwrap();
        assert_eq!(reds(&rot270), vec![2, 5, 1, 4, 0, 3]);

        let transpose = apply_orientation(numbered(), Orientation::Transpose).unwrap();
        assert_eq!(reds(&transpose), vec![0, 3, 1, 4, 2, 5]);

        let flip = apply_orientation(numbered(), Orientation::FlipHorizontal).unwrap();
        assert_eq!(reds(&flip), vec![2, 1, 0, 5, 4, 3]);

        let rot180 = apply_orientation(numbered(), Orientation::Rotate180).unwrap();
        assert_eq!(reds(&rot180), vec![5, 4, 3, 2, 1, 0]);
    }
}
