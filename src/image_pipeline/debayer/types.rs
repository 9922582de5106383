//! Types for debayering operations

use tracing::warn;

use crate::image_pipeline::raw::Crop;

/// RGB image data after debayering
#[derive(Debug, Clone)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Linear, white balanced RGB interleaved [R, G, B, R, G, B, ...], 0-65535
    pub data: Vec<u16>,
}

impl RgbImageData {
    /// Trims the image to its visible area. A crop that would leave nothing is ignored.
    pub fn crop(self, crop: Crop) -> Self {
        if crop.is_empty() {
            return self;
        }

        let trim_x = crop.left + crop.right;
        let trim_y = crop.top + crop.bottom;
        if trim_x >= self.width || trim_y >= self.height {
            warn!(
                "Ignoring crop {:?} larger than the {}x{} image",
                crop, self.width, self.height
            );
            return self;
        }

        let new_width = self.width - trim_x;
        let new_height = self.height - trim_y;

        let mut data = Vec::with_capacity(new_width * new_height * 3);
        for row in crop.top..crop.top + new_height {
            let start = (row * self.width + crop.left) * 3;
            data.extend_from_slice(&self.data[start..start + new_width * 3]);
        }

        Self {
            width: new_width,
            height: new_height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, height: usize) -> RgbImageData {
        let data = (0..width * height)
            .flat_map(|i| [i as u16, i as u16, i as u16])
            .collect();
        RgbImageData { width, height, data }
    }

    #[test]
    fn test_crop_keeps_visible_area() {
        let image = numbered(4, 3).crop(Crop { top: 1, right: 1, bottom: 0, left: 1 });
        assert_eq!((image.width, image.height), (2, 2));
        let firsts: Vec<u16> = image.data.chunks_exact(3).map(|px| px[0]).collect();
        assert_eq!(firsts, vec![5, 6, 9, 10]);
    }

    #[test]
    fn test_crop_ignores_oversized_crop() {
        let image = numbered(4, 3).crop(Crop { top: 2, right: 0, bottom: 1, left: 0 });
        assert_eq!((image.width, image.height), (4, 3));
    }
}
