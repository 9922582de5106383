use std::io::Cursor;

use bayer::{BayerDepth, RasterDepth, RasterMut};
use tracing::debug;

use crate::image_pipeline::common::{ConversionError, DemosaicAlgorithm, Result};
use crate::image_pipeline::debayer::RgbImageData;
use crate::image_pipeline::raw::{CfaColor, RawImageData};

pub struct CpuDebayer {
    algorithm: DemosaicAlgorithm,
}

impl Default for CpuDebayer {
    fn default() -> Self {
        Self::new(DemosaicAlgorithm::default())
    }
}

impl CpuDebayer {
    pub fn new(algorithm: DemosaicAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Black level, white level and white balance are applied per photosite
    /// before interpolation, then the image is cropped to its visible area.
    pub fn process(&self, raw_image: &RawImageData) -> Result<RgbImageData> {
        let width = raw_image.width;
        let height = raw_image.height;
        debug!(
            "Starting CPU debayering for image {}x{} ({} components)",
            width, height, raw_image.components
        );

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        let rgb = match raw_image.components {
            1 => self.demosaic(raw_image)?,
            3 => scale_rgb(raw_image),
            other => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "{} components per pixel",
                    other
                )));
            }
        };

        Ok(rgb.crop(raw_image.crop))
    }

    fn demosaic(&self, raw_image: &RawImageData) -> Result<RgbImageData> {
        let width = raw_image.width;
        let height = raw_image.height;
        let levels = Levels::new(raw_image);

        // Scaled mosaic as 16-bit little endian, the layout bayer reads
        let mut bayer_bytes = Vec::with_capacity(width * height * 2);
        for (row, line) in raw_image.data.chunks_exact(width).take(height).enumerate() {
            for (col, &value) in line.iter().enumerate() {
                let color = raw_image.cfa.color_at(row, col);
                bayer_bytes.extend_from_slice(&levels.scale(value, color).to_le_bytes());
            }
        }

        let mut output_buf = vec![0u8; width * height * 3 * 2];
        let mut cursor = Cursor::new(&bayer_bytes[..]);

        debug!(
            "Running demosaic with CFA={:?}, algo={:?}",
            raw_image.cfa, self.algorithm
        );

        {
            let mut output_raster =
                RasterMut::new(width, height, RasterDepth::Depth16, &mut output_buf);

            bayer::run_demosaic(
                &mut cursor,
                BayerDepth::Depth16LE,
                raw_image.cfa.to_bayer(),
                self.algorithm.to_bayer(),
                &mut output_raster,
            )
            .map_err(|e| ConversionError::DemosaicError(format!("{:?}", e)))?;
        }

        // The raster holds native-endian u16 samples
        let data = output_buf
            .chunks_exact(2)
            .map(|b| u16::from_ne_bytes([b[0], b[1]]))
            .collect();

        Ok(RgbImageData {
            width,
            height,
            data,
        })
    }
}

/// Data that is already RGB only needs levels and white balance.
fn scale_rgb(raw_image: &RawImageData) -> RgbImageData {
    let levels = Levels::new(raw_image);
    let data = raw_image
        .data
        .chunks_exact(3)
        .take(raw_image.width * raw_image.height)
        .flat_map(|px| {
            [
                levels.scale(px[0], CfaColor::Red),
                levels.scale(px[1], CfaColor::Green),
                levels.scale(px[2], CfaColor::Blue),
            ]
        })
        .collect();

    RgbImageData {
        width: raw_image.width,
        height: raw_image.height,
        data,
    }
}

/// Per-colour black subtraction, normalisation and white balance.
struct Levels {
    black: [f32; 3],
    gain: [f32; 3],
}

impl Levels {
    fn new(raw_image: &RawImageData) -> Self {
        let mut black = [0.0; 3];
        let mut gain = [0.0; 3];
        for c in 0..3 {
            black[c] = raw_image.black_levels[c] as f32;
            let range = (raw_image.white_levels[c] as f32 - black[c]).max(1.0);
            gain[c] = raw_image.wb_coeffs[c] * u16::MAX as f32 / range;
        }
        Self { black, gain }
    }

    #[inline]
    fn scale(&self, value: u16, color: CfaColor) -> u16 {
        let c = color.index();
        ((value as f32 - self.black[c]).max(0.0) * self.gain[c]).min(u16::MAX as f32) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::{CfaPattern, Crop};

    fn flat_mosaic(width: usize, height: usize, value: u16) -> RawImageData {
        RawImageData::from_mosaic(width, height, vec![value; width * height], CfaPattern::Rggb)
    }

    #[test]
    fn test_flat_mosaic_stays_flat() {
        let raw = flat_mosaic(16, 12, 30000);
        let rgb = CpuDebayer::default().process(&raw).unwrap();

        assert_eq!((rgb.width, rgb.height), (16, 12));
        assert_eq!(rgb.data.len(), 16 * 12 * 3);
        assert!(rgb.data.iter().all(|&v| v == 30000));
    }

    #[test]
    fn test_levels_and_white_balance() {
        let mut raw = flat_mosaic(8, 8, 1100);
        raw.black_levels = [100; 3];
        raw.white_levels = [4095; 3];
        raw.wb_coeffs = [2.0, 1.0, 1.0];

        let rgb = CpuDebayer::default().process(&raw).unwrap();
        let px = &rgb.data[..3];
        let expected_g = ((1000.0 / 3995.0) * 65535.0) as u16;
        assert!((px[1] as i32 - expected_g as i32).abs() <= 1);
        assert!((px[0] as i32 - 2 * expected_g as i32).abs() <= 2);
        assert!((px[2] as i32 - expected_g as i32).abs() <= 1);
    }

    #[test]
    fn test_values_below_black_clamp_to_zero() {
        let mut raw = flat_mosaic(8, 8, 50);
        raw.black_levels = [100; 3];
        let rgb = CpuDebayer::default().process(&raw).unwrap();
        assert!(rgb.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_crop_applied_after_demosaic() {
        let mut raw = flat_mosaic(20, 10, 1000);
        raw.crop = Crop { top: 2, right: 4, bottom: 0, left: 2 };
        let rgb = CpuDebayer::new(DemosaicAlgorithm::NearestNeighbour)
            .process(&raw)
            .unwrap();
        assert_eq!((rgb.width, rgb.height), (14, 8));
        assert_eq!(rgb.data.len(), 14 * 8 * 3);
    }

    #[test]
    fn test_three_component_data_skips_demosaic() {
        let mut raw = RawImageData::from_mosaic(
            2,
            1,
            vec![65535, 0, 0, 0, 0, 65535],
            CfaPattern::Rggb,
        );
        raw.components = 3;
        let rgb = CpuDebayer::default().process(&raw).unwrap();
        assert_eq!(rgb.data, vec![65535, 0, 0, 0, 0, 65535]);
    }

    #[test]
    fn test_unsupported_component_count() {
        let mut raw = flat_mosaic(4, 4, 0);
        raw.components = 4;
        let result = CpuDebayer::default().process(&raw);
        assert!(matches!(result, Err(ConversionError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_red_photosites_land_in_red_channel() {
        // Only the red sites of an RGGB mosaic are lit
        let (w, h) = (8, 8);
        let data = (0..w * h)
            .map(|i| if (i / w) % 2 == 0 && (i % w) % 2 == 0 { 40000 } else { 0 })
            .collect();
        let raw = RawImageData::from_mosaic(w, h, data, CfaPattern::Rggb);
        let rgb = CpuDebayer::default().process(&raw).unwrap();

        // interior pixel at (3, 3) is blue on the mosaic
        let i = (3 * w + 3) * 3;
        assert!(rgb.data[i] > 0);
        assert_eq!(rgb.data[i + 1], 0);
        assert_eq!(rgb.data[i + 2], 0);
    }
}
