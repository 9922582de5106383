use std::io::Write;

use jpeg_encoder::{ColorType, Encoder, SamplingFactor};
use tracing::debug;

use crate::image_pipeline::common::{ConversionConfig, ConversionError, Result};
use crate::image_pipeline::jpeg::writer::JpegWriter;
use crate::image_pipeline::raster::RasterImage;

pub struct StandardJpegWriter;

impl JpegWriter for StandardJpegWriter {
    fn write_jpeg(&self, image: &RasterImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!(
            "Encoding JPEG image: {}x{}, quality {}",
            image.width, image.height, config.quality
        );

        let invalid = || ConversionError::InvalidDimensions(image.width as usize, image.height as usize);
        if image.width == 0 || image.height == 0 {
            return Err(invalid());
        }
        // JPEG frame headers store 16-bit dimensions
        let width = u16::try_from(image.width).map_err(|_| invalid())?;
        let height = u16::try_from(image.height).map_err(|_| invalid())?;

        let expected = image.width as usize * image.height as usize * 3;
        if image.pixels.len() != expected {
            return Err(ConversionError::EncodeError(format!(
                "expected {} bytes of RGB data, got {}",
                expected,
                image.pixels.len()
            )));
        }

        let mut buffer = Vec::new();

        let mut encoder = Encoder::new(&mut buffer, config.quality.clamp(1, 100));
        encoder.set_sampling_factor(SamplingFactor::R_4_2_0);
        encoder.set_optimized_huffman_tables(config.optimize_huffman);

        encoder
            .encode(&image.pixels, width, height, ColorType::Rgb)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("JPEG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
