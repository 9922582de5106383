use std::io::Write;
use crate::image_pipeline::common::{ConversionConfig, Result};
use crate::image_pipeline::raster::RasterImage;

pub trait JpegWriter {
    fn write_jpeg(&self, image: &RasterImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
