use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    common::{ConversionConfig, ConversionError, Result},
    debayer::CpuDebayer,
    develop::develop,
    jpeg::{JpegWriter, StandardJpegWriter},
    raster::{RasterImage, apply_orientation, fit_to_width},
    raw::{RawImageData, RawImageReader, RawLoaderReader},
};

/// Dimensions and size of a JPEG written by [`RawToJpegPipeline::convert_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertedImage {
    pub width: u32,
    pub height: u32,
    pub bytes_written: usize,
}

pub struct RawToJpegPipeline<R: RawImageReader, W: JpegWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl RawToJpegPipeline<RawLoaderReader, StandardJpegWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: RawLoaderReader,
            writer: StandardJpegWriter,
            config,
        }
    }
}

impl Default for RawToJpegPipeline<RawLoaderReader, StandardJpegWriter> {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

impl<R: RawImageReader, W: JpegWriter> RawToJpegPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Decodes a RAW file held in memory and returns the web-sized JPEG.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8]) -> Result<Vec<u8>> {
        info!("Starting RAW to JPEG conversion");

        let raw_image = self.decode(input_data)?;
        let (jpeg, raster) = self.encode_raw_image(raw_image)?;

        info!(
            width = raster.width,
            height = raster.height,
            bytes = jpeg.len(),
            "Conversion complete"
        );
        Ok(jpeg)
    }

    /// Reads `input_path` and converts it; nothing is written.
    #[instrument(skip(self, input_path), fields(input = %input_path.as_ref().display()))]
    pub fn convert_path<P: AsRef<Path>>(&self, input_path: P) -> Result<Vec<u8>> {
        let input_data = read_input(input_path.as_ref())?;
        self.convert(&input_data)
    }

    fn decode(&self, input_data: &[u8]) -> Result<RawImageData> {
        let _span = tracing::info_span!("decode_raw").entered();
        self.reader.read_raw(input_data)
    }

    /// Develops an already decoded image and encodes it. Returns the JPEG and
    /// the raster it was encoded from.
    pub fn encode_raw_image(&self, raw_image: RawImageData) -> Result<(Vec<u8>, RasterImage)> {
        let raster = self.render(raw_image)?;

        let mut jpeg = Vec::new();
        {
            let _span = tracing::info_span!("encode_jpeg").entered();
            self.writer.write_jpeg(&raster, &mut jpeg, &self.config)?;
        }

        Ok((jpeg, raster))
    }

    /// Everything between the decoded sensor data and the encoder input.
    fn render(&self, raw_image: RawImageData) -> Result<RasterImage> {
        {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = raw_image.width,
                height = raw_image.height
            )
            .entered();
            self.validate_dimensions(raw_image.width, raw_image.height)?;
        }

        if raw_image.data.len() < raw_image.expected_len() {
            return Err(ConversionError::DecodeError(format!(
                "expected {} samples, got {}",
                raw_image.expected_len(),
                raw_image.data.len()
            )));
        }

        let orientation = raw_image.orientation;
        let cam_to_xyz = raw_image.cam_to_xyz;

        let rgb = {
            let _span = tracing::info_span!("debayer", camera = %raw_image.camera).entered();
            CpuDebayer::new(self.config.demosaic).process(&raw_image)?
        };
        // Sensor data is no longer needed
        drop(raw_image);

        let raster = {
            let _span = tracing::info_span!("develop").entered();
            develop(rgb, &cam_to_xyz, &self.config)?
        };

        let raster = if self.config.apply_orientation {
            let _span = tracing::info_span!("orient", ?orientation).entered();
            apply_orientation(raster, orientation)?
        } else {
            raster
        };

        let _span = tracing::info_span!("resize", max_width = self.config.max_width).entered();
        fit_to_width(raster, self.config.max_width, self.config.resize_filter)
    }

    /// Converts `input_path` and writes the JPEG to `output_path`.
    ///
    /// The JPEG is written to a temporary file next to `output_path` and
    /// renamed into place, so a failed conversion never leaves a partial
    /// file behind. An existing file at `output_path` is replaced.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<ConvertedImage> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let raw_image = self.decode(&read_input(input_path)?)?;
        let (jpeg, raster) = self.encode_raw_image(raw_image)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            write_atomically(output_path, &jpeg)?;
        }

        info!(
            width = raster.width,
            height = raster.height,
            bytes = jpeg.len(),
            "Wrote {}",
            output_path.display()
        );

        Ok(ConvertedImage {
            width: raster.width,
            height: raster.height,
            bytes_written: jpeg.len(),
        })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

fn read_input(input_path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file").entered();
    std::fs::read(input_path)
        .map_err(|e| ConversionError::InputReadError(format!("{}: {}", input_path.display(), e)))
}

fn write_atomically(output_path: &Path, data: &[u8]) -> Result<()> {
    let write_error = |e: std::io::Error| {
        ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
    };

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Narrowed by the umask on open, the same mode File::create gives
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(dir).map_err(write_error)?;
    tmp.write_all(data).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(output_path).map_err(|e| write_error(e.error))?;

    Ok(())
}
