//! Image processing pipeline module
//!
//! This module provides a structured approach to RAW to JPEG conversion, with
//! separate modules for RAW reading, demosaicing, development, raster
//! operations, JPEG writing, and conversion orchestration.

pub mod common;
pub mod conversions;
pub mod debayer;
pub mod develop;
pub mod jpeg;
pub mod raster;
pub mod raw;

pub use common::{
    ConversionConfig,
    ConversionConfigBuilder,
    ConversionError,
    DemosaicAlgorithm,
    ResizeFilter,
    Result,
};

pub use raw::{
    CfaPattern,
    Orientation,
    RawImageData,
    RawImageReader,
    RawLoaderReader,
};

pub use debayer::{CpuDebayer, RgbImageData};

pub use raster::RasterImage;

pub use jpeg::{
    JpegWriter,
    StandardJpegWriter,
};

pub use conversions::{
    BatchReport,
    ConversionOutcome,
    ConversionRequest,
    ConvertedImage,
    RawToJpegPipeline,
};
