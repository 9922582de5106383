//! Pipeline conversions module
//!
//! This module contains orchestration logic for RAW to JPEG conversion, for
//! single files and for batches.

mod batch;
mod raw_to_jpeg;


pub use batch::{BatchReport, ConversionOutcome, ConversionRequest, OUTPUT_EXTENSION};
pub use raw_to_jpeg::{ConvertedImage, RawToJpegPipeline};
