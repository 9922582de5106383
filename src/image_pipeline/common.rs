//! Common utilities module
//!
//! This module contains the error type and conversion settings shared across the image pipeline.

pub mod config;
pub mod error;

pub use config::{ConversionConfig, ConversionConfigBuilder, DemosaicAlgorithm, ResizeFilter};
pub use error::{ConversionError, Result};
