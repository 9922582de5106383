//! Batch conversion of camera RAW files into web-sized JPEGs.
//!
//! ```no_run
//! use rawweb_rs::image_pipeline::{ConversionConfig, RawToJpegPipeline};
//!
//! rawweb_rs::logger::init();
//! let pipeline = RawToJpegPipeline::new(ConversionConfig::default());
//! let report = pipeline
//!     .convert_into_dir(["public/RC2/IMG_0001.CR2"], "public/converted")
//!     .unwrap();
//! for (request, err) in report.failed() {
//!     eprintln!("{}: {}", request.source.display(), err);
//! }
//! ```

pub mod image_pipeline;
pub mod logger;
