//! Converting many files, one failure at a time.

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use crate::image_pipeline::{
    common::{ConversionError, Result},
    conversions::{ConvertedImage, RawToJpegPipeline},
    jpeg::JpegWriter,
    raw::RawImageReader,
};

/// Extension given to converted files.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// A source RAW file and where its JPEG goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl ConversionRequest {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Targets `output_dir/<file stem>.jpg`, so `IMG_0001.CR2` becomes `IMG_0001.jpg`.
    pub fn into_dir(source: impl Into<PathBuf>, output_dir: impl AsRef<Path>) -> Self {
        let source = source.into();
        let mut name = PathBuf::from(source.file_name().unwrap_or(source.as_os_str()));
        name.set_extension(OUTPUT_EXTENSION);
        let target = output_dir.as_ref().join(name);
        Self { source, target }
    }
}

/// What happened to one request.
#[derive(Debug)]
pub struct ConversionOutcome {
    pub request: ConversionRequest,
    pub result: Result<ConvertedImage>,
}

/// Per-file results of a batch, in request order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<ConversionOutcome>,
}

impl BatchReport {
    pub fn outcomes(&self) -> &[ConversionOutcome] {
        &self.outcomes
    }

    pub fn succeeded(&self) -> impl Iterator<Item = (&ConversionRequest, &ConvertedImage)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|img| (&o.request, img)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&ConversionRequest, &ConversionError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.request, e)))
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// True when every request converted (vacuously true for an empty batch).
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

impl<R: RawImageReader, W: JpegWriter> RawToJpegPipeline<R, W> {
    /// Converts each request independently. A failure is logged and recorded,
    /// and the batch moves on to the next file.
    #[instrument(skip_all)]
    pub fn convert_all<I>(&self, requests: I) -> BatchReport
    where
        I: IntoIterator<Item = ConversionRequest>,
    {
        let outcomes: Vec<ConversionOutcome> = requests
            .into_iter()
            .map(|request| {
                let name = display_name(&request.source);
                info!("Converting {}...", name);

                let result = self.convert_file(&request.source, &request.target);
                match &result {
                    Ok(img) => info!("{} created ({}x{})", request.target.display(), img.width, img.height),
                    Err(e) => error!("Failed to convert {}: {}", name, e),
                }

                ConversionOutcome { request, result }
            })
            .collect();

        let report = BatchReport { outcomes };
        info!(
            succeeded = report.success_count(),
            failed = report.failure_count(),
            "Batch complete"
        );
        report
    }

    /// Converts `sources` into `output_dir`, creating it if needed.
    ///
    /// Not being able to create `output_dir` is the only error; per-file
    /// failures end up in the report.
    #[instrument(skip(self, sources, output_dir), fields(output_dir = %output_dir.as_ref().display()))]
    pub fn convert_into_dir<I, P, Q>(&self, sources: I, output_dir: Q) -> Result<BatchReport>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
        Q: AsRef<Path>,
    {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir).map_err(|e| {
            ConversionError::OutputDirectory(format!("{}: {}", output_dir.display(), e))
        })?;

        let requests: Vec<ConversionRequest> = sources
            .into_iter()
            .map(|source| ConversionRequest::into_dir(source, output_dir))
            .collect();

        if requests.is_empty() {
            warn!("No RAW files to convert");
            return Ok(BatchReport::default());
        }

        info!("Found {} RAW files to convert", requests.len());
        Ok(self.convert_all(requests))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_dir_replaces_raw_extension() {
        let req = ConversionRequest::into_dir("public/RC2/IMG_0001.CR2", "public/converted");
        assert_eq!(req.source, PathBuf::from("public/RC2/IMG_0001.CR2"));
        assert_eq!(req.target, PathBuf::from("public/converted/IMG_0001.jpg"));

        let req = ConversionRequest::into_dir("shots/img.cr2", "out");
        assert_eq!(req.target, PathBuf::from("out/img.jpg"));
    }

    #[test]
    fn test_into_dir_keeps_misnamed_jpg() {
        // RAW data saved under a .jpg name keeps its name
        let req = ConversionRequest::into_dir("public/event_image1.jpg", "public/converted");
        assert_eq!(req.target, PathBuf::from("public/converted/event_image1.jpg"));
    }

    #[test]
    fn test_into_dir_without_extension() {
        let req = ConversionRequest::into_dir("raw/frame", "out");
        assert_eq!(req.target, PathBuf::from("out/frame.jpg"));
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = BatchReport::default();
        assert!(report.is_empty());
        assert!(report.is_success());
        assert_eq!(report.success_count(), 0);
        assert_eq!(report.failure_count(), 0);
    }
}
