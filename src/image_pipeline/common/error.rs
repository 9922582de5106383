use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to create output directory: {0}")]
    OutputDirectory(String),

    #[error("Failed to decode RAW image: {0}")]
    DecodeError(String),

    #[error("Failed to demosaic RAW image: {0}")]
    DemosaicError(String),

    #[error("Failed to encode JPEG image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConversionError {
    /// Filesystem failures, either reading the source or writing the target.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ConversionError::InputReadError(_)
                | ConversionError::OutputWriteError(_)
                | ConversionError::OutputDirectory(_)
                | ConversionError::IoError(_)
        )
    }

    /// The source was not a RAW file we can turn into pixels.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            ConversionError::DecodeError(_) | ConversionError::UnsupportedFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
