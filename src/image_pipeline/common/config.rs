//! RAW to JPEG conversion configuration types

/// Longest width, in pixels, a web image is allowed to have.
pub const DEFAULT_MAX_WIDTH: u32 = 800;

/// JPEG quality used for web output.
pub const DEFAULT_QUALITY: u8 = 85;

/// Share of samples per channel allowed to clip when auto-brightening.
pub const DEFAULT_AUTO_BRIGHT_THRESHOLD: f32 = 0.01;

/// Interpolation filter used when downscaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    /// Nearest neighbor (fastest, blocky)
    Nearest,
    /// Bilinear / triangle filter
    Bilinear,
    /// Lanczos with a window of 3 (slowest, sharpest)
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResizeFilter::Nearest => image::imageops::FilterType::Nearest,
            ResizeFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResizeFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Demosaicing algorithm applied to the CFA mosaic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemosaicAlgorithm {
    NearestNeighbour,
    #[default]
    Linear,
    Cubic,
}

impl DemosaicAlgorithm {
    pub fn to_bayer(self) -> bayer::Demosaic {
        match self {
            DemosaicAlgorithm::NearestNeighbour => bayer::Demosaic::NearestNeighbour,
            DemosaicAlgorithm::Linear => bayer::Demosaic::Linear,
            DemosaicAlgorithm::Cubic => bayer::Demosaic::Cubic,
        }
    }
}

/// Configuration for RAW to JPEG conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Images wider than this are downscaled to exactly this width
    pub max_width: u32,
    /// JPEG quality, 1-100
    pub quality: u8,
    /// Whether to compute optimized Huffman tables (smaller files, one extra pass)
    pub optimize_huffman: bool,
    /// Filter used when downscaling
    pub resize_filter: ResizeFilter,
    /// Demosaicing algorithm
    pub demosaic: DemosaicAlgorithm,
    /// Whether to brighten the image so only `auto_bright_threshold` of it clips
    pub auto_bright: bool,
    /// Fraction of samples per channel allowed to clip when auto-brightening
    pub auto_bright_threshold: f32,
    /// Whether to rotate/flip the image upright according to the camera orientation
    pub apply_orientation: bool,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            quality: DEFAULT_QUALITY,
            optimize_huffman: true,
            resize_filter: ResizeFilter::Lanczos3,
            demosaic: DemosaicAlgorithm::Linear,
            auto_bright: true,
            auto_bright_threshold: DEFAULT_AUTO_BRIGHT_THRESHOLD,
            apply_orientation: true,
            validate_dimensions: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    max_width: Option<u32>,
    quality: Option<u8>,
    optimize_huffman: Option<bool>,
    resize_filter: Option<ResizeFilter>,
    demosaic: Option<DemosaicAlgorithm>,
    auto_bright: Option<bool>,
    auto_bright_threshold: Option<f32>,
    apply_orientation: Option<bool>,
    validate_dimensions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn max_width(mut self, max_width: u32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn optimize_huffman(mut self, enable: bool) -> Self {
        self.optimize_huffman = Some(enable);
        self
    }

    pub fn resize_filter(mut self, filter: ResizeFilter) -> Self {
        self.resize_filter = Some(filter);
        self
    }

    pub fn demosaic(mut self, algorithm: DemosaicAlgorithm) -> Self {
        self.demosaic = Some(algorithm);
        self
    }

    pub fn auto_bright(mut self, enable: bool) -> Self {
        self.auto_bright = Some(enable);
        self
    }

    pub fn auto_bright_threshold(mut self, threshold: f32) -> Self {
        self.auto_bright_threshold = Some(threshold);
        self
    }

    pub fn apply_orientation(mut self, enable: bool) -> Self {
        self.apply_orientation = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            max_width: self.max_width.unwrap_or(default.max_width),
            quality: self.quality.unwrap_or(default.quality).clamp(1, 100),
            optimize_huffman: self.optimize_huffman.unwrap_or(default.optimize_huffman),
            resize_filter: self.resize_filter.unwrap_or(default.resize_filter),
            demosaic: self.demosaic.unwrap_or(default.demosaic),
            auto_bright: self.auto_bright.unwrap_or(default.auto_bright),
            auto_bright_threshold: self
                .auto_bright_threshold
                .unwrap_or(default.auto_bright_threshold)
                .clamp(0.0, 1.0),
            apply_orientation: self.apply_orientation.unwrap_or(default.apply_orientation),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}
