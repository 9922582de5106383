//! RAW image data types

/// Colour of a single photosite in the filter array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfaColor {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl CfaColor {
    /// Index of this colour in an interleaved RGB pixel and in per-colour tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// 2x2 Bayer layouts, named after the first two rows read left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CfaPattern {
    #[default]
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl CfaPattern {
    /// Builds the pattern from the colours at (0,0), (0,1), (1,0), (1,1).
    pub fn from_quad(quad: [CfaColor; 4]) -> Option<Self> {
        use CfaColor::*;
        match quad {
            [Red, Green, Green, Blue] => Some(CfaPattern::Rggb),
            [Blue, Green, Green, Red] => Some(CfaPattern::Bggr),
            [Green, Red, Blue, Green] => Some(CfaPattern::Grbg),
            [Green, Blue, Red, Green] => Some(CfaPattern::Gbrg),
            _ => None,
        }
    }

    pub fn color_at(self, row: usize, col: usize) -> CfaColor {
        use CfaColor::*;
        let quad = match self {
            CfaPattern::Rggb => [Red, Green, Green, Blue],
            CfaPattern::Bggr => [Blue, Green, Green, Red],
            CfaPattern::Grbg => [Green, Red, Blue, Green],
            CfaPattern::Gbrg => [Green, Blue, Red, Green],
        };
        quad[(row % 2) * 2 + (col % 2)]
    }

    pub fn to_bayer(self) -> bayer::CFA {
        match self {
            CfaPattern::Rggb => bayer::CFA::RGGB,
            CfaPattern::Bggr => bayer::CFA::BGGR,
            CfaPattern::Grbg => bayer::CFA::GRBG,
            CfaPattern::Gbrg => bayer::CFA::GBRG,
        }
    }
}

/// Visible sensor area, as pixels trimmed from each edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Crop {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

impl Crop {
    /// The array is in the order top, right, bottom, left.
    pub fn from_css_quad(v: [usize; 4]) -> Self {
        Self {
            top: v[0],
            right: v[1],
            bottom: v[2],
            left: v[3],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top == 0 && self.right == 0 && self.bottom == 0 && self.left == 0
    }
}

/// EXIF orientation values (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    /// Flip horizontal + rotate 270 CW
    Transpose,
    Rotate90CW,
    /// Flip horizontal + rotate 90 CW
    Transverse,
    Rotate270CW,
}

impl Orientation {
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u16> for Orientation {
    fn from(value: u16) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Represents decoded RAW image data
#[derive(Debug, Clone)]
pub struct RawImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Raw samples: a single channel mosaic when `components == 1`,
    /// interleaved linear RGB when `components == 3`
    pub data: Vec<u16>,
    /// Samples per pixel
    pub components: usize,
    /// Layout of the colour filter array (ignored for 3-component data)
    pub cfa: CfaPattern,
    /// Black level per colour, indexed by `CfaColor`
    pub black_levels: [u16; 3],
    /// White level per colour, indexed by `CfaColor`
    pub white_levels: [u16; 3],
    /// As-shot white balance multipliers, normalised so green is 1.0
    pub wb_coeffs: [f32; 3],
    /// Camera RGB to CIE XYZ (D65)
    pub cam_to_xyz: [[f32; 3]; 3],
    /// Visible area of the sensor
    pub crop: Crop,
    pub orientation: Orientation,
    /// "Make Model" of the camera, for logging
    pub camera: String,
}

impl RawImageData {
    /// A mosaic image with neutral metadata: black 0, white 65535, no white
    /// balance, no colour transform, no crop.
    pub fn from_mosaic(width: usize, height: usize, data: Vec<u16>, cfa: CfaPattern) -> Self {
        Self {
            width,
            height,
            data,
            components: 1,
            cfa,
            black_levels: [0; 3],
            white_levels: [u16::MAX; 3],
            wb_coeffs: [1.0; 3],
            cam_to_xyz: SRGB_TO_XYZ,
            crop: Crop::default(),
            orientation: Orientation::Normal,
            camera: String::new(),
        }
    }

    pub fn expected_len(&self) -> usize {
        self.width * self.height * self.components
    }
}

/// Linear sRGB (D65) to XYZ. Used when a camera has no usable matrix, so
/// the colour transform degrades to the identity.
pub const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cfa_pattern_roundtrips_through_quad() {
        for pattern in [
            CfaPattern::Rggb,
            CfaPattern::Bggr,
            CfaPattern::Grbg,
            CfaPattern::Gbrg,
        ] {
            let quad = [
                pattern.color_at(0, 0),
                pattern.color_at(0, 1),
                pattern.color_at(1, 0),
                pattern.color_at(1, 1),
            ];
            assert_eq!(CfaPattern::from_quad(quad), Some(pattern));
        }
    }

    #[test]
    fn test_cfa_pattern_repeats() {
        let p = CfaPattern::Grbg;
        assert_eq!(p.color_at(0, 1), CfaColor::Red);
        assert_eq!(p.color_at(2, 3), CfaColor::Red);
        assert_eq!(p.color_at(5, 4), CfaColor::Blue);
    }

    #[test]
    fn test_cfa_pattern_rejects_non_bayer_quads() {
        use CfaColor::*;
        assert_eq!(CfaPattern::from_quad([Red, Red, Green, Blue]), None);
        assert_eq!(CfaPattern::from_quad([Green, Green, Green, Green]), None);
    }

    #[test]
    fn test_orientation_from_exif() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(8), Orientation::Rotate270CW);
        assert_eq!(Orientation::from(99), Orientation::Normal);
        assert!(Orientation::Rotate90CW.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
    }

    #[test]
    fn test_crop_from_css_quad() {
        let crop = Crop::from_css_quad([1, 2, 3, 4]);
        assert_eq!(crop, Crop { top: 1, right: 2, bottom: 3, left: 4 });
        assert!(!crop.is_empty());
        assert!(Crop::from_css_quad([0; 4]).is_empty());
    }
}
