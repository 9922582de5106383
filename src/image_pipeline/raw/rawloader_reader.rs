//! RAW image reader implementation using the rawloader library.
//!
//! This module provides support for reading various RAW image formats (CR2, ARW, NEF, DNG, etc.)
//! using the rawloader library. Besides the sensor samples it extracts the metadata the
//! develop stage needs: black and white levels, as-shot white balance, the camera colour
//! matrix, the visible crop and the orientation.

use std::io::Cursor;

use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::{
    CfaColor, CfaPattern, Crop, Orientation, RawImageData, SRGB_TO_XYZ,
};

/// RAW image reader that uses the rawloader library for decoding.
///
/// This reader supports any RAW format that rawloader can decode with a 2x2 colour
/// filter array, including but not limited to:
/// - Canon CR2
/// - Sony ARW
/// - Nikon NEF
pub struct RawLoaderReader;

/// How far the CFA is checked for a 2x2 period. X-Trans repeats every 6.
const CFA_PERIOD_CHECK: usize = 6;

impl RawImageReader for RawLoaderReader {
    /// Reads and decodes RAW image data from a byte array.
    ///
    /// # Errors
    ///
    /// * `ConversionError::DecodeError` - rawloader does not recognise the data
    /// * `ConversionError::UnsupportedFormat` - decodes, but the sensor layout can't be developed
    fn read_raw(&self, data: &[u8]) -> Result<RawImageData> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;
        let camera = format!("{} {}", decoded.clean_make, decoded.clean_model);

        debug!("Decoded {} image: {}x{}, cpp={}", camera, width, height, decoded.cpp);

        if decoded.cpp != 1 && decoded.cpp != 3 {
            return Err(ConversionError::UnsupportedFormat(format!(
                "{} components per pixel",
                decoded.cpp
            )));
        }

        let cfa = if decoded.cpp == 1 {
            bayer_pattern(&decoded.cfa)?
        } else {
            CfaPattern::default()
        };

        let cam_to_xyz = camera_matrix(&decoded);
        let wb_coeffs = white_balance(decoded.wb_coeffs);
        let crop = Crop::from_css_quad(decoded.crops);
        let orientation = Orientation::from(decoded.orientation.to_u16());

        // Float data is normalised 0.0-1.0, so it gets scaled to the full u16 range
        // and the levels are replaced to match.
        let (data, black_levels, white_levels) = match decoded.data {
            RawloaderImageData::Integer(values) => (
                values,
                [
                    decoded.blacklevels[0],
                    decoded.blacklevels[1],
                    decoded.blacklevels[2],
                ],
                [
                    decoded.whitelevels[0],
                    decoded.whitelevels[1],
                    decoded.whitelevels[2],
                ],
            ),
            RawloaderImageData::Float(values) => (
                values
                    .iter()
                    .map(|&v| (v.clamp(0.0, 1.0) * u16::MAX as f32) as u16)
                    .collect(),
                [0; 3],
                [u16::MAX; 3],
            ),
        };

        debug!(
            "Levels: black={:?} white={:?}, wb={:?}, crop={:?}, orientation={:?}",
            black_levels, white_levels, wb_coeffs, crop, orientation
        );

        let image = RawImageData {
            width,
            height,
            data,
            components: decoded.cpp,
            cfa,
            black_levels,
            white_levels,
            wb_coeffs,
            cam_to_xyz,
            crop,
            orientation,
            camera,
        };

        if image.data.len() < image.expected_len() {
            return Err(ConversionError::DecodeError(format!(
                "truncated sensor data: expected {} samples, got {}",
                image.expected_len(),
                image.data.len()
            )));
        }

        Ok(image)
    }
}

/// Reduces rawloader's CFA description to one of the four Bayer layouts.
fn bayer_pattern(cfa: &rawloader::CFA) -> Result<CfaPattern> {
    let color = |row: usize, col: usize| -> Result<CfaColor> {
        match cfa.color_at(row, col) {
            0 => Ok(CfaColor::Red),
            1 => Ok(CfaColor::Green),
            2 => Ok(CfaColor::Blue),
            other => Err(ConversionError::UnsupportedFormat(format!(
                "CFA colour {} at ({}, {})",
                other, row, col
            ))),
        }
    };

    for row in 0..CFA_PERIOD_CHECK {
        for col in 0..CFA_PERIOD_CHECK {
            if color(row, col)? != color(row % 2, col % 2)? {
                return Err(ConversionError::UnsupportedFormat(
                    "colour filter array is not a 2x2 Bayer pattern".to_string(),
                ));
            }
        }
    }

    let quad = [color(0, 0)?, color(0, 1)?, color(1, 0)?, color(1, 1)?];
    CfaPattern::from_quad(quad).ok_or_else(|| {
        ConversionError::UnsupportedFormat(format!("colour filter array {:?}", quad))
    })
}

/// Camera to XYZ matrix, or the sRGB matrix when the camera isn't characterised.
fn camera_matrix(decoded: &rawloader::RawImage) -> [[f32; 3]; 3] {
    let full = decoded.cam_to_xyz_normalized();
    let mut matrix = [[0.0f32; 3]; 3];
    for (row, full_row) in matrix.iter_mut().zip(full.iter()) {
        row.copy_from_slice(&full_row[..3]);
    }

    let usable = matrix.iter().flatten().all(|v| v.is_finite())
        && matrix.iter().flatten().any(|v| *v != 0.0);
    if usable {
        matrix
    } else {
        debug!("No usable colour matrix, falling back to sRGB");
        SRGB_TO_XYZ
    }
}

/// As-shot multipliers normalised to green; neutral when the camera gives none.
fn white_balance(coeffs: [f32; 4]) -> [f32; 3] {
    let [r, g, b, _] = coeffs;
    if [r, g, b].iter().all(|v| v.is_finite() && *v > 0.0) {
        [r / g, 1.0, b / g]
    } else {
        [1.0; 3]
    }
}
