//! Brightness and gamma: linear 16-bit to display-ready 8-bit

use crate::image_pipeline::debayer::RgbImageData;

/// Histogram resolution; samples are binned by their top 13 bits.
const HISTOGRAM_BINS: usize = 0x2000;
const HISTOGRAM_SHIFT: u32 = 3;

/// Lowest white point auto-brightening may pick, so near-black frames aren't blown up.
const MIN_WHITE_BIN: usize = 32;

/// BT.709 transfer curve parameters (power 0.45, toe slope 4.5).
const GAMMA_POWER: f32 = 0.45;
const GAMMA_TOE_SLOPE: f32 = 4.5;
const GAMMA_TOE_END: f32 = 0.018;

/// Linear value that maps to full white.
///
/// Walks each channel's histogram down from the top until more than
/// `threshold` of the pixels lie above, and keeps the brightest channel's point.
pub fn auto_white_point(image: &RgbImageData, threshold: f32) -> u32 {
    let mut histograms = vec![[0u32; HISTOGRAM_BINS]; 3];
    for px in image.data.chunks_exact(3) {
        for (c, &v) in px.iter().enumerate() {
            histograms[c][(v >> HISTOGRAM_SHIFT) as usize] += 1;
        }
    }

    let allowed = (image.width * image.height) as f64 * threshold as f64;
    let mut white_bin = MIN_WHITE_BIN;
    for histogram in &histograms {
        let mut total = 0u64;
        let mut bin = HISTOGRAM_BINS - 1;
        while bin > MIN_WHITE_BIN {
            total += histogram[bin] as u64;
            if total as f64 > allowed {
                break;
            }
            bin -= 1;
        }
        white_bin = white_bin.max(bin);
    }

    ((white_bin as u32) << HISTOGRAM_SHIFT).max(1)
}

/// 65536 entry table mapping linear samples to gamma encoded bytes,
/// with `white` mapping to 255.
pub fn tone_lut(white: u32) -> Vec<u8> {
    let white = white.max(1) as f32;
    (0..=u16::MAX as u32)
        .map(|v| {
            let x = (v as f32 / white).min(1.0);
            (bt709(x) * 255.0).round() as u8
        })
        .collect()
}

#[inline]
fn bt709(x: f32) -> f32 {
    if x < GAMMA_TOE_END {
        x * GAMMA_TOE_SLOPE
    } else {
        1.099 * x.powf(GAMMA_POWER) - 0.099
    }
}
