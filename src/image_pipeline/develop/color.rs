//! Camera RGB to linear sRGB

use crate::image_pipeline::debayer::RgbImageData;

/// Standard XYZ to sRGB D65 matrix
pub const XYZ_TO_SRGB: [[f32; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// Combined camera -> XYZ -> sRGB matrix.
pub fn camera_to_srgb(cam_to_xyz: &[[f32; 3]; 3]) -> [[f32; 3]; 3] {
    let mut out = [[0.0f32; 3]; 3];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, value) in row.iter_mut().enumerate() {
            *value = (0..3).map(|k| XYZ_TO_SRGB[r][k] * cam_to_xyz[k][c]).sum();
        }
    }
    out
}

/// Converts every pixel in place, clipping to the u16 range.
pub fn convert_in_place(image: &mut RgbImageData, matrix: &[[f32; 3]; 3]) {
    for px in image.data.chunks_exact_mut(3) {
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        for (out, row) in px.iter_mut().zip(matrix.iter()) {
            let v = row[0] * r + row[1] * g + row[2] * b;
            *out = v.clamp(0.0, u16::MAX as f32).round() as u16;
        }
    }
}
