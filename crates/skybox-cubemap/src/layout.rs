//! Output naming and the horizontal-cross sheet.

use image::RgbaImage;

use crate::{CubeFace, Cubemap};

/// File name of one exported face, e.g. `beach_pz.png`.
#[must_use]
pub fn face_file_name(stem: &str, face: CubeFace) -> String {
    format!("{stem}_{face}.png")
}

/// Dimensions of a 4×3 horizontal cross with faces of side `face_size`.
#[must_use]
pub fn cross_sheet_size(face_size: u32) -> (u32, u32) {
    (face_size * 4, face_size * 3)
}

/// Lay the six faces out as a horizontal cross.
///
/// ```text
///       [py]
/// [nx] [pz] [px] [nz]
///       [ny]
/// ```
///
/// Cells without a face stay fully transparent.
#[must_use]
pub fn compose_cross(cubemap: &Cubemap) -> RgbaImage {
    let size = cubemap.size();
    let (width, height) = cross_sheet_size(size);
    let mut sheet = RgbaImage::new(width, height);
    for (face, image) in cubemap.iter() {
        let (col, row) = face.cross_cell();
        image::imageops::replace(&mut sheet, image, i64::from(col * size), i64::from(row * size));
    }
    sheet
}
