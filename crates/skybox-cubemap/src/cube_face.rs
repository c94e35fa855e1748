//! The six cubemap faces and their fixed orientation table.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;

use crate::CubemapError;

/// The six faces of the cubemap.
///
/// The discriminant is the face's slot in [`CubeFace::ALL`] and in
/// [`crate::Cubemap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    /// +Z face (`pz`), centred on longitude π.
    PosZ = 0,
    /// −Z face (`nz`), centred on longitude 0.
    NegZ = 1,
    /// +X face (`px`), centred on longitude 3π/2.
    PosX = 2,
    /// −X face (`nx`), centred on longitude π/2.
    NegX = 3,
    /// +Y face (`py`), the zenith.
    PosY = 4,
    /// −Y face (`ny`), the nadir.
    NegY = 5,
}

impl CubeFace {
    /// All six faces in canonical order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosZ,
        CubeFace::NegZ,
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
    ];

    /// Slot of this face in [`CubeFace::ALL`].
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short token used in file names and on the command line.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            CubeFace::PosZ => "pz",
            CubeFace::NegZ => "nz",
            CubeFace::PosX => "px",
            CubeFace::NegX => "nx",
            CubeFace::PosY => "py",
            CubeFace::NegY => "ny",
        }
    }

    /// Map a face-local point `(x, y)` in `[-1, 1]²` to the surface of the
    /// side-2 cube centred at the origin.
    ///
    /// `x` grows to the right and `y` grows downwards in the output image.
    /// The sign/axis assignment is fixed; it produces faces that tile a
    /// horizontal-cross layout without seams.
    #[inline]
    #[must_use]
    pub fn cube_point(self, x: f64, y: f64) -> DVec3 {
        match self {
            CubeFace::PosZ => DVec3::new(-1.0, -x, -y),
            CubeFace::NegZ => DVec3::new(1.0, x, -y),
            CubeFace::PosX => DVec3::new(x, -1.0, -y),
            CubeFace::NegX => DVec3::new(-x, 1.0, -y),
            CubeFace::PosY => DVec3::new(-y, -x, 1.0),
            CubeFace::NegY => DVec3::new(y, -x, -1.0),
        }
    }

    /// Cell `(column, row)` of this face in a 4×3 horizontal cross.
    #[must_use]
    pub fn cross_cell(self) -> (u32, u32) {
        match self {
            CubeFace::NegX => (0, 1),
            CubeFace::PosZ => (1, 1),
            CubeFace::PosX => (2, 1),
            CubeFace::NegZ => (3, 1),
            CubeFace::PosY => (1, 0),
            CubeFace::NegY => (1, 2),
        }
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for CubeFace {
    type Err = CubemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CubeFace::ALL
            .into_iter()
            .find(|face| face.token() == s)
            .ok_or_else(|| CubemapError::UnknownFace(s.to_string()))
    }
}
