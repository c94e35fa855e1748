//! Single-face rendering.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use tracing::debug;

use crate::kernel::{Bicubic, Lanczos, LanczosRadius};
use crate::resample::{Bilinear, KernelResampler, Nearest, Resampler, SourceView};
use crate::{CubeFace, CubemapError, SphericalProjector};

/// Interpolation used to reconstruct source colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Nearest neighbour.
    Nearest,
    /// Bilinear blend of four pixels.
    Linear,
    /// Bicubic convolution, 4×4 taps.
    Cubic,
    /// Lanczos convolution, radius from [`LanczosRadius`].
    #[default]
    Lanczos,
}

impl Interpolation {
    /// All interpolation kinds, cheapest first.
    pub const ALL: [Interpolation; 4] = [
        Interpolation::Nearest,
        Interpolation::Linear,
        Interpolation::Cubic,
        Interpolation::Lanczos,
    ];

    /// Token accepted by [`FromStr`].
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Linear => "linear",
            Interpolation::Cubic => "cubic",
            Interpolation::Lanczos => "lanczos",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Interpolation {
    type Err = CubemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interpolation::ALL
            .into_iter()
            .find(|kind| kind.token() == s)
            .ok_or_else(|| CubemapError::UnknownInterpolation(s.to_string()))
    }
}

/// Everything needed to render one face.
#[derive(Clone, Copy, Debug)]
pub struct RenderRequest<'a> {
    /// Equirectangular source; never modified.
    pub source: &'a RgbaImage,
    /// Face to render.
    pub face: CubeFace,
    /// Rotation about the vertical axis, in radians.
    pub rotation: f64,
    /// Reconstruction filter.
    pub interpolation: Interpolation,
    /// Upper bound on the face side; `None` means `source_width / 4`.
    pub max_width: Option<u32>,
    /// Support radius used when `interpolation` is Lanczos.
    pub lanczos_radius: LanczosRadius,
}

impl<'a> RenderRequest<'a> {
    /// Unrotated, full-size Lanczos render of `face`.
    #[must_use]
    pub fn new(source: &'a RgbaImage, face: CubeFace) -> Self {
        Self {
            source,
            face,
            rotation: 0.0,
            interpolation: Interpolation::default(),
            max_width: None,
            lanczos_radius: LanczosRadius::default(),
        }
    }

    /// Set the rotation in radians.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the interpolation kind.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Cap the face side length.
    #[must_use]
    pub fn with_max_width(mut self, max_width: Option<u32>) -> Self {
        self.max_width = max_width;
        self
    }

    /// Set the Lanczos support radius.
    #[must_use]
    pub fn with_lanczos_radius(mut self, radius: LanczosRadius) -> Self {
        self.lanczos_radius = radius;
        self
    }
}

/// Side length of a face rendered from a source `source_width` pixels wide.
#[must_use]
pub fn face_size(source_width: u32, max_width: Option<u32>) -> u32 {
    let quarter = source_width / 4;
    max_width.map_or(quarter, |max| max.min(quarter))
}

/// Render one cube face from an equirectangular source.
///
/// The output is square and fully opaque. Pixels projecting outside the
/// source are edge-clamped, so the only failures are invalid requests.
pub fn render_face(request: &RenderRequest<'_>) -> Result<RgbaImage, CubemapError> {
    let source = SourceView::new(request.source)?;
    let (source_width, source_height) = request.source.dimensions();
    let size = face_size(source_width, request.max_width);
    if size == 0 {
        return Err(CubemapError::EmptyFace {
            source_width,
            max_width: request.max_width,
        });
    }

    let projector = SphericalProjector::new(source_width, source_height, request.rotation);
    let face = request.face;

    let image = match request.interpolation {
        Interpolation::Nearest => render_with(&source, face, &projector, size, &Nearest),
        Interpolation::Linear => render_with(&source, face, &projector, size, &Bilinear),
        Interpolation::Cubic => {
            render_with(&source, face, &projector, size, &KernelResampler::new(Bicubic))
        }
        Interpolation::Lanczos => {
            let kernel = Lanczos::new(request.lanczos_radius);
            render_with(&source, face, &projector, size, &KernelResampler::new(kernel))
        }
    };

    debug!(
        face = %face,
        size,
        interpolation = %request.interpolation,
        "rendered cube face"
    );
    Ok(image)
}

fn render_with<R: Resampler>(
    source: &SourceView<'_>,
    face: CubeFace,
    projector: &SphericalProjector,
    size: u32,
    resampler: &R,
) -> RgbaImage {
    let mut image = RgbaImage::new(size, size);
    let side = f64::from(size);
    let stride = size as usize * 4;

    let pixels: &mut [u8] = &mut image;
    for (y, row) in pixels.chunks_exact_mut(stride).enumerate() {
        let v = 2.0 * (y as f64 + 0.5) / side - 1.0;
        for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
            let u = 2.0 * (x as f64 + 0.5) / side - 1.0;
            let src = projector.source_coord(face.cube_point(u, v));
            let [r, g, b] = resampler.sample(source, src.x, src.y);
            pixel.copy_from_slice(&[r, g, b, u8::MAX]);
        }
    }
    image
}
