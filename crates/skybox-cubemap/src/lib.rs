//! Equirectangular panorama to cubemap reprojection.
//!
//! Each destination face pixel is mapped onto the cube surface, projected onto
//! the sphere, converted to a fractional source pixel and reconstructed with
//! one of four resampling kernels (nearest, bilinear, bicubic, Lanczos).
//!
//! [`render_face`] is a pure, single-threaded call. [`render_cubemap`] and
//! [`render_cubemap_progressive`] run one render per face on worker threads.

mod cube_face;
mod dispatch;
mod error;
mod kernel;
mod layout;
mod projection;
mod render;
mod resample;

pub use cube_face::CubeFace;
pub use dispatch::{
    CancelToken, Cubemap, CubemapSettings, FaceUpdate, RenderStage, render_cubemap,
    render_cubemap_progressive,
};
pub use error::CubemapError;
pub use kernel::{
    BICUBIC_B, BICUBIC_RADIUS, Bicubic, Kernel, Lanczos, LanczosRadius, MAX_KERNEL_RADIUS, bicubic,
    lanczos,
};
pub use layout::{compose_cross, cross_sheet_size, face_file_name};
pub use projection::{SphericalProjector, wrap_angle};
pub use render::{Interpolation, RenderRequest, face_size, render_face};
pub use resample::{Bilinear, KernelResampler, Nearest, Resampler, SourceView};
