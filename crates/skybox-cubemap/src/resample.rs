//! Colour reconstruction at fractional source coordinates.
//!
//! All resamplers clamp out-of-range taps to the nearest edge pixel. Only the
//! RGB channels are reconstructed; the face renderer writes alpha itself.

use image::RgbaImage;

use crate::CubemapError;
use crate::kernel::{Kernel, MAX_KERNEL_RADIUS};

const CHANNELS: usize = 4;
const MAX_TAPS: usize = 2 * MAX_KERNEL_RADIUS;

/// Read-only view over a non-empty RGBA8 source image.
#[derive(Clone, Copy, Debug)]
pub struct SourceView<'a> {
    width: usize,
    height: usize,
    data: &'a [u8],
}

impl<'a> SourceView<'a> {
    /// Borrow `image`, rejecting zero-sized images.
    pub fn new(image: &'a RgbaImage) -> Result<Self, CubemapError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CubemapError::EmptySource { width, height });
        }
        Ok(Self {
            width: width as usize,
            height: height as usize,
            data: image.as_raw(),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Clamp a column index into `[0, width - 1]`.
    #[inline]
    pub fn clamp_x(&self, x: i64) -> usize {
        x.clamp(0, self.width as i64 - 1) as usize
    }

    /// Clamp a row index into `[0, height - 1]`.
    #[inline]
    pub fn clamp_y(&self, y: i64) -> usize {
        y.clamp(0, self.height as i64 - 1) as usize
    }

    /// Samples of row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let stride = self.width * CHANNELS;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// The four samples of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &'a [u8] {
        let start = (y * self.width + x) * CHANNELS;
        &self.data[start..start + CHANNELS]
    }
}

/// Reconstructs an RGB triple at a fractional source coordinate.
///
/// Integer coordinates address pixel centres.
pub trait Resampler {
    /// Colour at `(x, y)`; coordinates outside the image are edge-clamped.
    fn sample(&self, source: &SourceView<'_>, x: f64, y: f64) -> [u8; 3];
}

/// Nearest-neighbour lookup (round half up, then clamp).
#[derive(Clone, Copy, Debug, Default)]
pub struct Nearest;

impl Resampler for Nearest {
    #[inline]
    fn sample(&self, source: &SourceView<'_>, x: f64, y: f64) -> [u8; 3] {
        let px = source.clamp_x((x + 0.5).floor() as i64);
        let py = source.clamp_y((y + 0.5).floor() as i64);
        let p = source.pixel(px, py);
        [p[0], p[1], p[2]]
    }
}

/// Four-tap bilinear blend, horizontal then vertical.
///
/// The blended value is rounded up, not to nearest. Existing cubemaps were
/// produced that way and stay pixel-identical.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bilinear;

impl Resampler for Bilinear {
    #[inline]
    fn sample(&self, source: &SourceView<'_>, x: f64, y: f64) -> [u8; 3] {
        let xl = source.clamp_x(x.floor() as i64);
        let xr = source.clamp_x(x.ceil() as i64);
        let xf = x - xl as f64;

        let yl = source.clamp_y(y.floor() as i64);
        let yr = source.clamp_y(y.ceil() as i64);
        let yf = y - yl as f64;

        let p00 = source.pixel(xl, yl);
        let p10 = source.pixel(xr, yl);
        let p01 = source.pixel(xl, yr);
        let p11 = source.pixel(xr, yr);

        let mut out = [0u8; 3];
        for (c, slot) in out.iter_mut().enumerate() {
            let p0 = f64::from(p00[c]) * (1.0 - xf) + f64::from(p10[c]) * xf;
            let p1 = f64::from(p01[c]) * (1.0 - xf) + f64::from(p11[c]) * xf;
            *slot = (p0 * (1.0 - yf) + p1 * yf).ceil() as u8;
        }
        out
    }
}

/// General separable convolution with a [`Kernel`].
///
/// Evaluates `2a` kernel weights per axis and blends a `2a × 2a` window.
#[derive(Clone, Copy, Debug)]
pub struct KernelResampler<K> {
    kernel: K,
    radius: usize,
}

impl<K: Kernel> KernelResampler<K> {
    /// Wrap `kernel`.
    pub fn new(kernel: K) -> Self {
        let radius = kernel.radius();
        debug_assert!((1..=MAX_KERNEL_RADIUS).contains(&radius));
        Self { kernel, radius }
    }

    /// Support radius of the wrapped kernel.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Unquantized RGB sums at `(x, y)`.
    ///
    /// Negative-lobed kernels can ring past `[0, 255]` next to hard edges.
    pub fn accumulate(&self, source: &SourceView<'_>, x: f64, y: f64) -> [f64; 3] {
        let taps = 2 * self.radius;
        let a = self.radius as i64;
        let x_start = x.floor() as i64 - a + 1;
        let y_start = y.floor() as i64 - a + 1;

        let mut x_weights = [0.0f64; MAX_TAPS];
        let mut y_weights = [0.0f64; MAX_TAPS];
        for i in 0..taps {
            x_weights[i] = self.kernel.weight(x - (x_start + i as i64) as f64);
            y_weights[i] = self.kernel.weight(y - (y_start + i as i64) as f64);
        }

        let mut columns = [0usize; MAX_TAPS];
        for (j, col) in columns[..taps].iter_mut().enumerate() {
            *col = source.clamp_x(x_start + j as i64) * CHANNELS;
        }

        let mut acc = [0.0f64; 3];
        for (i, &wy) in y_weights[..taps].iter().enumerate() {
            let row = source.row(source.clamp_y(y_start + i as i64));
            let mut blended = [0.0f64; 3];
            for (&col, &wx) in columns[..taps].iter().zip(&x_weights[..taps]) {
                for (c, sum) in blended.iter_mut().enumerate() {
                    *sum += f64::from(row[col + c]) * wx;
                }
            }
            for (total, row_sum) in acc.iter_mut().zip(blended) {
                *total += row_sum * wy;
            }
        }
        acc
    }
}

impl<K: Kernel> Resampler for KernelResampler<K> {
    #[inline]
    fn sample(&self, source: &SourceView<'_>, x: f64, y: f64) -> [u8; 3] {
        // `as u8` saturates, so ringing past the byte range pins to 0 or 255.
        self.accumulate(source, x, y).map(|v| v.round() as u8)
    }
}
