//! Resampling kernels.
//!
//! Nearest and bilinear have no weight function here; they are direct lookups
//! in [`crate::resample`]. The convolution kernels below are evaluated only
//! inside their declared support radius.

use std::f64::consts::PI;

use crate::CubemapError;

/// Free parameter of the Catmull-Rom family cubic.
pub const BICUBIC_B: f64 = -0.5;

/// Support radius of the bicubic kernel (4 taps per axis).
pub const BICUBIC_RADIUS: usize = 2;

/// Cubic convolution weight for a signed offset `x`.
///
/// Zero beyond `|x| > 2`.
#[inline]
#[must_use]
pub fn bicubic(x: f64) -> f64 {
    let b = BICUBIC_B;
    let x = x.abs();
    let x2 = x * x;
    let x3 = x2 * x;
    if x <= 1.0 {
        (b + 2.0) * x3 - (b + 3.0) * x2 + 1.0
    } else if x <= 2.0 {
        b * x3 - 5.0 * b * x2 + 8.0 * b * x - 4.0 * b
    } else {
        0.0
    }
}

/// Lanczos-windowed sinc with support radius `a`.
#[inline]
#[must_use]
pub fn lanczos(x: f64, a: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let xp = PI * x;
    a * xp.sin() * (xp / a).sin() / (xp * xp)
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Bicubic {}
    impl Sealed for super::Lanczos {}
}

/// A separable convolution kernel with a fixed support radius.
///
/// `weight` is only ever evaluated for offsets within `radius` of zero.
/// Implemented by [`Bicubic`] and [`Lanczos`] only.
pub trait Kernel: sealed::Sealed {
    /// Samples needed on each side of the fractional coordinate.
    /// Must not exceed [`MAX_KERNEL_RADIUS`].
    fn radius(&self) -> usize;

    /// Weight for a signed offset from the sample position.
    fn weight(&self, x: f64) -> f64;
}

/// Largest support radius any [`Kernel`] may declare.
pub const MAX_KERNEL_RADIUS: usize = 5;

/// The b = -0.5 cubic, radius 2.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bicubic;

impl Kernel for Bicubic {
    #[inline]
    fn radius(&self) -> usize {
        BICUBIC_RADIUS
    }

    #[inline]
    fn weight(&self, x: f64) -> f64 {
        bicubic(x)
    }
}

/// Lanczos-windowed sinc with a configurable radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lanczos {
    taps: usize,
    a: f64,
}

impl Lanczos {
    /// Lanczos kernel of the given radius.
    #[must_use]
    pub fn new(radius: LanczosRadius) -> Self {
        let taps = radius.taps();
        Self {
            taps,
            a: taps as f64,
        }
    }
}

impl Kernel for Lanczos {
    #[inline]
    fn radius(&self) -> usize {
        self.taps
    }

    #[inline]
    fn weight(&self, x: f64) -> f64 {
        lanczos(x, self.a)
    }
}

/// Support radius of the Lanczos kernel.
///
/// Five taps per side is sharper and roughly 2.8x more expensive per pixel
/// than three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LanczosRadius {
    /// Lanczos-3: 6 taps per axis.
    Three,
    /// Lanczos-5: 10 taps per axis.
    #[default]
    Five,
}

impl LanczosRadius {
    /// Samples needed on each side of the fractional coordinate.
    #[inline]
    #[must_use]
    pub fn taps(self) -> usize {
        match self {
            LanczosRadius::Three => 3,
            LanczosRadius::Five => 5,
        }
    }
}

impl TryFrom<u32> for LanczosRadius {
    type Error = CubemapError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(LanczosRadius::Three),
            5 => Ok(LanczosRadius::Five),
            other => Err(CubemapError::UnsupportedLanczosRadius(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn offsets() -> impl Iterator<Item = f64> {
        (0..=200).map(|i| i as f64 * 0.025)
    }

    #[test]
    fn test_bicubic_unit_at_origin() {
        assert_eq!(bicubic(0.0), 1.0);
    }

    #[test]
    fn test_bicubic_zero_at_integers() {
        for x in [1.0, 2.0, -1.0, -2.0] {
            assert!(bicubic(x).abs() < EPSILON, "bicubic({x}) = {}", bicubic(x));
        }
    }

    #[test]
    fn test_bicubic_symmetric() {
        for x in offsets() {
            assert_eq!(bicubic(x), bicubic(-x));
        }
    }

    #[test]
    fn test_bicubic_continuous_at_one() {
        let below = bicubic(1.0 - 1e-9);
        let above = bicubic(1.0 + 1e-9);
        assert!((below - above).abs() < 1e-6);
    }

    #[test]
    fn test_bicubic_outside_support_is_zero() {
        assert_eq!(bicubic(2.5), 0.0);
        assert_eq!(bicubic(-7.0), 0.0);
    }

    #[test]
    fn test_bicubic_partition_of_unity() {
        for k in 0..10 {
            let frac = k as f64 / 10.0;
            let sum: f64 = (-1..=2).map(|i| bicubic(frac - i as f64)).sum();
            assert!((sum - 1.0).abs() < 1e-9, "weights at {frac} sum to {sum}");
        }
    }

    #[test]
    fn test_lanczos_unit_at_origin() {
        for radius in [LanczosRadius::Three, LanczosRadius::Five] {
            assert_eq!(lanczos(0.0, radius.taps() as f64), 1.0);
        }
    }

    #[test]
    fn test_lanczos_symmetric() {
        for radius in [3.0, 5.0] {
            for x in offsets() {
                assert!((lanczos(x, radius) - lanczos(-x, radius)).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_lanczos_zero_at_nonzero_integers() {
        for radius in [3.0, 5.0] {
            for i in 1..5 {
                assert!(lanczos(i as f64, radius).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_lanczos_continuous_near_origin() {
        assert!((lanczos(1e-6, 5.0) - 1.0).abs() < 1e-9);
        assert!((lanczos(-1e-6, 3.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_lanczos_has_negative_lobe() {
        assert!(lanczos(1.5, 3.0) < 0.0);
        assert!(lanczos(1.5, 5.0) < 0.0);
    }

    #[test]
    fn test_lanczos_radius_from_u32() {
        assert_eq!(LanczosRadius::try_from(3).unwrap(), LanczosRadius::Three);
        assert_eq!(LanczosRadius::try_from(5).unwrap(), LanczosRadius::Five);
        assert!(matches!(
            LanczosRadius::try_from(4),
            Err(CubemapError::UnsupportedLanczosRadius(4))
        ));
    }

    #[test]
    fn test_kernel_structs_match_functions() {
        let cubic = Bicubic;
        let l3 = Lanczos::new(LanczosRadius::Three);
        let l5 = Lanczos::new(LanczosRadius::Five);
        assert_eq!(cubic.radius(), 2);
        assert_eq!(l3.radius(), 3);
        assert_eq!(l5.radius(), 5);
        for x in offsets() {
            assert_eq!(cubic.weight(x), bicubic(x));
            assert_eq!(l3.weight(x), lanczos(x, 3.0));
            assert_eq!(l5.weight(x), lanczos(x, 5.0));
        }
        assert!(l5.radius() <= MAX_KERNEL_RADIUS);
    }

    #[test]
    fn test_default_lanczos_radius_is_five() {
        assert_eq!(LanczosRadius::default(), LanczosRadius::Five);
        assert_eq!(LanczosRadius::default().taps(), 5);
    }
}
