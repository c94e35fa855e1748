//! Cube surface point to equirectangular source coordinate.

use std::f64::consts::{PI, TAU};

use glam::{DVec2, DVec3};

/// Wrap an angle into `[0, 2π)`.
///
/// Uses a non-negative modulo, so negative inputs wrap from the top.
#[inline]
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    ((angle % TAU) + TAU) % TAU
}

/// Projects directions onto the pixel grid of an equirectangular image.
///
/// Longitude runs left to right over the full width, latitude (measured from
/// the +Z pole) top to bottom over the full height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalProjector {
    width: f64,
    height: f64,
    rotation: f64,
}

impl SphericalProjector {
    /// Projector for a `width`×`height` source, rotated by `rotation` radians
    /// about the vertical axis.
    ///
    /// The rotation is wrapped into `[0, 2π)` up front, so whole turns are
    /// an exact no-op.
    #[must_use]
    pub fn new(width: u32, height: u32, rotation: f64) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
            rotation: wrap_angle(rotation),
        }
    }

    /// Longitude in `[0, 2π)` and latitude in `[0, π]` of `point`.
    ///
    /// `point` need not be normalised but must not be the zero vector.
    #[inline]
    #[must_use]
    pub fn lon_lat(&self, point: DVec3) -> (f64, f64) {
        let r = point.length();
        let lon = wrap_angle(point.y.atan2(point.x) + self.rotation);
        let lat = (point.z / r).clamp(-1.0, 1.0).acos();
        (lon, lat)
    }

    /// Fractional source pixel for `point`.
    ///
    /// The `-0.5` shift puts integer coordinates on pixel centres.
    #[inline]
    #[must_use]
    pub fn source_coord(&self, point: DVec3) -> DVec2 {
        let (lon, lat) = self.lon_lat(point);
        DVec2::new(
            self.width * lon / TAU - 0.5,
            self.height * lat / PI - 0.5,
        )
    }
}
