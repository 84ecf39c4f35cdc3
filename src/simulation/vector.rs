//! Guarded vector helpers.
//!
//! Addition, subtraction and scaling come straight from nalgebra's operators;
//! this module only adds the normalization guard every caller needs.

use super::error::{SimError, SimResult};
use super::states::NVec3;

/// Magnitudes at or below this are treated as zero
pub const NORMALIZE_EPS: f64 = 1e-12;

/// Unit vector along `v`, or `DegenerateVector` if `v` is (nearly) zero
pub fn normalize(v: &NVec3) -> SimResult<NVec3> {
    let mag = v.norm();
    if mag <= NORMALIZE_EPS || !mag.is_finite() {
        return Err(SimError::DegenerateVector(mag));
    }
    Ok(v / mag)
}

/// Pull `point` back onto the sphere `(center, radius)` if it lies outside.
/// Points inside are returned unchanged.
pub fn clamp_to_sphere(point: NVec3, center: &NVec3, radius: f64) -> NVec3 {
    let offset = point - center;
    if offset.norm() <= radius {
        return point;
    }
    match normalize(&offset) {
        Ok(dir) => center + dir * radius,
        Err(_) => point,
    }
}
