//! Angle conversions between linear drag distance and wheel rotation.

/// Converts degrees to radians.
#[inline]
pub fn angle_to_radian(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Converts radians to degrees. Exact inverse of [`angle_to_radian`].
#[inline]
pub fn radian_to_angle(rad: f32) -> f32 {
    rad * 180.0 / std::f32::consts::PI
}

/// Maps a linear drag distance to the rotation of a wheel of the given radius.
///
/// The drag is treated as arc length on a circle of that radius, so
/// `distance_to_angle(r * θ, r)` recovers `θ` (in degrees).
#[inline]
pub fn distance_to_angle(distance: f32, radius: f32) -> f32 {
    radian_to_angle(distance / radius)
}
