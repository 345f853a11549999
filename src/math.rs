//! Math helpers shared across the crate.

pub use glam::Vec3;

/// Linear interpolation between `a` and `b` by factor `t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convert a direction vector into polar `(elevation, azimuth)` radians.
///
/// Uses the engine convention of `-Z` forward and `+Y` up: elevation is
/// positive above the horizontal plane and lands in `[-π/2, π/2]`, azimuth
/// is 0 straight ahead and increases clockwise (toward `+X`).
///
/// A zero-length direction maps to straight ahead, `(0.0, 0.0)`.
pub fn direction_angles(dir: Vec3) -> (f32, f32) {
    let len = dir.length();
    if len < 1e-6 {
        return (0.0, 0.0);
    }
    let d = dir / len;
    let elevation = d.y.clamp(-1.0, 1.0).asin();
    let azimuth = d.x.atan2(-d.z);
    (elevation, azimuth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn angles_for_cardinal_directions() {
        let (ev, az) = direction_angles(Vec3::new(0.0, 0.0, -1.0));
        assert!(ev.abs() < 1e-6);
        assert!(az.abs() < 1e-6);

        let (ev, _) = direction_angles(Vec3::new(0.0, 1.0, 0.0));
        assert!((ev - FRAC_PI_2).abs() < 1e-6);

        let (ev, az) = direction_angles(Vec3::new(1.0, 0.0, 0.0));
        assert!(ev.abs() < 1e-6);
        assert!((az - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_maps_to_front() {
        assert_eq!(direction_angles(Vec3::ZERO), (0.0, 0.0));
    }

    #[test]
    fn elevation_ignores_magnitude() {
        let short = direction_angles(Vec3::new(0.2, 0.2, -0.2));
        let long = direction_angles(Vec3::new(2.0, 2.0, -2.0));
        assert!((short.0 - long.0).abs() < 1e-6);
        assert!((short.1 - long.1).abs() < 1e-6);
    }
}
