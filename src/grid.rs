//! Spherical grid indexing: continuous angles to bounding grid indices.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Map a polar elevation in `[-π/2, π/2]` onto the dataset's elevation
/// rings.
///
/// Returns the two bounding ring indices plus the blend fraction toward the
/// second one. Elevation does not wrap: both indices clamp at the poles, so
/// at either pole the pair degenerates to the pole ring with fraction 0.
pub(crate) fn ev_indices(ev_count: usize, ev: f32) -> ([usize; 2], f32) {
    let x = (FRAC_PI_2 + ev) * (ev_count - 1) as f32 / PI;
    let x = x.clamp(0.0, (ev_count - 1) as f32);
    let idx0 = x as usize;
    let idx1 = usize::min(idx0 + 1, ev_count - 1);
    ([idx0, idx1], x - idx0 as f32)
}

/// Map a polar azimuth (any real radians) onto an elevation ring with
/// `az_count` samples.
///
/// Returns the two bounding indices plus the blend fraction toward the
/// second one. Azimuth is periodic: the angle is reduced modulo 2π and both
/// indices wrap circularly around the ring.
pub(crate) fn az_indices(az_count: usize, az: f32) -> ([usize; 2], f32) {
    let x = az.rem_euclid(TAU) * az_count as f32 / TAU;
    let idx0 = (x as usize) % az_count;
    let idx1 = (idx0 + 1) % az_count;
    ([idx0, idx1], x.fract())
}

/// Nearest elevation ring for `ev`, rounding to the closest ring.
pub(crate) fn nearest_ev_index(ev_count: usize, ev: f32) -> usize {
    let x = (FRAC_PI_2 + ev) * (ev_count - 1) as f32 / PI + 0.5;
    usize::min(x.max(0.0) as usize, ev_count - 1)
}

/// Nearest azimuth sample on a ring of `az_count`, rounding and wrapping.
pub(crate) fn nearest_az_index(az_count: usize, az: f32) -> usize {
    let x = az.rem_euclid(TAU) * az_count as f32 / TAU + 0.5;
    (x as usize) % az_count
}

/// Right-ear direction index for a left-ear azimuth index on a ring.
///
/// The dataset stores a single hemisphere; the other ear reuses it by
/// mirroring the azimuth around the median plane.
pub(crate) fn mirror_az(az_count: usize, idx: usize) -> usize {
    (az_count - idx) % az_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevation_clamps_at_both_poles() {
        let (idx, mu) = ev_indices(5, -FRAC_PI_2);
        assert_eq!(idx, [0, 1]);
        assert_eq!(mu, 0.0);

        let (idx, mu) = ev_indices(5, FRAC_PI_2);
        assert_eq!(idx, [4, 4]);
        assert_eq!(mu, 0.0);
    }

    #[test]
    fn elevation_blend_fraction_between_rings() {
        // Halfway between ring 2 (0°) and ring 3 (45°) on a 5-ring grid.
        let (idx, mu) = ev_indices(5, PI / 8.0);
        assert_eq!(idx, [2, 3]);
        assert!((mu - 0.5).abs() < 1e-5);
    }

    #[test]
    fn azimuth_wraps_circularly() {
        let (idx, mu) = az_indices(8, 0.0);
        assert_eq!(idx, [0, 1]);
        assert_eq!(mu, 0.0);

        // Just shy of a full turn interpolates between the last sample and 0.
        let (idx, _) = az_indices(8, TAU * 15.0 / 16.0);
        assert_eq!(idx, [7, 0]);
    }

    #[test]
    fn azimuth_accepts_any_real_angle() {
        for &az in &[0.3f32, 1.7, 4.0] {
            let pos = az_indices(8, az);
            let shifted = az_indices(8, az + TAU);
            let negative = az_indices(8, az - 3.0 * TAU);
            assert_eq!(pos.0, shifted.0);
            assert_eq!(pos.0, negative.0);
            assert!((pos.1 - shifted.1).abs() < 1e-4);
            assert!((pos.1 - negative.1).abs() < 1e-4);
        }
    }

    #[test]
    fn nearest_indices_round() {
        // 35.264° rounds up to the 45° ring on a 5-ring grid.
        assert_eq!(nearest_ev_index(5, 35.264f32.to_radians()), 3);
        assert_eq!(nearest_ev_index(5, -35.264f32.to_radians()), 1);
        assert_eq!(nearest_ev_index(5, FRAC_PI_2), 4);

        assert_eq!(nearest_az_index(8, (-45.0f32).to_radians()), 7);
        assert_eq!(nearest_az_index(8, 45.0f32.to_radians()), 1);
        assert_eq!(nearest_az_index(8, 135.0f32.to_radians()), 3);
    }

    #[test]
    fn mirror_is_involutive_and_fixes_the_median() {
        assert_eq!(mirror_az(8, 0), 0);
        assert_eq!(mirror_az(8, 3), 5);
        assert_eq!(mirror_az(8, mirror_az(8, 3)), 3);
        assert_eq!(mirror_az(1, 0), 0);
    }
}
