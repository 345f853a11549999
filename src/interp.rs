//! Bilinear spherical interpolation of HRIR coefficients and delays.

use crate::dataset::{Hrtf, HRTF_DELAY_BITS, PASSTHRU_COEFF};
use crate::grid::{az_indices, ev_indices, mirror_az};
use crate::math::lerp;
use std::f32::consts::TAU;

/// Gains at or below this threshold produce silent (all-zero) coefficients.
const SILENCE_GAIN: f32 = 0.0001;

impl Hrtf {
    /// Compute interpolated HRIR coefficients and fixed-point delays for a
    /// source direction.
    ///
    /// The four grid directions surrounding `(elevation, azimuth)` — two
    /// azimuth samples on each of the two nearest elevation rings — are
    /// blended bilinearly, per ear. The right ear reuses the stored
    /// hemisphere through the mirrored azimuth index.
    ///
    /// `spread` in `[0, 2π]` defocuses the source: at 0 the output is the
    /// raw directional blend; at 2π it degenerates to the omnidirectional
    /// pass-through response (one reference-gain tap at sample 0) with the
    /// interpolated delays scaled away. `gain` scales the normalized
    /// coefficients; gains at or below `0.0001` short-circuit to silence.
    ///
    /// # Arguments
    ///
    /// * `elevation` - polar elevation in radians, `[-π/2, π/2]`
    /// * `azimuth` - polar azimuth in radians, any value (periodic)
    /// * `spread` - angular extent of the source, `[0, 2π]`
    /// * `gain` - linear amplitude applied to the coefficients
    /// * `coeffs` - receives `ir_size()` left/right pairs; entries past
    ///   `ir_size()` are left untouched
    /// * `delays` - receives the left/right delays, in samples shifted left
    ///   by [`HRTF_DELAY_BITS`]
    ///
    /// Allocation- and lock-free; safe to call from the mixing thread
    /// against a shared dataset.
    ///
    /// # Panics
    ///
    /// Panics if `coeffs` holds fewer than `ir_size()` pairs.
    pub fn lerped_coeffs(
        &self,
        elevation: f32,
        azimuth: f32,
        spread: f32,
        gain: f32,
        coeffs: &mut [[f32; 2]],
        delays: &mut [u32; 2],
    ) {
        assert!(coeffs.len() >= self.ir_size, "coefficient buffer too small");

        let dirfact = 1.0 - spread / TAU;

        let (evidx, mu_ev) = ev_indices(self.ev_count(), elevation);

        // Four direction indices per ear: two azimuth samples on each of
        // the two bounding elevation rings.
        let mut lidx = [0usize; 4];
        let mut ridx = [0usize; 4];
        let mut mu_az = [0.0f32; 2];
        for ring in 0..2 {
            let az_count = self.ring_size(evidx[ring]);
            let offset = self.ring_offset(evidx[ring]);
            let (azidx, mu) = az_indices(az_count, azimuth);
            mu_az[ring] = mu;

            lidx[ring * 2] = offset + azidx[0];
            lidx[ring * 2 + 1] = offset + azidx[1];
            ridx[ring * 2] = offset + mirror_az(az_count, azidx[0]);
            ridx[ring * 2 + 1] = offset + mirror_az(az_count, azidx[1]);
        }

        // Bilinear blend weights over (azimuth, elevation).
        let blend = [
            (1.0 - mu_az[0]) * (1.0 - mu_ev),
            mu_az[0] * (1.0 - mu_ev),
            (1.0 - mu_az[1]) * mu_ev,
            mu_az[1] * mu_ev,
        ];

        for (ear, idx) in [&lidx, &ridx].into_iter().enumerate() {
            let blended: f32 = (0..4).map(|j| self.delays[idx[j]] as f32 * blend[j]).sum();
            delays[ear] = ((blended * dirfact + 0.5) as u32) << HRTF_DELAY_BITS;
        }

        if gain <= SILENCE_GAIN {
            for pair in &mut coeffs[..self.ir_size] {
                *pair = [0.0, 0.0];
            }
            return;
        }

        let norm = gain * (1.0 / 32767.0);
        for s in 0..self.ir_size {
            // Sample 0 fades toward the pass-through response as the source
            // becomes diffuse; later samples fade toward silence.
            let base = if s == 0 { PASSTHRU_COEFF } else { 0.0 };
            for (ear, idx) in [&lidx, &ridx].into_iter().enumerate() {
                let c: f32 = (0..4)
                    .map(|j| self.coeffs[idx[j] * self.ir_size + s] as f32 * blend[j])
                    .sum();
                coeffs[s][ear] = lerp(base, c, dirfact) * norm;
            }
        }
    }
}
