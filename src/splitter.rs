//! First-order band splitter used by the dual-band synthesis path.

use std::f32::consts::TAU;

/// Splits a signal into complementary low and high bands around a
/// crossover frequency.
///
/// The low band is two cascaded one-pole sections derived from a
/// first-order all-pass coefficient; the high band is the all-passed input
/// minus the low band, so the two bands always sum back to an all-passed
/// copy of the input and recombine flat in magnitude.
///
/// The filter is stateful: call [`BandSplitter::clear`] between unrelated
/// signals.
#[derive(Debug, Clone)]
pub struct BandSplitter {
    coeff: f32,
    lp_z1: f32,
    lp_z2: f32,
    ap_z1: f32,
}

impl BandSplitter {
    /// Create a splitter with its crossover at `f0norm`, the corner
    /// frequency divided by the sample rate, in `(0, 0.5)`.
    pub fn new(f0norm: f32) -> Self {
        let w = f0norm * TAU;
        let cw = w.cos();
        let coeff = if cw > f32::EPSILON {
            (w.sin() - 1.0) / cw
        } else {
            cw * -0.5
        };
        Self {
            coeff,
            lp_z1: 0.0,
            lp_z2: 0.0,
            ap_z1: 0.0,
        }
    }

    /// Reset the filter state without touching the configured corner.
    pub fn clear(&mut self) {
        self.lp_z1 = 0.0;
        self.lp_z2 = 0.0;
        self.ap_z1 = 0.0;
    }

    /// Split `input` into `low` and `high`.
    ///
    /// # Panics
    ///
    /// Panics unless all three slices have the same length.
    pub fn process(&mut self, low: &mut [f32], high: &mut [f32], input: &[f32]) {
        assert_eq!(low.len(), input.len());
        assert_eq!(high.len(), input.len());

        // Low band: two cascaded one-pole sections for a second-order
        // rolloff with unity DC gain.
        let g = self.coeff * 0.5 + 0.5;
        for (out, &x) in low.iter_mut().zip(input) {
            let d = (x - self.lp_z1) * g;
            let y = self.lp_z1 + d;
            self.lp_z1 = y + d;

            let d = (y - self.lp_z2) * g;
            let y = self.lp_z2 + d;
            self.lp_z2 = y + d;

            *out = y;
        }

        // High band: all-passed input minus the low band.
        let c = self.coeff;
        for ((out, &x), &lp) in high.iter_mut().zip(input).zip(low.iter()) {
            let d = x - c * self.ap_z1;
            let y = c * d + self.ap_z1;
            self.ap_z1 = d;

            *out = y - lp;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F0: f32 = 400.0 / 44100.0;

    #[test]
    fn dc_goes_entirely_to_the_low_band() {
        let mut splitter = BandSplitter::new(F0);
        let input = [1.0f32; 2048];
        let mut low = [0.0f32; 2048];
        let mut high = [0.0f32; 2048];
        splitter.process(&mut low, &mut high, &input);

        assert!((low[2047] - 1.0).abs() < 1e-3);
        assert!(high[2047].abs() < 1e-3);
    }

    #[test]
    fn bands_sum_to_unit_energy_for_an_impulse() {
        let mut splitter = BandSplitter::new(F0);
        let mut input = [0.0f32; 4096];
        input[0] = 1.0;
        let mut low = [0.0f32; 4096];
        let mut high = [0.0f32; 4096];
        splitter.process(&mut low, &mut high, &input);

        // low + high is an all-passed impulse, which preserves energy.
        let energy: f32 = low.iter().zip(&high).map(|(l, h)| (l + h) * (l + h)).sum();
        assert!((energy - 1.0).abs() < 1e-3, "energy {energy}");
    }

    #[test]
    fn clear_resets_the_state() {
        let mut splitter = BandSplitter::new(F0);
        let mut input = [0.0f32; 64];
        input[0] = 1.0;

        let mut low_a = [0.0f32; 64];
        let mut high_a = [0.0f32; 64];
        splitter.process(&mut low_a, &mut high_a, &input);

        splitter.clear();
        let mut low_b = [0.0f32; 64];
        let mut high_b = [0.0f32; 64];
        splitter.process(&mut low_b, &mut high_b, &input);

        assert_eq!(low_a, low_b);
        assert_eq!(high_a, high_b);
    }
}
