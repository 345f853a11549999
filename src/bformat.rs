//! First-order ambisonic (B-format) filter-bank synthesis.
//!
//! Samples the dataset at the 8 vertices of a cube around the listener and
//! folds the per-ear responses into a 4-channel (W, X, Y, Z) decoding
//! filter bank with a standard cube encode matrix. Contributions are
//! aligned to the earliest propagation delay so no leading silence is
//! baked into the filters.

use crate::dataset::{Hrtf, HRIR_LENGTH, HRTF_HISTORY_LENGTH};
use crate::grid::{mirror_az, nearest_az_index, nearest_ev_index};
#[cfg(feature = "dual-band")]
use crate::splitter::BandSplitter;

/// Bands the synthesis accumulates over. The dual-band crossover is gated
/// behind the `dual-band` feature; the default is the single full-range
/// band.
#[cfg(not(feature = "dual-band"))]
const NUM_BANDS: usize = 1;
#[cfg(feature = "dual-band")]
const NUM_BANDS: usize = 2;

/// Crossover corner for the dual-band path, Hz.
#[cfg(feature = "dual-band")]
const XOVER_FREQ: f32 = 400.0;

/// The 8 sampled directions: cube vertices around the listener (elevation
/// ±35.264°, azimuths at the diagonal octant centers), in degrees.
const CUBE_POINTS_DEG: [[f32; 2]; 8] = [
    [35.264, -45.0],
    [35.264, 45.0],
    [35.264, -135.0],
    [35.264, 135.0],
    [-35.264, -45.0],
    [-35.264, 45.0],
    [-35.264, -135.0],
    [-35.264, 135.0],
];

/// Per-direction weights into the 4 B-format channels, one row per band.
/// The first row is the full-range/low-band encode, the second the
/// high-band encode used by the dual-band path.
#[rustfmt::skip]
const CUBE_MATRIX: [[[f32; 4]; 2]; 8] = [
    [[0.25,  0.144_337_57,  0.144_337_57,  0.144_337_57], [0.125,  0.125,  0.125,  0.125]],
    [[0.25, -0.144_337_57,  0.144_337_57,  0.144_337_57], [0.125, -0.125,  0.125,  0.125]],
    [[0.25,  0.144_337_57,  0.144_337_57, -0.144_337_57], [0.125,  0.125,  0.125, -0.125]],
    [[0.25, -0.144_337_57,  0.144_337_57, -0.144_337_57], [0.125, -0.125,  0.125, -0.125]],
    [[0.25,  0.144_337_57, -0.144_337_57,  0.144_337_57], [0.125,  0.125, -0.125,  0.125]],
    [[0.25, -0.144_337_57, -0.144_337_57,  0.144_337_57], [0.125, -0.125, -0.125,  0.125]],
    [[0.25,  0.144_337_57, -0.144_337_57, -0.144_337_57], [0.125,  0.125, -0.125, -0.125]],
    [[0.25, -0.144_337_57, -0.144_337_57, -0.144_337_57], [0.125, -0.125, -0.125, -0.125]],
];

impl Hrtf {
    /// Synthesize a first-order ambisonic decoding filter bank from the
    /// dataset.
    ///
    /// Each of the 8 cube directions is looked up with nearest-neighbor
    /// (rounded) grid indices — no bilinear blending — for both ears, the
    /// right ear through the mirrored azimuth index. Every response is
    /// normalized to float, shifted by its delay relative to the earliest
    /// delay among all 16 lookups, and accumulated into the 4 channels with
    /// the cube encode matrix.
    ///
    /// The first `num_channels` entries of `bank` are overwritten; each is
    /// a channel of [`HRIR_LENGTH`] left/right pairs. Returns the effective
    /// filter length: the shortest prefix holding every contribution's
    /// tail, never more than [`HRIR_LENGTH`].
    ///
    /// # Panics
    ///
    /// Panics unless `num_channels` is 4 (first-order output) and `bank`
    /// holds at least that many channels.
    pub fn build_bformat(&self, bank: &mut [[[f32; 2]; HRIR_LENGTH]], num_channels: usize) -> usize {
        assert_eq!(num_channels, 4, "B-format synthesis is first-order only");
        assert!(bank.len() >= num_channels, "bank too small");

        let mut lidx = [0usize; 8];
        let mut ridx = [0usize; 8];
        let mut min_delay = HRTF_HISTORY_LENGTH;

        for (c, point) in CUBE_POINTS_DEG.iter().enumerate() {
            let evidx = nearest_ev_index(self.ev_count(), point[0].to_radians());
            let az_count = self.ring_size(evidx);
            let offset = self.ring_offset(evidx);
            let azidx = nearest_az_index(az_count, point[1].to_radians());

            lidx[c] = offset + azidx;
            ridx[c] = offset + mirror_az(az_count, azidx);

            min_delay = min_delay
                .min(self.delay(lidx[c]) as usize)
                .min(self.delay(ridx[c]) as usize);
        }

        for channel in bank[..num_channels].iter_mut() {
            for pair in channel.iter_mut() {
                *pair = [0.0, 0.0];
            }
        }

        // The band buffers outlive the direction loop so the single-band
        // tail beyond ir_size stays zero.
        let mut bands = [[0.0f32; HRIR_LENGTH]; NUM_BANDS];
        let band_len = if NUM_BANDS == 1 { self.ir_size } else { HRIR_LENGTH };
        #[cfg(feature = "dual-band")]
        let mut splitter = BandSplitter::new(XOVER_FREQ / self.sample_rate as f32);

        let mut max_length = 0usize;
        for c in 0..8 {
            for (ear, dir) in [lidx[c], ridx[c]].into_iter().enumerate() {
                let fir = self.hrir(dir);

                #[cfg(not(feature = "dual-band"))]
                for (out, &raw) in bands[0].iter_mut().zip(fir) {
                    *out = raw as f32 / 32767.0;
                }

                #[cfg(feature = "dual-band")]
                {
                    let mut full = [0.0f32; HRIR_LENGTH];
                    for (out, &raw) in full.iter_mut().zip(fir) {
                        *out = raw as f32 / 32767.0;
                    }
                    // The splitter is stateful per response, not across
                    // directions.
                    splitter.clear();
                    let [low, high] = &mut bands;
                    splitter.process(low, high, &full);
                }

                let shift = self.delay(dir) as usize - min_delay;
                let span = band_len.min(HRIR_LENGTH - shift);
                for (ch, channel) in bank[..num_channels].iter_mut().enumerate() {
                    for (b, band) in bands.iter().enumerate() {
                        let weight = CUBE_MATRIX[c][b][ch];
                        for (k, &v) in band[..span].iter().enumerate() {
                            channel[shift + k][ear] += v * weight;
                        }
                    }
                }
                max_length = max_length.max((shift + self.ir_size).min(HRIR_LENGTH));
            }
        }

        log::debug!(
            "{}: skipped min delay {min_delay}, combined length {max_length}",
            self.filename
        );
        max_length
    }
}
