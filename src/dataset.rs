//! The immutable, validated HRTF dataset entity.

/// Minimum HRIR length accepted by the decoder, in samples.
pub const MIN_IR_SIZE: usize = 8;
/// Maximum HRIR length accepted by the decoder, in samples.
pub const MAX_IR_SIZE: usize = 128;
/// HRIR lengths must be a multiple of this step.
pub const MOD_IR_SIZE: usize = 8;

/// Minimum number of elevation rings in a dataset.
pub const MIN_EV_COUNT: usize = 5;
/// Maximum number of elevation rings in a dataset.
pub const MAX_EV_COUNT: usize = 128;

/// Minimum azimuth samples on a single elevation ring.
pub const MIN_AZ_COUNT: usize = 1;
/// Maximum azimuth samples on a single elevation ring.
pub const MAX_AZ_COUNT: usize = 128;

/// Length of the per-source sample history the mixer keeps for delayed
/// HRIR taps. Stored propagation delays must fit below it.
pub const HRTF_HISTORY_LENGTH: usize = 64;

/// Length of the B-format synthesis buffers, and the longest filter
/// [`Hrtf::build_bformat`] can emit.
pub const HRIR_LENGTH: usize = 128;

/// Fractional bits in the fixed-point delays produced by interpolation.
pub const HRTF_DELAY_BITS: u32 = 20;

/// Sample-0 value of the pass-through (omnidirectional) response, in the
/// dataset's 16-bit sample scale. The remaining samples of that response
/// are zero.
pub const PASSTHRU_COEFF: f32 = 32767.0 * std::f32::consts::FRAC_1_SQRT_2;

/// A decoded head-related transfer function dataset.
///
/// Holds one impulse response and one propagation delay per stored
/// direction, arranged on a spherical grid of elevation rings with a
/// per-ring azimuth resolution. Only one hemisphere of directions is
/// stored; the opposite ear is served by mirroring the azimuth index (see
/// [`crate::grid::mirror_az`]).
///
/// Datasets are immutable once decoded and are shared read-only across the
/// engine (typically as `Arc<Hrtf>` handed out by
/// [`crate::registry::HrtfRegistry`]), so interpolation and synthesis can
/// run concurrently without locking.
#[derive(Debug, Clone)]
pub struct Hrtf {
    /// Sample rate the impulse responses were measured at, Hz.
    pub(crate) sample_rate: u32,

    /// Impulse response length in samples; `8..=128`, multiple of 8.
    pub(crate) ir_size: usize,

    /// Azimuth sample count per elevation ring; each `1..=128`. The ring
    /// count doubles as the dataset's elevation count (`5..=128`).
    pub(crate) az_count: Vec<u8>,

    /// Starting direction index of each elevation ring; strictly
    /// increasing, starts at 0, consecutive differences equal `az_count`.
    pub(crate) ev_offset: Vec<u16>,

    /// Quantized impulse responses, `ir_count * ir_size` samples, row-major
    /// by direction. Normalized to float by dividing by 32767.
    pub(crate) coeffs: Vec<i16>,

    /// Propagation delay per direction, in samples; each `0..=63`.
    pub(crate) delays: Vec<u8>,

    /// Canonical source identifier; dedup key in the registry.
    pub(crate) filename: String,
}

impl Hrtf {
    /// Sample rate of the dataset in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Impulse response length in samples.
    pub fn ir_size(&self) -> usize {
        self.ir_size
    }

    /// Number of elevation rings.
    pub fn ev_count(&self) -> usize {
        self.az_count.len()
    }

    /// Total number of stored directions.
    pub fn ir_count(&self) -> usize {
        self.delays.len()
    }

    /// The identifier this dataset was loaded under.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Azimuth sample count of elevation ring `ev`.
    pub(crate) fn ring_size(&self, ev: usize) -> usize {
        self.az_count[ev] as usize
    }

    /// Direction index where elevation ring `ev` starts.
    pub(crate) fn ring_offset(&self, ev: usize) -> usize {
        self.ev_offset[ev] as usize
    }

    /// The raw quantized impulse response of direction `dir`.
    pub(crate) fn hrir(&self, dir: usize) -> &[i16] {
        &self.coeffs[dir * self.ir_size..][..self.ir_size]
    }

    /// The propagation delay of direction `dir`, in samples.
    pub(crate) fn delay(&self, dir: usize) -> u8 {
        self.delays[dir]
    }
}
