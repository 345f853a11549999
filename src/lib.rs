//! MinPHR (`.mhr`) HRTF dataset decoding and evaluation.
//!
//! A head-related transfer function (HRTF) dataset stores one short impulse
//! response and one propagation delay per direction on a spherical grid, and
//! lets a spatial audio engine render a source at an arbitrary elevation and
//! azimuth with binaural realism. This crate covers the data side of that
//! pipeline:
//!
//! - decoding the two MinPHR binary format versions (`"MinPHR00"` and
//!   `"MinPHR01"` magic prefixes) into validated, immutable [`Hrtf`]
//!   datasets,
//! - bilinear spherical interpolation of a continuous direction into
//!   per-ear filter coefficients and fixed-point delays
//!   ([`Hrtf::lerped_coeffs`]), allocation- and lock-free for use on the
//!   mixing thread,
//! - synthesis of a first-order ambisonic (B-format) decoding filter bank
//!   from the same grid ([`Hrtf::build_bformat`]),
//! - a mutex-guarded [`HrtfRegistry`] that deduplicates loads by filename
//!   and owns dataset lifetime.
//!
//! Applying the produced FIR coefficients (convolution) and talking to
//! audio devices are the consumer's job, not this crate's.
//!
//! ```no_run
//! use minphr::{HrtfRegistry, MAX_IR_SIZE};
//!
//! fn main() -> minphr::Result<()> {
//!     let registry = HrtfRegistry::new();
//!     let hrtf = registry.load_path("default-44100.mhr")?;
//!
//!     let mut coeffs = [[0.0f32; 2]; MAX_IR_SIZE];
//!     let mut delays = [0u32; 2];
//!     hrtf.lerped_coeffs(0.0, 0.5, 0.0, 1.0, &mut coeffs, &mut delays);
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod decode;
pub mod error;
pub mod math;
pub mod registry;
pub mod splitter;

mod bformat;
mod grid;
mod interp;
#[cfg(test)]
mod test_util;

pub use dataset::{
    Hrtf, HRIR_LENGTH, HRTF_DELAY_BITS, HRTF_HISTORY_LENGTH, MAX_AZ_COUNT, MAX_EV_COUNT,
    MAX_IR_SIZE, MIN_AZ_COUNT, MIN_EV_COUNT, MIN_IR_SIZE, PASSTHRU_COEFF,
};
pub use decode::decode_dataset;
pub use error::{HrtfError, Result};
pub use math::{direction_angles, Vec3};
pub use registry::HrtfRegistry;
pub use splitter::BandSplitter;
