//! Builders for synthetic MinPHR buffers used by the unit tests.

use crate::dataset::Hrtf;
use crate::decode::{decode_dataset, MAGIC_V0, MAGIC_V1};

/// Build a v1 buffer with explicit per-direction coefficients and delays.
///
/// `coeff(direction, sample)` fills the quantized impulse responses,
/// `delay(direction)` the delay table.
pub(crate) fn v1_buffer(
    sample_rate: u32,
    ir_size: usize,
    az_count: &[u8],
    coeff: &dyn Fn(usize, usize) -> i16,
    delay: &dyn Fn(usize) -> u8,
) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(MAGIC_V1);
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.push(ir_size as u8);
    buf.push(az_count.len() as u8);
    buf.extend_from_slice(az_count);

    let ir_count: usize = az_count.iter().map(|&c| c as usize).sum();
    for d in 0..ir_count {
        for s in 0..ir_size {
            buf.extend_from_slice(&coeff(d, s).to_le_bytes());
        }
    }
    for d in 0..ir_count {
        buf.push(delay(d));
    }
    buf
}

/// Build a v0 buffer. `ir_count` and `ev_offset` are written as-is so tests
/// can produce inconsistent tables.
pub(crate) fn v0_buffer(
    sample_rate: u32,
    ir_count: u16,
    ir_size: u16,
    ev_offset: &[u16],
    coeff: &dyn Fn(usize, usize) -> i16,
    delay: &dyn Fn(usize) -> u8,
) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(MAGIC_V0);
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&ir_count.to_le_bytes());
    buf.extend_from_slice(&ir_size.to_le_bytes());
    buf.push(ev_offset.len() as u8);
    for &off in ev_offset {
        buf.extend_from_slice(&off.to_le_bytes());
    }
    for d in 0..ir_count as usize {
        for s in 0..ir_size as usize {
            buf.extend_from_slice(&coeff(d, s).to_le_bytes());
        }
    }
    for d in 0..ir_count as usize {
        buf.push(delay(d));
    }
    buf
}

/// A valid 44.1 kHz v1 buffer that stores each direction's index in sample
/// 0 (scaled by 1) and zeroes elsewhere, with all delays 0.
pub(crate) fn simple_v1_buffer(az_count: &[u8], ir_size: usize) -> Vec<u8> {
    v1_buffer(
        44100,
        ir_size,
        az_count,
        &|d, s| if s == 0 { d as i16 } else { 0 },
        &|_| 0,
    )
}

/// Decode a buffer that is expected to be valid, under the test filename.
pub(crate) fn decode_v1(data: &[u8]) -> Hrtf {
    decode_dataset("test.mhr", data).expect("test buffer must decode")
}
