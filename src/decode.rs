//! MinPHR wire-format decoding.
//!
//! Two little-endian layouts share the validation and assembly core here.
//! Both are selected by an 8-byte ASCII magic prefix:
//!
//! - `"MinPHR00"` (v0): `u32 sample_rate; u16 ir_count; u16 ir_size;
//!   u8 ev_count; u16 ev_offset[ev_count]; i16 coeffs[ir_count * ir_size];
//!   u8 delays[ir_count]` — azimuth counts are derived from consecutive
//!   offset differences.
//! - `"MinPHR01"` (v1): `u32 sample_rate; u8 ir_size; u8 ev_count;
//!   u8 az_count[ev_count]; i16 coeffs; u8 delays` — offsets and the
//!   direction total are derived by prefix-summing the counts.

use crate::dataset::{
    Hrtf, HRTF_HISTORY_LENGTH, MAX_AZ_COUNT, MAX_EV_COUNT, MAX_IR_SIZE, MIN_AZ_COUNT, MIN_EV_COUNT,
    MIN_IR_SIZE, MOD_IR_SIZE,
};
use crate::error::{HrtfError, Result};

pub(crate) const MAGIC_V0: &[u8; 8] = b"MinPHR00";
pub(crate) const MAGIC_V1: &[u8; 8] = b"MinPHR01";

/// Sequential cursor over an immutable byte buffer. Every read shrinks the
/// remaining slice; a read past the end fails with [`HrtfError::Truncated`]
/// instead of touching out-of-bounds memory.
struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn remaining(&self) -> usize {
        self.data.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.data.len() < n {
            return Err(HrtfError::Truncated {
                needed: n,
                remaining: self.data.len(),
            });
        }
        let (head, tail) = self.data.split_at(n);
        self.data = tail;
        Ok(head)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_i16(&mut self) -> Result<i16> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }
}

/// Reconciled elevation-grid layout shared by both format versions.
///
/// Whichever table a format stores as primary, the result satisfies the
/// same invariant: offsets strictly increasing from 0, consecutive
/// differences equal to the per-ring counts, total equal to the final
/// offset plus the final count.
struct GridLayout {
    az_count: Vec<u8>,
    ev_offset: Vec<u16>,
    ir_count: usize,
}

impl GridLayout {
    /// v0: offsets are stored; counts are derived as consecutive
    /// differences, the last ring from the stored direction total.
    fn from_offsets(ev_offset: Vec<u16>, ir_count: usize) -> Result<Self> {
        if ev_offset[0] != 0 {
            return Err(HrtfError::InvalidOffsetOrdering {
                index: 0,
                offset: ev_offset[0] as u32,
                prev: 0,
            });
        }

        let mut az_count = Vec::with_capacity(ev_offset.len());
        for i in 1..ev_offset.len() {
            if ev_offset[i] <= ev_offset[i - 1] {
                return Err(HrtfError::InvalidOffsetOrdering {
                    index: i,
                    offset: ev_offset[i] as u32,
                    prev: ev_offset[i - 1] as u32,
                });
            }
            let count = (ev_offset[i] - ev_offset[i - 1]) as usize;
            check_az_count(count)?;
            az_count.push(count as u8);
        }

        let last = ev_offset[ev_offset.len() - 1] as usize;
        if ir_count <= last {
            return Err(HrtfError::InvalidOffsetOrdering {
                index: ev_offset.len() - 1,
                offset: last as u32,
                prev: ir_count as u32,
            });
        }
        let count = ir_count - last;
        check_az_count(count)?;
        az_count.push(count as u8);

        Ok(Self {
            az_count,
            ev_offset,
            ir_count,
        })
    }

    /// v1: counts are stored; offsets and the total come from a prefix sum.
    fn from_counts(az_count: Vec<u8>) -> Result<Self> {
        let mut ev_offset = Vec::with_capacity(az_count.len());
        let mut total = 0usize;
        for &count in &az_count {
            check_az_count(count as usize)?;
            ev_offset.push(total as u16);
            total += count as usize;
        }
        Ok(Self {
            az_count,
            ev_offset,
            ir_count: total,
        })
    }
}

fn check_ir_size(ir_size: usize) -> Result<()> {
    if !(MIN_IR_SIZE..=MAX_IR_SIZE).contains(&ir_size) || ir_size % MOD_IR_SIZE != 0 {
        return Err(HrtfError::OutOfRange {
            field: "HRIR size",
            value: ir_size as u32,
            detail: "expected 8 to 128 in steps of 8",
        });
    }
    Ok(())
}

fn check_ev_count(ev_count: usize) -> Result<()> {
    if !(MIN_EV_COUNT..=MAX_EV_COUNT).contains(&ev_count) {
        return Err(HrtfError::OutOfRange {
            field: "elevation count",
            value: ev_count as u32,
            detail: "expected 5 to 128",
        });
    }
    Ok(())
}

fn check_az_count(az_count: usize) -> Result<()> {
    if !(MIN_AZ_COUNT..=MAX_AZ_COUNT).contains(&az_count) {
        return Err(HrtfError::OutOfRange {
            field: "azimuth count",
            value: az_count as u32,
            detail: "expected 1 to 128",
        });
    }
    Ok(())
}

/// Decode a complete MinPHR buffer (magic prefix included) into a dataset.
///
/// `filename` becomes the dataset's canonical identifier; it is not opened
/// or otherwise interpreted here.
///
/// # Errors
///
/// [`HrtfError::UnrecognizedHeader`] when the buffer does not start with a
/// known magic marker, otherwise any decode error from the selected format
/// version. A failed decode retains nothing.
pub fn decode_dataset(filename: &str, data: &[u8]) -> Result<Hrtf> {
    let Some(magic) = data.get(..8) else {
        let mut found = [0u8; 8];
        found[..data.len()].copy_from_slice(data);
        return Err(HrtfError::UnrecognizedHeader { found });
    };
    let payload = &data[8..];

    if magic == MAGIC_V1 {
        log::debug!("{filename}: detected data set format v1");
        decode_v1(filename, payload)
    } else if magic == MAGIC_V0 {
        log::debug!("{filename}: detected data set format v0");
        decode_v0(filename, payload)
    } else {
        let mut found = [0u8; 8];
        found.copy_from_slice(magic);
        Err(HrtfError::UnrecognizedHeader { found })
    }
}

fn decode_v0(filename: &str, payload: &[u8]) -> Result<Hrtf> {
    let mut r = Reader::new(payload);
    let sample_rate = r.read_u32()?;
    let ir_count = r.read_u16()? as usize;
    let ir_size = r.read_u16()? as usize;
    let ev_count = r.read_u8()? as usize;

    // Size bounds are fatal before any table parsing.
    check_ir_size(ir_size)?;
    check_ev_count(ev_count)?;

    let mut ev_offset = Vec::with_capacity(ev_count);
    for _ in 0..ev_count {
        ev_offset.push(r.read_u16()?);
    }
    let layout = GridLayout::from_offsets(ev_offset, ir_count)?;

    read_tables(filename, r, sample_rate, ir_size, layout)
}

fn decode_v1(filename: &str, payload: &[u8]) -> Result<Hrtf> {
    let mut r = Reader::new(payload);
    let sample_rate = r.read_u32()?;
    let ir_size = r.read_u8()? as usize;
    let ev_count = r.read_u8()? as usize;

    check_ir_size(ir_size)?;
    check_ev_count(ev_count)?;

    let az_count = r.take(ev_count)?.to_vec();
    let layout = GridLayout::from_counts(az_count)?;

    read_tables(filename, r, sample_rate, ir_size, layout)
}

/// Shared tail of both decoders: the coefficient and delay tables plus
/// final assembly.
fn read_tables(
    filename: &str,
    mut r: Reader<'_>,
    sample_rate: u32,
    ir_size: usize,
    layout: GridLayout,
) -> Result<Hrtf> {
    let GridLayout {
        az_count,
        ev_offset,
        ir_count,
    } = layout;

    // The whole coefficient + delay block must be present before any of it
    // is consumed.
    let required = 2 * ir_size * ir_count + ir_count;
    if r.remaining() < required {
        return Err(HrtfError::Truncated {
            needed: required,
            remaining: r.remaining(),
        });
    }

    let n_coeffs = ir_size * ir_count;
    let mut coeffs: Vec<i16> = Vec::new();
    coeffs
        .try_reserve_exact(n_coeffs)
        .map_err(|_| HrtfError::Allocation {
            bytes: n_coeffs * std::mem::size_of::<i16>(),
        })?;
    for _ in 0..n_coeffs {
        coeffs.push(r.read_i16()?);
    }

    let delays = r.take(ir_count)?.to_vec();
    for &d in &delays {
        if d as usize >= HRTF_HISTORY_LENGTH {
            return Err(HrtfError::OutOfRange {
                field: "delay",
                value: d as u32,
                detail: "expected at most 63",
            });
        }
    }

    Ok(Hrtf {
        sample_rate,
        ir_size,
        az_count,
        ev_offset,
        coeffs,
        delays,
        filename: filename.to_owned(),
    })
}
