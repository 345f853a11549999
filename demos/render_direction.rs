//! Synthesizes a small MinPHR dataset in memory, loads it through the
//! registry, and renders the filter data a mixer would consume for one
//! source direction plus the B-format bank.
//!
//! Run with `RUST_LOG=debug` to see the load and synthesis diagnostics.

use anyhow::Result;
use minphr::{direction_angles, HrtfRegistry, Vec3, HRIR_LENGTH, HRTF_DELAY_BITS, MAX_IR_SIZE};

fn main() -> Result<()> {
    env_logger::init();

    let registry = HrtfRegistry::new();
    let hrtf = registry.load("demo.mhr", &build_demo_dataset())?;
    println!(
        "loaded {}: {} Hz, {} directions, {}-sample HRIRs",
        hrtf.filename(),
        hrtf.sample_rate(),
        hrtf.ir_count(),
        hrtf.ir_size()
    );

    // A source up and to the right of the listener.
    let (elevation, azimuth) = direction_angles(Vec3::new(1.0, 0.5, -1.0));
    let mut coeffs = [[0.0f32; 2]; MAX_IR_SIZE];
    let mut delays = [0u32; 2];
    hrtf.lerped_coeffs(elevation, azimuth, 0.0, 1.0, &mut coeffs, &mut delays);

    println!(
        "direction ({:.2} rad, {:.2} rad): delays {} / {} samples",
        elevation,
        azimuth,
        delays[0] >> HRTF_DELAY_BITS,
        delays[1] >> HRTF_DELAY_BITS,
    );
    for (s, pair) in coeffs[..hrtf.ir_size()].iter().enumerate() {
        println!("  tap {s}: L {:+.5}  R {:+.5}", pair[0], pair[1]);
    }

    let mut bank = vec![[[0.0f32; 2]; HRIR_LENGTH]; 4];
    let length = hrtf.build_bformat(&mut bank, 4);
    println!("B-format filter bank: effective length {length} samples");
    for (ch, name) in ["W", "X", "Y", "Z"].iter().enumerate() {
        let peak = bank[ch][..length]
            .iter()
            .flatten()
            .fold(0.0f32, |acc, &c| acc.max(c.abs()));
        println!("  {name}: peak |coeff| {peak:.5}");
    }

    Ok(())
}

/// A 5-ring, 32-direction v1 dataset with a decaying impulse whose sample-0
/// amplitude tilts with azimuth, enough structure for the demo output to
/// move with the source direction.
fn build_demo_dataset() -> Vec<u8> {
    let az_count: [u8; 5] = [4, 8, 8, 8, 4];
    let ir_size = 8usize;
    let ir_count: usize = az_count.iter().map(|&c| c as usize).sum();

    let mut buf = Vec::new();
    buf.extend_from_slice(b"MinPHR01");
    buf.extend_from_slice(&44100u32.to_le_bytes());
    buf.push(ir_size as u8);
    buf.push(az_count.len() as u8);
    buf.extend_from_slice(&az_count);

    for d in 0..ir_count {
        for s in 0..ir_size {
            let decay = 24000.0 * 0.5f32.powi(s as i32);
            let tilt = 1.0 + 0.2 * (d as f32 * 0.7).sin();
            buf.extend_from_slice(&((decay * tilt) as i16).to_le_bytes());
        }
    }
    for d in 0..ir_count {
        buf.push((d % 16) as u8);
    }
    buf
}
