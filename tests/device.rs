mod common;

use approx::assert_relative_eq;

use si5351_planner::{ config::*, crystal::*, device::*, errors::*, };

use common::*;

/// Writes of the initial program: disable states, output enable,
/// 8 control registers, crystal load, output enable
const INIT_WRITES: usize = 13;

fn crystal27() -> Crystal {
    Crystal::new(CrystalFrequency::Mhz27, CrystalLoad::Pf8)
}

fn device() -> Si5351<RecordingWriter, Messages> {
    let mut dev = Si5351::with_diagnostics(RecordingWriter::default(), Messages::default(), crystal27());
    dev.init().unwrap();
    dev
}

fn ratio(b: &[u8; 8]) -> f64 {
    let (p1, p2, p3, _) = decode_block(b);
    ((p1 + 512) as f64 + p2 as f64 / p3 as f64) / 128.0
}


#[test]
fn init_writes_disable_and_crystal_registers() {
    let mut dev = Si5351::new(RecordingWriter::default(), crystal27());
    dev.init().unwrap();
    let w = &dev.writer().writes;
    assert_eq!(w.len(), INIT_WRITES);
    assert_eq!(w[0], (24, 0));
    assert_eq!(w[1], (25, 0));
    assert_eq!(w[2], (3, 0xFF));
    assert_eq!(w[11], (183, 0xC8));
    assert_eq!(w[12], (3, 0xFF));
    assert!(!dev.is_batch());
    assert_eq!(dev.vco_frequency(Pll::A), None);
    assert_eq!(dev.vco_frequency(Pll::B), None);
}

#[test]
fn two_outputs_from_one_pll() {
    let mut dev = device();
    dev.set_output(0, Pll::A, 2_000_000, 0, false, true).unwrap();
    dev.set_output(1, Pll::A, 2_000_000, 0, true, false).unwrap();

    let vco = dev.vco_frequency(Pll::A).unwrap();
    assert!((600_000_000..=900_000_000).contains(&vco));
    assert_eq!(vco, 604_000_000);
    assert_eq!(dev.vco_frequency(Pll::B), None);

    let regs = register_file(&dev.writer().writes);

    // PLL A feedback divider: VCO / crystal
    assert_relative_eq!(ratio(&block(&regs, 26)), vco as f64 / 27e6, max_relative = 1e-9);
    // PLL B untouched
    assert_eq!(regs[34], None);

    for &base in [42u8, 50].iter() {
        let b = block(&regs, base);
        assert_relative_eq!(ratio(&b), vco as f64 / 2e6, max_relative = 1e-9);
        assert_eq!(decode_block(&b).3, 0);
    }

    assert_eq!(regs[16].unwrap() & 0x10, 0);
    assert_eq!(regs[17].unwrap() & 0x10, 0x10);
    assert_eq!(regs[16], Some(0x0C));
    assert_eq!(regs[17], Some(0x1C));

    assert_eq!(dev.writer().last(3), Some(0b1111_1100));

    let plan = dev.plan().unwrap();
    assert_relative_eq!(plan.output_frequency(1).unwrap(), 2e6, max_relative = 1e-9);
}

#[test]
fn follower_on_master_pll() {
    let mut dev = device();
    dev.set_output(0, Pll::A, 5_000_000, 0, false, true).unwrap();
    dev.set_output(1, Pll::A, 2_000_000, 0, false, false).unwrap();
    assert_eq!(dev.vco_frequency(Pll::A), Some(610_000_000));
}

#[test]
fn pll_without_master_is_rejected() {
    let mut dev = device();
    dev.set_output(0, Pll::A, 5_000_000, 0, false, true).unwrap();
    let before = dev.writer().writes.len();

    assert_eq!(
        dev.set_output(1, Pll::B, 2_000_000, 0, false, false),
        Err(Error::UnassignedMaster(Pll::B))
    );
    // nothing written for a configuration that doesn't plan
    assert_eq!(dev.writer().writes.len(), before);

    let (_, msgs) = dev.release();
    assert!(msgs.0.iter().any(|m| m.contains("no master")));
}

#[test]
fn frequency_range_is_enforced() {
    let mut dev = device();
    assert_eq!(
        dev.set_output(0, Pll::A, 7_999, 0, false, true),
        Err(Error::InvalidOutputFrequency(7_999))
    );
    assert_eq!(
        dev.set_output(0, Pll::A, 150_000_001, 0, false, true),
        Err(Error::InvalidOutputFrequency(150_000_001))
    );
    assert_eq!(dev.writer().writes.len(), INIT_WRITES);
}

#[test]
fn vco_bounds_are_enforced() {
    let mut dev = device();
    assert_eq!(
        dev.set_output(0, Pll::A, 120_000_000, 0, false, true),
        Err(Error::InvalidVcoFrequency(960_000_000))
    );
    assert_eq!(
        dev.set_output(0, Pll::A, 150_000_000, 0, false, true),
        Err(Error::InvalidPllDivider(6))
    );
    assert_eq!(dev.writer().writes.len(), INIT_WRITES);

    // a valid master recovers
    dev.set_output(0, Pll::A, 100_000_000, 0, false, true).unwrap();
    assert_eq!(dev.vco_frequency(Pll::A), Some(800_000_000));
}

#[test]
fn output_index_is_validated() {
    let mut dev = device();
    assert_eq!(
        dev.set_output(8, Pll::A, 1_000_000, 0, false, true),
        Err(Error::InvalidOutput(8))
    );
    assert_eq!(
        dev.set_disable_state(Outputs::Single(8), DisableState::High),
        Err(Error::InvalidOutput(8))
    );
    assert_eq!(
        dev.set_drive_strength(Outputs::Single(200), DriveStrength::Ma8),
        Err(Error::InvalidOutput(200))
    );
    assert_eq!(dev.writer().writes.len(), INIT_WRITES);
    assert_eq!(dev.config().master(Pll::A), None);
}

#[test]
fn disable_state_and_drive() {
    let mut dev = device();
    dev.set_disable_state(Outputs::All, DisableState::Tristate).unwrap();
    assert_eq!(dev.writer().last(24), Some(0xAA));
    assert_eq!(dev.writer().last(25), Some(0xAA));

    dev.set_disable_state(Outputs::Single(4), DisableState::Never).unwrap();
    assert_eq!(dev.writer().last(24), Some(0xAA));
    assert_eq!(dev.writer().last(25), Some(0xAB));

    dev.set_output(2, Pll::B, 25_000_000, 0, false, true).unwrap();
    dev.set_drive_strength(Outputs::Single(2), DriveStrength::Ma8).unwrap();
    assert_eq!(dev.writer().last(18), Some(0x20 | 0x0C | 0x03));
}

#[test]
fn batch_writes_one_program() {
    let mut immediate = device();
    immediate.set_output(0, Pll::A, 10_000_000, 0, false, true).unwrap();
    immediate.set_output(1, Pll::A, 3_000_000, 10, true, false).unwrap();
    immediate.set_output(2, Pll::B, 25_000_000, 0, false, true).unwrap();
    assert_eq!(immediate.writer().programs(), 4);

    let mut batched = device();
    batched.begin_batch();
    assert!(batched.is_batch());
    batched.set_output(0, Pll::A, 10_000_000, 0, false, true).unwrap();
    batched.set_output(1, Pll::A, 3_000_000, 10, true, false).unwrap();
    batched.set_output(2, Pll::B, 25_000_000, 0, false, true).unwrap();
    assert_eq!(batched.writer().writes.len(), INIT_WRITES);

    batched.commit_batch().unwrap();
    assert!(!batched.is_batch());
    assert_eq!(batched.writer().programs(), 2);

    let b = &batched.writer().writes[INIT_WRITES..];
    let i = &immediate.writer().writes;
    assert_eq!(b, &i[i.len() - b.len()..]);
    assert_eq!(batched.plan(), immediate.plan());
}

#[test]
fn batch_defers_validation_to_commit() {
    let mut dev = device();
    dev.begin_batch();
    // PLL B has no master yet, fine until committed
    dev.set_output(1, Pll::B, 2_000_000, 0, false, false).unwrap();
    dev.set_output(3, Pll::B, 4_000_000, 0, false, true).unwrap();
    dev.commit_batch().unwrap();
    assert_eq!(dev.vco_frequency(Pll::B), Some(608_000_000));
    assert_eq!(dev.writer().last(3), Some(0b1111_0101));
}

#[test]
fn empty_commit_rewrites_program() {
    let mut dev = device();
    dev.begin_batch();
    dev.commit_batch().unwrap();
    assert_eq!(dev.writer().writes.len(), 2 * INIT_WRITES);
}

#[test]
fn transport_failure_is_reported() {
    let writer = RecordingWriter::failing_at(INIT_WRITES + 7);
    let mut dev = Si5351::with_diagnostics(writer, Messages::default(), crystal27());
    dev.init().unwrap();

    assert_eq!(
        dev.set_output(0, Pll::A, 10_000_000, 0, false, true),
        Err(Error::Transport)
    );
    assert!(dev.plan().is_none());

    let (w, msgs) = dev.release();
    // stopped at the failing write, no retry
    assert_eq!(w.writes.len(), INIT_WRITES + 7);
    assert!(msgs.0.iter().any(|m| m.contains("failed")));
}

#[test]
fn transport_failure_during_init_keeps_writer() {
    let writer = RecordingWriter::failing_at(3);
    let mut dev = Si5351::with_diagnostics(writer, Messages::default(), crystal27());
    assert_eq!(dev.init(), Err(Error::Transport));
    assert!(dev.plan().is_none());

    let (mut w, msgs) = dev.release();
    assert_eq!(w.writes.len(), 3);
    assert!(msgs.0.iter().any(|m| m.contains("register 16")));

    // the same transport is usable for a retry
    w.fail_at = None;
    let mut dev = Si5351::new(w, crystal27());
    dev.init().unwrap();
    assert_eq!(dev.writer().writes.len(), 3 + INIT_WRITES);
}

#[test]
fn low_frequency_output_sets_r_divider() {
    let mut dev = device();
    dev.set_output(0, Pll::A, 10_000_000, 0, false, true).unwrap();
    dev.set_output(6, Pll::A, 8_000, 0, false, false).unwrap();

    let regs = register_file(&dev.writer().writes);
    let b = block(&regs, 42 + 6 * 8);
    let (_, _, _, r) = decode_block(&b);
    assert_eq!(r, 6);
    let vco = dev.vco_frequency(Pll::A).unwrap() as f64;
    assert_relative_eq!(vco / ratio(&b) / 64.0, 8_000.0, max_relative = 1e-6);
}
