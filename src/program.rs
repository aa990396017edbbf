//! Register program: the ordered list of register writes
//! that takes the device to a planned configuration.
//!
//! Outputs are disabled and powered down before any divider is touched,
//! and only re-enabled by the last write, so a live output never sees a
//! partially written divider.

use crate::{ config::*, constants::*, frequency::*, register::*, };


/// Largest possible program: disable state (2), output enable (1),
/// control (8), crystal load (1), PLLs (2 * 8), outputs (8 * 10), output enable (1)
pub const PROGRAM_CAPACITY: usize = 2 + 1 + CLOCKS + 1 + PLLS * 8 + CLOCKS * 10 + 1;


/// Register writes, in order
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct RegisterProgram {
    writes: [(u8, u8); PROGRAM_CAPACITY],
    len: usize,
}

impl RegisterProgram {

    /// Builds the full register program for a configuration and its plan.
    pub fn new(cfg: &DeviceConfig, plan: &FrequencyPlan) -> Self {
        let mut p = RegisterProgram { writes: [(0, 0); PROGRAM_CAPACITY], len: 0 };

        p.push(REG_CLK3_0_DISABLE_STATE, disable_state_bits(&cfg.outputs[0..4]));
        p.push(REG_CLK7_4_DISABLE_STATE, disable_state_bits(&cfg.outputs[4..8]));

        p.push(REG_OUTPUT_ENABLE, 0xFF);
        let powered_down = Reg::<ClkControl>::default().set(ClkPowerDown::PoweredDown).w;
        for clk in 0..CLOCKS as u8 {
            p.push(clk_control_addr(clk), powered_down);
        }

        p.push(REG_XTAL_LOAD, cfg.crystal.load_register());

        for &pll in Pll::ALL.iter() {
            if let Some(pp) = plan.plls[pll.index()] {
                p.push_block(pll_params_addr(pll), &pp.params.to_bytes(0));
            }
        }

        for (clk, out) in plan.outputs.iter().enumerate() {
            let out = match out {
                Some(o) => o,
                None => continue,
            };
            let clk = clk as u8;
            let attrs = &cfg.outputs[clk as usize];

            p.push_block(ms_params_addr(clk), &out.params.to_bytes(out.r_div));
            p.push(clk_phase_addr(clk), attrs.phase & PHASE_MASK);
            p.push(clk_control_addr(clk), clk_control(out.pll, attrs));
        }

        p.push(REG_OUTPUT_ENABLE, plan.output_disable_mask());
        p
    }

    #[inline]
    fn push(self: &mut Self, reg: u8, value: u8) {
        self.writes[self.len] = (reg, value);
        self.len += 1;
    }

    fn push_block(self: &mut Self, base: u8, bytes: &[u8]) {
        for (i, b) in bytes.iter().enumerate() {
            self.push(base + i as u8, *b);
        }
    }

    /// (register, value) pairs in write order
    #[inline]
    pub fn writes(self: &Self) -> &[(u8, u8)] {
        &self.writes[..self.len]
    }

    #[inline]
    pub fn len(self: &Self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(self: &Self) -> bool {
        self.len == 0
    }
}


/// Control register of an enabled output
fn clk_control(pll: Pll, attrs: &OutputConfig) -> u8 {
    Reg::<ClkControl>::default()
        .set(ClkPowerDown::PoweredUp)
        .set(IntegerMode::Fractional)
        .set(pll)
        .set(ClkInvert::from(attrs.invert))
        .set(ClkSource::Multisynth)
        .set(attrs.drive)
        .w
}

/// Disable state register of 4 outputs, 2 bits each, lowest output in the low bits
fn disable_state_bits(outputs: &[OutputConfig]) -> u8 {
    outputs
        .iter()
        .enumerate()
        .fold(0, |acc, (i, o)| acc | ((o.disable_state as u8) << (2 * i)))
}
