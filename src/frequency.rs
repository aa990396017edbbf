//! Frequency planning
//!
//! Picks a VCO frequency for every PLL that feeds an enabled output and
//! derives the feedback and output multisynth dividers.
//!
//! The VCO frequency of a PLL comes from its master output: an even multiple
//! of the (pre-scaled) master frequency just above 600MHz. The master output
//! then divides down by an even integer, other outputs on the same PLL get a
//! fractional divider.

use log::debug;

use crate::{ config::*, constants::*, errors::*, multisynth::*, };


/// PLL settings
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct PllPlan {
    /// Output the VCO frequency was derived from
    pub master: u8,
    /// Number of doublings applied to the master frequency before picking the VCO.
    /// Informational only, PLL feedback dividers have no R stage.
    pub prescale: u8,
    /// VCO frequency, Hz
    pub vco_hz: u32,
    /// Feedback divider, VCO / crystal
    pub params: MultisynthParams,
}

/// Clock output settings
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct OutputPlan {
    pub pll: Pll,
    /// Output R divider exponent, output = multisynth / 2^r_div
    pub r_div: u8,
    /// Output divider, VCO / (frequency * 2^r_div)
    pub params: MultisynthParams,
}

/// Complete divider set for a configuration
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct FrequencyPlan {
    /// `None` for PLLs no enabled output uses
    pub plls: [Option<PllPlan>; PLLS],
    /// `None` for disabled outputs
    pub outputs: [Option<OutputPlan>; CLOCKS],
}


/// Valid output frequency range check
pub fn check_output_frequency(hz: u32) -> Result<(), Error> {
    if !(OUT_FREQ_MIN ..= OUT_FREQ_MAX).contains(&hz) { Err(Error::InvalidOutputFrequency(hz)) } else { Ok(()) }
}

/// Doubles `hz` until it reaches the minimum multisynth output frequency,
/// returns the new frequency and the number of doublings.
pub fn prescale(hz: u32) -> (u32, u8) {
    let mut f = hz;
    let mut steps = 0;
    while f < MS_FREQ_MIN && steps < R_DIV_MAX_STEPS {
        f *= 2;
        steps += 1;
    }
    (f, steps)
}

/// VCO frequency for a master output frequency.
/// Returns the VCO frequency and the master prescale exponent.
pub fn vco_for(master_hz: u32) -> Result<(u32, u8), Error> {
    check_output_frequency(master_hz)?;

    let (f, steps) = prescale(master_hz);

    // smallest even divider putting the VCO above its lower limit
    let omd_div = (VCO_FREQ_MIN as f64 / f as f64 + 3.0) as u32 & !1;
    (if !(OMD_DIV_MIN ..= OMD_DIV_MAX).contains(&omd_div) { Err(Error::InvalidPllDivider(omd_div)) } else { Ok(()) } )?;

    let vco = f as u64 * omd_div as u64;
    (if !(VCO_FREQ_MIN as u64 ..= VCO_FREQ_MAX as u64).contains(&vco) {
        Err(Error::InvalidVcoFrequency(vco.min(u32::MAX as u64) as u32))
    } else {
        Ok(())
    })?;

    Ok((vco as u32, steps))
}


impl FrequencyPlan {

    /// Plans every PLL referenced by an enabled output and every enabled output.
    /// Nothing is returned unless the whole configuration is valid.
    pub fn new(cfg: &DeviceConfig) -> Result<Self, Error> {
        let mut plls = [None; PLLS];
        for &pll in Pll::ALL.iter() {
            if cfg.pll_in_use(pll) {
                plls[pll.index()] = Some(Self::plan_pll(cfg, pll)?);
            }
        }

        let mut outputs = [None; CLOCKS];
        for (clk, out) in cfg.outputs.iter().enumerate() {
            if !out.enabled() {
                continue;
            }
            check_output_frequency(out.frequency)?;

            let vco_hz = plls[out.pll.index()]
                .map(|p: PllPlan| p.vco_hz)
                .ok_or(Error::UnassignedMaster(out.pll))?;

            let (f, r_div) = prescale(out.frequency);
            let params = MultisynthParams::new(vco_hz, f);
            debug!("CLK{}: {} Hz from PLL {:?}, R 2^{}", clk, out.frequency, out.pll, r_div);

            // Fractional output dividers below 8 aren't supported by the chip.
            // Not rejected, outputs above ~112.5MHz that aren't their PLL's master land here.
            if params.integer_part() < MS_DIV_FRAC_MIN {
                debug!("CLK{}: output divider {} below {}", clk, params.integer_part(), MS_DIV_FRAC_MIN);
            }

            outputs[clk] = Some(OutputPlan { pll: out.pll, r_div, params });
        }

        Ok(FrequencyPlan { plls, outputs })
    }

    fn plan_pll(cfg: &DeviceConfig, pll: Pll) -> Result<PllPlan, Error> {
        let master = cfg.master(pll).ok_or(Error::UnassignedMaster(pll))?;
        let master_hz = cfg.outputs[master as usize].frequency;
        if master_hz == 0 {
            return Err(Error::UnassignedMaster(pll));
        }

        let (vco_hz, prescale) = vco_for(master_hz)?;
        let params = MultisynthParams::new(vco_hz, cfg.crystal.hz());
        debug!("PLL {:?}: master CLK{} {} Hz, VCO {} Hz", pll, master, master_hz, vco_hz);

        Ok(PllPlan { master, prescale, vco_hz, params })
    }

    #[inline]
    pub fn vco_hz(self: &Self, pll: Pll) -> Option<u32> {
        self.plls[pll.index()].map(|p| p.vco_hz)
    }

    /// Frequency the dividers actually produce on output `clk`
    pub fn output_frequency(self: &Self, clk: u8) -> Option<f64> {
        let out = (*self.outputs.get(clk as usize)?)?;
        let vco = self.vco_hz(out.pll)?;
        Some(vco as f64 / out.params.ratio() / (1u32 << out.r_div) as f64)
    }

    /// Output enable register value, a set bit disables the output
    pub fn output_disable_mask(self: &Self) -> u8 {
        self.outputs
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_none())
            .fold(0, |m, (i, _)| m | (1 << i))
    }
}
