//! Device configuration model.
//! Everything the planner needs to derive a full register program.

use crate::{ constants::*, crystal::*, errors::*, };


/// PLL selector
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Pll {
    A,
    B,
}

impl Pll {
    pub const ALL: [Pll; PLLS] = [Pll::A, Pll::B];

    #[inline]
    pub fn index(self: Self) -> usize {
        self as usize
    }
}

impl Default for Pll {
    fn default() -> Self { Pll::A }
}


/// Output driver strength
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum DriveStrength {
    Ma2,
    Ma4,
    Ma6,
    Ma8,
}

impl Default for DriveStrength {
    fn default() -> Self { DriveStrength::Ma2 }
}


/// Output state while the clock is disabled (frequency 0)
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum DisableState {
    Low,
    High,
    Tristate,
    Never,
}

impl Default for DisableState {
    fn default() -> Self { DisableState::Low }
}


/// Target of the per-output attribute setters
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Outputs {
    All,
    Single(u8),
}


/// One clock output
#[derive(Debug,Copy,Clone,Default,PartialEq,Eq)]
pub struct OutputConfig {
    /// Requested frequency, Hz. 0 disables the output.
    pub frequency: u32,
    /// Phase offset, 7 bits, in device units
    pub phase: u8,
    /// Source PLL
    pub pll: Pll,
    pub invert: bool,
    pub drive: DriveStrength,
    pub disable_state: DisableState,
}

impl OutputConfig {
    #[inline]
    pub fn enabled(self: &Self) -> bool {
        self.frequency != 0
    }
}


/// Full device state the register program is derived from
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct DeviceConfig {
    pub crystal: Crystal,
    pub outputs: [OutputConfig; CLOCKS],
    /// Output whose frequency sets the VCO of each PLL
    pub masters: [Option<u8>; PLLS],
}

impl DeviceConfig {
    /// All outputs disabled, no PLL masters
    pub fn new(crystal: Crystal) -> Self {
        DeviceConfig {
            crystal,
            outputs: [OutputConfig::default(); CLOCKS],
            masters: [None; PLLS],
        }
    }

    #[inline]
    pub fn master(self: &Self, pll: Pll) -> Option<u8> {
        self.masters[pll.index()]
    }

    /// Output config by index, validated
    pub fn output_mut(self: &mut Self, clk: u8) -> Result<&mut OutputConfig, Error> {
        self.outputs
            .get_mut(clk as usize)
            .ok_or(Error::InvalidOutput(clk))
    }

    /// Updates frequency, phase, invert flag and source PLL of an output,
    /// optionally making it the master of `pll`.
    pub fn set_output(
        self: &mut Self,
        clk: u8,
        pll: Pll,
        frequency: u32,
        phase: u8,
        invert: bool,
        pll_master: bool,
    ) -> Result<(), Error> {
        let out = self.output_mut(clk)?;
        out.frequency = frequency;
        out.phase = phase;
        out.invert = invert;
        out.pll = pll;

        if pll_master {
            self.masters[pll.index()] = Some(clk);
        }
        Ok(())
    }

    /// Applies `f` to every targeted output
    pub fn update_outputs<F>(self: &mut Self, target: Outputs, mut f: F) -> Result<(), Error>
    where F: FnMut(&mut OutputConfig)
    {
        match target {
            Outputs::All => {
                self.outputs.iter_mut().for_each(f);
                Ok(())
            }
            Outputs::Single(clk) => {
                f(self.output_mut(clk)?);
                Ok(())
            }
        }
    }

    /// True if any enabled output is sourced from `pll`
    pub fn pll_in_use(self: &Self, pll: Pll) -> bool {
        self.outputs.iter().any(|o| o.enabled() && o.pll == pll)
    }
}
