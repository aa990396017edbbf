//! Errors

use core::fmt;

use crate::config::Pll;

#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Error {
    /// Clock output index outside of 0..8
    InvalidOutput(u8),

    /// Requested (or master) frequency outside of 8kHz..150MHz
    InvalidOutputFrequency(u32),

    /// Output divider picked for the VCO calculation outside of 8..2047
    InvalidPllDivider(u32),

    /// Calculated VCO frequency outside of 600MHz..900MHz
    InvalidVcoFrequency(u32),

    /// PLL feeds an enabled output but has no master output
    UnassignedMaster(Pll),

    /// Register write failed
    Transport,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidOutput(n) => write!(f, "clock output {} out of range", n),
            Error::InvalidOutputFrequency(hz) => write!(f, "frequency {} Hz out of range", hz),
            Error::InvalidPllDivider(d) => write!(f, "calculated output divider {} out of range", d),
            Error::InvalidVcoFrequency(hz) => write!(f, "calculated VCO frequency {} Hz out of range", hz),
            Error::UnassignedMaster(pll) => write!(f, "PLL {:?} has no master clock", pll),
            Error::Transport => write!(f, "register write failed"),
        }
    }
}
