#![cfg_attr(not(test), no_std)]

//! [Si5351](https://www.skyworksinc.com/en/Products/Timing/CMOS-Clock-Generators/Si5351A-B-GT)
//! clock generator driver.
//!
//! Each output gets a frequency, the driver picks VCO frequencies
//! for both PLLs and all fractional dividers, then writes the complete
//! register program through a [device::RegisterWriter].
//!
//! ```no_run
//! # use si5351_planner::{ config::*, crystal::*, device::* };
//! # fn run<W: RegisterWriter>(w: W) -> Result<(), si5351_planner::errors::Error> {
//! let crystal = Crystal::new(CrystalFrequency::Mhz27, CrystalLoad::Pf8);
//! let mut clk = Si5351::new(w, crystal);
//! clk.init()?;
//!
//! clk.begin_batch();
//! clk.set_output(0, Pll::A, 2_000_000, 0, false, true)?;
//! clk.set_output(1, Pll::A, 2_000_000, 0, true, false)?;
//! clk.commit_batch()?;
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod register;
pub mod errors;
pub mod crystal;
pub mod config;
pub mod fraction;
pub mod multisynth;
pub mod frequency;
pub mod program;
pub mod device;
