//! Constants

/// Number of clock outputs (CLK0..CLK7)
pub const CLOCKS: usize = 8;

/// Number of PLLs (A, B)
pub const PLLS: usize = 2;

/// Minimum allowed output frequency
pub const OUT_FREQ_MIN: u32 = 8_000;

/// Maximum allowed output frequency
pub const OUT_FREQ_MAX: u32 = 150_000_000;

/// VCO (PLL output) min frequency
pub const VCO_FREQ_MIN: u32 = 600_000_000;

/// VCO (PLL output) max frequency
pub const VCO_FREQ_MAX: u32 = 900_000_000;

/// Multisynth stages need at least this much on their output
/// before the R divider (AN619), lower frequencies are reached
/// by doubling up to here and dividing by R = 2^n afterwards.
pub const MS_FREQ_MIN: u32 = 500_000;

/// Upper limit on the number of output doublings
pub const R_DIV_MAX_STEPS: u8 = 128;

/// Output multisynth divider limits used for the VCO selection
pub const OMD_DIV_MIN: u32 = 8;

/// See [OMD_DIV_MIN]
pub const OMD_DIV_MAX: u32 = 2047;

/// Smallest output divider usable in fractional mode
pub const MS_DIV_FRAC_MIN: u32 = 8;

/// Largest fractional denominator a multisynth can hold (20 bits)
pub const FRAC_DENOM_MAX: u32 = 1_048_575;

/// 7-bit I2C address of the device
pub const I2C_ADDRESS: u8 = 0x60;
