//! Crystal reference config
//! Frequency / internal load capacitance

use crate::register::XTAL_LOAD_FIXED_BITS;


/// Supported crystal frequencies
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum CrystalFrequency {
    Mhz25,
    Mhz27,
}

impl CrystalFrequency {
    #[inline]
    pub fn hz(self: Self) -> u32 {
        match self {
            CrystalFrequency::Mhz25 => 25_000_000,
            CrystalFrequency::Mhz27 => 27_000_000,
        }
    }
}


/// Internal crystal load capacitance.
/// Should match the crystal's rated load, otherwise
/// the reference will be slightly off frequency.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum CrystalLoad {
    Pf6 = 1 << 6,
    Pf8 = 2 << 6,
    Pf10 = 3 << 6,
}


/// Crystal reference, fixed for the lifetime of the device
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Crystal {
    pub frequency: CrystalFrequency,
    pub load: CrystalLoad,
}

impl Crystal {
    pub fn new(frequency: CrystalFrequency, load: CrystalLoad) -> Self {
        Crystal { frequency, load }
    }

    #[inline]
    pub fn hz(self: &Self) -> u32 {
        self.frequency.hz()
    }

    /// Register 183 value.
    /// NOTE: the fixed bits overlap bit 6 of the load code, so
    /// 8pF and 10pF program the same byte.
    pub fn load_register(self: &Self) -> u8 {
        XTAL_LOAD_FIXED_BITS | self.load as u8
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crystal_frequencies() {
        assert_eq!(CrystalFrequency::Mhz25.hz(), 25_000_000);
        assert_eq!(Crystal::new(CrystalFrequency::Mhz27, CrystalLoad::Pf8).hz(), 27_000_000);
    }

    #[test]
    fn load_register_keeps_fixed_bits() {
        let c = Crystal::new(CrystalFrequency::Mhz25, CrystalLoad::Pf6);
        assert_eq!(c.load_register(), 0x48);
        let c = Crystal::new(CrystalFrequency::Mhz25, CrystalLoad::Pf8);
        assert_eq!(c.load_register(), 0xC8);
        let c = Crystal::new(CrystalFrequency::Mhz25, CrystalLoad::Pf10);
        assert_eq!(c.load_register(), 0xC8);
    }
}
