//! Si5351 registers

use core::marker::PhantomData;

use crate::config::{ DriveStrength, Pll, };


/// Output enable control, one bit per clock, 1 disables the output driver
pub const REG_OUTPUT_ENABLE: u8 = 3;

/// CLK0 control, CLK1..CLK7 follow
pub const REG_CLK0_CONTROL: u8 = 16;

/// CLK3..CLK0 disable state, 2 bits per clock
pub const REG_CLK3_0_DISABLE_STATE: u8 = 24;

/// CLK7..CLK4 disable state, 2 bits per clock
pub const REG_CLK7_4_DISABLE_STATE: u8 = 25;

/// PLL A feedback multisynth (MSNA), MSNB follows
pub const REG_PLL_PARAMS_BASE: u8 = 26;

/// Multisynth 0 parameters, MS1..MS7 follow
pub const REG_MS_PARAMS_BASE: u8 = 42;

/// CLK0 initial phase offset, CLK1..CLK7 follow
pub const REG_CLK0_PHASE: u8 = 165;

/// Crystal internal load capacitance
pub const REG_XTAL_LOAD: u8 = 183;

/// Bits always OR'd into [REG_XTAL_LOAD] next to the load code
pub const XTAL_LOAD_FIXED_BITS: u8 = 0x48;

/// Size of one multisynth parameter block
pub const MS_PARAMS_LEN: u8 = 8;

/// Phase offset is a 7 bit value
pub const PHASE_MASK: u8 = 0x7F;


/// First register of a PLL feedback multisynth block
#[inline]
pub fn pll_params_addr(pll: Pll) -> u8 {
    REG_PLL_PARAMS_BASE + (pll as u8) * MS_PARAMS_LEN
}

/// First register of a clock output multisynth block
#[inline]
pub fn ms_params_addr(clk: u8) -> u8 {
    REG_MS_PARAMS_BASE + clk * MS_PARAMS_LEN
}

#[inline]
pub fn clk_control_addr(clk: u8) -> u8 {
    REG_CLK0_CONTROL + clk
}

#[inline]
pub fn clk_phase_addr(clk: u8) -> u8 {
    REG_CLK0_PHASE + clk
}


/// Register marker types
macro_rules! gen_register_marker {
    ($(#[$meta:meta])* $r:ident, $reset:tt) => {
        $(#[$meta])*
        #[derive(Debug,Copy,Clone)]
        pub struct $r {}

        impl Default for Reg<$r> { #[inline] fn default() -> Self { Reg { w: $reset, phantom: PhantomData } } }
    }
}

gen_register_marker!(
    /// CLKx control (registers 16..23)
    ClkControl, 0
);

gen_register_marker!(
    /// Third byte of a multisynth block, R divider and P1[17:16]
    MsDivR, 0
);


/// Single 8 bit register
#[derive(Debug,Copy,Clone)]
pub struct Reg<R> {
    /// Register value
    pub w: u8,
    phantom: PhantomData<R>,
}

/// Bit operations on 8bit registers
impl<R> Reg<R> {
    #[inline]
    pub fn get<F>(self: &Self) -> F
    where F: Sized + BitField<R> + From<u8>
    {
        F::from(
            (self.w >> F::offset()) & F::mask()
        )
    }

    #[inline]
    pub fn set<F>(mut self: Self, f: F) -> Self
    where F: Sized + BitField<R> + Into<u8>
    {
        let fbits = (f.into() & F::mask()) << F::offset();
        let rbits = self.w & (! ( F::mask() << F::offset() ));
        self.w = rbits | fbits;
        self
    }
}


/// Bit field within a register of type `R`
pub trait BitField<R> {
    /// Number of bits in the bit field
    fn num_bits() -> u8;

    /// Offset from 0
    fn offset() -> u8;

    #[inline]
    fn mask() -> u8 {
        ((1u16 << Self::num_bits()) - 1) as u8
    }
}

/// Generate BitField implementation
macro_rules! gen_bitfield_impl {
	($r:ty, $n:ident, $nb:tt, $off:tt) => {
        impl BitField<$r> for $n {
            #[inline] fn num_bits() -> u8 { $nb }
            #[inline] fn offset() -> u8 { $off }
        }
    }
}

/// Small bitfield-encoded numbers
macro_rules! gen_bitfield_struct {
	($(#[$meta:meta])*, $r:ty, $n:ident, $nb:tt, $off:tt) => {
        $(#[$meta])*
        #[derive(Debug,Copy,Clone,PartialEq,Eq)]
        pub struct $n(pub u8);

        gen_bitfield_impl!($r, $n, $nb, $off);

        impl From<u8> for $n { #[inline] fn from(x: u8) -> Self { $n(x) } }
        impl From<$n> for u8 { #[inline] fn from(x: $n) -> u8 { x.0 } }
	};
}

macro_rules! gen_bitfield_enum {
	($r:ty, $n:ident, $nb:tt, $off:tt) => {
        gen_bitfield_impl!($r, $n, $nb, $off);

        impl From<$n> for u8 { #[inline] fn from(x: $n) -> u8 { x as u8 } }
    }
}


/// CLKx_PDN, powers the output driver down
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ClkPowerDown {
    PoweredUp,
    PoweredDown,
}
gen_bitfield_enum!(ClkControl, ClkPowerDown, 1, 7);


/// MSx_INT, integer only multisynth mode.
/// Only safe when the divider has no fractional part,
/// the planner always leaves it in fractional mode.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum IntegerMode {
    Fractional,
    Integer,
}
gen_bitfield_enum!(ClkControl, IntegerMode, 1, 6);


// MSx_SRC, multisynth source PLL
gen_bitfield_enum!(ClkControl, Pll, 1, 5);


/// CLKx_INV
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ClkInvert {
    Normal,
    Inverted,
}
gen_bitfield_enum!(ClkControl, ClkInvert, 1, 4);

impl From<bool> for ClkInvert {
    #[inline]
    fn from(inv: bool) -> Self {
        if inv { ClkInvert::Inverted } else { ClkInvert::Normal }
    }
}


/// CLKx_SRC, what drives the output stage
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ClkSource {
    Xtal,
    ClkIn,
    Multisynth0,
    Multisynth,
}
gen_bitfield_enum!(ClkControl, ClkSource, 2, 2);


// CLKx_IDRV
gen_bitfield_enum!(ClkControl, DriveStrength, 2, 0);


gen_bitfield_struct!(
    /// Rx_DIV, output divider is 2^RDiv
    , MsDivR, RDiv, 3, 4
);

gen_bitfield_struct!(
    /// Top two bits of the 18 bit P1 word
    , MsDivR, P1High, 2, 0
);
