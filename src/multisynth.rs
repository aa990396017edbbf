//! Multisynth divider words
//!
//! Both the PLL feedback dividers and the output dividers are
//! fractional dividers `a + b/c`, programmed as three words:
//!
//! P1 = 128 * a + floor(128 * b / c) - 512
//! P2 = 128 * b - c * floor(128 * b / c)
//! P3 = c

use log::trace;

use crate::{ constants::*, fraction::*, register::*, };


/// Packed divider words P1 (18 bits), P2 (20 bits), P3 (20 bits)
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct MultisynthParams {
    pub p1: u32,
    pub p2: u32,
    pub p3: u32,
}

impl MultisynthParams {

    /// Divider words for `f_num / f_den`,
    /// e.g. VCO / crystal for a PLL or VCO / output for a clock.
    ///
    /// The ratio has to be at least 4 (P1 underflows otherwise),
    /// which holds for any VCO and output frequency in range.
    pub fn new(f_num: u32, f_den: u32) -> Self {
        let a = f_num / f_den;
        let frac = best_fraction(
            f_num as f64 / f_den as f64 - a as f64,
            FRAC_DENOM_MAX,
        );
        let (b, c) = (frac.num, frac.den);

        let b128 = (128 * b) / c;
        let p = MultisynthParams {
            p1: (a << 7) + b128 - 512,
            p2: (b << 7) - c * b128,
            p3: c,
        };

        trace!("MS {} / {}: a {} b {} c {} => {:?}", f_num, f_den, a, b, c, p);
        p
    }

    /// Integer part `a` of the divider
    #[inline]
    pub fn integer_part(self: &Self) -> u32 {
        (self.p1 + 512) >> 7
    }

    /// Divide ratio encoded by the words, a + b/c
    pub fn ratio(self: &Self) -> f64 {
        ((self.p1 + 512) as f64 + self.p2 as f64 / self.p3 as f64) / 128.0
    }

    /// Register block, 8 bytes in device order.
    /// `r_div` is the output R divider exponent, 0 for PLLs.
    pub fn to_bytes(self: &Self, r_div: u8) -> [u8; MS_PARAMS_LEN as usize] {
        let div_r = Reg::<MsDivR>::default()
            .set(RDiv(r_div))
            .set(P1High((self.p1 >> 16) as u8));
        [
            (self.p3 >> 8) as u8,
            self.p3 as u8,
            div_r.w,
            (self.p1 >> 8) as u8,
            self.p1 as u8,
            (((self.p3 >> 12) & 0xF0) | ((self.p2 >> 16) & 0x0F)) as u8,
            (self.p2 >> 8) as u8,
            self.p2 as u8,
        ]
    }
}
