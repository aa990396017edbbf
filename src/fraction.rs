//! Best rational approximation with a bounded denominator.
//!
//! Walks the Stern-Brocot tree between 0/1 and 1/1, always keeping the
//! target between the two bounds. A run of mediant steps that keeps
//! replacing the same bound is taken as one jump (a continued fraction
//! term), so the walk costs O(log(max_den)) jumps.

/// Fraction `num / den`
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Fraction {
    pub num: u32,
    pub den: u32,
}

impl Fraction {
    /// Degenerate "no fractional part" result
    pub const ZERO: Fraction = Fraction { num: 0, den: 1 };

    #[inline]
    pub fn value(self: &Self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

/// Closest fraction to `x` with a denominator no larger than `max_den`.
///
/// Inputs outside of (0, 1) or `max_den <= 1` give [Fraction::ZERO].
/// On a tie between the two final bounds the upper one wins.
pub fn best_fraction(x: f64, max_den: u32) -> Fraction {
    walk(x, max_den).0
}

/// The walk itself, also returns the number of jumps taken
fn walk(x: f64, max_den: u32) -> (Fraction, u32) {
    if !(x > 0.0 && x < 1.0) || max_den <= 1 {
        return (Fraction::ZERO, 0);
    }

    let mut lo = Fraction { num: 0, den: 1 };
    let mut hi = Fraction { num: 1, den: 1 };
    let mut jumps = 0;

    loop {
        // u64 so the mediant can't wrap near u32::MAX
        if lo.den as u64 + hi.den as u64 > max_den as u64 {
            break;
        }
        if x < lo.mediant(&hi, 1).value() {
            let k = run_length(hi, lo, max_den, |v| x < v);
            hi = hi.mediant(&lo, k);
        } else {
            let k = run_length(lo, hi, max_den, |v| !(x < v));
            lo = lo.mediant(&hi, k);
        }
        jumps += 1;
    }

    let best = if distance(x, lo.value()) < distance(x, hi.value()) { lo } else { hi };
    (best, jumps)
}

impl Fraction {
    /// `(self.num + k * other.num) / (self.den + k * other.den)`
    #[inline]
    fn mediant(self: &Self, other: &Fraction, k: u32) -> Fraction {
        Fraction {
            num: self.num + k * other.num,
            den: self.den + k * other.den,
        }
    }
}

/// Number of consecutive mediant steps replacing `moving` with `moving + k * fixed`.
///
/// `holds` is true for k = 1 and stays true up to the answer, since the
/// mediants move monotonically towards `fixed`. Capped so the denominator
/// stays within `max_den`.
fn run_length<F>(moving: Fraction, fixed: Fraction, max_den: u32, holds: F) -> u32
where F: Fn(f64) -> bool
{
    let mut good = 1;
    let mut bad = (max_den - moving.den) / fixed.den + 1;
    while bad - good > 1 {
        let mid = good + (bad - good) / 2;
        if holds(moving.mediant(&fixed, mid).value()) {
            good = mid;
        } else {
            bad = mid;
        }
    }
    good
}

#[inline]
fn distance(a: f64, b: f64) -> f64 {
    if a > b { a - b } else { b - a }
}
