//! Bit-level tools for fixed-point register values.
//!
//! Phase oracles encode a real number into a register by truncating its
//! binary expansion. These helpers convert between integers, bit patterns,
//! and truncated fractional expansions, and interpret raw register values
//! under an integer/fraction bit split.

/// Big-endian bits of `val`, `width` bits wide (most significant first).
///
/// # Example
/// ```
/// use qoracle_rs::bits::iter_bits;
/// let bits: Vec<bool> = iter_bits(5, 4).collect();
/// assert_eq!(bits, vec![false, true, false, true]);
/// ```
pub fn iter_bits(val: usize, width: usize) -> impl Iterator<Item = bool> {
    debug_assert!(width >= usize::BITS as usize - val.leading_zeros() as usize);
    (0..width).map(move |i| (val >> (width - 1 - i)) & 1 == 1)
}

/// Reassemble a big-endian bit slice into an integer. Inverse of [`iter_bits`].
pub fn value_from_bits(bits: &[bool]) -> usize {
    bits.iter().fold(0, |acc, &b| (acc << 1) | b as usize)
}

/// First `width` bits of the binary fractional expansion of `x`, most
/// significant first. Bit `i` carries weight `2^-(i+1)`.
///
/// `x` must lie in `[0, 1)`. The truncation error is below `2^-width`.
///
/// # Example
/// ```
/// use qoracle_rs::bits::iter_bits_fixed_point;
/// // 0.625 = 0.101 in binary
/// let bits: Vec<bool> = iter_bits_fixed_point(0.625, 3).collect();
/// assert_eq!(bits, vec![true, false, true]);
/// ```
pub fn iter_bits_fixed_point(x: f64, width: usize) -> impl Iterator<Item = bool> {
    debug_assert!((0.0..1.0).contains(&x), "x = {} is outside [0, 1)", x);
    let mut frac = x;
    (0..width).map(move |_| {
        frac *= 2.0;
        let bit = frac >= 1.0;
        if bit {
            frac -= 1.0;
        }
        bit
    })
}

/// Evaluate a truncated fractional expansion: `sum_i bits[i] * 2^-(i+1)`.
pub fn float_from_fixed_point_bits(bits: &[bool]) -> f64 {
    bits.iter()
        .enumerate()
        .map(|(i, &b)| if b { 0.5_f64.powi(i as i32 + 1) } else { 0.0 })
        .sum()
}

/// Interpretation of a raw unsigned register value as a fixed-point number
/// with `int_bits` bits before and `frac_bits` bits after the binary point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPointFormat {
    pub int_bits: usize,
    pub frac_bits: usize,
}

impl FixedPointFormat {
    pub fn new(int_bits: usize, frac_bits: usize) -> Self {
        FixedPointFormat { int_bits, frac_bits }
    }

    /// Register width covered by this format.
    pub fn total_bits(&self) -> usize {
        self.int_bits + self.frac_bits
    }

    /// Decode a raw register value: `raw / 2^frac_bits`.
    ///
    /// # Panics
    /// Panics if `raw` does not fit in `total_bits()` bits.
    pub fn value(&self, raw: usize) -> f64 {
        assert!(
            raw < 1usize << self.total_bits(),
            "raw value {} does not fit in {} bits",
            raw,
            self.total_bits()
        );
        raw as f64 / (1u64 << self.frac_bits) as f64
    }
}
