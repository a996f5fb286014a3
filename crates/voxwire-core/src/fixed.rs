use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Ticks are the atomic unit of simulation time.
pub type Ticks = u64;

/// `numerator / denominator` as a [`Fixed64`], or `None` for a zero
/// denominator or a result out of range.
#[inline]
pub fn ratio(numerator: u64, denominator: u64) -> Option<Fixed64> {
    let num = Fixed64::checked_from_num(numerator)?;
    let den = Fixed64::checked_from_num(denominator)?;
    num.checked_div(den)
}

/// Convert Fixed64 to f64. Use only for display, never in the analysis pass.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}
