//! Widening fixed-point primitives. Every conversion in the engine goes
//! through one of these two functions so the rounding direction is explicit
//! at each call site.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathError {
    Overflow,
    DivisionByZero,
}

pub type MathResult = Result<u64, MathError>;

/// `floor(a * b / c)`.
pub fn mul_div_down(a: u64, b: u64, c: u64) -> MathResult {
    if c == 0 {
        return Err(MathError::DivisionByZero);
    }
    let wide = (a as u128) * (b as u128) / (c as u128);
    u64::try_from(wide).map_err(|_| MathError::Overflow)
}

/// `ceil(a * b / c)`.
pub fn mul_div_up(a: u64, b: u64, c: u64) -> MathResult {
    if c == 0 {
        return Err(MathError::DivisionByZero);
    }
    let prod = (a as u128) * (b as u128);
    let wide = prod
        .checked_add(c as u128 - 1)
        .ok_or(MathError::Overflow)?
        / (c as u128);
    u64::try_from(wide).map_err(|_| MathError::Overflow)
}
