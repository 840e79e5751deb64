//! Nullable financial figures and null-safe division.
//!
//! A `Figure` is a statement value that may be absent (empty cell).
//! Arithmetic propagates absence; only `safe_div` turns an unusable
//! denominator into a defined result.
//!
//! Division policy: a zero or null denominator yields exactly `0`,
//! for every ratio including the scoring models.

use std::ops::{Add, Mul, Neg, Sub};

/// A possibly-null numeric statement value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure(Option<f64>);

impl Figure {
    /// The null figure (missing cell or null-producing arithmetic).
    pub const NULL: Self = Self(None);

    /// Zero, the result of every undefined division.
    pub const ZERO: Self = Self(Some(0.0));

    /// Wrap a present value.
    pub const fn new(value: f64) -> Self {
        Self(Some(value))
    }

    /// Underlying value, `None` when null.
    pub const fn value(self) -> Option<f64> {
        self.0
    }

    /// Whether this figure is null.
    pub const fn is_null(self) -> bool {
        self.0.is_none()
    }

    /// A usable denominator is present, non-zero and not NaN.
    fn as_divisor(self) -> Option<f64> {
        self.0.filter(|d| *d != 0.0 && !d.is_nan())
    }
}

impl From<f64> for Figure {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for Figure {
    fn from(value: Option<f64>) -> Self {
        Self(value)
    }
}

impl Add for Figure {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.zip(rhs.0).map(|(a, b)| a + b))
    }
}

impl Sub for Figure {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.zip(rhs.0).map(|(a, b)| a - b))
    }
}

impl Neg for Figure {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.map(|v| -v))
    }
}

impl Mul<f64> for Figure {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self(self.0.map(|v| v * rhs))
    }
}

impl Mul<Figure> for f64 {
    type Output = Figure;

    fn mul(self, rhs: Figure) -> Figure {
        rhs * self
    }
}

/// Null-safe division.
///
/// Returns `num / den` when `den` is present and non-zero, otherwise `0`
/// regardless of the numerator. A null numerator over a usable
/// denominator stays null. An undefined quotient (`inf / inf`, or a NaN
/// numerator) is also `0`.
pub fn safe_div(num: Figure, den: Figure) -> Figure {
    match den.as_divisor() {
        Some(d) => Figure(num.0.map(|n| n / d).map(|q| if q.is_nan() { 0.0 } else { q })),
        None => Figure::ZERO,
    }
}

/// Element-wise `safe_div` over two sequences.
///
/// Returns `None` when the lengths differ.
pub fn safe_div_series(nums: &[Figure], dens: &[Figure]) -> Option<Vec<Figure>> {
    if nums.len() != dens.len() {
        return None;
    }
    Some(
        nums.iter()
            .zip(dens)
            .map(|(n, d)| safe_div(*n, *d))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_denominator_gives_zero() {
        assert_eq!(safe_div(Figure::new(5.0), Figure::ZERO), Figure::ZERO);
        assert_eq!(safe_div(Figure::new(-5.0), Figure::new(-0.0)), Figure::ZERO);
    }

    #[test]
    fn test_null_denominator_gives_zero() {
        assert_eq!(safe_div(Figure::new(5.0), Figure::NULL), Figure::ZERO);
        assert_eq!(safe_div(Figure::NULL, Figure::NULL), Figure::ZERO);
    }

    #[test]
    fn test_null_numerator_stays_null() {
        assert!(safe_div(Figure::NULL, Figure::new(2.0)).is_null());
    }

    #[test]
    fn test_nan_denominator_treated_as_null() {
        assert_eq!(safe_div(Figure::new(1.0), Figure::new(f64::NAN)), Figure::ZERO);
    }

    #[test]
    fn test_plain_division() {
        assert_eq!(safe_div(Figure::new(100.0), Figure::new(40.0)), Figure::new(2.5));
    }

    #[test]
    fn test_arithmetic_propagates_null() {
        let a = Figure::new(3.0);
        assert!((a + Figure::NULL).is_null());
        assert!((Figure::NULL - a).is_null());
        assert!((-Figure::NULL).is_null());
        assert!((2.0 * Figure::NULL).is_null());
        assert_eq!(a - Figure::new(1.0), Figure::new(2.0));
        assert_eq!(1.5 * a, Figure::new(4.5));
    }

    #[test]
    fn test_series_preserves_order() {
        let nums = [Figure::new(1.0), Figure::new(2.0), Figure::NULL];
        let dens = [Figure::new(2.0), Figure::ZERO, Figure::new(4.0)];
        let out = safe_div_series(&nums, &dens);
        assert_eq!(out, Some(vec![Figure::new(0.5), Figure::ZERO, Figure::NULL]));
    }

    #[test]
    fn test_series_length_mismatch_rejected() {
        let nums = [Figure::new(1.0), Figure::new(2.0)];
        let dens = [Figure::new(2.0)];
        assert_eq!(safe_div_series(&nums, &dens), None);
        assert_eq!(safe_div_series(&[], &[]), Some(vec![]));
    }

    #[test]
    fn test_overflowed_quotient_is_zero() {
        let inf = Figure::new(f64::INFINITY);
        assert_eq!(safe_div(inf, inf), Figure::ZERO);
        assert_eq!(safe_div(Figure::new(f64::NEG_INFINITY), inf), Figure::ZERO);
        assert_eq!(safe_div(Figure::new(f64::NAN), Figure::new(2.0)), Figure::ZERO);
        assert_eq!(safe_div(Figure::new(1.0), inf), Figure::ZERO);
    }
}
