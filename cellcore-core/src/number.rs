//! Exact decimal numbers for unit arithmetic
//!
//! Unit scale factors (`mAh` = 3.6 C, `cm**2` = 1e-4 m², ...) are decimal
//! by nature. Keeping them in `DBig` means a chain like
//! `mAh / (Ah / g) / g` reduces to the exact decimal `0.0005` instead of
//! accumulating binary rounding along the way. Values leave the unit layer
//! as `f64` through [`Number::to_f64`].

use dashu_float::DBig;
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("invalid number format: {0}")]
    ParseError(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("non-finite value: {0}")]
    NonFinite(String),
}

/// Working precision (decimal digits)
const DEFAULT_PRECISION: usize = 50;

/// Arbitrary precision decimal number
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(DEFAULT_PRECISION).value()
    }

    /// Parse a decimal string. Accepts "12", "-0.5", "1.5e-3", "36e2".
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        let lower = s.to_lowercase();

        if let Some((mantissa, exponent)) = lower.split_once('e') {
            let mantissa: DBig = mantissa
                .parse()
                .map_err(|_| NumberError::ParseError(s.to_string()))?;
            let exponent: isize = exponent
                .trim_start_matches('+')
                .parse()
                .map_err(|_| NumberError::ParseError(s.to_string()))?;

            // mantissa * 10^exponent
            let scale = Self::with_work_precision(DBig::from_parts(IBig::ONE, exponent));
            let inner = Self::with_work_precision(mantissa) * scale;
            return Ok(Self { inner });
        }

        let inner: DBig = s
            .parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        Ok(Self { inner: Self::with_work_precision(inner) })
    }

    /// Create from i64 with working precision
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    /// Create from f64 through its shortest round-trip decimal form.
    pub fn from_f64(f: f64) -> Result<Self, NumberError> {
        if !f.is_finite() {
            return Err(NumberError::NonFinite(f.to_string()));
        }
        Self::from_str(&format!("{:e}", f))
    }

    pub fn one() -> Self {
        Self::from_i64(1)
    }

    pub fn zero() -> Self {
        Self::from_i64(0)
    }

    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Division that reports a zero divisor instead of panicking
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Integer power by repeated squaring
    pub fn pow(&self, exp: i32) -> Result<Self, NumberError> {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut remaining = exp.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base);
            }
        }

        if exp < 0 {
            Self::one().checked_div(&result)
        } else {
            Ok(result)
        }
    }

    /// Nearest f64 (ties to even). `None` if out of the f64 range.
    pub fn to_f64(&self) -> Option<f64> {
        let value = self.inner.to_f64().value();
        value.is_finite().then_some(value)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_f64() {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "{}", self.inner),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1.0)
    }

    #[test]
    fn test_parse_plain_and_scientific() {
        assert_eq!(Number::from_str("36e2").unwrap(), Number::from_i64(3600));
        assert_eq!(Number::from_str("3.6e3").unwrap(), Number::from_i64(3600));
        assert_eq!(Number::from_str("0.001").unwrap(), Number::from_str("1e-3").unwrap());
        assert!(Number::from_str("abc").is_err());
    }

    #[test]
    fn test_from_f64() {
        let n = Number::from_f64(2.0).unwrap();
        assert_eq!(n, Number::from_i64(2));

        let n = Number::from_f64(0.125).unwrap();
        assert_eq!(n.to_f64(), Some(0.125));

        assert!(Number::from_f64(f64::NAN).is_err());
        assert!(Number::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_exact_decimal_chain() {
        // mAh / (Ah / g) / (2 g) in SI factors
        let mah = Number::from_str("3.6").unwrap();
        let ah_per_g = Number::from_i64(3600)
            .checked_div(&Number::from_str("0.001").unwrap())
            .unwrap();
        let two_g = Number::from_str("0.002").unwrap();

        let factor = mah.checked_div(&ah_per_g).unwrap().checked_div(&two_g).unwrap();
        assert_eq!(factor, Number::from_str("0.0005").unwrap());
        assert!(approx(factor.to_f64().unwrap(), 0.0005));
    }

    #[test]
    fn test_division_by_zero() {
        let result = Number::one().checked_div(&Number::zero());
        assert_eq!(result, Err(NumberError::DivisionByZero));
    }

    #[test]
    fn test_pow() {
        let cm = Number::from_str("0.01").unwrap();
        assert_eq!(cm.pow(2).unwrap(), Number::from_str("0.0001").unwrap());
        assert_eq!(Number::from_i64(10).pow(-3).unwrap(), Number::from_str("0.001").unwrap());
        assert_eq!(Number::from_i64(7).pow(0).unwrap(), Number::one());
        assert_eq!(Number::from_i64(3).pow(13).unwrap(), Number::from_i64(1_594_323));
    }

    #[test]
    fn test_pow_out_of_f64_range() {
        let ten = Number::from_i64(10);
        assert_eq!(ten.pow(1000).unwrap().to_f64(), None);
        assert_eq!(ten.pow(-20).unwrap(), Number::from_str("1e-20").unwrap());
    }

    #[test]
    fn test_to_f64_rounds_to_nearest() {
        let tiny = Number::from_str("1.5e-253").unwrap();
        assert_eq!(tiny.to_f64(), Some(1.5e-253));

        let c = Number::from_i64(100 - 32)
            .mul(&Number::from_i64(5))
            .checked_div(&Number::from_i64(9))
            .unwrap();
        assert_eq!(c.to_f64(), Some(340.0 / 9.0));
        assert_eq!(Number::from_str("0.1").unwrap().to_f64(), Some(0.1));
    }

    #[test]
    fn test_serde_as_string() {
        let n = Number::from_str("3.6").unwrap();
        let json = serde_json::to_string(&n).unwrap();
        let back: Number = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }
}
