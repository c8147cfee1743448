//! Unit string parsing - "mAh/g", "cm**2", "A*h", "m^-1"

use crate::unit::UnitError;
use crate::units::{UnitRegistry, UNITS};
use crate::Unit;
use cellcore_core::Number;

/// Parse a unit string against the shared registry
pub fn parse_unit(s: &str) -> Result<Unit, UnitError> {
    UNITS.parse(s)
}

/// Parse a quantity string like "5 mAh" or "2.5g" against the shared registry
pub fn parse_quantity_string(s: &str) -> Result<(Number, Unit), UnitError> {
    UNITS.parse_quantity(s)
}

impl UnitRegistry {
    /// Parse a unit expression.
    ///
    /// Supported formats:
    /// - Simple: "mAh", "g", "sec"
    /// - Powers: "cm^2", "cm**2", "cm²", "s^-1"
    /// - Products: "A*h", "W h"
    /// - Quotients: "mAh/g", "mAh/cm**2"; "a/b/c" reads as a/(b*c)
    ///
    /// The empty string and "1" are the dimensionless unit. An empty factor
    /// inside an expression ("mAh/", "mAh//g", "A**") is an error.
    pub fn parse(&self, s: &str) -> Result<Unit, UnitError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Unit::dimensionless());
        }

        if let Some(unit) = self.get(s) {
            return Ok(unit.clone());
        }

        let mut parts = s.split('/');
        // split always yields at least one part
        let mut result = self.parse_product(parts.next().unwrap_or_default(), s)?;
        for denominator in parts {
            let denominator = self.parse_product(denominator, s)?;
            result = result.divide(&denominator)?;
        }
        Ok(result)
    }

    /// Parse "5 mAh", "2.5g", "-3e-2 A" into a value and unit
    pub fn parse_quantity(&self, s: &str) -> Result<(Number, Unit), UnitError> {
        let s = s.trim();

        let split_pos = s
            .char_indices()
            .find(|&(i, c)| !is_number_char(c, s[..i].chars().last()))
            .map(|(i, _)| i)
            .unwrap_or(s.len());

        let (num_str, unit_str) = s.split_at(split_pos);
        if num_str.is_empty() {
            return Err(UnitError::UnknownUnit(format!("no number found in: {}", s)));
        }

        let value = Number::from_str(num_str)?;
        let unit = self.parse(unit_str)?;
        Ok((value, unit))
    }

    /// Product of factors separated by '*', '·' or whitespace ("**" is a power)
    fn parse_product(&self, s: &str, expression: &str) -> Result<Unit, UnitError> {
        let empty = || UnitError::UnknownUnit(format!("empty factor in '{}'", expression));
        let s = s.trim();
        if s.is_empty() {
            return Err(empty());
        }
        let normalized = s.replace("**", "^");

        let mut result: Option<Unit> = None;
        for factor in normalized.split(['*', '·']) {
            // '*' and '·' need a factor on each side; whitespace runs just separate
            if factor.trim().is_empty() {
                return Err(empty());
            }
            for word in factor.split_whitespace() {
                let unit = self.parse_power(word)?;
                result = Some(match result {
                    Some(product) => product.multiply(&unit),
                    None => unit,
                });
            }
        }
        result.ok_or_else(empty)
    }

    /// A single factor with an optional exponent
    fn parse_power(&self, s: &str) -> Result<Unit, UnitError> {
        if let Some((base, exp_str)) = s.split_once('^') {
            let exponent: i32 = exp_str.trim().parse().map_err(|_| UnitError::InvalidExponent {
                unit: s.to_string(),
                exponent: exp_str.to_string(),
            })?;
            return self.lookup_base_unit(base)?.power(exponent);
        }

        if let Some((base, exponent)) = split_superscript(s)? {
            return self.lookup_base_unit(base)?.power(exponent);
        }

        self.lookup_base_unit(s)
    }

    fn lookup_base_unit(&self, s: &str) -> Result<Unit, UnitError> {
        let s = s.trim();
        if s == "1" {
            return Ok(Unit::dimensionless());
        }

        self.get(s)
            .cloned()
            .ok_or_else(|| UnitError::UnknownUnit(s.to_string()))
    }
}

fn is_number_char(c: char, previous: Option<char>) -> bool {
    match c {
        '0'..='9' | '.' => true,
        'e' | 'E' => previous.is_some_and(|p| p.is_ascii_digit() || p == '.'),
        '-' | '+' => matches!(previous, None | Some('e') | Some('E')),
        _ => false,
    }
}

/// Split "cm²" into ("cm", 2) and "s⁻¹" into ("s", -1).
///
/// `Ok(None)` when there is no superscript; a malformed or overflowing one
/// is `InvalidExponent`.
fn split_superscript(s: &str) -> Result<Option<(&str, i32)>, UnitError> {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

    let Some(start) = s
        .char_indices()
        .find(|&(_, c)| c == '⁻' || DIGITS.contains(&c))
        .map(|(i, _)| i)
    else {
        return Ok(None);
    };
    let (base, sup) = s.split_at(start);
    let invalid = || UnitError::InvalidExponent {
        unit: s.to_string(),
        exponent: sup.to_string(),
    };

    let digits = sup.strip_prefix('⁻').unwrap_or(sup);
    if digits.is_empty() {
        return Err(invalid());
    }
    let mut value = 0i32;
    for c in digits.chars() {
        let digit = DIGITS.iter().position(|&d| d == c).ok_or_else(invalid)? as i32;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(invalid)?;
    }

    let exponent = if sup.starts_with('⁻') { -value } else { value };
    Ok(Some((base, exponent)))
}
