use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::op;

pub const SETTLEMENT_CURRENCY_CODE: &str = "USD";
pub const SETTLEMENT_CURRENCY_CODE_LOWER: &str = "usd";

//--------------------------------------        Money        ---------------------------------------------------------
/// A monetary amount in minor units (cents) of the settlement currency.
///
/// Provider payloads express amounts as decimal numbers with at most two decimal places. Storing cents in an `i64`
/// keeps arithmetic (invoice totals, fee deductions) exact.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Money(i64);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, SubAssign, sub_assign);
op!(unary Money, Neg, neg);

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from_cents(self.cents() * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a monetary amount: {0}")]
pub struct MoneyConversionError(String);

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn from_whole(units: i64) -> Self {
        Self(units * 100)
    }

    /// Converts a decimal amount, as deserialized from a provider payload, into cents, rounding to two decimal
    /// places.
    pub fn from_decimal(amount: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self((amount * 100.0).round() as i64)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Parses a decimal string the way the billing host interprets loosely-typed amounts: the leading integer part
    /// is taken as whole currency units and everything that cannot be parsed counts as zero. Never fails.
    pub fn truncating_parse(s: &str) -> Self {
        let s = s.trim();
        let end = match s.as_bytes().first() {
            Some(b'-' | b'+') => 1 + s[1..].bytes().take_while(u8::is_ascii_digit).count(),
            _ => s.bytes().take_while(u8::is_ascii_digit).count(),
        };
        s[..end].parse::<i64>().map(Self::from_whole).unwrap_or_default()
    }

    /// Deducts `bps` basis points from the amount (300 bps = 3%).
    pub fn less_fee_bps(self, bps: i64) -> Self {
        Self(self.0 - self.0 * bps / 10_000)
    }
}

impl FromStr for Money {
    type Err = MoneyConversionError;

    /// Parses a decimal amount string with at most two decimal places, e.g. "398.00" or "1000".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, '.');
        let whole = parts
            .next()
            .ok_or_else(|| MoneyConversionError(s.to_string()))?
            .parse::<i64>()
            .map_err(|e| MoneyConversionError(format!("Invalid amount: {s}. {e}")))?;
        let cents = match parts.next() {
            None | Some("") => 0,
            Some(frac) if frac.len() <= 2 && frac.bytes().all(|b| b.is_ascii_digit()) => {
                let c = frac.parse::<i64>().map_err(|e| MoneyConversionError(format!("Invalid amount: {s}. {e}")))?;
                if frac.len() == 1 {
                    c * 10
                } else {
                    c
                }
            },
            Some(frac) => return Err(MoneyConversionError(format!("Invalid amount: {s}. Bad fraction '{frac}'"))),
        };
        let sign = if whole < 0 { -1 } else { 1 };
        Ok(Self(whole * 100 + sign * cents))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_is_two_decimal_places() {
        assert_eq!(Money::from_whole(1000).to_string(), "1000.00");
        assert_eq!(Money::from_cents(97_000).to_string(), "970.00");
        assert_eq!(Money::from_cents(1_050).to_string(), "10.50");
        assert_eq!(Money::from_cents(-25).to_string(), "-0.25");
    }

    #[test]
    fn parse_decimal_strings() {
        assert_eq!("398.00".parse::<Money>().unwrap(), Money::from_cents(39_800));
        assert_eq!("1000".parse::<Money>().unwrap(), Money::from_whole(1000));
        assert_eq!("10.5".parse::<Money>().unwrap(), Money::from_cents(1_050));
        assert!("ten".parse::<Money>().is_err());
        assert!("10.505".parse::<Money>().is_err());
    }

    #[test]
    fn truncating_parse_is_total() {
        assert_eq!(Money::truncating_parse("500"), Money::from_whole(500));
        assert_eq!(Money::truncating_parse("10.9"), Money::from_whole(10));
        assert_eq!(Money::truncating_parse("-3"), Money::from_whole(-3));
        assert_eq!(Money::truncating_parse("garbage"), Money::ZERO);
        assert_eq!(Money::truncating_parse(""), Money::ZERO);
    }

    #[test]
    fn fee_deduction() {
        assert_eq!(Money::from_whole(1000).less_fee_bps(300), Money::from_whole(970));
        assert_eq!(Money::ZERO.less_fee_bps(300), Money::ZERO);
    }

    #[test]
    fn sums() {
        let total: Money = [Money::from_whole(500), Money::from_whole(250)].into_iter().sum();
        assert_eq!(total, Money::from_whole(750));
    }
}
