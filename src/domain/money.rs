use crate::error::{PolicyError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Number of decimal places in a currency amount (cents).
pub const CENT_SCALE: u32 = 2;

/// Rounds to the nearest cent, midpoints away from zero (2.265 -> 2.27).
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CENT_SCALE);
    rounded
}

/// A positive booking price with whole-cent precision.
///
/// This is the validated input of every policy calculation. Construction
/// rejects zero, negative and sub-cent values so the rest of the crate can
/// rely on exact cent arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(PolicyError::InvalidAmount(format!(
                "{value} must be positive"
            )));
        }
        if value.normalize().scale() > CENT_SCALE {
            return Err(PolicyError::InvalidAmount(format!(
                "{value} is not a whole number of cents"
            )));
        }
        let mut value = value;
        value.rescale(CENT_SCALE);
        Ok(Self(value))
    }

    /// Builds an amount from a float, rejecting NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(PolicyError::InvalidAmount(format!(
                "{value} is not a finite number"
            )));
        }
        let cents = value * 100.0;
        let whole = cents.round();
        if (cents - whole).abs() > 1e-6 {
            return Err(PolicyError::InvalidAmount(format!(
                "{value} is not a whole number of cents"
            )));
        }
        if whole.abs() >= i64::MAX as f64 {
            return Err(PolicyError::InvalidAmount(format!("{value} is out of range")));
        }
        Self::new(Decimal::new(whole as i64, CENT_SCALE))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PolicyError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<f64> for Amount {
    type Error = PolicyError;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_f64(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A computed money value (fee, payout, refund), always rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(round_cents(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Amount> for Money {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A fraction in `[0, 1]` used for fees, refund shares and penalties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rate(Decimal);

impl Rate {
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(PolicyError::InvalidConfig(format!(
                "rate {value} must be between 0 and 1"
            )));
        }
        Ok(Self(value))
    }

    /// Used for compile-time defaults only; callers must pass a value in `[0, 1]`.
    pub(crate) const fn from_const(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// This rate applied to `amount`, rounded to cents.
    pub fn of(&self, amount: Amount) -> Money {
        self.apply(amount.value())
    }

    pub fn apply(&self, value: Decimal) -> Money {
        Money::new(value * self.0)
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = PolicyError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_cents_midpoint_away_from_zero() {
        assert_eq!(round_cents(dec!(2.265)), dec!(2.27));
        assert_eq!(round_cents(dec!(2.275)), dec!(2.28));
        assert_eq!(round_cents(dec!(2.2649)), dec!(2.26));
        assert_eq!(round_cents(dec!(3)).to_string(), "3.00");
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.00)).is_ok());
        assert!(Amount::new(dec!(1000000.0000)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(PolicyError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-10)),
            Err(PolicyError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::new(dec!(10.005)),
            Err(PolicyError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_amount_from_f64() {
        assert_eq!(Amount::from_f64(75.5).unwrap().value(), dec!(75.50));
        assert_eq!(Amount::from_f64(2.27).unwrap().value(), dec!(2.27));
        assert!(matches!(
            Amount::from_f64(f64::NAN),
            Err(PolicyError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::from_f64(f64::INFINITY),
            Err(PolicyError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::from_f64(-10.0),
            Err(PolicyError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::from_f64(10.005),
            Err(PolicyError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_amount_display_pads_cents() {
        let amount = Amount::new(dec!(100)).unwrap();
        assert_eq!(amount.to_string(), "100.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(10.0));
        let b = Money::new(dec!(2.5));
        assert_eq!(a + b, Money::new(dec!(12.5)));
        assert_eq!(a - b, Money::new(dec!(7.5)));
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_rate_bounds() {
        assert!(Rate::new(dec!(0.03)).is_ok());
        assert!(Rate::new(dec!(0)).is_ok());
        assert!(Rate::new(dec!(1)).is_ok());
        assert!(matches!(
            Rate::new(dec!(1.01)),
            Err(PolicyError::InvalidConfig(_))
        ));
        assert!(matches!(
            Rate::new(dec!(-0.5)),
            Err(PolicyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rate_of_amount_rounds_to_cents() {
        let rate = Rate::new(dec!(0.03)).unwrap();
        let amount = Amount::new(dec!(75.50)).unwrap();
        assert_eq!(rate.of(amount), Money(dec!(2.27)));
    }
}
