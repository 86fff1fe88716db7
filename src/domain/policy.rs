use super::booking::Booking;
use super::money::{Amount, Money, Rate};
use crate::config::PolicyConfig;
use crate::error::{PolicyError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The side of a booking that cancelled or failed to show up.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Client,
    Stylist,
}

impl FromStr for Party {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Party::Client),
            "stylist" => Ok(Party::Stylist),
            other => Err(PolicyError::InvalidParty(other.to_string())),
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Client => f.write_str("client"),
            Party::Stylist => f.write_str("stylist"),
        }
    }
}

/// How an admin closed a payment dispute.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DisputeResolution {
    Refund,
    PartialRefund,
    NoRefund,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FeeSplit {
    pub platform_fee: Money,
    pub stylist_payout: Money,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NoShowSplit {
    pub client_refund: Money,
    pub stylist_payout: Money,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RefundDecision {
    pub hours_until_appointment: Decimal,
    pub full_refund_eligible: bool,
}

/// Amounts written back into a booking record when it is settled.
///
/// `client_refund + stylist_payout + platform_fee` always equals the booking
/// total for a settled booking. `stylist_penalty` is charged against future
/// payouts and sits outside that sum.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct Settlement {
    pub client_refund: Money,
    pub stylist_payout: Money,
    pub platform_fee: Money,
    pub stylist_penalty: Money,
}

impl Settlement {
    fn full_refund(total: Amount) -> Self {
        Self {
            client_refund: total.into(),
            ..Self::default()
        }
    }

    /// Everything that leaves the client's payment.
    pub fn distributed(&self) -> Money {
        self.client_refund + self.stylist_payout + self.platform_fee
    }
}

impl From<FeeSplit> for Settlement {
    fn from(split: FeeSplit) -> Self {
        Self {
            platform_fee: split.platform_fee,
            stylist_payout: split.stylist_payout,
            ..Self::default()
        }
    }
}

impl From<NoShowSplit> for Settlement {
    fn from(split: NoShowSplit) -> Self {
        Self {
            client_refund: split.client_refund,
            stylist_payout: split.stylist_payout,
            ..Self::default()
        }
    }
}

/// Platform economics of a booking: fees, payouts, refunds.
///
/// `FeePolicy` is a pure calculator. It never touches storage or the clock;
/// callers pass `now` explicitly so every decision is reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeePolicy {
    platform_fee_rate: Rate,
    refund_window: TimeDelta,
    stylist_cancellation_window: TimeDelta,
    confirmation_window: TimeDelta,
    client_no_show_refund_rate: Rate,
    stylist_cancellation_penalty_rate: Rate,
    partial_dispute_refund_rate: Rate,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            platform_fee_rate: Rate::from_const(dec!(0.03)),
            refund_window: TimeDelta::hours(12),
            stylist_cancellation_window: TimeDelta::hours(3),
            confirmation_window: TimeDelta::minutes(15),
            client_no_show_refund_rate: Rate::from_const(dec!(0.60)),
            stylist_cancellation_penalty_rate: Rate::from_const(dec!(0.20)),
            partial_dispute_refund_rate: Rate::from_const(dec!(0.50)),
        }
    }
}

impl FeePolicy {
    /// Builds a policy from configuration, validating every rate and window.
    pub fn new(config: &PolicyConfig) -> Result<Self> {
        Ok(Self {
            platform_fee_rate: Rate::new(config.platform_fee_rate)?,
            refund_window: window(
                "refund_window_hours",
                config.refund_window_hours,
                TimeDelta::try_hours,
            )?,
            stylist_cancellation_window: window(
                "stylist_cancellation_window_hours",
                config.stylist_cancellation_window_hours,
                TimeDelta::try_hours,
            )?,
            confirmation_window: window(
                "confirmation_window_minutes",
                config.confirmation_window_minutes,
                TimeDelta::try_minutes,
            )?,
            client_no_show_refund_rate: Rate::new(config.client_no_show_refund_rate)?,
            stylist_cancellation_penalty_rate: Rate::new(
                config.stylist_cancellation_penalty_rate,
            )?,
            partial_dispute_refund_rate: Rate::new(config.partial_dispute_refund_rate)?,
        })
    }

    /// Splits a booking total into the platform fee and the stylist payout.
    ///
    /// The fee is rounded to the cent and the payout is the remainder, so the
    /// two always add back up to `total_amount`.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` when `total_amount` is not positive or has sub-cent digits.
    pub fn compute_fee_split(&self, total_amount: Decimal) -> Result<FeeSplit> {
        Ok(self.fee_split(Amount::new(total_amount)?))
    }

    pub fn fee_split(&self, total: Amount) -> FeeSplit {
        let platform_fee = self.platform_fee_rate.of(total);
        FeeSplit {
            platform_fee,
            stylist_payout: Money::from(total) - platform_fee,
        }
    }

    pub fn refund_decision(
        &self,
        appointment_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> RefundDecision {
        let lead = appointment_time - now;
        let hours = (Decimal::from(lead.num_seconds()) / dec!(3600)).round_dp(4);
        RefundDecision {
            hours_until_appointment: hours,
            full_refund_eligible: lead > self.refund_window,
        }
    }

    /// True when strictly more than the refund window remains before the appointment.
    pub fn evaluate_refund_eligibility(
        &self,
        appointment_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        self.refund_decision(appointment_time, now)
            .full_refund_eligible
    }

    /// Splits a booking total after a no-show.
    ///
    /// A client no-show refunds the configured share (60%) and pays the rest
    /// to the stylist; a stylist no-show refunds everything. The payout is
    /// derived by subtraction, so the split sums to the total exactly.
    pub fn compute_no_show_split(&self, total_amount: Decimal, party: Party) -> Result<NoShowSplit> {
        Ok(self.no_show_split(Amount::new(total_amount)?, party))
    }

    pub fn no_show_split(&self, total: Amount, party: Party) -> NoShowSplit {
        let client_refund = match party {
            Party::Client => self.client_no_show_refund_rate.of(total),
            Party::Stylist => total.into(),
        };
        NoShowSplit {
            client_refund,
            stylist_payout: Money::from(total) - client_refund,
        }
    }

    /// A pending booking expires when it is not confirmed within the window.
    pub fn confirmation_expired(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - created_at > self.confirmation_window
    }

    /// Stylists may cancel on their own only while the cancellation window is open.
    pub fn stylist_may_cancel(&self, appointment_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        appointment_time - now >= self.stylist_cancellation_window
    }

    pub fn settle_completion(&self, total: Amount) -> Settlement {
        self.fee_split(total).into()
    }

    /// Settles a confirmed booking cancelled by `party` at `now`.
    ///
    /// # Errors
    ///
    /// `AdminOverrideRequired` when a stylist cancels inside the stylist window.
    pub fn settle_cancellation(
        &self,
        booking: &Booking,
        party: Party,
        now: DateTime<Utc>,
    ) -> Result<Settlement> {
        let total = booking.total_amount;
        match party {
            Party::Client if self.evaluate_refund_eligibility(booking.appointment_time, now) => {
                Ok(Settlement::full_refund(total))
            }
            // Late client cancellation: the payment is retained and paid out.
            Party::Client => Ok(self.settle_completion(total)),
            Party::Stylist if self.stylist_may_cancel(booking.appointment_time, now) => {
                Ok(Settlement {
                    stylist_penalty: self.stylist_cancellation_penalty_rate.of(total),
                    ..Settlement::full_refund(total)
                })
            }
            Party::Stylist => Err(PolicyError::AdminOverrideRequired(booking.id)),
        }
    }

    pub fn settle_no_show(&self, total: Amount, party: Party) -> Settlement {
        self.no_show_split(total, party).into()
    }

    pub fn settle_dispute(&self, total: Amount, resolution: DisputeResolution) -> Settlement {
        match resolution {
            DisputeResolution::Refund => Settlement::full_refund(total),
            DisputeResolution::PartialRefund => {
                let client_refund = self.partial_dispute_refund_rate.of(total);
                let retained = Money::from(total) - client_refund;
                let platform_fee = self.platform_fee_rate.apply(retained.value());
                Settlement {
                    client_refund,
                    stylist_payout: retained - platform_fee,
                    platform_fee,
                    stylist_penalty: Money::ZERO,
                }
            }
            DisputeResolution::NoRefund => self.settle_completion(total),
        }
    }
}

fn window(
    name: &str,
    value: i64,
    build: fn(i64) -> Option<TimeDelta>,
) -> Result<TimeDelta> {
    if value < 0 {
        return Err(PolicyError::InvalidConfig(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    build(value).ok_or_else(|| PolicyError::InvalidConfig(format!("{name} is out of range")))
}
