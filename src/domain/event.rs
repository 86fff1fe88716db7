use super::policy::Party;
use crate::error::{PolicyError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Kind of a booking event, written in snake_case in the `type` column.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Create,
    Confirm,
    Complete,
    Cancel,
    NoShow,
    Dispute,
    Resolve,
    Chargeback,
    PartialRefund,
}

/// One row of the booking event stream.
///
/// `at` is the moment the event happened and doubles as "now" for every
/// time-based policy decision. `amount` and `appointment` are only read by
/// `create`, `party` only by `cancel` and `no_show`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct BookingEvent {
    pub r#type: EventType,
    pub booking: u32,
    pub at: DateTime<Utc>,
    pub amount: Option<Decimal>,
    pub appointment: Option<DateTime<Utc>>,
    pub party: Option<String>,
}

impl BookingEvent {
    pub fn amount(&self) -> Result<Decimal> {
        self.amount.ok_or(PolicyError::MissingField {
            booking: self.booking,
            field: "amount",
        })
    }

    pub fn appointment(&self) -> Result<DateTime<Utc>> {
        self.appointment.ok_or(PolicyError::MissingField {
            booking: self.booking,
            field: "appointment",
        })
    }

    /// Parses the `party` column.
    ///
    /// # Errors
    ///
    /// `MissingField` when the column is empty, `InvalidParty` when it names
    /// neither side of the booking.
    pub fn party(&self) -> Result<Party> {
        self.party
            .as_deref()
            .ok_or(PolicyError::MissingField {
                booking: self.booking,
                field: "party",
            })?
            .parse()
    }
}
