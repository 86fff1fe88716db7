use super::money::Amount;
use super::policy::Settlement;
use crate::error::{PolicyError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Refunded,
    Disputed,
}

impl BookingStatus {
    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, Refunded)
                | (Completed, Disputed)
                | (Disputed, Completed)
                | (Disputed, Refunded)
        )
    }

    /// Cancelled and refunded bookings never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Refunded)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Refunded => "REFUNDED",
            BookingStatus::Disputed => "DISPUTED",
        };
        f.write_str(name)
    }
}

/// A scheduled appointment between a client and a stylist.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Booking {
    pub id: u32,
    pub total_amount: Amount,
    pub appointment_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub status: BookingStatus,
}

impl Booking {
    pub fn new(
        id: u32,
        total_amount: Amount,
        appointment_time: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            total_amount,
            appointment_time,
            created_at,
            status: BookingStatus::Pending,
        }
    }

    pub fn ensure_transition(&self, next: BookingStatus) -> Result<()> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(PolicyError::InvalidTransition {
                booking: self.id,
                from: self.status,
                to: next,
            })
        }
    }

    /// Moves the booking to `next`, enforcing the lifecycle table.
    pub fn transition(&mut self, next: BookingStatus) -> Result<()> {
        self.ensure_transition(next)?;
        self.status = next;
        Ok(())
    }
}

/// The persisted row: a booking plus the split written back into it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct BookingRecord {
    pub booking: Booking,
    pub settlement: Settlement,
}

impl BookingRecord {
    pub fn new(booking: Booking) -> Self {
        Self {
            booking,
            settlement: Settlement::default(),
        }
    }

    pub fn id(&self) -> u32 {
        self.booking.id
    }

    /// Transitions the booking and records `settlement` in one step.
    ///
    /// The record is left untouched when the transition is rejected.
    pub fn settle(&mut self, next: BookingStatus, settlement: Settlement) -> Result<()> {
        self.booking.transition(next)?;
        self.settlement = settlement;
        Ok(())
    }
}
