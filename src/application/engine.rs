use crate::domain::booking::{Booking, BookingRecord, BookingStatus};
use crate::domain::event::{BookingEvent, EventType};
use crate::domain::money::Amount;
use crate::domain::policy::{DisputeResolution, FeePolicy, Settlement};
use crate::domain::ports::BookingStoreBox;
use crate::error::Result;

/// Applies booking events and writes the resulting splits back to storage.
///
/// `SettlementEngine` is the booking-management side of the fee policy: it
/// owns the lifecycle, asks [`FeePolicy`] for the numbers and persists them.
/// Events are applied one at a time and every store operation is awaited
/// before the next event, so a stream is processed with sequential consistency.
pub struct SettlementEngine {
    store: BookingStoreBox,
    policy: FeePolicy,
}

impl SettlementEngine {
    /// Creates a new `SettlementEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `store` - The store for booking records.
    /// * `policy` - The fee and refund rules applied to every settlement.
    pub fn new(store: BookingStoreBox, policy: FeePolicy) -> Self {
        Self { store, policy }
    }

    /// Applies a single event.
    ///
    /// Events for unknown bookings and duplicate `create` events are ignored.
    /// A rejected event (invalid transition, bad amount or party, refused
    /// stylist cancellation) returns an error and leaves the record as it was.
    pub async fn process_event(&self, event: BookingEvent) -> Result<()> {
        let Some(mut record) = self.store.get(event.booking).await? else {
            if event.r#type == EventType::Create {
                return self.create(&event).await;
            }
            tracing::debug!(
                booking = event.booking,
                kind = ?event.r#type,
                "ignoring event for unknown booking"
            );
            return Ok(());
        };

        let total = record.booking.total_amount;
        match event.r#type {
            EventType::Create => {
                // Ignore duplicate booking IDs
                tracing::debug!(booking = event.booking, "ignoring duplicate booking");
                return Ok(());
            }
            EventType::Confirm => {
                // Expiry only applies to bookings still awaiting confirmation.
                if record.booking.status == BookingStatus::Pending
                    && self
                        .policy
                        .confirmation_expired(record.booking.created_at, event.at)
                {
                    tracing::info!(
                        booking = event.booking,
                        "confirmation window lapsed, cancelling"
                    );
                    record.booking.transition(BookingStatus::Cancelled)?;
                } else {
                    record.booking.transition(BookingStatus::Confirmed)?;
                }
            }
            EventType::Complete => {
                record.settle(BookingStatus::Completed, self.policy.settle_completion(total))?;
            }
            EventType::Cancel => {
                let party = event.party()?;
                if record.booking.status == BookingStatus::Pending {
                    // Nothing has been captured yet.
                    record.booking.transition(BookingStatus::Cancelled)?;
                } else {
                    record.booking.ensure_transition(BookingStatus::Cancelled)?;
                    let settlement =
                        self.policy
                            .settle_cancellation(&record.booking, party, event.at)?;
                    record.settle(closing_status(&settlement), settlement)?;
                }
            }
            EventType::NoShow => {
                let party = event.party()?;
                record.settle(
                    BookingStatus::Refunded,
                    self.policy.settle_no_show(total, party),
                )?;
            }
            EventType::Dispute => {
                record.booking.transition(BookingStatus::Disputed)?;
            }
            EventType::Resolve => {
                let settlement = self.policy.settle_dispute(total, DisputeResolution::NoRefund);
                record.settle(BookingStatus::Completed, settlement)?;
            }
            EventType::Chargeback => {
                let settlement = self.policy.settle_dispute(total, DisputeResolution::Refund);
                record.settle(BookingStatus::Refunded, settlement)?;
            }
            EventType::PartialRefund => {
                let settlement =
                    self.policy
                        .settle_dispute(total, DisputeResolution::PartialRefund);
                record.settle(BookingStatus::Refunded, settlement)?;
            }
        }

        tracing::debug!(
            booking = record.id(),
            status = %record.booking.status,
            refund = %record.settlement.client_refund,
            payout = %record.settlement.stylist_payout,
            "booking updated"
        );
        self.store.store(record).await
    }

    async fn create(&self, event: &BookingEvent) -> Result<()> {
        let total = Amount::new(event.amount()?)?;
        let booking = Booking::new(event.booking, total, event.appointment()?, event.at);
        self.store.store(BookingRecord::new(booking)).await
    }

    /// Consumes the engine and returns every booking record ordered by id.
    pub async fn into_results(self) -> Result<Vec<BookingRecord>> {
        let mut records = self.store.get_all().await?;
        records.sort_by_key(BookingRecord::id);
        Ok(records)
    }
}

/// A cancellation that refunds the client anything ends as `Refunded`.
fn closing_status(settlement: &Settlement) -> BookingStatus {
    if settlement.client_refund.is_zero() {
        BookingStatus::Cancelled
    } else {
        BookingStatus::Refunded
    }
}
