use crate::domain::booking::BookingRecord;
use crate::domain::ports::BookingStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for booking records.
///
/// Uses `Arc<RwLock<HashMap<u32, BookingRecord>>>` to allow shared concurrent access.
/// Clones share the same map.
#[derive(Default, Clone)]
pub struct InMemoryBookingStore {
    records: Arc<RwLock<HashMap<u32, BookingRecord>>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn store(&self, record: BookingRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id(), record);
        Ok(())
    }

    async fn get(&self, booking_id: u32) -> Result<Option<BookingRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&booking_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<BookingRecord>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::Booking;
    use crate::domain::money::Amount;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn record(id: u32) -> BookingRecord {
        let at = Utc.with_ymd_and_hms(2025, 10, 25, 14, 0, 0).unwrap();
        BookingRecord::new(Booking::new(id, Amount::new(dec!(40)).unwrap(), at, at))
    }

    #[tokio::test]
    async fn test_store_and_get() {
        let store = InMemoryBookingStore::new();
        store.store(record(1)).await.unwrap();

        assert_eq!(store.get(1).await.unwrap(), Some(record(1)));
        assert!(store.get(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_overwrites_and_lists() {
        let store = InMemoryBookingStore::new();
        store.store(record(1)).await.unwrap();
        store.store(record(2)).await.unwrap();

        let mut updated = record(1);
        updated.booking.status = crate::domain::booking::BookingStatus::Confirmed;
        store.store(updated.clone()).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&updated));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryBookingStore::new();
        let other = store.clone();
        store.store(record(9)).await.unwrap();
        assert!(other.get(9).await.unwrap().is_some());
    }
}
