use super::booking::BookingRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence port for booking records.
///
/// Implementations must be `Send + Sync` so a boxed store can move across
/// tokio tasks.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn store(&self, record: BookingRecord) -> Result<()>;
    async fn get(&self, booking_id: u32) -> Result<Option<BookingRecord>>;
    async fn get_all(&self) -> Result<Vec<BookingRecord>>;
}

pub type BookingStoreBox = Box<dyn BookingStore>;
pub type BookingStoreFactory = Box<dyn Fn() -> BookingStoreBox + Send + Sync>;
