use crate::domain::booking::BookingRecord;
use crate::domain::ports::BookingStore;
use crate::error::{PolicyError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing booking records.
pub const CF_BOOKINGS: &str = "bookings";

/// A persistent booking store backed by RocksDB.
///
/// Records are stored as JSON under the big-endian booking id, so a forward
/// scan yields bookings in id order.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "bookings" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_bookings = ColumnFamilyDescriptor::new(CF_BOOKINGS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_bookings])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn bookings(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_BOOKINGS).ok_or_else(|| {
            PolicyError::InternalError(Box::new(std::io::Error::other(
                "Bookings column family not found",
            )))
        })
    }
}

#[async_trait]
impl BookingStore for RocksDBStore {
    async fn store(&self, record: BookingRecord) -> Result<()> {
        let cf = self.bookings()?;
        let value = serde_json::to_vec(&record)?;
        self.db.put_cf(cf, record.id().to_be_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, booking_id: u32) -> Result<Option<BookingRecord>> {
        let cf = self.bookings()?;
        match self.db.get_cf(cf, booking_id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<BookingRecord>> {
        let cf = self.bookings()?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }
}
