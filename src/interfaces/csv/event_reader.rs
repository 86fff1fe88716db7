use crate::domain::event::BookingEvent;
use crate::error::{PolicyError, Result};
use std::io::Read;

/// Reads booking events from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<BookingEvent>`.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct BookingEventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> BookingEventReader<R> {
    /// Creates a new `BookingEventReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes events.
    ///
    /// Rows are decoded one at a time, so arbitrarily long streams are processed
    /// without being loaded into memory.
    pub fn events(self) -> impl Iterator<Item = Result<BookingEvent>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PolicyError::from))
    }
}
