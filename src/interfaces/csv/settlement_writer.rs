use crate::domain::booking::BookingRecord;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct SettlementRow {
    booking: u32,
    status: String,
    total: String,
    platform_fee: String,
    stylist_payout: String,
    client_refund: String,
    stylist_penalty: String,
}

impl From<&BookingRecord> for SettlementRow {
    fn from(record: &BookingRecord) -> Self {
        let settlement = &record.settlement;
        Self {
            booking: record.id(),
            status: record.booking.status.to_string(),
            total: record.booking.total_amount.to_string(),
            platform_fee: settlement.platform_fee.to_string(),
            stylist_payout: settlement.stylist_payout.to_string(),
            client_refund: settlement.client_refund.to_string(),
            stylist_penalty: settlement.stylist_penalty.to_string(),
        }
    }
}

/// Writes the settlement report as CSV, one row per booking.
///
/// Amounts are always printed with two decimals.
pub struct SettlementWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SettlementWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_records(&mut self, records: &[BookingRecord]) -> Result<()> {
        for record in records {
            self.writer.serialize(SettlementRow::from(record))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{Booking, BookingStatus};
    use crate::domain::money::{Amount, Money};
    use crate::domain::policy::Settlement;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn write(records: &[BookingRecord]) -> String {
        let mut out = Vec::new();
        SettlementWriter::new(&mut out).write_records(records).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_writer_formats_rows() {
        let at = Utc.with_ymd_and_hms(2025, 10, 25, 14, 0, 0).unwrap();
        let mut record =
            BookingRecord::new(Booking::new(4, Amount::new(dec!(100)).unwrap(), at, at));
        record.booking.status = BookingStatus::Completed;
        record.settlement = Settlement {
            platform_fee: Money::new(dec!(3)),
            stylist_payout: Money::new(dec!(97)),
            ..Settlement::default()
        };

        let output = write(&[record]);
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("booking,status,total,platform_fee,stylist_payout,client_refund,stylist_penalty")
        );
        assert_eq!(lines.next(), Some("4,COMPLETED,100.00,3.00,97.00,0.00,0.00"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_writer_empty_report() {
        assert_eq!(write(&[]), "");
    }
}
