#![allow(dead_code)]

use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const HEADER: [&str; 6] = ["type", "booking", "at", "amount", "appointment", "party"];

/// Writes a temporary events file: the header followed by `rows` verbatim.
pub fn events_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER.join(", ")).unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

/// Writes `bookings` bookings, each created, confirmed and completed.
pub fn generate_csv(path: &Path, bookings: u32) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;

    for n in 1..=bookings {
        let id = n.to_string();
        let cents = 1_000 + (n * 1_337) % 50_000;
        let amount = format!("{}.{:02}", cents / 100, cents % 100);
        wtr.write_record([
            "create",
            id.as_str(),
            "2025-10-20T09:00:00Z",
            amount.as_str(),
            "2025-10-25T14:00:00Z",
            "",
        ])?;
        wtr.write_record(["confirm", id.as_str(), "2025-10-20T09:05:00Z", "", "", ""])?;
        wtr.write_record(["complete", id.as_str(), "2025-10-25T15:00:00Z", "", "", ""])?;
    }

    wtr.flush()?;
    Ok(())
}
