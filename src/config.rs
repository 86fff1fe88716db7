use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Tunable rates and windows of the booking policy.
///
/// Every field is optional in a policy file; missing fields fall back to the
/// marketplace defaults (3% fee, 12 h refund window, 60/40 client no-show).
/// Rates are decimal strings such as `"0.03"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    pub platform_fee_rate: Decimal,
    pub refund_window_hours: i64,
    pub stylist_cancellation_window_hours: i64,
    pub confirmation_window_minutes: i64,
    pub client_no_show_refund_rate: Decimal,
    pub stylist_cancellation_penalty_rate: Decimal,
    pub partial_dispute_refund_rate: Decimal,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            platform_fee_rate: dec!(0.03),
            refund_window_hours: 12,
            stylist_cancellation_window_hours: 3,
            confirmation_window_minutes: 15,
            client_no_show_refund_rate: dec!(0.60),
            stylist_cancellation_penalty_rate: dec!(0.20),
            partial_dispute_refund_rate: dec!(0.50),
        }
    }
}

impl PolicyConfig {
    /// Reads a JSON policy file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
