//! Platform fee, payout and refund policy for marketplace bookings.
//!
//! [`domain::policy::FeePolicy`] is the pure calculator; the
//! [`application::engine::SettlementEngine`] applies a stream of booking
//! events to stored records and writes the computed splits back.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
