//! Domain layer: money types, the booking lifecycle and the fee policy.
//!
//! Nothing in here performs I/O. Storage is reached only through the
//! [`ports`] traits.

pub mod booking;
pub mod event;
pub mod money;
pub mod policy;
pub mod ports;
