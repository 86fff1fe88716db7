//! Application layer containing the booking settlement orchestration.
//!
//! This module defines the `SettlementEngine` which acts as the primary entry point
//! for processing booking events. It owns the storage port and the fee policy,
//! applying events sequentially so each stream has a single, ordered history.

pub mod engine;
