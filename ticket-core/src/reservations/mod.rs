//! Reservation lifecycle orchestration
//!
//! The [`ReservationService`] composes the inventory store, the ledger and
//! the receipt issuer into the public operations: create, confirm/pay,
//! cancel, query. Each operation is one transaction — all writes commit or
//! none do — and every race-prone write opens with its guard statement.

mod service;

pub use service::ReservationService;
