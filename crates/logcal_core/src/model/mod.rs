//! Domain model for parsed log events.
//!
//! # Responsibility
//! - Define the immutable record produced by the parser.
//! - Define the date-keyed map consumed by the calendar.
//!
//! # Invariants
//! - Records are recreated wholesale on every reload; they carry no identity.

pub mod event;
