//! Calendar projection of the event map.
//!
//! # Responsibility
//! - Model calendar UI state as immutable snapshots (`state`).
//! - Project snapshots into a month grid (`grid`) and a detail panel
//!   (`detail`) that a host UI can draw directly.

pub mod detail;
pub mod grid;
pub mod state;
