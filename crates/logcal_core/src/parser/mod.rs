//! Daily log parsing.
//!
//! # Responsibility
//! - Turn `---`-delimited markdown blocks into event records (`block`).
//! - Scan a log folder through the storage collaborator (`folder`).
//!
//! # See also
//! - `crate::store::LogStore`

pub mod block;
pub mod folder;
