//! Theme package ingestion pipeline and lifecycle.
//!
//! Glues the other crates into the flows the application actually runs:
//!
//! - **Ingest**: stat a package, skip it if the catalog is current, otherwise
//!   open + extract on a blocking worker and upsert the record
//!   ([`scan::ingest_file`]).
//! - **Scan**: stream the ingest pipeline over a whole themes directory,
//!   reporting per-package progress and tolerating individually broken
//!   archives ([`scan::scan`]).
//! - **Lifecycle**: cascading removal of a theme (record, archive, staged
//!   assets) and pruning of records whose archives vanished ([`remove`],
//!   [`prune`]).
//! - **Staging**: unpacking filesystem-consumed assets, ringtones first and
//!   foremost ([`Stage`]).

pub mod error;
mod remove;
pub mod scan;
mod stage;

pub use crate::remove::{prune, remove};
pub use crate::stage::{STAGED_NOTIFICATION, STAGED_RINGTONE, Stage};
