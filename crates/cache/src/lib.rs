//! SQLite catalog for ingested theme packages.
//!
//! The catalog tracks one record per package file in the themes directory:
//! identity, descriptor metadata, element capability flags, and the preview
//! entry list. It is a cache, not the source of truth - the zip archives
//! are. Deleting the database and re-scanning the themes directory rebuilds
//! it exactly.
//!
//! # Freshness
//! Records are keyed by package file name and refreshed only when the
//! archive's filesystem mtime is newer than the stored one; see
//! [`Repository::needs_refresh`].

mod db;
pub mod error;
mod models;
mod repo;

pub use crate::db::Database;
pub use crate::models::Entry;
pub use crate::repo::Repository;
