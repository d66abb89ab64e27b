mod file;
mod stream;

pub use self::file::{Effort, Ingest, ingest_file};
pub use self::stream::{ScanEvent, scan};
