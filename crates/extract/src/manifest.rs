//! The complete extraction result for one package.

use crate::descriptor::Descriptor;
use crate::elements::Elements;
use time::UtcDateTime;

/// Everything extraction learns about a theme package.
///
/// Produced by [`extract`](crate::extract) and persisted alongside the
/// package's file identity as one catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Display metadata from the descriptor
    pub descriptor: Descriptor,
    /// Capability flags classified from the entry table
    pub elements: Elements,
    /// Ordered preview image entry names
    pub previews: Vec<String>,
    /// When this manifest was extracted
    pub extracted_at: UtcDateTime,
}
