//! Observable catalog events
//!
//! Descriptor operations themselves are pure and emit nothing; only catalog
//! and configuration I/O is observable.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file read and validated
    ConfigLoaded,
    /// Catalog directory scan begins
    CatalogLoadBegin,
    /// Catalog directory scan finished
    CatalogLoadComplete,
    /// A descriptor file was read into the catalog
    DescriptorLoaded,
    /// A descriptor was registered in memory
    DescriptorRegistered,
    /// A descriptor was written to disk
    DescriptorSaved,
    /// A malformed descriptor file was skipped
    MalformedDescriptorSkipped,
    /// Catalog load aborted
    CatalogLoadFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CatalogLoadBegin => "CATALOG_LOAD_BEGIN",
            Event::CatalogLoadComplete => "CATALOG_LOAD_COMPLETE",
            Event::DescriptorLoaded => "DESCRIPTOR_LOADED",
            Event::DescriptorRegistered => "DESCRIPTOR_REGISTERED",
            Event::DescriptorSaved => "DESCRIPTOR_SAVED",
            Event::MalformedDescriptorSkipped => "DESCRIPTOR_MALFORMED_SKIPPED",
            Event::CatalogLoadFailed => "CATALOG_LOAD_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
