//! Operation reference generation.
//!
//! References correlate the two legs of a transfer (or name a single bill
//! payment) and are exposed to customers, so they must be unique and
//! human-traceable. A ULID suffix gives both: monotonic, sortable, and
//! collision-free without coordination, instead of the wall-clock plus
//! random-suffix scheme this replaces.

use std::fmt;

use ulid::Ulid;

/// Operation family tag, the leading characters of every reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefPrefix {
    /// Internal (intra-bank, same currency) transfer.
    Transfer,
    /// Cross-currency transfer.
    Fx,
    /// External-bank transfer.
    External,
    Airtime,
    Data,
    Electricity,
    Tv,
}

impl RefPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefPrefix::Transfer => "TXN",
            RefPrefix::Fx => "FX",
            RefPrefix::External => "EXT",
            RefPrefix::Airtime => "AIR",
            RefPrefix::Data => "DAT",
            RefPrefix::Electricity => "ELC",
            RefPrefix::Tv => "TV",
        }
    }
}

impl fmt::Display for RefPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceGenerator;

impl ReferenceGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Unique per call; uniqueness is structural (ULID), not probabilistic.
    pub fn next(&self, prefix: RefPrefix) -> String {
        format!("{}{}", prefix.as_str(), Ulid::new())
    }
}
