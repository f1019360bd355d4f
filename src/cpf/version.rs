//! CPF format version tag.
//!
//! Every block after H1 is encoded according to the version declared in H1.
//! [`FormatVersion`] is selected once from that value and drives all the
//! version-dependent readers and writers.
use std::fmt;

/// Supported CPF format encodings.
///
/// * `V1` – fixed-width columns, declared versions in `[1, 2)`.
/// * `V2` – free-form space separated tokens, declared versions in `[2, 3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatVersion {
    V1,
    V2,
}

impl FormatVersion {
    /// Classify a declared version number.
    ///
    /// Return
    /// ----------
    /// * `None` when the version is outside every supported range.
    pub fn from_version(version: f64) -> Option<Self> {
        if (1.0..2.0).contains(&version) {
            Some(FormatVersion::V1)
        } else if (2.0..3.0).contains(&version) {
            Some(FormatVersion::V2)
        } else {
            None
        }
    }

    pub fn major(self) -> u8 {
        match self {
            FormatVersion::V1 => 1,
            FormatVersion::V2 => 2,
        }
    }

    /// Whether an H1 record with `count` tokens is well sized (notes are optional).
    pub fn basic_info1_size_ok(self, count: usize) -> bool {
        match self {
            FormatVersion::V1 => count >= 10,
            FormatVersion::V2 => count == 11 || count == 12,
        }
    }

    /// Exact token count of an H2 record.
    pub fn basic_info2_size(self) -> usize {
        match self {
            FormatVersion::V1 => 22,
            FormatVersion::V2 => 23,
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.major())
    }
}
