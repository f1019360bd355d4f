//! # Error types for cpfkit
//!
//! Three layers of errors coexist in this crate:
//!
//! * [`CpfError`] – hard failures of an operation (I/O, configuration, worker pool, write refusals).
//! * [`RecordReadError`] / [`RecordReadErrors`] – **record-level** defects found while reading header
//!   or data records. They never abort a read; they are collected per offending record.
//! * [`ResolveErrorKind`] / [`ResolveReport`] – **resolution-level** diagnostics accumulated while
//!   selecting a CPF among many candidates. A report can carry warnings next to a successful pick.
//!
//! See also
//! ------------
//! * [`crate::cpf::cpf_file::ReadFileStatus`] – file-level outcome of opening a CPF.
//! * [`crate::resolver`] – producer of [`ResolveReport`].
use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::cpf::record::Record;

#[derive(Error, Debug)]
pub enum CpfError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("Invalid UTC epoch: {0}")]
    TimeError(#[from] hifitime::HifitimeError),

    #[error("Invalid resolver configuration: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Invalid CPF filename filter: {0}")]
    FilterError(#[from] regex::Error),

    #[error("Unable to build the resolver worker pool: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),

    #[error("CPF file already exists at: {0}")]
    FileAlreadyExists(String),

    #[error("Missing basic information header (H1), the CPF version is unknown")]
    VersionUnknown,
}

impl PartialEq for CpfError {
    fn eq(&self, other: &Self) -> bool {
        use CpfError::*;
        match (self, other) {
            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (FileAlreadyExists(a), FileAlreadyExists(b)) => a == b,

            // Wrapped foreign errors are only compared by variant
            (IoError(_), IoError(_)) => true,
            (TimeError(_), TimeError(_)) => true,
            (ConfigError(_), ConfigError(_)) => true,
            (FilterError(_), FilterError(_)) => true,
            (ThreadPoolError(_), ThreadPoolError(_)) => true,

            (VersionUnknown, VersionUnknown) => true,

            _ => false,
        }
    }
}

/// Record-level read errors.
///
/// Variants
/// -----------------
/// * `BadSize` – token count does not match the count mandated by the declared format version.
/// * `BadType` – record identifier does not match the expected block.
/// * `VersionUnknown` – the block needs a version that has not been established (H2 before H1).
/// * `VersionMismatch` – declared version is not in the supported set.
/// * `ConversionError` – a token failed to parse as the expected numeric or date type.
/// * `NotImplemented` – the record kind is recognized but cannot be read (H3, H4).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordReadError {
    #[error("bad record size")]
    BadSize,
    #[error("bad record type")]
    BadType,
    #[error("format version unknown")]
    VersionUnknown,
    #[error("format version not supported")]
    VersionMismatch,
    #[error("token conversion error")]
    ConversionError,
    #[error("record reading not implemented")]
    NotImplemented,
}

/// Multimap from [`RecordReadError`] kind to the offending records.
///
/// Records are kept in insertion order within each kind, so a file with several
/// independent defects reports all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordReadErrors {
    entries: BTreeMap<RecordReadError, Vec<Record>>,
}

impl RecordReadErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: RecordReadError, record: Record) {
        self.entries.entry(kind).or_default().push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of offending records, all kinds included.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn contains(&self, kind: RecordReadError) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Records reported with the given kind (empty slice if none).
    pub fn get(&self, kind: RecordReadError) -> &[Record] {
        self.entries.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn kinds(&self) -> impl Iterator<Item = RecordReadError> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordReadError, &Record)> {
        self.entries
            .iter()
            .flat_map(|(kind, records)| records.iter().map(move |r| (*kind, r)))
    }
}

/// Resolution-level diagnostic kinds, with their stable numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    /// No usable candidate remained for the object.
    CpfNotFound = 1,
    /// The candidate file could not be opened or lacks H1/H2.
    CpfLoadFailed = 2,
    /// The candidate is not usable for ranging (target class, TIV, duration).
    CpfInvalid = 3,
    /// The candidate validity ended before the requested window.
    CpfOld = 4,
}

impl ResolveErrorKind {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ResolveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResolveErrorKind::CpfNotFound => "CPF_NOT_FOUND",
            ResolveErrorKind::CpfLoadFailed => "CPF_LOAD_FAILED",
            ResolveErrorKind::CpfInvalid => "CPF_INVALID",
            ResolveErrorKind::CpfOld => "CPF_OLD",
        };
        write!(f, "{label}")
    }
}

/// Ordered list of `(kind, message)` diagnostics produced by a resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveReport {
    errors: Vec<(ResolveErrorKind, String)>,
}

impl ResolveReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ResolveErrorKind, message: impl Into<String>) {
        self.errors.push((kind, message.into()));
    }

    /// Move every diagnostic of `other` at the end of this report.
    pub fn append(&mut self, other: ResolveReport) {
        self.errors.extend(other.errors);
    }

    pub fn contains(&self, kind: ResolveErrorKind) -> bool {
        self.errors.iter().any(|(k, _)| *k == kind)
    }

    pub fn count(&self, kind: ResolveErrorKind) -> usize {
        self.errors.iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[(ResolveErrorKind, String)] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<(ResolveErrorKind, String)> {
        self.errors
    }
}

#[cfg(test)]
mod cpf_errors_test {
    use super::*;

    fn record(line: &str, line_number: usize) -> Record {
        Record::from_line(line, line_number).expect("non blank line")
    }

    #[test]
    fn test_record_errors_multimap() {
        let mut errors = RecordReadErrors::new();
        assert!(errors.is_empty());

        errors.insert(RecordReadError::BadType, record("HX 1 2", 1));
        errors.insert(RecordReadError::NotImplemented, record("H3 1", 2));
        errors.insert(RecordReadError::BadType, record("HY 3", 5));

        assert_eq!(errors.len(), 3);
        assert!(errors.contains(RecordReadError::BadType));
        assert!(!errors.contains(RecordReadError::BadSize));

        let bad_types = errors.get(RecordReadError::BadType);
        assert_eq!(bad_types.len(), 2);
        assert_eq!(bad_types[0].line_number, 1);
        assert_eq!(bad_types[1].line_number, 5);
        assert!(errors.get(RecordReadError::ConversionError).is_empty());

        let kinds: Vec<_> = errors.kinds().collect();
        assert_eq!(
            kinds,
            vec![RecordReadError::BadType, RecordReadError::NotImplemented]
        );
    }

    #[test]
    fn test_resolve_report() {
        let mut report = ResolveReport::new();
        assert!(!report.has_errors());

        report.push(ResolveErrorKind::CpfOld, "a.sgf is old.");
        let mut other = ResolveReport::new();
        other.push(ResolveErrorKind::CpfInvalid, "b.sgf is invalid.");
        other.push(ResolveErrorKind::CpfOld, "c.sgf is old.");
        report.append(other);

        assert!(report.has_errors());
        assert!(report.contains(ResolveErrorKind::CpfInvalid));
        assert!(!report.contains(ResolveErrorKind::CpfNotFound));
        assert_eq!(report.count(ResolveErrorKind::CpfOld), 2);
        assert_eq!(report.errors()[1].1, "b.sgf is invalid.");
    }

    #[test]
    fn test_resolve_codes() {
        assert_eq!(ResolveErrorKind::CpfNotFound.code(), 1);
        assert_eq!(ResolveErrorKind::CpfLoadFailed.code(), 2);
        assert_eq!(ResolveErrorKind::CpfInvalid.code(), 3);
        assert_eq!(ResolveErrorKind::CpfOld.code(), 4);
        assert_eq!(ResolveErrorKind::CpfOld.to_string(), "CPF_OLD");
    }

    #[test]
    fn test_cpf_error_eq() {
        assert_eq!(
            CpfError::FileAlreadyExists("a".into()),
            CpfError::FileAlreadyExists("a".into())
        );
        assert_ne!(CpfError::VersionUnknown, CpfError::Utf8PathError("a".into()));
    }
}
