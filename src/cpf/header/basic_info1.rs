//! Basic information 1 header (H1).
//!
//! H1 carries the format version every other block depends on, so it is always
//! read first and its failure clears the block entirely.
//!
//! Encodings
//! -----------------
//! * **v1** – `H1 CPF  1  SGF 2024  3 15 10   751 lageos1    notes`: fixed columns. The target
//!   name and notes may have been split on spaces upstream, so the trailing tokens are glued
//!   back together and cut at fixed offsets (name = 10 characters, notes = 10 characters after
//!   a 1 character gap).
//! * **v2** – `H1 CPF 2 SGF 2024 3 15 10 751 1 lageos1 notes`: free tokens, with a sub-daily
//!   sequence number and an optional notes token.
use hifitime::Epoch;

use crate::{
    constants::CPF_FORMAT_TAG,
    cpf::{record::Record, version::FormatVersion},
    cpf_errors::RecordReadError,
    time::utc_calendar,
};

use super::{epoch_from_tokens, head, parse_token, BASIC_INFO_1_ID};

/// Typed content of an H1 record.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfo1 {
    /// Declared format version (e.g. `1.0`, `2.0`).
    pub version: f64,
    /// Ephemeris source (provider) name.
    pub source: String,
    /// Production date, UTC at hour precision.
    pub production_date: Epoch,
    pub sequence_number: i32,
    /// Sub-daily sequence number, `0` for version 1.
    pub subsequence_number: i32,
    pub target_name: String,
    pub notes: String,
    /// Source record (comment block, line number and tokens).
    pub record: Record,
}

impl BasicInfo1 {
    /// Encoding selected by the declared version.
    pub fn format_version(&self) -> Option<FormatVersion> {
        FormatVersion::from_version(self.version)
    }

    /// Read an H1 record.
    ///
    /// Arguments
    /// -----------------
    /// * `record` – the tokenized H1 record.
    ///
    /// Return
    /// ----------
    /// * The typed block, or:
    ///   - [`RecordReadError::BadType`] if the identifier is not `H1`,
    ///   - [`RecordReadError::ConversionError`] if a numeric or date token is malformed,
    ///   - [`RecordReadError::VersionMismatch`] if the version is not 1.x or 2.x,
    ///   - [`RecordReadError::BadSize`] if the token count does not fit the version.
    pub fn read(record: &Record) -> Result<Self, RecordReadError> {
        if record.identifier() != BASIC_INFO_1_ID {
            return Err(RecordReadError::BadType);
        }
        let tokens = &record.tokens;

        let version: f64 = parse_token(tokens, 2)?;
        let format = FormatVersion::from_version(version).ok_or(RecordReadError::VersionMismatch)?;
        if !format.basic_info1_size_ok(tokens.len()) {
            return Err(RecordReadError::BadSize);
        }

        let source = tokens[3].clone();
        let production_date = epoch_from_tokens(&tokens[4..8])?;
        let sequence_number: i32 = parse_token(tokens, 8)?;

        let (subsequence_number, target_name, notes) = match format {
            FormatVersion::V1 => {
                let glued: String = tokens[9..].concat();
                let name = glued.chars().take(10).collect();
                let notes = glued.chars().skip(11).take(10).collect();
                (0, name, notes)
            }
            FormatVersion::V2 => {
                let subsequence: i32 = parse_token(tokens, 9)?;
                let notes = tokens.get(11).cloned().unwrap_or_default();
                (subsequence, tokens[10].clone(), notes)
            }
        };

        Ok(BasicInfo1 {
            version,
            source,
            production_date,
            sequence_number,
            subsequence_number,
            target_name,
            notes,
            record: record.clone(),
        })
    }

    /// Render the H1 line with `production_date` as the production timestamp.
    ///
    /// The stored production date is not written back: a written file is a new product.
    /// Returns an empty string when the version is not supported.
    pub fn generate_line(&self, production_date: Epoch) -> String {
        let (year, month, day, hour, _, _) = utc_calendar(production_date);
        match self.format_version() {
            Some(FormatVersion::V1) => format!(
                "H1 {CPF_FORMAT_TAG}{:>3}  {}{year:>5}{month:>3}{day:>3}{hour:>3}{:>6} {} {}",
                self.version.trunc() as i32,
                head(&self.source, 3),
                self.sequence_number,
                head(&self.target_name, 10),
                head(&self.notes, 10),
            ),
            Some(FormatVersion::V2) => format!(
                "H1 {CPF_FORMAT_TAG} {} {} {year} {month} {day} {hour} {} {} {} {}",
                self.version,
                self.source,
                self.sequence_number,
                self.subsequence_number,
                self.target_name,
                self.notes,
            ),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod basic_info1_test {
    use super::*;
    use crate::time::utc_epoch;

    fn record(line: &str) -> Record {
        Record::from_line(line, 1).unwrap()
    }

    #[test]
    fn test_read_v2() {
        let h1 = BasicInfo1::read(&record(
            "H1 CPF 2 SGF 2024 03 15 10 751 2 lageos1 sgf_notes",
        ))
        .unwrap();
        assert_eq!(h1.version, 2.0);
        assert_eq!(h1.format_version(), Some(FormatVersion::V2));
        assert_eq!(h1.source, "SGF");
        assert_eq!(h1.production_date, utc_epoch(2024, 3, 15, 10, 0, 0).unwrap());
        assert_eq!(h1.sequence_number, 751);
        assert_eq!(h1.subsequence_number, 2);
        assert_eq!(h1.target_name, "lageos1");
        assert_eq!(h1.notes, "sgf_notes");
        assert_eq!(h1.record.tokens.len(), 12);
    }

    #[test]
    fn test_read_v2_without_notes() {
        let h1 =
            BasicInfo1::read(&record("H1 CPF 2 SGF 2024 03 15 10 751 2 lageos1")).unwrap();
        assert_eq!(h1.notes, "");
    }

    #[test]
    fn test_read_v1_glues_name_and_notes() {
        let h1 = BasicInfo1::read(&record(
            "H1 CPF  1  SGF 2024  3 15 10   751 lageos 1 x nota bene",
        ))
        .unwrap();
        assert_eq!(h1.format_version(), Some(FormatVersion::V1));
        assert_eq!(h1.subsequence_number, 0);
        // glued: "lageos1xnotabene"
        assert_eq!(h1.target_name, "lageos1xno");
        assert_eq!(h1.notes, "abene");

        let short = BasicInfo1::read(&record("H1 CPF 1 SGF 2024 3 15 10 751 ajisai")).unwrap();
        assert_eq!(short.target_name, "ajisai");
        assert_eq!(short.notes, "");
    }

    #[test]
    fn test_read_errors() {
        let read = |line: &str| BasicInfo1::read(&record(line)).unwrap_err();
        assert_eq!(
            read("H2 CPF 2 SGF 2024 3 15 10 751 2 lageos1"),
            RecordReadError::BadType
        );
        assert_eq!(
            read("H1 CPF two SGF 2024 3 15 10 751 2 lageos1"),
            RecordReadError::ConversionError
        );
        assert_eq!(
            read("H1 CPF 3 SGF 2024 3 15 10 751 2 lageos1"),
            RecordReadError::VersionMismatch
        );
        assert_eq!(
            read("H1 CPF 0.5 SGF 2024 3 15 10 751 2 lageos1"),
            RecordReadError::VersionMismatch
        );
        assert_eq!(read("H1 CPF 1 SGF 2024 3 15 10 751"), RecordReadError::BadSize);
        assert_eq!(
            read("H1 CPF 2 SGF 2024 3 15 10 751 lageos1"),
            RecordReadError::BadSize
        );
        assert_eq!(
            read("H1 CPF 2 SGF 2024 3 15 10 751 2 lageos1 a b"),
            RecordReadError::BadSize
        );
        assert_eq!(
            read("H1 CPF 2 SGF 2024 13 15 10 751 2 lageos1"),
            RecordReadError::ConversionError
        );
        assert_eq!(
            read("H1 CPF 2 SGF 2024 3 15 10 seq 2 lageos1"),
            RecordReadError::ConversionError
        );
        assert_eq!(read("H1 CPF"), RecordReadError::BadSize);
    }

    #[test]
    fn test_generate_line() {
        let now = utc_epoch(2024, 4, 2, 7, 45, 12).unwrap();
        let h1 = BasicInfo1::read(&record(
            "H1 CPF 1 SGFX 2024 3 15 10 751 lageos1",
        ))
        .unwrap();
        assert_eq!(
            h1.generate_line(now),
            "H1 CPF  1  SGF 2024  4  2  7   751 lageos1 "
        );

        let h1 = BasicInfo1::read(&record(
            "H1 CPF 2 SGF 2024 3 15 10 751 2 lageos1 notes",
        ))
        .unwrap();
        assert_eq!(
            h1.generate_line(now),
            "H1 CPF 2 SGF 2024 4 2 7 751 2 lageos1 notes"
        );
    }
}
