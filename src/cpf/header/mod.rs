//! # CPF header model
//!
//! A CPF header is made of up to five optional blocks:
//!
//! | Block | Type                 | Status                               |
//! |-------|----------------------|--------------------------------------|
//! | H1    | [`BasicInfo1`]       | mandatory, carries the format version |
//! | H2    | [`BasicInfo2`]       | mandatory, target and validity window |
//! | H3    | [`ExpectedAccuracy`] | optional, not decoded                |
//! | H4    | [`TransponderInfo`]  | optional, not decoded                |
//! | H5    | [`ComCorrection`]    | optional                             |
//!
//! Each block is an `Option`, so an absent block is always distinguishable from a
//! present one. [`CpfHeader::read_header`] fills the model from tokenized records and
//! collects every defect in a [`RecordReadErrors`] multimap instead of stopping at the
//! first one. [`CpfHeader::generate_header_lines_at`] renders the blocks back to text
//! using the encoding selected by H1.
//!
//! ## Example
//! -----------------
//! ```rust
//! use cpfkit::cpf::header::CpfHeader;
//! use cpfkit::cpf::record::RecordTokenizer;
//!
//! let text = "H1 CPF 2 SGF 2024 3 15 10 751 1 lageos1\n\
//!             H2 7603901 1155 8820 2024 3 15 0 0 0 2024 3 20 0 0 0 240 1 1 0 0 0 1\n\
//!             H5 0.245";
//! let records: Vec<_> = RecordTokenizer::from_text(text).filter_map(Result::ok).collect();
//!
//! let mut header = CpfHeader::default();
//! let errors = header.read_header(&records);
//! assert!(errors.is_empty());
//! assert_eq!(header.basic_info2.as_ref().unwrap().norad, "8820");
//! assert!(header.expected_accuracy.is_none());
//! ```
use std::str::FromStr;

use hifitime::Epoch;

use crate::{
    cpf::record::{render_comment_block, Record},
    cpf_errors::{CpfError, RecordReadError, RecordReadErrors},
    time::utc_epoch,
};

pub mod basic_info1;
pub mod basic_info2;
pub mod codes;
pub mod optional_blocks;

pub use basic_info1::BasicInfo1;
pub use basic_info2::BasicInfo2;
pub use codes::{ReferenceFrame, RotAngleType, TargetClass, TargetDynamics};
pub use optional_blocks::{ComCorrection, ExpectedAccuracy, TransponderInfo};

pub(crate) const BASIC_INFO_1_ID: &str = "H1";
pub(crate) const BASIC_INFO_2_ID: &str = "H2";
pub(crate) const EXPECTED_ACCURACY_ID: &str = "H3";
pub(crate) const TRANSPONDER_INFO_ID: &str = "H4";
pub(crate) const COM_CORRECTION_ID: &str = "H5";

/// Parse `tokens[index]`: a missing token is a size error, a malformed one a conversion error.
pub(crate) fn parse_token<T: FromStr>(tokens: &[String], index: usize) -> Result<T, RecordReadError> {
    tokens
        .get(index)
        .ok_or(RecordReadError::BadSize)?
        .parse()
        .map_err(|_| RecordReadError::ConversionError)
}

/// Build a UTC epoch from `year month day hour [minute [second]]` tokens.
pub(crate) fn epoch_from_tokens(tokens: &[String]) -> Result<Epoch, RecordReadError> {
    let year: i32 = parse_token(tokens, 0)?;
    let mut fields = [0_u8; 5];
    for (i, field) in fields.iter_mut().enumerate() {
        if i + 1 < tokens.len() {
            *field = parse_token(tokens, i + 1)?;
        }
    }
    let [month, day, hour, minute, second] = fields;
    utc_epoch(year, month, day, hour, minute, second).map_err(|_| RecordReadError::ConversionError)
}

/// First `n` characters of `s`.
pub(crate) fn head(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Aggregate of the optional header blocks of a CPF file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpfHeader {
    pub basic_info1: Option<BasicInfo1>,
    pub basic_info2: Option<BasicInfo2>,
    pub expected_accuracy: Option<ExpectedAccuracy>,
    pub transponder_info: Option<TransponderInfo>,
    pub com_correction: Option<ComCorrection>,
}

impl CpfHeader {
    pub fn clear_all(&mut self) {
        *self = CpfHeader::default();
    }

    /// True when both mandatory blocks (H1 and H2) are present.
    pub fn has_mandatory_blocks(&self) -> bool {
        self.basic_info1.is_some() && self.basic_info2.is_some()
    }

    /// Read a list of header records into this model.
    ///
    /// The model is cleared first. Records are read in order, so H2 only succeeds when an
    /// H1 was read before it. A failing block is left empty; a failing H1 also clears a
    /// previously read H1.
    ///
    /// Arguments
    /// -----------------
    /// * `records` – tokenized header records.
    ///
    /// Return
    /// ----------
    /// * Every defect found, keyed by [`RecordReadError`] kind. Records whose identifier is
    ///   not a header block are reported as [`RecordReadError::BadType`]. Empty when all
    ///   records were read.
    pub fn read_header(&mut self, records: &[Record]) -> RecordReadErrors {
        self.clear_all();
        let mut errors = RecordReadErrors::new();
        for record in records {
            if let Err(kind) = self.read_header_record(record) {
                errors.insert(kind, record.clone());
            }
        }
        errors
    }

    fn read_header_record(&mut self, record: &Record) -> Result<(), RecordReadError> {
        match record.identifier() {
            BASIC_INFO_1_ID => {
                self.basic_info1 = None;
                self.basic_info1 = Some(BasicInfo1::read(record)?);
            }
            BASIC_INFO_2_ID => {
                self.basic_info2 = None;
                self.basic_info2 = Some(BasicInfo2::read(record, self.basic_info1.as_ref())?);
            }
            EXPECTED_ACCURACY_ID => {
                self.expected_accuracy = Some(ExpectedAccuracy::read(record)?);
            }
            TRANSPONDER_INFO_ID => {
                self.transponder_info = Some(TransponderInfo::read(record)?);
            }
            COM_CORRECTION_ID => {
                self.com_correction = None;
                self.com_correction = Some(ComCorrection::read(record)?);
            }
            _ => return Err(RecordReadError::BadType),
        }
        Ok(())
    }

    /// Render the header blocks as text, stamping H1 with `production_date`.
    ///
    /// Blocks are written in H1..H5 order, each one preceded by its comment block when it
    /// has one. Lines are separated by `\n`, with no trailing line break.
    ///
    /// Return
    /// ----------
    /// * An empty string without H1 or when H1 declares an unsupported version.
    pub fn generate_header_lines_at(&self, production_date: Epoch) -> String {
        let Some(basic_info1) = &self.basic_info1 else {
            return String::new();
        };
        let Some(format) = basic_info1.format_version() else {
            return String::new();
        };

        let mut blocks: Vec<(&Record, String)> =
            vec![(&basic_info1.record, basic_info1.generate_line(production_date))];
        if let Some(b) = &self.basic_info2 {
            blocks.push((&b.record, b.generate_line(format)));
        }
        if let Some(b) = &self.expected_accuracy {
            blocks.push((&b.record, b.generate_line(format)));
        }
        if let Some(b) = &self.transponder_info {
            blocks.push((&b.record, b.generate_line(format)));
        }
        if let Some(b) = &self.com_correction {
            blocks.push((&b.record, b.generate_line(format)));
        }

        let mut lines = Vec::with_capacity(blocks.len() * 2);
        for (record, line) in blocks {
            if !record.comment_block.is_empty() {
                lines.push(render_comment_block(&record.comment_block));
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    /// Render the header blocks with the current UTC time as production date.
    pub fn generate_header_lines(&self) -> Result<String, CpfError> {
        Ok(self.generate_header_lines_at(Epoch::now()?))
    }
}

#[cfg(test)]
mod header_test {
    use super::*;
    use crate::cpf::record::RecordTokenizer;

    const HEADER_V2: &str = "00 generated for tests\n\
        H1 CPF 2 SGF 2024 3 15 10 751 1 lageos1 notes\n\
        H2 7603901 1155 8820 2024 3 15 0 0 0 2024 3 20 0 0 0 240 1 1 0 0 0 1\n\
        00 com\n\
        H5 0.245";

    fn records(text: &str) -> Vec<Record> {
        RecordTokenizer::from_text(text)
            .map(|r| r.unwrap_or_else(|r| r))
            .collect()
    }

    #[test]
    fn test_head() {
        assert_eq!(head("lageos1", 3), "lag");
        assert_eq!(head("ab", 10), "ab");
        assert_eq!(head("ééé", 2), "éé");
    }

    #[test]
    fn test_epoch_from_tokens() {
        let tokens: Vec<String> = ["2024", "3", "15", "10"].iter().map(|s| s.to_string()).collect();
        let epoch = epoch_from_tokens(&tokens).unwrap();
        assert_eq!(epoch, utc_epoch(2024, 3, 15, 10, 0, 0).unwrap());
        assert_eq!(
            epoch_from_tokens(&tokens[..0]).unwrap_err(),
            RecordReadError::BadSize
        );
    }

    #[test]
    fn test_read_header() {
        let mut header = CpfHeader::default();
        let errors = header.read_header(&records(HEADER_V2));
        assert!(errors.is_empty());
        assert!(header.has_mandatory_blocks());
        assert_eq!(
            header.basic_info1.as_ref().unwrap().record.comment_block,
            vec!["generated for tests".to_string()]
        );
        assert_eq!(header.com_correction.as_ref().unwrap().correction, 0.245);
    }

    #[test]
    fn test_read_header_collects_every_error() {
        let text = "H2 7603901 1155 8820 2024 3 15 0 0 0 2024 3 20 0 0 0 240 1 1 0 0 0 1\n\
            H1 CPF 2 SGF 2024 3 15 10 751 1 lageos1\n\
            H3 a b c\n\
            H4 a b c\n\
            10 0 60000 0.0 1 2 3\n\
            H5 x";
        let mut header = CpfHeader::default();
        let errors = header.read_header(&records(text));

        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(RecordReadError::VersionUnknown)[0].line_number, 1);
        assert_eq!(errors.get(RecordReadError::NotImplemented).len(), 2);
        assert_eq!(errors.get(RecordReadError::BadType)[0].identifier(), "10");
        assert_eq!(errors.get(RecordReadError::ConversionError)[0].line_number, 6);

        assert!(header.basic_info1.is_some());
        assert!(header.basic_info2.is_none());
        assert!(header.expected_accuracy.is_none());
        assert!(header.transponder_info.is_none());
        assert!(header.com_correction.is_none());
    }

    #[test]
    fn test_read_header_clears_previous_content() {
        let mut header = CpfHeader::default();
        header.read_header(&records(HEADER_V2));
        let errors = header.read_header(&records("H1 CPF 9 SGF 2024 3 15 10 751 1 lageos1"));
        assert!(errors.contains(RecordReadError::VersionMismatch));
        assert_eq!(header, CpfHeader::default());
    }

    #[test]
    fn test_generate_header_lines() {
        let mut header = CpfHeader::default();
        header.read_header(&records(HEADER_V2));
        let now = utc_epoch(2024, 3, 16, 8, 0, 0).unwrap();
        let text = header.generate_header_lines_at(now);
        assert_eq!(
            text,
            "00 generated for tests\n\
             H1 CPF 2 SGF 2024 3 16 8 751 1 lageos1 notes\n\
             H2 7603901 1155 8820 2024 3 15 0 0 0 2024 3 20 0 0 0 240 1 1 0 0 0 1\n\
             00 com\n\
             H5 0.245"
        );
    }

    #[test]
    fn test_generate_without_h1() {
        assert_eq!(CpfHeader::default().generate_header_lines().unwrap(), "");
    }
}
