//! Optional header blocks H3, H4 and H5.
//!
//! H3 (expected accuracy) and H4 (transponder information) are recognized but not
//! decoded: reading them always reports [`RecordReadError::NotImplemented`] and they
//! render as an empty line. H5 carries a single center of mass correction.
use crate::{
    cpf::{record::Record, version::FormatVersion},
    cpf_errors::RecordReadError,
};

use super::{parse_token, COM_CORRECTION_ID};

/// Expected accuracy header (H3). Not decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectedAccuracy {
    pub record: Record,
}

impl ExpectedAccuracy {
    pub fn read(_record: &Record) -> Result<Self, RecordReadError> {
        Err(RecordReadError::NotImplemented)
    }

    pub fn generate_line(&self, _format: FormatVersion) -> String {
        String::new()
    }
}

/// Transponder information header (H4). Not decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransponderInfo {
    pub record: Record,
}

impl TransponderInfo {
    pub fn read(_record: &Record) -> Result<Self, RecordReadError> {
        Err(RecordReadError::NotImplemented)
    }

    pub fn generate_line(&self, _format: FormatVersion) -> String {
        String::new()
    }
}

/// Center of mass correction header (H5).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComCorrection {
    /// Center of mass correction, in meters.
    pub correction: f64,
    pub record: Record,
}

impl ComCorrection {
    /// Read an H5 record: exactly two tokens, the second one numeric.
    pub fn read(record: &Record) -> Result<Self, RecordReadError> {
        if record.tokens.len() != 2 {
            return Err(RecordReadError::BadSize);
        }
        if record.identifier() != COM_CORRECTION_ID {
            return Err(RecordReadError::BadType);
        }
        Ok(ComCorrection {
            correction: parse_token(&record.tokens, 1)?,
            record: record.clone(),
        })
    }

    /// Render the H5 line: four decimals for version 1, free form for version 2.
    pub fn generate_line(&self, format: FormatVersion) -> String {
        match format {
            FormatVersion::V1 => format!("H5 {:.4}", self.correction),
            FormatVersion::V2 => format!("H5 {}", self.correction),
        }
    }
}

#[cfg(test)]
mod optional_blocks_test {
    use super::*;

    fn record(line: &str) -> Record {
        Record::from_line(line, 3).unwrap()
    }

    #[test]
    fn test_h3_h4_not_implemented() {
        assert_eq!(
            ExpectedAccuracy::read(&record("H3 1 2 3")).unwrap_err(),
            RecordReadError::NotImplemented
        );
        assert_eq!(
            TransponderInfo::read(&record("H4 1 2 3")).unwrap_err(),
            RecordReadError::NotImplemented
        );
        assert_eq!(
            ExpectedAccuracy::default().generate_line(FormatVersion::V2),
            ""
        );
    }

    #[test]
    fn test_read_h5() {
        let h5 = ComCorrection::read(&record("H5 0.2450")).unwrap();
        assert_eq!(h5.correction, 0.245);
        assert_eq!(
            ComCorrection::read(&record("H5 0.2450 1")).unwrap_err(),
            RecordReadError::BadSize
        );
        assert_eq!(
            ComCorrection::read(&record("H4 0.2450")).unwrap_err(),
            RecordReadError::BadType
        );
        assert_eq!(
            ComCorrection::read(&record("H5 abc")).unwrap_err(),
            RecordReadError::ConversionError
        );
    }

    #[test]
    fn test_generate_h5() {
        let h5 = ComCorrection::read(&record("H5 0.245")).unwrap();
        assert_eq!(h5.generate_line(FormatVersion::V1), "H5 0.2450");
        assert_eq!(h5.generate_line(FormatVersion::V2), "H5 0.245");
    }
}
