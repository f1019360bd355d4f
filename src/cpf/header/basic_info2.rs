//! Basic information 2 header (H2).
//!
//! H2 identifies the target and the validity window of the ephemeris. Its encoding
//! depends on the version of a previously read H1: 22 tokens in fixed columns for
//! version 1, 23 free tokens for version 2 (an extra target dynamics code).
//!
//! Missing values
//! -----------------
//! * SIC: `-1` in any version, `9999` in version 1, `na` in version 2.
//! * NORAD: `99999999` in version 1, `na` in version 2. Leading zeros are stripped, so
//!   an all-zero designator also reads as missing.
use hifitime::Epoch;

use crate::{
    cpf::{record::Record, version::FormatVersion},
    cpf_errors::RecordReadError,
    time::utc_calendar,
};

use super::{
    basic_info1::BasicInfo1,
    codes::{ReferenceFrame, RotAngleType, TargetClass, TargetDynamics},
    epoch_from_tokens, head, parse_token, BASIC_INFO_2_ID,
};

/// Typed content of an H2 record.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfo2 {
    /// ILRS target identifier.
    pub id: String,
    /// Satellite identification code, if any.
    pub sic: Option<String>,
    /// NORAD designator without leading zeros, empty when not available.
    pub norad: String,
    pub start_time: Epoch,
    pub end_time: Epoch,
    /// Seconds between entries, `0` for a variable step.
    pub time_between_entries: i64,
    pub tiv_compatible: bool,
    pub target_class: TargetClass,
    pub reference_frame: ReferenceFrame,
    pub rot_angle_type: RotAngleType,
    pub com_applied: bool,
    /// Only carried by version 2 files.
    pub target_dynamics: Option<TargetDynamics>,
    pub record: Record,
}

fn read_sic(token: &str, format: FormatVersion) -> Option<String> {
    let missing = token == "-1"
        || match format {
            FormatVersion::V1 => token == "9999",
            FormatVersion::V2 => token.eq_ignore_ascii_case("na"),
        };
    (!missing).then(|| token.to_string())
}

fn read_norad(token: &str, format: FormatVersion) -> String {
    let missing = match format {
        FormatVersion::V1 => token == "99999999",
        FormatVersion::V2 => token.eq_ignore_ascii_case("na"),
    };
    if missing {
        String::new()
    } else {
        token.trim_start_matches('0').to_string()
    }
}

impl BasicInfo2 {
    /// Read an H2 record, using the version carried by `basic_info1`.
    ///
    /// Arguments
    /// -----------------
    /// * `record` – the tokenized H2 record.
    /// * `basic_info1` – the H1 block read before, if any.
    ///
    /// Return
    /// ----------
    /// * The typed block, or:
    ///   - [`RecordReadError::VersionUnknown`] without a prior H1,
    ///   - [`RecordReadError::VersionMismatch`] if H1 declares an unsupported version,
    ///   - [`RecordReadError::BadSize`] if the token count is not 22 (v1) or 23 (v2),
    ///   - [`RecordReadError::BadType`] if the identifier is not `H2`,
    ///   - [`RecordReadError::ConversionError`] if a numeric or date token is malformed.
    ///
    /// Enumerated codes are not range checked: unknown codes are kept as `Unknown(code)`.
    pub fn read(record: &Record, basic_info1: Option<&BasicInfo1>) -> Result<Self, RecordReadError> {
        let basic_info1 = basic_info1.ok_or(RecordReadError::VersionUnknown)?;
        let format = basic_info1
            .format_version()
            .ok_or(RecordReadError::VersionMismatch)?;

        let tokens = &record.tokens;
        if tokens.len() != format.basic_info2_size() {
            return Err(RecordReadError::BadSize);
        }
        if record.identifier() != BASIC_INFO_2_ID {
            return Err(RecordReadError::BadType);
        }

        let target_dynamics = match format {
            FormatVersion::V1 => None,
            FormatVersion::V2 => Some(TargetDynamics::from_code(parse_token(tokens, 22)?)),
        };

        Ok(BasicInfo2 {
            id: tokens[1].clone(),
            sic: read_sic(&tokens[2], format),
            norad: read_norad(&tokens[3], format),
            start_time: epoch_from_tokens(&tokens[4..10])?,
            end_time: epoch_from_tokens(&tokens[10..16])?,
            time_between_entries: parse_token(tokens, 16)?,
            tiv_compatible: tokens[17] == "1",
            target_class: TargetClass::from_code(parse_token(tokens, 18)?),
            reference_frame: ReferenceFrame::from_code(parse_token(tokens, 19)?),
            rot_angle_type: RotAngleType::from_code(parse_token(tokens, 20)?),
            com_applied: tokens[21] == "1",
            target_dynamics,
            record: record.clone(),
        })
    }

    /// Validity duration in seconds (non-positive for a degenerate window).
    pub fn validity_seconds(&self) -> f64 {
        crate::time::seconds_between(self.start_time, self.end_time)
    }

    /// Render the H2 line for the given encoding.
    pub fn generate_line(&self, format: FormatVersion) -> String {
        let (sy, smo, sd, sh, smi, ss) = utc_calendar(self.start_time);
        let (ey, emo, ed, eh, emi, es) = utc_calendar(self.end_time);
        let tiv = u8::from(self.tiv_compatible);
        let com = u8::from(self.com_applied);

        match format {
            FormatVersion::V1 => {
                let sic = self.sic.as_deref().map_or("9999", |s| head(s, 4));
                let norad = if self.norad.is_empty() {
                    "99999999"
                } else {
                    head(&self.norad, 8)
                };
                format!(
                    "H2{:>9}{sic:>5}{norad:>9}\
                     {sy:>5}{smo:>3}{sd:>3}{sh:>3}{smi:>3}{ss:>3}\
                     {ey:>5}{emo:>3}{ed:>3}{eh:>3}{emi:>3}{es:>3}\
                     {:>6}{tiv:>2}{:>2}{:>3}{:>2}{com:>2}",
                    head(&self.id, 8),
                    self.time_between_entries,
                    self.target_class.code(),
                    self.reference_frame.code(),
                    self.rot_angle_type.code(),
                )
            }
            FormatVersion::V2 => {
                let sic = self.sic.as_deref().unwrap_or("na");
                let norad = if self.norad.is_empty() { "na" } else { &self.norad };
                format!(
                    "H2 {} {sic} {norad} {sy} {smo} {sd} {sh} {smi} {ss} {ey} {emo} {ed} {eh} {emi} {es} \
                     {} {tiv} {} {} {} {com} {}",
                    self.id,
                    self.time_between_entries,
                    self.target_class.code(),
                    self.reference_frame.code(),
                    self.rot_angle_type.code(),
                    self.target_dynamics.unwrap_or_default().code(),
                )
            }
        }
    }
}
