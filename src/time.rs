use hifitime::{Epoch, Unit};

use crate::{constants::SECONDS_PER_DAY, cpf_errors::CpfError};

/// Build a UTC epoch from calendar fields at second precision.
///
/// Argument
/// --------
/// * `year`, `month`, `day`, `hour`, `minute`, `second`: the UTC calendar fields
///
/// Return
/// ------
/// * the corresponding epoch, or [`CpfError::TimeError`] if the fields do not form a valid UTC date
pub fn utc_epoch(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<Epoch, CpfError> {
    Ok(Epoch::maybe_from_gregorian_utc(
        year, month, day, hour, minute, second, 0,
    )?)
}

/// UTC calendar fields of an epoch, truncated to the second.
///
/// Return
/// ------
/// * `(year, month, day, hour, minute, second)`
pub fn utc_calendar(epoch: Epoch) -> (i32, u8, u8, u8, u8, u8) {
    let (y, m, d, h, min, s, _) = epoch.to_gregorian_utc();
    (y, m, d, h, min, s)
}

/// Elapsed seconds from `from` to `to` (negative when `to` is earlier).
pub fn seconds_between(from: Epoch, to: Epoch) -> f64 {
    (to - from).to_seconds()
}

/// Elapsed days from `from` to `to`, as a fractional number of 86400 s days.
pub fn days_between(from: Epoch, to: Epoch) -> f64 {
    seconds_between(from, to) / SECONDS_PER_DAY
}

/// Shift the UTC calendar date of `epoch` by `days`, keeping only the date.
///
/// The result is anchored at 12:00 UTC so that a leap second never moves the
/// date label.
pub fn shift_date(epoch: Epoch, days: i64) -> Result<Epoch, CpfError> {
    let (y, m, d, _, _, _) = utc_calendar(epoch);
    let noon = utc_epoch(y, m, d, 12, 0, 0)?;
    Ok(noon + Unit::Day * days)
}

/// `yyyyMMdd` label of the UTC date, used for dated directory names.
pub fn yyyymmdd(epoch: Epoch) -> String {
    let (y, m, d, _, _, _) = utc_calendar(epoch);
    format!("{y:04}{m:02}{d:02}")
}

/// `yymmdd` label of the UTC date, used in standard CPF filenames.
pub fn yymmdd(epoch: Epoch) -> String {
    let (y, m, d, _, _, _) = utc_calendar(epoch);
    format!("{:02}{m:02}{d:02}", y.rem_euclid(100))
}

/// Parse a `yymmdd` label into an epoch at 12:00 UTC of that date.
///
/// Two-digit years are read in the 2000–2099 century.
///
/// Return
/// ------
/// * `None` if the label is not six digits or is not a valid date
pub fn parse_yymmdd(label: &str) -> Option<Epoch> {
    if label.len() != 6 || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy: i32 = label[0..2].parse().ok()?;
    let mm: u8 = label[2..4].parse().ok()?;
    let dd: u8 = label[4..6].parse().ok()?;
    utc_epoch(2000 + yy, mm, dd, 12, 0, 0).ok()
}

/// True if the UTC time of day of `epoch` is strictly before 12:00.
pub fn is_before_noon(epoch: Epoch) -> bool {
    let (_, _, _, h, _, _) = utc_calendar(epoch);
    h < 12
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_utc_epoch_roundtrip() {
        let epoch = utc_epoch(2024, 3, 15, 10, 30, 45).unwrap();
        assert_eq!(utc_calendar(epoch), (2024, 3, 15, 10, 30, 45));
    }

    #[test]
    fn test_utc_epoch_invalid() {
        assert!(utc_epoch(2024, 13, 1, 0, 0, 0).is_err());
        assert!(utc_epoch(2023, 2, 29, 0, 0, 0).is_err());
        assert!(utc_epoch(2024, 1, 1, 25, 0, 0).is_err());
    }

    #[test]
    fn test_days_between() {
        let a = utc_epoch(2024, 3, 10, 0, 0, 0).unwrap();
        let b = utc_epoch(2024, 3, 12, 12, 0, 0).unwrap();
        assert_relative_eq!(days_between(a, b), 2.5, epsilon = 1e-9);
        assert_relative_eq!(days_between(b, a), -2.5, epsilon = 1e-9);
        assert_relative_eq!(seconds_between(a, b), 216_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_date_labels() {
        let epoch = utc_epoch(2024, 3, 5, 23, 59, 59).unwrap();
        assert_eq!(yyyymmdd(epoch), "20240305");
        assert_eq!(yymmdd(epoch), "240305");

        let y2k = utc_epoch(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(yymmdd(y2k), "000101");
    }

    #[test]
    fn test_shift_date() {
        let epoch = utc_epoch(2024, 3, 1, 3, 0, 0).unwrap();
        let before = shift_date(epoch, -1).unwrap();
        assert_eq!(yyyymmdd(before), "20240229");
        let after = shift_date(epoch, 31).unwrap();
        assert_eq!(yyyymmdd(after), "20240401");
    }

    #[test]
    fn test_parse_yymmdd() {
        let epoch = parse_yymmdd("240229").unwrap();
        assert_eq!(yyyymmdd(epoch), "20240229");
        assert!(parse_yymmdd("230229").is_none());
        assert!(parse_yymmdd("2402").is_none());
        assert!(parse_yymmdd("24a229").is_none());
    }

    #[test]
    fn test_is_before_noon() {
        assert!(is_before_noon(utc_epoch(2024, 3, 1, 11, 59, 59).unwrap()));
        assert!(!is_before_noon(utc_epoch(2024, 3, 1, 12, 0, 0).unwrap()));
    }
}
