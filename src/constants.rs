//! # Constants and identifiers for cpfkit
//!
//! This module centralizes the **record identifiers**, **unit conversions** and
//! **directory conventions** shared by the CPF codec and the ephemeris resolver.
//!
//! ## Overview
//!
//! - Record identifier tokens of the ILRS Consolidated Prediction Format
//! - Time conversion factors
//! - Provider sentinels and source names used during file selection
//! - Default search bounds for dated directory lookups

// -------------------------------------------------------------------------------------------------
// Record identifiers
// -------------------------------------------------------------------------------------------------

/// Header record identifiers, in block order (H1..H5).
pub const HEADER_RECORD_IDS: [&str; 5] = ["H1", "H2", "H3", "H4", "H5"];

/// Data record identifiers (position, velocity, corrections, transponder,
/// offset from center, rotation angle, earth orientation).
pub const DATA_RECORD_IDS: [&str; 7] = ["10", "20", "30", "40", "50", "60", "70"];

/// End of header record.
pub const END_OF_HEADER_ID: &str = "H9";

/// End of ephemeris record.
pub const END_OF_EPHEMERIS_ID: &str = "99";

/// Comment record marker.
pub const COMMENT_RECORD_ID: &str = "00";

/// Maximum number of characters kept from a comment when it is written back.
pub const COMMENT_MAX_LEN: usize = 80;

/// Fixed token following `H1` in every CPF file.
pub const CPF_FORMAT_TAG: &str = "CPF";


// -------------------------------------------------------------------------------------------------
// Time
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// -------------------------------------------------------------------------------------------------
// Resolver
// -------------------------------------------------------------------------------------------------

/// Source name of TLE-derived predictions (compared case-insensitively).
pub const TLE_SOURCE: &str = "tle";

/// Preferred-provider sentinel meaning "any provider".
pub const ALL_CPF_PROVIDER: &str = "All";

/// Preferred-provider sentinel meaning "any provider, TLE last".
pub const NO_TLE_PROVIDER: &str = "No TLE";

/// Default number of dated directories walked by the recursive lookup.
pub const DEFAULT_DAYS_BEFORE: u32 = 6;

/// Default number of dated directories walked when locating a file by name.
pub const DEFAULT_DAYS_AFTER: u32 = 20;
