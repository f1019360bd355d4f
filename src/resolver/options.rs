//! Resolution policies.
//!
//! The four option types below fully describe *how* a CPF is chosen; *what* is
//! resolved (object, window, directory) is passed separately. They are grouped in
//! [`SearchPolicy`] and can be loaded from a configuration file (see
//! [`crate::resolver::config::ResolverConfig`]).
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Final pick policy among the sorted candidates.
///
/// | Option               | Label                      | Pick                                   |
/// |----------------------|----------------------------|----------------------------------------|
/// | `MostCurrent`        | "Most current"             | first candidate                        |
/// | `MaximizeDays`       | "Maximize days"            | candidate ending the latest            |
/// | `MostCurrentReduce`  | "Most current and reduce"  | first candidate, batch horizon reduced |
/// | `MaximizeDaysReduce` | "Maximize days and reduce" | latest end, batch horizon reduced      |
/// | `MostCurrentFixed`   | "Most current and fixed"   | first candidate covering the window    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionOption {
    MostCurrent,
    MaximizeDays,
    MostCurrentReduce,
    MaximizeDaysReduce,
    MostCurrentFixed,
}

impl SelectionOption {
    pub const ALL: [SelectionOption; 5] = [
        SelectionOption::MostCurrent,
        SelectionOption::MaximizeDays,
        SelectionOption::MostCurrentReduce,
        SelectionOption::MaximizeDaysReduce,
        SelectionOption::MostCurrentFixed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SelectionOption::MostCurrent => "Most current",
            SelectionOption::MaximizeDays => "Maximize days",
            SelectionOption::MostCurrentReduce => "Most current and reduce",
            SelectionOption::MaximizeDaysReduce => "Maximize days and reduce",
            SelectionOption::MostCurrentFixed => "Most current and fixed",
        }
    }

    /// Configuration identifier (`MOST_CURRENT`, …), as used by serde.
    pub fn identifier(self) -> &'static str {
        match self {
            SelectionOption::MostCurrent => "MOST_CURRENT",
            SelectionOption::MaximizeDays => "MAXIMIZE_DAYS",
            SelectionOption::MostCurrentReduce => "MOST_CURRENT_REDUCE",
            SelectionOption::MaximizeDaysReduce => "MAXIMIZE_DAYS_REDUCE",
            SelectionOption::MostCurrentFixed => "MOST_CURRENT_FIXED",
        }
    }

    /// Policies equalizing the calculation horizon over a batch.
    pub fn is_reduce(self) -> bool {
        matches!(
            self,
            SelectionOption::MostCurrentReduce | SelectionOption::MaximizeDaysReduce
        )
    }

    pub fn maximizes_days(self) -> bool {
        matches!(
            self,
            SelectionOption::MaximizeDays | SelectionOption::MaximizeDaysReduce
        )
    }
}

impl fmt::Display for SelectionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SelectionOption {
    type Err = String;

    /// Accepts the label (`"Most current"`) or the identifier (`"MOST_CURRENT"`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SelectionOption::ALL
            .into_iter()
            .find(|option| {
                option.label().eq_ignore_ascii_case(wanted)
                    || option.identifier().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown selection option: {s}"))
    }
}

/// Which provider extensions are scanned.
///
/// * `Preferred` – the object's preferred provider (`*.<provider>`), or every file when the
///   object has no restriction.
/// * `All` – every file (`*.*`).
/// * `Custom(ext)` – only files with the given extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderOption {
    Preferred,
    All,
    Custom(String),
}

impl ProviderOption {
    pub fn label(&self) -> &'static str {
        match self {
            ProviderOption::Preferred => "Preferred",
            ProviderOption::All => "All",
            ProviderOption::Custom(_) => "Custom",
        }
    }
}

impl fmt::Display for ProviderOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProviderOption {
    type Err = String;

    /// Accepts `"All"`, `"Preferred"` and `"Custom:<extension>"`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(ProviderOption::All);
        }
        if s.eq_ignore_ascii_case("preferred") {
            return Ok(ProviderOption::Preferred);
        }
        match s.split_once(':') {
            Some((kind, ext)) if kind.eq_ignore_ascii_case("custom") && !ext.trim().is_empty() => {
                Ok(ProviderOption::Custom(ext.trim().to_string()))
            }
            _ => Err(format!("Unknown provider option: {s}")),
        }
    }
}

/// Whether a failed preferred/custom provider search retries with every provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForceProviderOption {
    /// Retry with [`ProviderOption::All`] when nothing was found.
    #[default]
    NoForce,
    /// Stick to the requested provider.
    Force,
}

/// Priority given to TLE-derived predictions (source `tle`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityTle {
    /// TLE candidates are ranked like any other.
    #[default]
    NormalPriority,
    /// TLE candidates rank after every other candidate.
    LowestPriority,
}

/// The full set of options driving one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    pub selection: SelectionOption,
    pub provider: ProviderOption,
    pub force_provider: ForceProviderOption,
    pub tle_priority: PriorityTle,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        SearchPolicy {
            selection: SelectionOption::MostCurrent,
            provider: ProviderOption::Preferred,
            force_provider: ForceProviderOption::NoForce,
            tle_priority: PriorityTle::NormalPriority,
        }
    }
}

impl SearchPolicy {
    pub fn new(selection: SelectionOption, provider: ProviderOption) -> Self {
        SearchPolicy {
            selection,
            provider,
            ..SearchPolicy::default()
        }
    }

    pub fn with_force_provider(mut self, force_provider: ForceProviderOption) -> Self {
        self.force_provider = force_provider;
        self
    }

    pub fn with_tle_priority(mut self, tle_priority: PriorityTle) -> Self {
        self.tle_priority = tle_priority;
        self
    }
}

#[cfg(test)]
mod options_test {
    use super::*;

    #[test]
    fn test_selection_labels() {
        assert_eq!(SelectionOption::MostCurrent.to_string(), "Most current");
        assert_eq!(
            SelectionOption::MaximizeDaysReduce.to_string(),
            "Maximize days and reduce"
        );
        for option in SelectionOption::ALL {
            assert_eq!(option.label().parse::<SelectionOption>(), Ok(option));
        }
        assert_eq!(
            "MOST_CURRENT_FIXED".parse::<SelectionOption>(),
            Ok(SelectionOption::MostCurrentFixed)
        );
        assert!("most recent".parse::<SelectionOption>().is_err());
    }

    #[test]
    fn test_selection_flags() {
        assert!(SelectionOption::MostCurrentReduce.is_reduce());
        assert!(SelectionOption::MaximizeDaysReduce.is_reduce());
        assert!(!SelectionOption::MostCurrentFixed.is_reduce());
        assert!(SelectionOption::MaximizeDays.maximizes_days());
        assert!(!SelectionOption::MostCurrent.maximizes_days());
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!("All".parse::<ProviderOption>(), Ok(ProviderOption::All));
        assert_eq!("preferred".parse::<ProviderOption>(), Ok(ProviderOption::Preferred));
        assert_eq!(
            "Custom:sgf".parse::<ProviderOption>(),
            Ok(ProviderOption::Custom("sgf".into()))
        );
        assert!("Custom:".parse::<ProviderOption>().is_err());
        assert!("nasa".parse::<ProviderOption>().is_err());
        assert_eq!(ProviderOption::Custom("hts".into()).to_string(), "Custom");
    }

    #[test]
    fn test_policy_builder() {
        let policy = SearchPolicy::new(SelectionOption::MaximizeDays, ProviderOption::All)
            .with_force_provider(ForceProviderOption::Force)
            .with_tle_priority(PriorityTle::LowestPriority);
        assert_eq!(policy.selection, SelectionOption::MaximizeDays);
        assert_eq!(policy.force_provider, ForceProviderOption::Force);
        assert_eq!(policy.tle_priority, PriorityTle::LowestPriority);
        assert_eq!(SearchPolicy::default().provider, ProviderOption::Preferred);
    }
}
