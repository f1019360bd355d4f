//! Final pick among sorted candidates and the resulting day counts.
//!
//! Day counts are fractional days of 86400 s:
//!
//! | Count              | Value                                                  |
//! |--------------------|--------------------------------------------------------|
//! | `total_days`       | validity duration of the chosen file                   |
//! | `remaining_days`   | from the window start to the end of validity           |
//! | `calculation_days` | horizon to compute, `remaining_days` unless fixed      |
use hifitime::Epoch;

use crate::{
    cpf_errors::ResolveReport,
    resolver::{candidate::CpfCandidate, options::SelectionOption},
    time::{days_between, seconds_between},
};

/// Day counts attached to a chosen candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayCounts {
    pub total_days: f64,
    pub remaining_days: f64,
    pub calculation_days: f64,
}

impl DayCounts {
    fn for_candidate(candidate: &CpfCandidate, start: Epoch) -> Self {
        let remaining_days = days_between(start, candidate.end_time());
        DayCounts {
            total_days: days_between(candidate.start_time(), candidate.end_time()),
            remaining_days,
            calculation_days: remaining_days,
        }
    }
}

/// Outcome of one resolution: the chosen file, if any, its day counts, and every
/// diagnostic gathered on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionResult {
    pub chosen: Option<CpfCandidate>,
    pub days: DayCounts,
    pub report: ResolveReport,
}

impl SelectionResult {
    pub fn found(candidate: CpfCandidate, days: DayCounts, report: ResolveReport) -> Self {
        SelectionResult {
            chosen: Some(candidate),
            days,
            report,
        }
    }

    pub fn not_found(report: ResolveReport) -> Self {
        SelectionResult {
            chosen: None,
            days: DayCounts::default(),
            report,
        }
    }

    pub fn is_found(&self) -> bool {
        self.chosen.is_some()
    }
}

/// An object of a batch paired with the file chosen for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CpfSelected<O> {
    pub object: O,
    pub candidate: CpfCandidate,
    pub days: DayCounts,
}

/// Apply the selection policy to candidates already sorted best first.
///
/// Arguments
/// -----------------
/// * `candidates` – usable candidates, sorted by priority.
/// * `start`, `end` – the requested window.
/// * `selection` – the pick policy.
///
/// Return
/// ----------
/// * The chosen candidate and its day counts, or `None`:
///   - `MostCurrent*` (except fixed) takes the first candidate.
///   - `MostCurrentFixed` takes the first candidate ending strictly after `end`, and its
///     calculation horizon is the window length.
///   - `MaximizeDays*` takes the candidate whose validity extends the furthest past
///     `start`; ties keep the better ranked one and a candidate ending at `start` is never picked.
pub fn pick(
    candidates: Vec<CpfCandidate>,
    start: Epoch,
    end: Epoch,
    selection: SelectionOption,
) -> Option<(CpfCandidate, DayCounts)> {
    match selection {
        SelectionOption::MostCurrent | SelectionOption::MostCurrentReduce => {
            let first = candidates.into_iter().next()?;
            let days = DayCounts::for_candidate(&first, start);
            Some((first, days))
        }
        SelectionOption::MostCurrentFixed => {
            let covering = candidates
                .into_iter()
                .find(|candidate| candidate.end_time() > end)?;
            let days = DayCounts {
                calculation_days: days_between(start, end),
                ..DayCounts::for_candidate(&covering, start)
            };
            Some((covering, days))
        }
        SelectionOption::MaximizeDays | SelectionOption::MaximizeDaysReduce => {
            let mut best: Option<CpfCandidate> = None;
            let mut max_seconds = 0.0;
            for candidate in candidates {
                let seconds = seconds_between(start, candidate.end_time());
                if seconds > max_seconds {
                    max_seconds = seconds;
                    best = Some(candidate);
                }
            }
            let best = best?;
            let days = DayCounts::for_candidate(&best, start);
            Some((best, days))
        }
    }
}
