//! Candidate CPF files and their ranking.
//!
//! A [`CpfCandidate`] is a header-only view of a CPF file that holds both mandatory
//! blocks. Candidates are ranked by [`compare_priority`], a strict descending order on
//! `(NORAD, production date, source, sequence number)`, optionally preceded by the
//! TLE demotion of [`sort_candidates`].
use std::cmp::Ordering;

use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;

use crate::{
    constants::TLE_SOURCE,
    cpf::{
        cpf_file::{CpfFile, OpenOption},
        header::{BasicInfo1, BasicInfo2},
    },
    resolver::options::PriorityTle,
};

/// Header-only view of a loadable CPF file.
#[derive(Debug, Clone, PartialEq)]
pub struct CpfCandidate {
    pub file_path: Utf8PathBuf,
    pub basic_info1: BasicInfo1,
    pub basic_info2: BasicInfo2,
}

impl CpfCandidate {
    /// Build a candidate from an opened file.
    ///
    /// Return
    /// ----------
    /// * `None` if the file is empty or lacks H1 or H2.
    pub fn from_file(file_path: &Utf8Path, cpf: &CpfFile) -> Option<Self> {
        if cpf.is_empty() {
            return None;
        }
        Some(CpfCandidate {
            file_path: file_path.to_owned(),
            basic_info1: cpf.header().basic_info1.clone()?,
            basic_info2: cpf.header().basic_info2.clone()?,
        })
    }

    /// Open `file_path` header-only and build a candidate from it.
    pub fn load(file_path: &Utf8Path) -> Option<Self> {
        let cpf = CpfFile::open(file_path, OpenOption::OnlyHeader);
        CpfCandidate::from_file(file_path, &cpf)
    }

    pub fn filename(&self) -> &str {
        self.file_path.file_name().unwrap_or(self.file_path.as_str())
    }

    pub fn norad(&self) -> &str {
        &self.basic_info2.norad
    }

    pub fn source(&self) -> &str {
        &self.basic_info1.source
    }

    pub fn start_time(&self) -> Epoch {
        self.basic_info2.start_time
    }

    pub fn end_time(&self) -> Epoch {
        self.basic_info2.end_time
    }

    /// True for TLE-derived predictions (source `tle`, any case).
    pub fn is_tle(&self) -> bool {
        self.basic_info1.source.eq_ignore_ascii_case(TLE_SOURCE)
    }

    /// Whether the prediction can be used for ranging: a rangeable target class,
    /// time-interval-variant compatible, and a positive validity duration.
    pub fn is_usable(&self) -> bool {
        self.basic_info2.target_class.is_rangeable()
            && self.basic_info2.tiv_compatible
            && self.basic_info2.validity_seconds() > 0.0
    }
}

fn descending<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    b.partial_cmp(a).unwrap_or(Ordering::Equal)
}

/// Tie-break order between two candidates, `Less` meaning `a` ranks first.
///
/// Criteria, each in descending order and only consulted on equality of the previous one:
/// NORAD designator, production date, source name, sequence number.
pub fn compare_priority(a: &CpfCandidate, b: &CpfCandidate) -> Ordering {
    descending(&a.basic_info2.norad, &b.basic_info2.norad)
        .then_with(|| {
            descending(
                &a.basic_info1.production_date,
                &b.basic_info1.production_date,
            )
        })
        .then_with(|| descending(&a.basic_info1.source, &b.basic_info1.source))
        .then_with(|| {
            descending(
                &a.basic_info1.sequence_number,
                &b.basic_info1.sequence_number,
            )
        })
}

/// Sort candidates by priority, best first.
///
/// With [`PriorityTle::LowestPriority`] every TLE candidate ranks after every other
/// candidate; TLE candidates are still ordered among themselves by [`compare_priority`].
/// The sort is stable, so identical candidates keep their listing order.
pub fn sort_candidates(candidates: &mut [CpfCandidate], tle_priority: PriorityTle) {
    candidates.sort_by(|a, b| {
        let tle_order = match tle_priority {
            PriorityTle::LowestPriority => a.is_tle().cmp(&b.is_tle()),
            PriorityTle::NormalPriority => Ordering::Equal,
        };
        tle_order.then_with(|| compare_priority(a, b))
    });
}
