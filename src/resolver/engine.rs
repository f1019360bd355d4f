//! CPF resolution entry points.
//!
//! [`CpfResolver`] ties together discovery, ranking and selection:
//!
//! 1. list the files of a directory matching the provider filter,
//! 2. keep the usable, non-stale candidates of the object,
//! 3. sort them best first ([`sort_candidates`]),
//! 4. apply the selection policy ([`pick`]).
//!
//! On top of the single-directory resolution it offers a provider fallback, a
//! day-stepped walk over dated directories, and a parallel batch mode.
use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    cpf_errors::{CpfError, ResolveErrorKind, ResolveReport},
    resolver::{
        candidate::{sort_candidates, CpfCandidate},
        config::ResolverConfig,
        discovery::{list_files, provider_filter, scan_candidates},
        options::{ForceProviderOption, PriorityTle, ProviderOption, SearchPolicy},
        selection::{pick, CpfSelected, SelectionResult},
        space_object::TrackedObject,
    },
    time::{is_before_noon, parse_yymmdd, shift_date, yyyymmdd},
};

fn not_found_message(object: &impl TrackedObject) -> String {
    format!(
        "CPF not found for space object with norad '{}'.",
        object.norad()
    )
}

/// Selections of a batch, in input order, with the aggregated diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult<O> {
    pub selected: Vec<CpfSelected<O>>,
    pub report: ResolveReport,
}

/// Ephemeris file resolver.
#[derive(Debug, Clone, Default)]
pub struct CpfResolver {
    config: ResolverConfig,
}

impl CpfResolver {
    pub fn new(config: ResolverConfig) -> Self {
        CpfResolver { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    fn resolve_with_provider(
        &self,
        dir: &Utf8Path,
        object: &impl TrackedObject,
        start: Epoch,
        end: Epoch,
        policy: &SearchPolicy,
        provider: &ProviderOption,
    ) -> Result<SelectionResult, CpfError> {
        let filter = provider_filter(provider, object)?;
        let (mut candidates, mut report) = scan_candidates(dir, object, start, &filter);
        debug!(
            %dir,
            norad = object.norad(),
            candidates = candidates.len(),
            "candidates scanned"
        );

        sort_candidates(&mut candidates, policy.tle_priority);
        match pick(candidates, start, end, policy.selection) {
            Some((chosen, days)) => {
                info!(
                    norad = object.norad(),
                    file = chosen.filename(),
                    calculation_days = days.calculation_days,
                    "CPF selected"
                );
                Ok(SelectionResult::found(chosen, days, report))
            }
            None => {
                report.push(ResolveErrorKind::CpfNotFound, not_found_message(object));
                Ok(SelectionResult::not_found(report))
            }
        }
    }

    /// Resolve the CPF file of `object` in `dir` for the window `[start, end]`.
    ///
    /// When nothing is found with the requested provider, the provider is not `All`
    /// and [`ForceProviderOption::NoForce`] is set, the search runs again over every
    /// file. The result of that second pass, diagnostics included, replaces the first.
    ///
    /// Arguments
    /// -----------------
    /// * `dir` – directory holding the CPF files.
    /// * `object` – the tracked object.
    /// * `start`, `end` – the tracking window.
    /// * `policy` – selection, provider, fallback and TLE options.
    ///
    /// Return
    /// ----------
    /// * The [`SelectionResult`]; `CPF_NOT_FOUND` in its report when nothing was chosen.
    ///   Errors are reserved for filter construction failures.
    pub fn resolve(
        &self,
        dir: &Utf8Path,
        object: &impl TrackedObject,
        start: Epoch,
        end: Epoch,
        policy: &SearchPolicy,
    ) -> Result<SelectionResult, CpfError> {
        let result = self.resolve_with_provider(dir, object, start, end, policy, &policy.provider)?;

        let retry = result.report.contains(ResolveErrorKind::CpfNotFound)
            && policy.force_provider == ForceProviderOption::NoForce
            && policy.provider != ProviderOption::All;
        if !retry {
            return Ok(result);
        }

        debug!(norad = object.norad(), "retrying with every provider");
        self.resolve_with_provider(dir, object, start, end, policy, &ProviderOption::All)
    }

    /// Resolve over the dated subdirectories `dir/yyyyMMdd`, starting at the date of
    /// `end` and stepping one day back at a time, for at most `days_before` directories
    /// (always at least one).
    ///
    /// The diagnostics of every visited directory are accumulated. With
    /// [`PriorityTle::LowestPriority`], the first TLE pick is held back and the walk
    /// continues; it is returned only if no other file is found.
    pub fn resolve_recursive(
        &self,
        dir: &Utf8Path,
        object: &impl TrackedObject,
        start: Epoch,
        end: Epoch,
        policy: &SearchPolicy,
        days_before: u32,
    ) -> Result<SelectionResult, CpfError> {
        let mut report = ResolveReport::new();
        let mut best_tle: Option<SelectionResult> = None;
        let mut found: Option<SelectionResult> = None;
        let mut date = end;

        for _ in 0..days_before.max(1) {
            let dated_dir = dir.join(yyyymmdd(date));
            let mut result = self.resolve(&dated_dir, object, start, end, policy)?;
            report.append(std::mem::take(&mut result.report));

            let held_as_tle = policy.tle_priority == PriorityTle::LowestPriority
                && result.chosen.as_ref().is_some_and(CpfCandidate::is_tle);

            if held_as_tle {
                debug!(%dated_dir, "TLE candidate held as fallback");
                best_tle.get_or_insert(result);
            } else if result.is_found() {
                found = Some(result);
                break;
            }

            date = shift_date(date, -1)?;
        }

        let mut result = found
            .or(best_tle)
            .unwrap_or_else(|| SelectionResult::not_found(ResolveReport::new()));
        result.report = report;
        Ok(result)
    }

    /// Resolve every object of `objects` in `dir`, in parallel.
    ///
    /// Objects with `CPF_NOT_FOUND` are left out of the selections, their diagnostics
    /// are kept. Under a `*_REDUCE` policy, once all objects are resolved, every
    /// selection's calculation horizon is set to the smallest remaining horizon of
    /// the batch.
    ///
    /// Return
    /// ----------
    /// * The selections in input order and the aggregated report, or the worker pool
    ///   construction error.
    pub fn resolve_batch<O>(
        &self,
        dir: &Utf8Path,
        objects: &[O],
        start: Epoch,
        end: Epoch,
        policy: &SearchPolicy,
    ) -> Result<BatchResult<O>, CpfError>
    where
        O: TrackedObject + Clone + Send + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_count())
            .build()?;

        let sink: Mutex<(Vec<(usize, CpfSelected<O>)>, ResolveReport)> =
            Mutex::new((Vec::new(), ResolveReport::new()));

        pool.install(|| {
            objects
                .par_iter()
                .enumerate()
                .try_for_each(|(index, object)| -> Result<(), CpfError> {
                    let result = self.resolve(dir, object, start, end, policy)?;
                    let not_found = result.report.contains(ResolveErrorKind::CpfNotFound);

                    let mut guard = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                    if let (false, Some(candidate)) = (not_found, result.chosen) {
                        guard.0.push((
                            index,
                            CpfSelected {
                                object: object.clone(),
                                candidate,
                                days: result.days,
                            },
                        ));
                    }
                    guard.1.append(result.report);
                    Ok(())
                })
        })?;

        let (mut indexed, report) = sink
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        indexed.sort_by_key(|(index, _)| *index);
        let mut selected: Vec<CpfSelected<O>> =
            indexed.into_iter().map(|(_, selected)| selected).collect();

        if policy.selection.is_reduce() {
            let min_remaining = selected
                .iter()
                .map(|s| s.days.remaining_days)
                .min_by(f64::total_cmp);
            if let Some(min_remaining) = min_remaining {
                debug!(min_remaining, "batch calculation horizon reduced");
                for entry in &mut selected {
                    entry.days.calculation_days = min_remaining;
                }
            }
        }

        info!(
            objects = objects.len(),
            selected = selected.len(),
            "batch resolution done"
        );
        Ok(BatchResult { selected, report })
    }

    /// Resolve `object` in the configured current directory with the configured policy.
    pub fn resolve_current(
        &self,
        object: &impl TrackedObject,
        start: Epoch,
        end: Epoch,
    ) -> Result<SelectionResult, CpfError> {
        self.resolve(&self.config.current_dir, object, start, end, &self.config.policy)
    }

    /// [`CpfResolver::resolve_recursive`] over the configured historical directory,
    /// walking back at most `days_before` dated directories with the configured policy.
    pub fn resolve_historical(
        &self,
        object: &impl TrackedObject,
        start: Epoch,
        end: Epoch,
    ) -> Result<SelectionResult, CpfError> {
        self.resolve_recursive(
            &self.config.historical_dir,
            object,
            start,
            end,
            &self.config.policy,
            self.config.days_before,
        )
    }

    /// Locate `name` with the configured directories and bound, see [`find_cpf`].
    pub fn find(&self, name: &str) -> Option<Utf8PathBuf> {
        find_cpf(
            &self.config.current_dir,
            &self.config.historical_dir,
            name,
            self.config.find_days_after,
        )
    }
}

/// Filenames of the valid files of `dir` describing `object` and still valid after `now`.
pub fn files_for_object(dir: &Utf8Path, object: &impl TrackedObject, now: Epoch) -> Vec<String> {
    list_files(dir, None)
        .into_iter()
        .filter_map(|path| CpfCandidate::load(&path))
        .filter(|candidate| candidate.norad() == object.norad() && candidate.end_time() > now)
        .map(|candidate| candidate.filename().to_string())
        .collect()
}

/// Full paths of the files usable to track `object` over `[start, end]`.
///
/// Files are taken from the dated subdirectory of the `start` date, or of the day
/// before when `start` is earlier than 12:00 UTC. A file qualifies when its validity
/// covers the whole window.
pub fn file_paths_for_tracking(
    dir: &Utf8Path,
    start: Epoch,
    end: Epoch,
    object: &impl TrackedObject,
) -> Result<Vec<Utf8PathBuf>, CpfError> {
    let day = if is_before_noon(start) {
        shift_date(start, -1)?
    } else {
        start
    };
    let base = if dir.as_str().is_empty() {
        Utf8Path::new(".")
    } else {
        dir
    };
    let dated_dir = base.join(yyyymmdd(day));

    Ok(list_files(&dated_dir, None)
        .into_iter()
        .filter_map(|path| CpfCandidate::load(&path))
        .filter(|candidate| {
            candidate.norad() == object.norad()
                && start >= candidate.start_time()
                && end <= candidate.end_time()
        })
        .map(|candidate| candidate.file_path)
        .collect())
}

/// Locate a CPF file by name.
///
/// Arguments
/// -----------------
/// * `current_dir` – checked first.
/// * `historical_dir` – root of the `yyyyMMdd` dated directories.
/// * `name` – the filename; standard names (`<target>_cpf_<yymmdd>_<seq>.<source>`)
///   give the first dated directory to look into.
/// * `days_after` – number of dated directories walked forward from that date.
///
/// Return
/// ----------
/// * The first existing path, or `None`.
pub fn find_cpf(
    current_dir: &Utf8Path,
    historical_dir: &Utf8Path,
    name: &str,
    days_after: u32,
) -> Option<Utf8PathBuf> {
    let current = current_dir.join(name);
    if current.is_file() {
        return Some(current);
    }

    let parts: Vec<&str> = name.split('_').collect();
    let [_, _, date_label, _] = parts.as_slice() else {
        debug!(name, "not a standard CPF filename");
        return None;
    };
    let mut date = parse_yymmdd(date_label)?;

    for _ in 0..days_after {
        let candidate = historical_dir.join(yyyymmdd(date)).join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        date = match shift_date(date, 1) {
            Ok(next) => next,
            Err(err) => {
                warn!(%err, "dated directory walk stopped");
                return None;
            }
        };
    }
    None
}
