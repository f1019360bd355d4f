//! Directory listing and header-only scanning of CPF files.
use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::{
    cpf_errors::{CpfError, ResolveErrorKind, ResolveReport},
    resolver::{candidate::CpfCandidate, options::ProviderOption, space_object::TrackedObject},
};

/// Filename filter equivalent to the `*.*` / `*.<extension>` wildcard, case-insensitive.
pub fn name_filter(extension: Option<&str>) -> Result<Regex, CpfError> {
    let pattern = match extension {
        Some(ext) => format!(r"^.*\.{}$", regex::escape(ext)),
        None => r"^.*\..*$".to_string(),
    };
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

/// Extension filter for a provider option.
///
/// `Preferred` uses the object's own provider, falling back to every file when the
/// object has no restriction. `Custom` matches its extension only.
pub fn provider_filter(
    provider: &ProviderOption,
    object: &impl TrackedObject,
) -> Result<Regex, CpfError> {
    match provider {
        ProviderOption::Preferred => name_filter(object.preferred_extension()),
        ProviderOption::All => name_filter(None),
        ProviderOption::Custom(ext) => name_filter(Some(ext.as_str())),
    }
}

/// Regular files of `dir` whose name matches `filter`, sorted by filename.
///
/// A missing or unreadable directory gives an empty list. Non UTF-8 names are skipped.
pub fn list_files(dir: &Utf8Path, filter: Option<&Regex>) -> Vec<Utf8PathBuf> {
    let entries = match dir.read_dir_utf8() {
        Ok(entries) => entries,
        Err(err) => {
            debug!(%dir, %err, "directory not readable");
            return Vec::new();
        }
    };

    let mut files: Vec<Utf8PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(err) => {
                warn!(%dir, %err, "skipping directory entry");
                None
            }
        })
        .filter(|path| path.is_file())
        .filter(|path| {
            filter.map_or(true, |re| path.file_name().is_some_and(|name| re.is_match(name)))
        })
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files
}

/// Scan `dir` for usable candidates of `object`.
///
/// Every listed file is opened header-only:
/// * empty or without H1/H2: `CPF_LOAD_FAILED` "`<file>` load failed."
/// * another NORAD: skipped silently
/// * unusable target class, not TIV compatible or degenerate window:
///   `CPF_INVALID` "`<file>` is invalid."
/// * validity ending before `start`: `CPF_OLD` "`<file>` is old."
///
/// Return
/// ----------
/// * The candidates in listing order and the report of skipped files.
pub fn scan_candidates(
    dir: &Utf8Path,
    object: &impl TrackedObject,
    start: Epoch,
    filter: &Regex,
) -> (Vec<CpfCandidate>, ResolveReport) {
    let mut candidates = Vec::new();
    let mut report = ResolveReport::new();

    for path in list_files(dir, Some(filter)) {
        let filename = path.file_name().unwrap_or(path.as_str()).to_string();

        let Some(candidate) = CpfCandidate::load(&path) else {
            report.push(ResolveErrorKind::CpfLoadFailed, format!("{filename} load failed."));
            continue;
        };

        if candidate.norad() != object.norad() {
            continue;
        }

        if !candidate.is_usable() {
            debug!(file = %filename, "unusable CPF");
            report.push(ResolveErrorKind::CpfInvalid, format!("{filename} is invalid."));
        } else if candidate.end_time() < start {
            debug!(file = %filename, "CPF validity ends before the window");
            report.push(ResolveErrorKind::CpfOld, format!("{filename} is old."));
        } else {
            candidates.push(candidate);
        }
    }

    (candidates, report)
}

#[cfg(test)]
mod discovery_test {
    use super::*;
    use crate::resolver::space_object::SpaceObject;

    #[test]
    fn test_name_filter() {
        let sgf = name_filter(Some("sgf")).unwrap();
        assert!(sgf.is_match("lageos1_cpf_240315_75101.sgf"));
        assert!(sgf.is_match("LAGEOS1.SGF"));
        assert!(!sgf.is_match("lageos1_cpf_240315_75101.hts"));
        assert!(!sgf.is_match("sgf"));

        let all = name_filter(None).unwrap();
        assert!(all.is_match("a.hts"));
        assert!(!all.is_match("README"));

        let dotted = name_filter(Some("a.b")).unwrap();
        assert!(dotted.is_match("x.a.b"));
        assert!(!dotted.is_match("x.aXb"));
    }

    #[test]
    fn test_provider_filter() {
        let object = SpaceObject::new("lageos1", "8820", "sgf");
        assert!(!provider_filter(&ProviderOption::Preferred, &object).unwrap().is_match("x.hts"));
        assert!(provider_filter(&ProviderOption::All, &object).unwrap().is_match("x.hts"));
        assert!(provider_filter(&ProviderOption::Custom("hts".into()), &object).unwrap().is_match("x.hts"));

        let unrestricted = SpaceObject::new("lageos1", "8820", "No TLE");
        assert!(provider_filter(&ProviderOption::Preferred, &unrestricted).unwrap().is_match("x.tle"));
    }

    #[test]
    fn test_list_files_sorted_and_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        for name in ["b.sgf", "a.sgf", "c.hts", "README"] {
            std::fs::write(dir.join(name), "").unwrap();
        }
        std::fs::create_dir(dir.join("sub.sgf")).unwrap();

        let names = |files: Vec<Utf8PathBuf>| {
            files
                .iter()
                .map(|p| p.file_name().unwrap().to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(
            names(list_files(dir, Some(&name_filter(Some("sgf")).unwrap()))),
            vec!["a.sgf", "b.sgf"]
        );
        assert_eq!(
            names(list_files(dir, Some(&name_filter(None).unwrap()))),
            vec!["a.sgf", "b.sgf", "c.hts"]
        );
        assert_eq!(names(list_files(dir, None)).len(), 4);
        assert!(list_files(&dir.join("missing"), None).is_empty());
    }
}
