#![allow(dead_code)]

use approx::assert_relative_eq;
use camino::{Utf8Path, Utf8PathBuf};
use cpfkit::resolver::DayCounts;
use hifitime::Epoch;
use tempfile::TempDir;

pub fn data_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// UTC epoch in March 2024.
pub fn march(day: u8, hour: u8) -> Epoch {
    Epoch::from_gregorian_utc(2024, 3, day, hour, 0, 0, 0)
}

pub fn assert_days_close(actual: &DayCounts, total: f64, remaining: f64, calculation: f64) {
    assert_relative_eq!(actual.total_days, total, epsilon = 1e-9);
    assert_relative_eq!(actual.remaining_days, remaining, epsilon = 1e-9);
    assert_relative_eq!(actual.calculation_days, calculation, epsilon = 1e-9);
}

/// Version 2 CPF file description, every date in March 2024.
#[derive(Debug, Clone)]
pub struct CpfFixture {
    pub norad: String,
    pub source: String,
    pub production_day: u8,
    pub sequence: u32,
    pub start: (u8, u8),
    pub end: (u8, u8),
    pub target_class: u8,
    pub tiv_compatible: bool,
}

impl CpfFixture {
    pub fn new(norad: &str, source: &str, production_day: u8, start_day: u8, end_day: u8) -> Self {
        CpfFixture {
            norad: norad.to_string(),
            source: source.to_string(),
            production_day,
            sequence: 1,
            start: (start_day, 0),
            end: (end_day, 0),
            target_class: 1,
            tiv_compatible: true,
        }
    }

    pub fn sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn end_hour(mut self, hour: u8) -> Self {
        self.end.1 = hour;
        self
    }

    pub fn start_hour(mut self, hour: u8) -> Self {
        self.start.1 = hour;
        self
    }

    pub fn target_class(mut self, target_class: u8) -> Self {
        self.target_class = target_class;
        self
    }

    pub fn tiv_compatible(mut self, tiv_compatible: bool) -> Self {
        self.tiv_compatible = tiv_compatible;
        self
    }

    pub fn text(&self) -> String {
        format!(
            "H1 CPF 2 {source} 2024 3 {pday} 10 {seq} 1 target{norad}\n\
             H2 1234501 na {norad} 2024 3 {sd} {sh} 0 0 2024 3 {ed} {eh} 0 0 240 {tiv} {class} 0 0 0 1\n\
             H9\n\
             10 0 60384 0.00000 0 -4963440.542 4497440.221 -9584022.361\n\
             99\n",
            source = self.source,
            pday = self.production_day,
            seq = self.sequence,
            norad = self.norad,
            sd = self.start.0,
            sh = self.start.1,
            ed = self.end.0,
            eh = self.end.1,
            tiv = u8::from(self.tiv_compatible),
            class = self.target_class,
        )
    }

    /// Write the fixture as `dir/name`.
    pub fn write(&self, dir: &Utf8Path, name: &str) -> Utf8PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, self.text()).unwrap();
        path
    }
}

/// Temporary directory with a UTF-8 path.
pub struct Workspace {
    _tmp: TempDir,
    pub root: Utf8PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        Workspace { _tmp: tmp, root }
    }

    pub fn dir(&self, relative: &str) -> Utf8PathBuf {
        let dir = self.root.join(relative);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
