//! Resolver configuration, loaded from TOML.
//!
//! Every field has a default, so a partial file (or no file at all) is valid:
//!
//! ```toml
//! current_dir = "/data/cpf/current"
//! historical_dir = "/data/cpf/historical"
//! days_before = 6
//! find_days_after = 20
//! worker_threads = 4
//!
//! [policy]
//! selection = "MAXIMIZE_DAYS"
//! provider = { CUSTOM = "sgf" }
//! tle_priority = "LOWEST_PRIORITY"
//! ```
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    constants::{DEFAULT_DAYS_AFTER, DEFAULT_DAYS_BEFORE},
    cpf_errors::CpfError,
    resolver::options::SearchPolicy,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Directory holding the CPF files currently in use.
    #[serde(default = "default_current_dir")]
    pub current_dir: Utf8PathBuf,
    /// Root of the `yyyyMMdd` dated directories.
    #[serde(default = "default_historical_dir")]
    pub historical_dir: Utf8PathBuf,
    /// Dated directories walked backward by the recursive lookup.
    #[serde(default = "default_days_before")]
    pub days_before: u32,
    /// Dated directories walked forward when locating a file by name.
    #[serde(default = "default_days_after")]
    pub find_days_after: u32,
    /// Batch worker count, the number of logical CPUs when unset.
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default)]
    pub policy: SearchPolicy,
}

fn default_current_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(".")
}

fn default_historical_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("historical")
}

fn default_days_before() -> u32 {
    DEFAULT_DAYS_BEFORE
}

fn default_days_after() -> u32 {
    DEFAULT_DAYS_AFTER
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            current_dir: default_current_dir(),
            historical_dir: default_historical_dir(),
            days_before: default_days_before(),
            find_days_after: default_days_after(),
            worker_threads: None,
            policy: SearchPolicy::default(),
        }
    }
}

impl ResolverConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, CpfError> {
        Ok(toml::from_str(content)?)
    }

    /// Load the configuration at `path`, or the defaults if the file does not exist.
    pub fn load(path: &Utf8Path) -> Result<Self, CpfError> {
        if !path.exists() {
            debug!(%path, "no resolver configuration, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Number of batch workers, at least one.
    pub fn worker_count(&self) -> usize {
        self.worker_threads
            .unwrap_or_else(rayon::current_num_threads)
            .max(1)
    }
}
