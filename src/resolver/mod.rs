//! # Ephemeris resolver
//!
//! Selection of the CPF file to use for a tracked object over a time window, among
//! the files of a directory (or of a tree of `yyyyMMdd` dated directories).
//!
//! ## Modules
//! -----------------
//! * [`options`] – selection, provider, fallback and TLE priority policies.
//! * [`space_object`] – the [`TrackedObject`] view of an object.
//! * [`candidate`] – header-only candidates and their ranking.
//! * [`discovery`] – directory listing, provider filters and candidate scanning.
//! * [`selection`] – policy pick and day counts.
//! * [`config`] – TOML configuration of the resolver.
//! * [`engine`] – [`CpfResolver`] entry points and auxiliary lookups.
//!
//! ## Example
//! -----------------
//! ```rust, no_run
//! use camino::Utf8Path;
//! use cpfkit::resolver::{CpfResolver, ResolverConfig, SpaceObject};
//! use cpfkit::time::utc_epoch;
//!
//! let config = ResolverConfig::load(Utf8Path::new("resolver.toml")).unwrap();
//! let policy = config.policy.clone();
//! let resolver = CpfResolver::new(config);
//!
//! let lageos1 = SpaceObject::new("lageos1", "8820", "sgf");
//! let start = utc_epoch(2024, 3, 15, 20, 0, 0).unwrap();
//! let end = utc_epoch(2024, 3, 16, 4, 0, 0).unwrap();
//!
//! let result = resolver
//!     .resolve(&resolver.config().current_dir, &lageos1, start, end, &policy)
//!     .unwrap();
//! match &result.chosen {
//!     Some(candidate) => println!("{} for {:.2} days", candidate.filename(), result.days.calculation_days),
//!     None => {
//!         for (kind, message) in result.report.errors() {
//!             eprintln!("{kind}: {message}");
//!         }
//!     }
//! }
//! ```
pub mod candidate;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod options;
pub mod selection;
pub mod space_object;

pub use candidate::CpfCandidate;
pub use config::ResolverConfig;
pub use engine::{file_paths_for_tracking, files_for_object, find_cpf, BatchResult, CpfResolver};
pub use options::{ForceProviderOption, PriorityTle, ProviderOption, SearchPolicy, SelectionOption};
pub use selection::{CpfSelected, DayCounts, SelectionResult};
pub use space_object::{SpaceObject, TrackedObject};
