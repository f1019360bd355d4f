//! # Consolidated Prediction Format (CPF)
//!
//! Reader and writer for the ILRS **Consolidated Prediction Format**, the text
//! ephemeris used to point satellite laser ranging stations.
//!
//! ## Modules
//! -----------------
//! * [`record`] – line tokenizer producing [`record::Record`] values.
//! * [`version`] – the [`version::FormatVersion`] tag selecting v1 or v2 encodings.
//! * [`header`] – typed H1..H5 blocks with their readers and writers.
//! * [`cpf_file`] – whole file opening, validation and writing.
//! * [`naming`] – ILRS id / COSPAR conversions used by standard filenames.
//!
//! ## Example
//! -----------------
//! ```rust, no_run
//! use camino::Utf8Path;
//! use cpfkit::cpf::cpf_file::{CpfFile, OpenOption, TargetIdOption};
//!
//! let cpf = CpfFile::open(Utf8Path::new("lageos1_cpf_240315_75101.sgf"), OpenOption::OnlyHeader);
//! if cpf.is_valid() {
//!     let h2 = cpf.header().basic_info2.as_ref().unwrap();
//!     println!("NORAD {} valid until {}", h2.norad, h2.end_time);
//!     println!("{:?}", cpf.standard_filename(TargetIdOption::Norad));
//! }
//! ```
pub mod cpf_file;
pub mod header;
pub mod naming;
pub mod record;
pub mod version;

pub use cpf_file::{CpfFile, OpenOption, ReadFileStatus, TargetIdOption};
pub use header::CpfHeader;
pub use version::FormatVersion;
