//! # CPF file abstraction
//!
//! [`CpfFile`] opens a Consolidated Prediction Format file, drives the
//! [`RecordTokenizer`] over it and fills a [`CpfHeader`].
//!
//! ## File layout
//! -----------------
//! ```text
//! 00 optional comments attached to the next record
//! H1 ...            ┐
//! H2 ...            │ header records (H1, H2 mandatory)
//! H5 ...            ┘
//! H9                  end of header
//! 10 ...            ┐
//! 10 ...            │ data records (10, 20, 30, 40, 50, 60, 70)
//! 99                  end of ephemeris
//! ```
//!
//! ## Opening modes
//! -----------------
//! * [`OpenOption::OnlyHeader`] stops at `H9`; this is what the resolver uses to scan many
//!   candidates quickly.
//! * [`OpenOption::AllData`] reads up to `99` and requires nothing after it.
//!
//! Data records are kept raw: only their identity and a non-empty payload are checked.
//!
//! ## Outcome
//! -----------------
//! Opening returns a [`ReadFileStatus`]. Warnings (`*LoadWarning`) keep the contents and
//! expose the per-record defects through [`CpfFile::header_read_errors`] and
//! [`CpfFile::data_read_errors`]; every other non-`NotError` status leaves the file empty.
use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;
use itertools::Itertools;
use tracing::{debug, warn};

use crate::{
    constants::{END_OF_EPHEMERIS_ID, END_OF_HEADER_ID},
    cpf::{
        header::CpfHeader,
        naming::{ilrs_id_to_cospar, ilrs_id_to_short_cospar},
        record::{Record, RecordKind, RecordTokenizer},
        version::FormatVersion,
    },
    cpf_errors::{CpfError, RecordReadError, RecordReadErrors},
    time::yymmdd,
};

/// How much of a file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOption {
    OnlyHeader,
    AllData,
}

/// File-level outcome of [`CpfFile::open_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFileStatus {
    /// Everything was read without defect.
    NotError,
    /// Defects in both header and data records.
    RecordsLoadWarning,
    /// Defects in header records only.
    HeaderLoadWarning,
    /// Defects in data records only.
    DataLoadWarning,
    /// A record with an unknown identifier (see [`CpfFile::last_error_record`]).
    UndefinedRecord,
    /// A header record after `H9`, or a data record outside `H9`..`99`.
    OrderError,
    /// A second `H9`.
    MultipleEoh,
    /// Content after `99` when reading all data.
    ContentAfterEoe,
    /// No `99` when reading all data.
    EoeNotFound,
    FileNotFound,
    FileEmpty,
    /// End of file reached before `H9`, or `99` before `H9`.
    FileTruncated,
    /// `H9` without any header record before it.
    NoHeaderFound,
    /// `99` without any data record before it.
    NoDataFound,
    /// Header records read but H1 is missing or unreadable.
    VersionUnknown,
}

impl ReadFileStatus {
    /// True for `NotError` and the load warnings, which keep the file contents.
    pub fn is_loaded(self) -> bool {
        matches!(
            self,
            ReadFileStatus::NotError
                | ReadFileStatus::RecordsLoadWarning
                | ReadFileStatus::HeaderLoadWarning
                | ReadFileStatus::DataLoadWarning
        )
    }
}

/// Target identifier used as the first part of a standard CPF filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetIdOption {
    /// H1 target name, lower-cased.
    TargetName,
    IlrsId,
    Norad,
    Cospar,
    ShortCospar,
}

/// An opened (or built in memory) CPF file.
#[derive(Debug, Clone, PartialEq)]
pub struct CpfFile {
    header: CpfHeader,
    data_records: Vec<Record>,
    header_read_errors: RecordReadErrors,
    data_read_errors: RecordReadErrors,
    last_error_record: Option<Record>,
    last_read_status: ReadFileStatus,
    path: Option<Utf8PathBuf>,
    empty: bool,
}

impl Default for CpfFile {
    fn default() -> Self {
        CpfFile {
            header: CpfHeader::default(),
            data_records: Vec::new(),
            header_read_errors: RecordReadErrors::new(),
            data_read_errors: RecordReadErrors::new(),
            last_error_record: None,
            last_read_status: ReadFileStatus::NotError,
            path: None,
            empty: true,
        }
    }
}

/// Check raw data records: a data record must carry at least one value.
fn read_data(records: &[Record]) -> RecordReadErrors {
    let mut errors = RecordReadErrors::new();
    for record in records.iter().filter(|r| r.values().is_empty()) {
        errors.insert(RecordReadError::BadSize, record.clone());
    }
    errors
}

impl CpfFile {
    /// Build a file in memory from a header and raw data records.
    pub fn with_contents(header: CpfHeader, data_records: Vec<Record>) -> Self {
        CpfFile {
            header,
            data_records,
            empty: false,
            ..CpfFile::default()
        }
    }

    /// Open `path` and return the resulting file, whatever the outcome.
    ///
    /// Use [`CpfFile::last_read_status`] to know what happened.
    pub fn open(path: &Utf8Path, option: OpenOption) -> Self {
        let mut cpf = CpfFile::default();
        cpf.open_file(path, option);
        cpf
    }

    /// Read the CPF file at `path`, replacing the current contents.
    ///
    /// Arguments
    /// -----------------
    /// * `path` – file to read.
    /// * `option` – stop after `H9` ([`OpenOption::OnlyHeader`]) or read up to `99`.
    ///
    /// Return
    /// ----------
    /// * The [`ReadFileStatus`] of the read, also kept as [`CpfFile::last_read_status`].
    pub fn open_file(&mut self, path: &Utf8Path, option: OpenOption) -> ReadFileStatus {
        *self = CpfFile::default();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!(%path, %err, "unable to open CPF file");
                return self.fail(ReadFileStatus::FileNotFound, None);
            }
        };
        self.path = Some(path.to_owned());
        let mut tokenizer = RecordTokenizer::new(text_lines(BufReader::new(file), path));
        if tokenizer.is_exhausted() {
            return self.fail(ReadFileStatus::FileEmpty, None);
        }

        let mut header_records = Vec::new();
        let mut data_records = Vec::new();
        let mut header_finished = false;
        let mut data_finished = false;

        for next in tokenizer.by_ref() {
            let record = match next {
                Ok(record) => record,
                Err(record) => return self.fail(ReadFileStatus::UndefinedRecord, Some(record)),
            };

            match record.kind() {
                Some(RecordKind::Header) if header_finished => {
                    return self.fail(ReadFileStatus::OrderError, Some(record));
                }
                Some(RecordKind::Data) if !header_finished || data_finished => {
                    return self.fail(ReadFileStatus::OrderError, Some(record));
                }
                Some(RecordKind::EndOfHeader) if header_finished => {
                    return self.fail(ReadFileStatus::MultipleEoh, Some(record));
                }
                Some(RecordKind::Header) => header_records.push(record),
                Some(RecordKind::EndOfHeader) => {
                    if header_records.is_empty() {
                        return self.fail(ReadFileStatus::NoHeaderFound, None);
                    }
                    self.header_read_errors = self.header.read_header(&header_records);
                    header_finished = true;
                    if self.header.basic_info1.is_none() {
                        return self.fail(ReadFileStatus::VersionUnknown, None);
                    }
                }
                Some(RecordKind::Data) => data_records.push(record),
                Some(RecordKind::EndOfEphemeris) => {
                    if data_records.is_empty() {
                        return self.fail(ReadFileStatus::NoDataFound, None);
                    }
                    if !header_finished {
                        return self.fail(ReadFileStatus::FileTruncated, None);
                    }
                    self.data_read_errors = read_data(&data_records);
                    data_finished = true;
                }
                None => return self.fail(ReadFileStatus::UndefinedRecord, Some(record)),
            }

            let finished = match option {
                OpenOption::OnlyHeader => header_finished,
                OpenOption::AllData => header_finished && data_finished,
            };
            if finished {
                break;
            }
        }

        if data_finished && option == OpenOption::AllData && !tokenizer.is_exhausted() {
            let trailing = tokenizer.next_raw_line().map(|(number, line)| {
                Record::from_line(&line, number).unwrap_or(Record {
                    line_number: number,
                    ..Record::default()
                })
            });
            return self.fail(ReadFileStatus::ContentAfterEoe, trailing);
        }

        let status = if !header_finished {
            ReadFileStatus::FileTruncated
        } else if !data_finished && option == OpenOption::AllData {
            ReadFileStatus::EoeNotFound
        } else {
            match (self.header_read_errors.is_empty(), self.data_read_errors.is_empty()) {
                (true, true) => ReadFileStatus::NotError,
                (false, true) => ReadFileStatus::HeaderLoadWarning,
                (true, false) => ReadFileStatus::DataLoadWarning,
                (false, false) => ReadFileStatus::RecordsLoadWarning,
            }
        };

        if !status.is_loaded() {
            return self.fail(status, None);
        }

        self.data_records = data_records;
        self.empty = false;
        self.last_read_status = status;
        debug!(%path, ?status, ?option, "CPF file opened");
        status
    }

    /// Re-open the stored path reading all data records.
    pub fn open_data(&mut self) -> ReadFileStatus {
        match self.path.clone() {
            Some(path) => self.open_file(&path, OpenOption::AllData),
            None => self.fail(ReadFileStatus::FileNotFound, None),
        }
    }

    fn fail(&mut self, status: ReadFileStatus, record: Option<Record>) -> ReadFileStatus {
        self.header.clear_all();
        self.data_records.clear();
        self.header_read_errors = RecordReadErrors::new();
        self.data_read_errors = RecordReadErrors::new();
        self.empty = true;
        self.last_error_record = record;
        self.last_read_status = status;
        debug!(path = ?self.path, ?status, "CPF file not loaded");
        status
    }

    pub fn header(&self) -> &CpfHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut CpfHeader {
        &mut self.header
    }

    pub fn data_records(&self) -> &[Record] {
        &self.data_records
    }

    pub fn header_read_errors(&self) -> &RecordReadErrors {
        &self.header_read_errors
    }

    pub fn data_read_errors(&self) -> &RecordReadErrors {
        &self.data_read_errors
    }

    /// Offending record of the last failed read, when the failure points at one.
    pub fn last_error_record(&self) -> Option<&Record> {
        self.last_error_record.as_ref()
    }

    pub fn last_read_status(&self) -> ReadFileStatus {
        self.last_read_status
    }

    /// Path of the last file that could be opened, whether its contents loaded or not.
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.path.as_deref().and_then(Utf8Path::file_name)
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Loaded and holding both mandatory header blocks.
    pub fn is_valid(&self) -> bool {
        !self.empty && self.header.has_mandatory_blocks()
    }

    fn generate_data_lines(&self) -> String {
        self.data_records
            .iter()
            .flat_map(|record| {
                let comments = (!record.comment_block.is_empty())
                    .then(|| record.generate_comment_block());
                comments.into_iter().chain(std::iter::once(record.generate_line()))
            })
            .join("\n")
    }

    /// Write the file to `path`, stamping H1 with `production_date`.
    ///
    /// Arguments
    /// -----------------
    /// * `path` – destination file.
    /// * `force` – overwrite an existing file.
    /// * `production_date` – production timestamp written in H1.
    ///
    /// Return
    /// ----------
    /// * [`CpfError::FileAlreadyExists`] if `path` exists and `force` is false,
    ///   [`CpfError::VersionUnknown`] without H1, or an I/O error.
    pub fn write_at(&self, path: &Utf8Path, force: bool, production_date: Epoch) -> Result<(), CpfError> {
        if path.exists() && !force {
            return Err(CpfError::FileAlreadyExists(path.to_string()));
        }
        if self.header.basic_info1.is_none() {
            return Err(CpfError::VersionUnknown);
        }

        let content = format!(
            "{}\n{END_OF_HEADER_ID}\n{}\n{END_OF_EPHEMERIS_ID}",
            self.header.generate_header_lines_at(production_date),
            self.generate_data_lines(),
        );
        std::fs::write(path, content)?;
        debug!(%path, "CPF file written");
        Ok(())
    }

    /// Write the file to `path` with the current UTC time as production date.
    pub fn write(&self, path: &Utf8Path, force: bool) -> Result<(), CpfError> {
        self.write_at(path, force, Epoch::now()?)
    }

    /// Standard ILRS filename: `<target>_cpf_<yymmdd>_<sequence>.<source>`.
    ///
    /// `<yymmdd>` is the H2 start date. The sequence is `{:04}` for version 1 and the
    /// `{:03}` daily sequence followed by the `{:02}` sub-daily sequence for version 2.
    ///
    /// Return
    /// ----------
    /// * `None` without H1 and H2, or when the target id cannot be derived.
    pub fn standard_filename(&self, option: TargetIdOption) -> Option<String> {
        let basic_info1 = self.header.basic_info1.as_ref()?;
        let basic_info2 = self.header.basic_info2.as_ref()?;

        let target = match option {
            TargetIdOption::IlrsId => basic_info2.id.clone(),
            TargetIdOption::ShortCospar => ilrs_id_to_short_cospar(&basic_info2.id)?,
            TargetIdOption::Cospar => ilrs_id_to_cospar(&basic_info2.id)?,
            TargetIdOption::Norad => basic_info2.norad.clone(),
            TargetIdOption::TargetName => basic_info1.target_name.to_lowercase(),
        };

        let sequence = match basic_info1.format_version()? {
            FormatVersion::V1 => format!("{:04}", basic_info1.sequence_number),
            FormatVersion::V2 => format!(
                "{:03}{:02}",
                basic_info1.sequence_number, basic_info1.subsequence_number
            ),
        };

        Some(format!(
            "{target}_cpf_{}_{sequence}.{}",
            yymmdd(basic_info2.start_time),
            basic_info1.source
        ))
    }
}

/// Lines of `reader`, without their `\n` or `\r\n` terminator.
///
/// Bytes that are not UTF-8 (Latin-1 comments are common) are replaced rather than
/// ending the read. An I/O error ends the iteration.
fn text_lines<'a, R: BufRead + 'a>(
    reader: R,
    path: &'a Utf8Path,
) -> impl Iterator<Item = String> + 'a {
    reader
        .split(b'\n')
        .map_while(move |line| {
            line.map_err(|err| warn!(%path, %err, "CPF file read interrupted"))
                .ok()
        })
        .map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            String::from_utf8_lossy(&bytes).into_owned()
        })
}
