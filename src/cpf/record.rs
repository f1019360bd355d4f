//! # CPF record tokenizer
//!
//! A CPF file is a sequence of whitespace separated text records. This module turns
//! physical lines into [`Record`] values:
//!
//! - the first token is the **record identifier** (`H1`, `H2`, `10`, `99`, …), upper-cased,
//! - every comment line (`00 …`) preceding a record is attached to it as its **comment block**,
//! - blank lines are skipped,
//! - the 1-based **line number** of the record is kept for diagnostics.
//!
//! ## Classification
//! -----------------
//! [`RecordKind`] tells apart header records (`H1`..`H5`), the end of header (`H9`), data
//! records (`10`..`70`) and the end of ephemeris (`99`). Identifiers outside these sets are
//! *undefined records*: [`RecordTokenizer`] yields them as `Err(record)` so the caller can
//! report the offending line.
//!
//! ## Example
//! -----------------
//! ```rust
//! use cpfkit::cpf::record::{RecordKind, RecordTokenizer};
//!
//! let text = "00 produced by hand\nh1 CPF 2 SGF 2024 3 15 10 1 0 lageos1\n\nH9";
//! let records: Vec<_> = RecordTokenizer::from_text(text).collect();
//!
//! let h1 = records[0].as_ref().unwrap();
//! assert_eq!(h1.identifier(), "H1");
//! assert_eq!(h1.kind(), Some(RecordKind::Header));
//! assert_eq!(h1.comment_block, vec!["produced by hand".to_string()]);
//! assert_eq!(h1.line_number, 2);
//! assert_eq!(records[1].as_ref().unwrap().line_number, 4);
//! ```
use std::iter::Peekable;

use itertools::Itertools;

use crate::constants::{
    COMMENT_MAX_LEN, COMMENT_RECORD_ID, DATA_RECORD_IDS, END_OF_EPHEMERIS_ID, END_OF_HEADER_ID,
    HEADER_RECORD_IDS,
};

/// Category of a tokenized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Header,
    EndOfHeader,
    Data,
    EndOfEphemeris,
}

/// One text record of a CPF file.
///
/// `tokens[0]` is the upper-cased identifier, the following tokens are the record values.
/// A record coming from a dangling comment block (comments not followed by any record) has
/// no tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub tokens: Vec<String>,
    pub comment_block: Vec<String>,
    pub line_number: usize,
}

impl Record {
    /// Tokenize a single physical line.
    ///
    /// Arguments
    /// -----------------
    /// * `line` – the raw text line.
    /// * `line_number` – 1-based position of the line in its source.
    ///
    /// Return
    /// ----------
    /// * `None` for blank lines, otherwise a record with an upper-cased identifier and no comment.
    pub fn from_line(line: &str, line_number: usize) -> Option<Record> {
        let mut tokens: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
        let first = tokens.first_mut()?;
        *first = first.to_uppercase();
        Some(Record {
            tokens,
            comment_block: Vec::new(),
            line_number,
        })
    }

    /// Upper-cased identifier token (empty for a token-less record).
    pub fn identifier(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or("")
    }

    /// Value tokens following the identifier.
    pub fn values(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    pub fn kind(&self) -> Option<RecordKind> {
        let id = self.identifier();
        if HEADER_RECORD_IDS.contains(&id) {
            Some(RecordKind::Header)
        } else if id == END_OF_HEADER_ID {
            Some(RecordKind::EndOfHeader)
        } else if DATA_RECORD_IDS.contains(&id) {
            Some(RecordKind::Data)
        } else if id == END_OF_EPHEMERIS_ID {
            Some(RecordKind::EndOfEphemeris)
        } else {
            None
        }
    }

    /// Render the comment block as `00 <text>` lines, each text cut to 80 characters.
    ///
    /// Lines are joined by `\n`, without trailing line break.
    pub fn generate_comment_block(&self) -> String {
        render_comment_block(&self.comment_block)
    }

    /// Render the record tokens back as a single-space separated line.
    pub fn generate_line(&self) -> String {
        self.tokens.join(" ")
    }
}

pub(crate) fn render_comment_block(comments: &[String]) -> String {
    comments
        .iter()
        .map(|c| format!("{COMMENT_RECORD_ID} {}", c.chars().take(COMMENT_MAX_LEN).collect::<String>()))
        .join("\n")
}

fn comment_text(line: &str) -> Option<String> {
    let mut tokens = line.split_whitespace();
    if tokens.next()? != COMMENT_RECORD_ID {
        return None;
    }
    if tokens.next().is_none() {
        return Some(String::new());
    }
    Some(line.get(3..).unwrap_or("").to_string())
}

/// Iterator turning text lines into records.
///
/// Items are `Ok(record)` for known identifiers and `Err(record)` for undefined ones.
/// When lines remain but none of them completes a record (trailing comments or blank lines),
/// a final `Err` record carrying the pending comment block is yielded.
pub struct RecordTokenizer<I: Iterator<Item = String>> {
    lines: Peekable<I>,
    line_number: usize,
}

impl<'a> RecordTokenizer<std::iter::Map<std::str::Lines<'a>, fn(&'a str) -> String>> {
    pub fn from_text(text: &'a str) -> Self {
        RecordTokenizer::new(text.lines().map(str::to_owned as fn(&'a str) -> String))
    }
}

impl<I: Iterator<Item = String>> RecordTokenizer<I> {
    pub fn new(lines: I) -> Self {
        RecordTokenizer {
            lines: lines.peekable(),
            line_number: 0,
        }
    }

    /// True when no physical line remains to be read.
    pub fn is_exhausted(&mut self) -> bool {
        self.lines.peek().is_none()
    }

    /// Number of physical lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Consume the next physical line verbatim, without tokenizing it.
    pub fn next_raw_line(&mut self) -> Option<(usize, String)> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some((self.line_number, line))
    }
}

impl<I: Iterator<Item = String>> Iterator for RecordTokenizer<I> {
    type Item = Result<Record, Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.peek()?;

        let mut comments = Vec::new();
        while let Some((line_number, line)) = self.next_raw_line() {
            if let Some(comment) = comment_text(&line) {
                comments.push(comment);
                continue;
            }
            let Some(mut record) = Record::from_line(&line, line_number) else {
                continue;
            };
            record.comment_block = comments;
            return Some(match record.kind() {
                Some(_) => Ok(record),
                None => Err(record),
            });
        }

        Some(Err(Record {
            tokens: Vec::new(),
            comment_block: comments,
            line_number: self.line_number,
        }))
    }
}

#[cfg(test)]
mod record_test {
    use super::*;

    #[test]
    fn test_from_line() {
        let record = Record::from_line("  h5   0.2450 ", 7).unwrap();
        assert_eq!(record.tokens, vec!["H5", "0.2450"]);
        assert_eq!(record.identifier(), "H5");
        assert_eq!(record.values(), &["0.2450".to_string()]);
        assert_eq!(record.line_number, 7);
        assert!(Record::from_line("   \t ", 1).is_none());
    }

    #[test]
    fn test_kind() {
        let kind = |line: &str| Record::from_line(line, 1).unwrap().kind();
        assert_eq!(kind("H3 1"), Some(RecordKind::Header));
        assert_eq!(kind("h9"), Some(RecordKind::EndOfHeader));
        assert_eq!(kind("10 0 60000 0.0 1 2 3"), Some(RecordKind::Data));
        assert_eq!(kind("70 1"), Some(RecordKind::Data));
        assert_eq!(kind("99"), Some(RecordKind::EndOfEphemeris));
        assert_eq!(kind("H6 1"), None);
        assert_eq!(kind("80 1"), None);
    }

    #[test]
    fn test_comments_attach_to_next_record() {
        let text = "00 first comment\n00\n00   indented\nH1 CPF 2\n00 for h9\nH9";
        let records: Vec<_> = RecordTokenizer::from_text(text).collect();
        assert_eq!(records.len(), 2);

        let h1 = records[0].as_ref().unwrap();
        assert_eq!(
            h1.comment_block,
            vec!["first comment".to_string(), String::new(), "  indented".to_string()]
        );
        assert_eq!(h1.line_number, 4);

        let h9 = records[1].as_ref().unwrap();
        assert_eq!(h9.comment_block, vec!["for h9".to_string()]);
        assert_eq!(h9.line_number, 6);
    }

    #[test]
    fn test_undefined_record() {
        let text = "H1 CPF 2\nZZ 1 2\nH9";
        let mut tokenizer = RecordTokenizer::from_text(text);
        assert!(tokenizer.next().unwrap().is_ok());
        let undefined = tokenizer.next().unwrap().unwrap_err();
        assert_eq!(undefined.tokens, vec!["ZZ", "1", "2"]);
        assert_eq!(undefined.line_number, 2);
        assert!(tokenizer.next().unwrap().is_ok());
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_dangling_comments() {
        let text = "H9\n\n00 orphan\n";
        let mut tokenizer = RecordTokenizer::from_text(text);
        assert!(tokenizer.next().unwrap().is_ok());
        let dangling = tokenizer.next().unwrap().unwrap_err();
        assert!(dangling.tokens.is_empty());
        assert_eq!(dangling.comment_block, vec!["orphan".to_string()]);
        assert!(tokenizer.is_exhausted());
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_comment_block_rendering() {
        let long = "x".repeat(100);
        let record = Record {
            tokens: vec!["H5".into(), "1.0".into()],
            comment_block: vec!["short".into(), long],
            line_number: 1,
        };
        let block = record.generate_comment_block();
        let lines: Vec<_> = block.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "00 short");
        assert_eq!(lines[1].len(), 83);
        assert!(!block.ends_with('\n'));
        assert_eq!(record.generate_line(), "H5 1.0");
    }
}
