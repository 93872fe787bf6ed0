//! Structural validation of parsed sheets
//!
//! The parser is deliberately permissive: it accepts type tags, numbers and
//! codes it has never heard of, so that reading never destroys a sheet.
//! Whether the result actually follows the rules of the format is this
//! module's question, answered as a list of [`Violation`]s rather than a
//! failure.

use crate::sheet::{CueSheet, Track};
use thiserror::Error;

/// The file type tags a FILE line may carry
pub const FILE_TYPES: [&str; 5] = ["BINARY", "MOTOROLA", "AIFF", "WAVE", "MP3"];

/// The block size in bytes for a track data type, if the type is known
pub fn block_size(data_type: &str) -> Option<u64> {
    match data_type {
        "AUDIO" => Some(2352),
        "CDG" => Some(2448),
        "MODE1/2048" => Some(2048),
        "MODE1/2352" => Some(2352),
        "MODE2/2336" => Some(2336),
        "MODE2/2352" => Some(2352),
        "CDI/2336" => Some(2336),
        "CDI/2352" => Some(2352),
        _ => None,
    }
}

/// Is this a well-formed 13-digit media catalog number?
pub fn valid_catalog(catalog: &str) -> bool {
    catalog.len() == 13 && catalog.bytes().all(|b| b.is_ascii_digit())
}

/// Is this a well-formed 12-character ISRC?
///
/// Two country letters, three alphanumeric owner characters, then two year
/// digits and five serial digits. Letters may be either case.
pub fn valid_isrc(isrc: &str) -> bool {
    let bytes = isrc.as_bytes();

    bytes.len() == 12
        && bytes[..2].iter().all(u8::is_ascii_alphabetic)
        && bytes[2..5].iter().all(u8::is_ascii_alphanumeric)
        && bytes[5..].iter().all(u8::is_ascii_digit)
}

impl CueSheet {
    /// Check the sheet against the structural rules of the format
    ///
    /// Never fails fast: the returned list carries every violation found, in
    /// document order, and is empty for a well-formed sheet.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Some(catalog) = &self.catalog {
            if !catalog.is_empty() && !valid_catalog(catalog) {
                violations.push(Violation::Catalog {
                    catalog: catalog.clone(),
                });
            }
        }

        if self.files.is_empty() {
            violations.push(Violation::NoFiles);
        }

        for file in &self.files {
            if !FILE_TYPES.contains(&file.file_type.as_str()) {
                violations.push(Violation::FileType {
                    file_name: file.file_name.clone(),
                    file_type: file.file_type.clone(),
                });
            }

            for track in &file.tracks {
                violations.extend(track.validate());
            }
        }

        violations
    }
}

impl Track {
    /// Check a single track against the structural rules of the format
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if !(1..=99).contains(&self.number) {
            violations.push(Violation::TrackNumber {
                number: self.number,
            });
        }

        let mut has_start = false;
        for index in &self.indexes {
            if index.number == 1 {
                has_start = true;
            }
            if index.number > 99 {
                violations.push(Violation::IndexNumber {
                    track: self.number,
                    index: index.number,
                });
            }
        }
        if !has_start {
            violations.push(Violation::MissingStartIndex { track: self.number });
        }

        if let Some(isrc) = &self.isrc {
            if !isrc.is_empty() && !valid_isrc(isrc) {
                violations.push(Violation::Isrc {
                    track: self.number,
                    isrc: isrc.clone(),
                });
            }
        }

        if block_size(&self.data_type).is_none() {
            violations.push(Violation::DataType {
                track: self.number,
                data_type: self.data_type.clone(),
            });
        }

        violations
    }
}

/// A structural problem found by [`CueSheet::validate()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Violation {
    /// The catalog number was not exactly 13 digits
    #[error("catalog {catalog:?} is not a 13-digit number")]
    Catalog { catalog: String },

    /// The sheet references no files at all
    #[error("the sheet contains no FILE entries")]
    NoFiles,

    /// A FILE carried a type outside the known vocabulary
    #[error("file {file_name:?} has unknown type {file_type:?}")]
    FileType {
        file_name: String,
        file_type: String,
    },

    /// A TRACK number was outside the 1-99 range
    #[error("track number {number} is outside 1-99")]
    TrackNumber { number: u32 },

    /// An INDEX number was above 99
    #[error("track {track} has index number {index} above 99")]
    IndexNumber { track: u32, index: u32 },

    /// A track lacked the mandatory INDEX 01
    #[error("track {track} has no INDEX 01")]
    MissingStartIndex { track: u32 },

    /// An ISRC did not have its 12-character form
    #[error("track {track} has malformed ISRC {isrc:?}")]
    Isrc { track: u32, isrc: String },

    /// A TRACK carried a data type outside the known vocabulary
    #[error("track {track} has unknown data type {data_type:?}")]
    DataType { track: u32, data_type: String },
}
