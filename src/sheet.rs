//! The CUE sheet document model
//!
//! Everything in this module is plain owned data: a [`CueSheet`] owns its
//! [`FileRef`]s, which own their [`Track`]s, which own their [`TrackIndex`]es.
//! The reading and writing entry points live on [`CueSheet`]; the accessors
//! answer the questions applications usually ask of a parsed sheet.

use crate::{
    flags::TrackFlags,
    frame::Frame,
    read::{self, ReadError},
    rem::{self, RemField, RemType},
    validate, write,
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
    time::Duration,
};
use thiserror::Error;

/// A parsed CUE sheet
///
/// A sheet describes how the tracks of a disc lay inside one or more audio
/// or data files, along with the metadata around them. Fields that were
/// absent in the text are [`None`] here, and everything keeps its document
/// order, so a sheet can be written back out the way it came in.
///
/// ```
/// use cuesheet::CueSheet;
///
/// let source = concat!(
///     "TITLE \"Album Title\"\n",
///     "FILE \"mix.wav\" WAVE\n",
///     "  TRACK 01 AUDIO\n",
///     "    INDEX 01 00:00:00\n",
/// );
///
/// let sheet = CueSheet::from_reader(source.as_bytes())?;
/// assert_eq!(sheet.title.as_deref(), Some("Album Title"));
/// assert_eq!(sheet.track_count(), 1);
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// Sheets can also come from and go to disk directly:
///
/// ```no_run
/// # use cuesheet::CueSheet;
/// let sheet = CueSheet::from_path("album.cue")?;
/// sheet.to_path("copy.cue")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueSheet {
    /// Raw REM lines in document order; see [`rem_fields()`](Self::rem_fields)
    /// for the classified view
    pub rem: Vec<String>,

    /// Media catalog number, conventionally 13 digits
    pub catalog: Option<String>,

    /// Path of an external CD-TEXT file
    pub cd_text_file: Option<String>,

    pub title: Option<String>,
    pub performer: Option<String>,
    pub songwriter: Option<String>,

    /// CD-TEXT: album composer
    pub composer: Option<String>,

    /// CD-TEXT: album arranger
    pub arranger: Option<String>,

    /// CD-TEXT: album message
    pub message: Option<String>,

    /// CD-TEXT: album genre
    pub genre: Option<String>,

    /// CD-TEXT: disc identifier
    pub disc_id: Option<String>,

    /// CD-TEXT: UPC/EAN barcode
    pub upc_ean: Option<String>,

    pub pregap: Option<Frame>,
    pub postgap: Option<Frame>,

    /// The files making up the disc, with their tracks
    pub files: Vec<FileRef>,
}

impl CueSheet {
    /// Parse a sheet from a buffered I/O reader
    pub fn from_reader<R>(reader: R) -> Result<Self, ReadError>
    where
        R: BufRead,
    {
        read::read_sheet(reader)
    }

    /// Parse a sheet from a path on disk
    pub fn from_path<P>(path: P) -> Result<Self, FromPathError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        let sheet = Self::from_reader(BufReader::new(file))?;

        Ok(sheet)
    }

    /// Write the sheet to an I/O writer in canonical form
    ///
    /// Fields come out in a fixed order with fixed indentation and `\n` line
    /// endings. Fields holding [`None`], an empty string or a zero-length
    /// gap are all left out, so they read back in as absent.
    pub fn to_writer<W>(&self, mut writer: W) -> Result<(), io::Error>
    where
        W: Write,
    {
        write::write_sheet(self, &mut writer)
    }

    /// Write the sheet to a path on disk
    pub fn to_path<P>(&self, path: P) -> Result<(), io::Error>
    where
        P: AsRef<Path>,
    {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()
    }

    /// The first track with the given number, searching across all files
    pub fn track(&self, number: u32) -> Option<&Track> {
        self.files
            .iter()
            .flat_map(|file| file.tracks.iter())
            .find(|track| track.number == number)
    }

    /// The total number of tracks across all files
    pub fn track_count(&self) -> usize {
        self.files.iter().map(|file| file.tracks.len()).sum()
    }

    /// The length of the sheet up to its highest index position
    pub fn total_duration(&self) -> Duration {
        self.files
            .iter()
            .flat_map(|file| file.tracks.iter())
            .flat_map(|track| track.indexes.iter())
            .map(|index| index.position)
            .max()
            .unwrap_or_default()
            .to_duration()
    }

    /// Classified views over the sheet's REM lines, in document order
    pub fn rem_fields(&self) -> Vec<RemField> {
        self.rem.iter().filter_map(|rem| rem::classify(rem)).collect()
    }

    /// The value of the first REM line with the given type
    pub fn rem_value(&self, rem_type: RemType) -> Option<String> {
        self.rem
            .iter()
            .filter_map(|rem| rem::classify(rem))
            .find(|field| field.rem_type == rem_type)
            .map(|field| field.value)
    }

    /// The value of the first REM line with the given key
    ///
    /// Keys compare case-insensitively.
    pub fn rem_by_key(&self, key: &str) -> Option<String> {
        let key = key.to_uppercase();
        self.rem
            .iter()
            .filter_map(|rem| rem::classify(rem))
            .find(|field| field.key == key)
            .map(|field| field.value)
    }
}

/// One FILE entry of a sheet: a referenced file and the tracks inside it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRef {
    /// The file name as written in the sheet; never resolved or normalized
    pub file_name: String,

    /// Type tag such as `WAVE` or `BINARY`; see
    /// [`validate::FILE_TYPES`](crate::validate::FILE_TYPES)
    pub file_type: String,

    pub tracks: Vec<Track>,
}

/// One TRACK of a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    /// Track number, conventionally 1-99
    pub number: u32,

    /// Data type tag such as `AUDIO` or `MODE1/2352`
    pub data_type: String,

    pub flags: TrackFlags,

    /// International Standard Recording Code, stored as written
    pub isrc: Option<String>,

    pub title: Option<String>,
    pub performer: Option<String>,
    pub songwriter: Option<String>,

    /// CD-TEXT: track composer
    pub composer: Option<String>,

    /// CD-TEXT: track arranger
    pub arranger: Option<String>,

    /// CD-TEXT: track message
    pub message: Option<String>,

    pub pregap: Option<Frame>,
    pub postgap: Option<Frame>,

    /// The track's index marks, in document order
    pub indexes: Vec<TrackIndex>,
}

impl Track {
    /// The first index with the given number
    pub fn index(&self, number: u32) -> Option<&TrackIndex> {
        self.indexes.iter().find(|index| index.number == number)
    }

    /// The mandatory index 1 entry marking the track start
    pub fn start_index(&self) -> Option<&TrackIndex> {
        self.index(1)
    }

    /// The index 0 entry marking the pregap, if the track has one
    pub fn pregap_index(&self) -> Option<&TrackIndex> {
        self.index(0)
    }

    /// The position of index 1, where the track actually starts
    pub fn start_position(&self) -> Option<Frame> {
        self.start_index().map(|index| index.position)
    }

    /// Does the track open with a pregap marker?
    pub fn has_pregap(&self) -> bool {
        self.pregap_index().is_some()
    }

    /// The length of the track's pregap
    ///
    /// Measured between index 0 and index 1 when the track carries both in
    /// that order; otherwise the explicit PREGAP field decides, defaulting
    /// to zero. Zero as well when the track has no start index at all.
    pub fn pregap_duration(&self) -> Duration {
        let Some(start) = self.start_position() else {
            return Duration::ZERO;
        };

        if let Some(pregap) = self.pregap_index() {
            if start > pregap.position {
                return (start - pregap.position).to_duration();
            }
        }

        self.pregap.unwrap_or_default().to_duration()
    }

    /// The length of the track, given where the next track starts
    ///
    /// For the last track, pass the end position of its file. Zero when the
    /// track has no start index or the next start does not lie after it.
    pub fn duration(&self, next_track_start: Frame) -> Duration {
        match self.start_position() {
            Some(start) if next_track_start > start => (next_track_start - start).to_duration(),
            _ => Duration::ZERO,
        }
    }

    /// Is a specific flag set on this track?
    pub fn has_flag(&self, flag: TrackFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Is digital copying of this track permitted (`DCP`)?
    pub fn is_copy_permitted(&self) -> bool {
        self.has_flag(TrackFlags::DCP)
    }

    /// Is this four-channel audio (`4CH`)?
    pub fn is_four_channel(&self) -> bool {
        self.has_flag(TrackFlags::FOUR_CH)
    }

    /// Was the track recorded with pre-emphasis (`PRE`)?
    pub fn has_preemphasis(&self) -> bool {
        self.has_flag(TrackFlags::PRE)
    }

    /// Does Serial Copy Management apply to this track (`SCMS`)?
    pub fn has_scms(&self) -> bool {
        self.has_flag(TrackFlags::SCMS)
    }

    /// Is this anything other than an audio track?
    pub fn is_data_track(&self) -> bool {
        self.data_type != "AUDIO"
    }

    /// The size in bytes of one block of this track's data type
    pub fn block_size(&self) -> Option<u64> {
        validate::block_size(&self.data_type)
    }
}

/// One INDEX mark within a track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackIndex {
    /// 0 marks the pregap, 1 the track start, anything higher a sub-index
    pub number: u32,

    pub position: Frame,
}

/// Errors that might be returned from [`CueSheet::from_path()`]
#[derive(Debug, Error)]
pub enum FromPathError {
    /// Opening the file itself failed
    #[error("Opening the file failed")]
    FileOpen(#[from] io::Error),

    /// Parsing the sheet out of the file failed
    #[error("Reading the sheet from file failed")]
    Read(#[from] ReadError),
}
