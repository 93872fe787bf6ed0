//! Reading the text form of a CUE sheet into a [`CueSheet`]
//!
//! The grammar has no closing delimiters; a scope ends on the first line
//! whose indentation no longer matches it. Sheet-level commands start at
//! column zero, `TRACK` declarations are indented two spaces and track
//! details four. The scope readers therefore look one line ahead and hand
//! back any line that turns out to belong further up.

use crate::{
    field::{self, FieldError},
    flags::TrackFlags,
    sheet::{CueSheet, FileRef, Track, TrackIndex},
};
use std::io::{self, BufRead};
use thiserror::Error;

/// A line cursor over a reader, with one line of pushback
struct Lines<R> {
    reader: R,
    number: usize,
    pushed: Option<String>,
}

impl<R> Lines<R>
where
    R: BufRead,
{
    fn new(reader: R) -> Self {
        Self {
            reader,
            number: 0,
            pushed: None,
        }
    }

    /// The next line, without its line ending
    ///
    /// A final line without a trailing newline still comes through.
    fn next(&mut self) -> Result<Option<String>, io::Error> {
        if let Some(line) = self.pushed.take() {
            return Ok(Some(line));
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        self.number += 1;
        Ok(Some(line))
    }

    /// Hand the most recent line back so the next call returns it again
    fn push_back(&mut self, line: String) {
        self.pushed = Some(line);
    }

    /// Wrap a field error with the number of the line it came from
    fn context(&self, source: FieldError) -> ReadError {
        ReadError::Field {
            line: self.number,
            source,
        }
    }
}

pub(crate) fn read_sheet<R>(reader: R) -> Result<CueSheet, ReadError>
where
    R: BufRead,
{
    let mut lines = Lines::new(reader);
    let mut sheet = CueSheet::default();

    while let Some(raw) = lines.next()? {
        let mut line = raw.trim_matches(field::is_delimiter);

        match field::read_string(&mut line).as_str() {
            "REM" => sheet.rem.push(line.to_string()),
            "CATALOG" => sheet.catalog = Some(line.to_string()),
            "CDTEXTFILE" => sheet.cd_text_file = Some(field::read_string(&mut line)),
            "TITLE" => sheet.title = Some(field::read_string(&mut line)),
            "PERFORMER" => sheet.performer = Some(field::read_string(&mut line)),
            "SONGWRITER" => sheet.songwriter = Some(field::read_string(&mut line)),
            "COMPOSER" => sheet.composer = Some(field::read_string(&mut line)),
            "ARRANGER" => sheet.arranger = Some(field::read_string(&mut line)),
            "MESSAGE" => sheet.message = Some(field::read_string(&mut line)),
            "GENRE" => sheet.genre = Some(field::read_string(&mut line)),
            "DISC_ID" => sheet.disc_id = Some(field::read_string(&mut line)),
            "UPC_EAN" => sheet.upc_ean = Some(field::read_string(&mut line)),
            "PREGAP" => {
                sheet.pregap = Some(field::read_frame(&mut line).map_err(|e| lines.context(e))?)
            }
            "POSTGAP" => {
                sheet.postgap = Some(field::read_frame(&mut line).map_err(|e| lines.context(e))?)
            }
            "FILE" => {
                let file_name = field::read_string(&mut line);
                let file_type = field::read_string(&mut line);
                let tracks = read_tracks(&mut lines)?;

                sheet.files.push(FileRef {
                    file_name,
                    file_type,
                    tracks,
                });
            }
            // Unknown commands are tolerated, not errors
            _ => {}
        }
    }

    Ok(sheet)
}

/// Read the `TRACK` declarations belonging to one `FILE`
///
/// Ends on the first line not indented at least two spaces, which is handed
/// back for the sheet level to process. Indented lines with any other
/// command are skipped so that the tracks after them stay with their file.
fn read_tracks<R>(lines: &mut Lines<R>) -> Result<Vec<Track>, ReadError>
where
    R: BufRead,
{
    let mut tracks = Vec::new();

    while let Some(raw) = lines.next()? {
        if !raw.starts_with("  ") {
            lines.push_back(raw);
            break;
        }

        let mut line = raw.trim_matches(field::is_delimiter);

        if field::read_string(&mut line) != "TRACK" {
            continue;
        }

        let number = field::read_uint(&mut line).map_err(|e| lines.context(e))?;
        let data_type = field::read_string(&mut line);

        let mut track = Track {
            number,
            data_type,
            ..Track::default()
        };
        read_track(lines, &mut track)?;

        tracks.push(track);
    }

    Ok(tracks)
}

/// Read the detail lines belonging to one `TRACK`
///
/// Ends on the first line not indented four spaces, or on an unrecognized
/// command; either way the line is handed back to the caller.
fn read_track<R>(lines: &mut Lines<R>, track: &mut Track) -> Result<(), ReadError>
where
    R: BufRead,
{
    while let Some(raw) = lines.next()? {
        if !raw.starts_with("    ") {
            lines.push_back(raw);
            break;
        }

        let mut line = raw.trim_matches(field::is_delimiter);

        match field::read_string(&mut line).as_str() {
            "FLAGS" => {
                // A second FLAGS line replaces the first instead of accumulating
                track.flags = TrackFlags::NONE;
                while !line.is_empty() {
                    match field::read_string(&mut line).as_str() {
                        "DCP" => track.flags |= TrackFlags::DCP,
                        "4CH" => track.flags |= TrackFlags::FOUR_CH,
                        "PRE" => track.flags |= TrackFlags::PRE,
                        "SCMS" => track.flags |= TrackFlags::SCMS,
                        _ => {}
                    }
                }
            }
            "ISRC" => track.isrc = Some(line.to_string()),
            "TITLE" => track.title = Some(field::read_string(&mut line)),
            "PERFORMER" => track.performer = Some(field::read_string(&mut line)),
            "SONGWRITER" => track.songwriter = Some(field::read_string(&mut line)),
            "COMPOSER" => track.composer = Some(field::read_string(&mut line)),
            "ARRANGER" => track.arranger = Some(field::read_string(&mut line)),
            "MESSAGE" => track.message = Some(field::read_string(&mut line)),
            "PREGAP" => {
                track.pregap = Some(field::read_frame(&mut line).map_err(|e| lines.context(e))?)
            }
            "POSTGAP" => {
                track.postgap = Some(field::read_frame(&mut line).map_err(|e| lines.context(e))?)
            }
            "INDEX" => {
                let number = field::read_uint(&mut line).map_err(|e| lines.context(e))?;
                let position = field::read_frame(&mut line).map_err(|e| lines.context(e))?;

                track.indexes.push(TrackIndex { number, position });
            }
            // Comments inside a track are not retained
            "REM" => {}
            _ => {
                lines.push_back(raw);
                break;
            }
        }
    }

    Ok(())
}

/// Errors that might be returned from [`CueSheet::from_reader()`]
#[derive(Debug, Error)]
pub enum ReadError {
    /// A line contained a field that could not be parsed
    #[error("line {line}: {source}")]
    Field { line: usize, source: FieldError },

    /// Any failure that has to do with I/O
    #[error("Something failed with I/O")]
    Io(#[from] io::Error),
}
