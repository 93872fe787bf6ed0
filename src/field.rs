//! Extracting typed fields from a line of CUE text, and formatting them back
//!
//! All functions here work on a `&mut &str` cursor: they take the next field
//! off the front of the remaining line and advance the cursor past it, so a
//! caller can pull a command word and its arguments one by one.

use crate::frame::Frame;
use std::{borrow::Cow, num::ParseIntError};
use thiserror::Error;

/// The characters that separate fields and force a string into quotes
pub(crate) fn is_delimiter(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | ' ')
}

/// Read the next field from a line, advancing the cursor past it
///
/// Leading delimiters are skipped. A bare field runs up to the next space (or
/// the end of the line); a field opening with `"` or `'` runs up to the
/// matching quote, with the backslash escapes produced by [`format_string()`]
/// folded back into the characters they stand for. A quote that never closes
/// extends the field to the end of the line.
pub fn read_string(line: &mut &str) -> String {
    *line = line.trim_start_matches(is_delimiter);

    match line.chars().next() {
        Some(quote @ ('"' | '\'')) => read_quoted(line, quote),
        _ => read_bare(line),
    }
}

/// Read the next field as a signed base-10 integer
pub fn read_int(line: &mut &str) -> Result<i32, FieldError> {
    let text = read_string(line);
    text.parse()
        .map_err(|source| FieldError::Format { text, source })
}

/// Read the next field as an unsigned base-10 integer
pub fn read_uint(line: &mut &str) -> Result<u32, FieldError> {
    let text = read_string(line);
    text.parse()
        .map_err(|source| FieldError::Format { text, source })
}

/// Read the next field as an `mm:ss:ff` time position
pub fn read_frame(line: &mut &str) -> Result<Frame, FieldError> {
    let text = read_string(line);

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 3 {
        return Err(FieldError::Syntax { text });
    }

    let minutes = msf_part(parts[0])?;
    let seconds = msf_part(parts[1])?;
    let frames = msf_part(parts[2])?;

    Ok(Frame::from_msf(minutes, seconds, frames))
}

fn msf_part(part: &str) -> Result<u32, FieldError> {
    part.parse().map_err(|source| FieldError::Format {
        text: part.to_string(),
        source,
    })
}

/// Prepare a string for writing, quoting it only when it needs to be
///
/// A string without delimiters is written as-is. Anything else is wrapped in
/// double quotes, with backslash escapes for quotes and backslashes inside,
/// so that [`read_string()`] recovers the original exactly.
pub fn format_string(s: &str) -> Cow<'_, str> {
    if s.contains(is_delimiter) {
        Cow::Owned(quote(s))
    } else {
        Cow::Borrowed(s)
    }
}

fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn read_quoted(line: &mut &str, quote: char) -> String {
    let source = *line;
    let mut field = String::new();
    let mut chars = source[1..].char_indices();

    while let Some((offset, c)) = chars.next() {
        if c == quote {
            *line = &source[1 + offset + 1..];
            return field;
        }

        if c == '\\' {
            match chars.next() {
                // Only the escapes the writer produces fold back; any other
                // backslash stays as written
                Some((_, next)) if next == quote || next == '\\' => field.push(next),
                Some((_, next)) => {
                    field.push('\\');
                    field.push(next);
                }
                None => field.push('\\'),
            }
        } else {
            field.push(c);
        }
    }

    // The quote never closed, so the field runs to the end of the line
    *line = "";
    field
}

fn read_bare(line: &mut &str) -> String {
    let source = *line;

    match source.find(' ') {
        Some(end) => {
            *line = &source[end + 1..];
            source[..end].to_string()
        }
        None => {
            *line = "";
            source.to_string()
        }
    }
}

/// An error describing what could go wrong extracting a typed field
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// A field that should have been a base-10 number wasn't
    #[error("{text:?} is not a number")]
    Format {
        text: String,
        source: ParseIntError,
    },

    /// A time field did not have the three-part `mm:ss:ff` shape
    #[error("{text:?} is not an mm:ss:ff time")]
    Syntax { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_fields() {
        let mut line = "TRACK 01 AUDIO";
        assert_eq!(read_string(&mut line), "TRACK");
        assert_eq!(line, "01 AUDIO");
        assert_eq!(read_string(&mut line), "01");
        assert_eq!(read_string(&mut line), "AUDIO");
        assert_eq!(line, "");
        assert_eq!(read_string(&mut line), "");
    }

    #[test]
    fn leading_delimiters_are_skipped() {
        let mut line = " \t FLAGS DCP";
        assert_eq!(read_string(&mut line), "FLAGS");
        assert_eq!(read_string(&mut line), "DCP");
    }

    #[test]
    fn quoted_fields() {
        let mut line = "\"Album Title\" WAVE";
        assert_eq!(read_string(&mut line), "Album Title");
        assert_eq!(line, " WAVE");
        assert_eq!(read_string(&mut line), "WAVE");

        let mut line = "'Single Quoted' rest";
        assert_eq!(read_string(&mut line), "Single Quoted");
        assert_eq!(read_string(&mut line), "rest");
    }

    #[test]
    fn escapes_fold_back() {
        let mut line = r#""a \"quoted\" word""#;
        assert_eq!(read_string(&mut line), "a \"quoted\" word");

        let mut line = r#""back\\slash""#;
        assert_eq!(read_string(&mut line), "back\\slash");

        // Escapes the writer never produces pass through untouched
        let mut line = r#""C:\dir\sub.bin""#;
        assert_eq!(read_string(&mut line), "C:\\dir\\sub.bin");
    }

    #[test]
    fn unterminated_quote_runs_to_the_end() {
        let mut line = "\"never closed";
        assert_eq!(read_string(&mut line), "never closed");
        assert_eq!(line, "");
    }

    #[test]
    fn integers() {
        let mut line = "42 -7 x";
        assert_eq!(read_uint(&mut line), Ok(42));
        assert_eq!(read_int(&mut line), Ok(-7));
        assert_eq!(
            read_int(&mut line),
            Err(FieldError::Format {
                text: "x".to_string(),
                source: "x".parse::<i32>().unwrap_err(),
            })
        );
    }

    #[test]
    fn frames() {
        let mut line = "01:02:03";
        assert_eq!(read_frame(&mut line), Ok(Frame(4653)));

        let mut line = "0:2:15";
        assert_eq!(read_frame(&mut line), Ok(Frame(165)));

        let mut line = "10:20";
        assert_eq!(
            read_frame(&mut line),
            Err(FieldError::Syntax {
                text: "10:20".to_string(),
            })
        );

        let mut line = "00:00:00:00";
        assert!(matches!(
            read_frame(&mut line),
            Err(FieldError::Syntax { .. })
        ));

        let mut line = "xx:00:00";
        assert_eq!(
            read_frame(&mut line),
            Err(FieldError::Format {
                text: "xx".to_string(),
                source: "xx".parse::<u32>().unwrap_err(),
            })
        );
    }

    #[test]
    fn formatting() {
        assert_eq!(format_string("NoDelimiters"), "NoDelimiters");
        assert_eq!(format_string("Album Title"), "\"Album Title\"");
        assert_eq!(format_string("tab\there"), "\"tab\there\"");
    }

    #[test]
    fn quoting_round_trips() {
        for s in [
            "Album Title",
            "a \"quoted\" word",
            "back\\slash mix ed",
            "trailing backslash \\",
        ] {
            let formatted = format_string(s).into_owned();
            let mut line = formatted.as_str();
            assert_eq!(read_string(&mut line), s);
            assert_eq!(line, "");
        }
    }

    #[test]
    fn strings_without_delimiters_stay_bare() {
        assert!(matches!(format_string("plain"), Cow::Borrowed("plain")));
    }
}
