//! Classifying free-text REM lines into known metadata fields
//!
//! CUE sheets smuggle a lot of real metadata through REM comments: dates,
//! genres, disc numbers, replay-gain figures. The sheet stores those lines
//! verbatim so nothing is lost on a round trip; this module derives the
//! structured view on demand.

use crate::field;

/// The semantic type of a [`RemField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemType {
    Date,
    Genre,
    DiscNumber,
    Comment,
    ReplayGainAlbumGain,
    ReplayGainAlbumPeak,
    ReplayGainTrackGain,
    ReplayGainTrackPeak,
    /// A key this crate does not recognize; the raw line is still retained
    Unknown,
}

/// A classified view over a single REM line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemField {
    pub rem_type: RemType,

    /// The first word of the line, uppercased
    pub key: String,

    /// The rest of the line, with one layer of quoting stripped
    pub value: String,
}

/// Classify a raw REM line into a key/value field
///
/// The line splits at its first space into key and value; the key decides the
/// [`RemType`], falling back to [`RemType::Unknown`] for anything not in the
/// known set. Returns [`None`] only for an empty line.
pub fn classify(rem: &str) -> Option<RemField> {
    if rem.is_empty() {
        return None;
    }

    let (key, value) = match rem.split_once(' ') {
        Some((key, value)) => (key, value.trim()),
        None => (rem, ""),
    };

    let key = key.to_uppercase();
    let value = unquote_value(value);

    let rem_type = match key.as_str() {
        "DATE" => RemType::Date,
        "GENRE" => RemType::Genre,
        "DISCNUMBER" => RemType::DiscNumber,
        "COMMENT" => RemType::Comment,
        "REPLAYGAIN_ALBUM_GAIN" => RemType::ReplayGainAlbumGain,
        "REPLAYGAIN_ALBUM_PEAK" => RemType::ReplayGainAlbumPeak,
        "REPLAYGAIN_TRACK_GAIN" => RemType::ReplayGainTrackGain,
        "REPLAYGAIN_TRACK_PEAK" => RemType::ReplayGainTrackPeak,
        _ => RemType::Unknown,
    };

    Some(RemField {
        rem_type,
        key,
        value,
    })
}

fn unquote_value(value: &str) -> String {
    if value.starts_with(['"', '\'']) {
        let mut value = value;
        field::read_string(&mut value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys() {
        let field = classify("DATE 2025").expect("could not classify the line");
        assert_eq!(field.rem_type, RemType::Date);
        assert_eq!(field.key, "DATE");
        assert_eq!(field.value, "2025");

        let field = classify("GENRE \"Folk Rock\"").unwrap();
        assert_eq!(field.rem_type, RemType::Genre);
        assert_eq!(field.value, "Folk Rock");

        let field = classify("DISCNUMBER 1").unwrap();
        assert_eq!(field.rem_type, RemType::DiscNumber);
        assert_eq!(field.value, "1");

        let field = classify("COMMENT \"ExactAudioCopy v1.6\"").unwrap();
        assert_eq!(field.rem_type, RemType::Comment);
        assert_eq!(field.value, "ExactAudioCopy v1.6");
    }

    #[test]
    fn replay_gain_keys() {
        // Unquoted values keep everything after the key, unit included
        let field = classify("REPLAYGAIN_ALBUM_GAIN -6.20 dB").unwrap();
        assert_eq!(field.rem_type, RemType::ReplayGainAlbumGain);
        assert_eq!(field.value, "-6.20 dB");

        let field = classify("REPLAYGAIN_TRACK_PEAK 0.988525").unwrap();
        assert_eq!(field.rem_type, RemType::ReplayGainTrackPeak);
        assert_eq!(field.value, "0.988525");

        assert_eq!(
            classify("REPLAYGAIN_ALBUM_PEAK 1.0").unwrap().rem_type,
            RemType::ReplayGainAlbumPeak
        );
        assert_eq!(
            classify("REPLAYGAIN_TRACK_GAIN -7.04 dB").unwrap().rem_type,
            RemType::ReplayGainTrackGain
        );
    }

    #[test]
    fn keys_classify_case_insensitively() {
        let field = classify("date 2001").unwrap();
        assert_eq!(field.rem_type, RemType::Date);
        assert_eq!(field.key, "DATE");
    }

    #[test]
    fn unknown_keys_are_kept() {
        let field = classify("DISCID 3A0B7C0D").unwrap();
        assert_eq!(field.rem_type, RemType::Unknown);
        assert_eq!(field.key, "DISCID");
        assert_eq!(field.value, "3A0B7C0D");
    }

    #[test]
    fn key_without_value() {
        let field = classify("DATE").unwrap();
        assert_eq!(field.rem_type, RemType::Date);
        assert_eq!(field.value, "");
    }

    #[test]
    fn empty_line() {
        assert_eq!(classify(""), None);
    }
}
