//! Writing a [`CueSheet`] back out as text
//!
//! Output is canonical: fields come in a fixed order with fixed indentation
//! and `\n` line endings, strings are quoted only when they have to be, and
//! absent or empty fields are left out entirely. Two equal sheets always
//! serialize to identical bytes.

use crate::{
    field,
    flags::TrackFlags,
    frame::Frame,
    sheet::{CueSheet, Track},
};
use std::io::{self, Write};

pub(crate) fn write_sheet<W>(sheet: &CueSheet, writer: &mut W) -> io::Result<()>
where
    W: Write,
{
    for rem in &sheet.rem {
        writeln!(writer, "REM {rem}")?;
    }

    if let Some(catalog) = filled(&sheet.catalog) {
        writeln!(writer, "CATALOG {catalog}")?;
    }

    if let Some(cd_text_file) = filled(&sheet.cd_text_file) {
        writeln!(writer, "CDTEXTFILE {}", field::format_string(cd_text_file))?;
    }

    if let Some(title) = filled(&sheet.title) {
        writeln!(writer, "TITLE {}", field::format_string(title))?;
    }

    if let Some(performer) = filled(&sheet.performer) {
        writeln!(writer, "PERFORMER {}", field::format_string(performer))?;
    }

    if let Some(songwriter) = filled(&sheet.songwriter) {
        writeln!(writer, "SONGWRITER {}", field::format_string(songwriter))?;
    }

    if let Some(composer) = filled(&sheet.composer) {
        writeln!(writer, "COMPOSER {}", field::format_string(composer))?;
    }

    if let Some(arranger) = filled(&sheet.arranger) {
        writeln!(writer, "ARRANGER {}", field::format_string(arranger))?;
    }

    if let Some(message) = filled(&sheet.message) {
        writeln!(writer, "MESSAGE {}", field::format_string(message))?;
    }

    if let Some(genre) = filled(&sheet.genre) {
        writeln!(writer, "GENRE {}", field::format_string(genre))?;
    }

    if let Some(disc_id) = filled(&sheet.disc_id) {
        writeln!(writer, "DISC_ID {}", field::format_string(disc_id))?;
    }

    if let Some(upc_ean) = filled(&sheet.upc_ean) {
        writeln!(writer, "UPC_EAN {}", field::format_string(upc_ean))?;
    }

    if let Some(pregap) = positive(sheet.pregap) {
        writeln!(writer, "PREGAP {pregap}")?;
    }

    if let Some(postgap) = positive(sheet.postgap) {
        writeln!(writer, "POSTGAP {postgap}")?;
    }

    for file in &sheet.files {
        writeln!(
            writer,
            "FILE {} {}",
            field::format_string(&file.file_name),
            file.file_type
        )?;

        for track in &file.tracks {
            write_track(track, writer)?;
        }
    }

    Ok(())
}

fn write_track<W>(track: &Track, writer: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(writer, "  TRACK {:02} {}", track.number, track.data_type)?;

    if !track.flags.is_empty() {
        write!(writer, "    FLAGS")?;
        if track.flags.contains(TrackFlags::DCP) {
            write!(writer, " DCP")?;
        }
        if track.flags.contains(TrackFlags::FOUR_CH) {
            write!(writer, " 4CH")?;
        }
        if track.flags.contains(TrackFlags::PRE) {
            write!(writer, " PRE")?;
        }
        if track.flags.contains(TrackFlags::SCMS) {
            write!(writer, " SCMS")?;
        }
        writeln!(writer)?;
    }

    if let Some(isrc) = filled(&track.isrc) {
        writeln!(writer, "    ISRC {isrc}")?;
    }

    if let Some(title) = filled(&track.title) {
        writeln!(writer, "    TITLE {}", field::format_string(title))?;
    }

    if let Some(performer) = filled(&track.performer) {
        writeln!(writer, "    PERFORMER {}", field::format_string(performer))?;
    }

    if let Some(songwriter) = filled(&track.songwriter) {
        writeln!(writer, "    SONGWRITER {}", field::format_string(songwriter))?;
    }

    if let Some(composer) = filled(&track.composer) {
        writeln!(writer, "    COMPOSER {}", field::format_string(composer))?;
    }

    if let Some(arranger) = filled(&track.arranger) {
        writeln!(writer, "    ARRANGER {}", field::format_string(arranger))?;
    }

    if let Some(message) = filled(&track.message) {
        writeln!(writer, "    MESSAGE {}", field::format_string(message))?;
    }

    if let Some(pregap) = positive(track.pregap) {
        writeln!(writer, "    PREGAP {pregap}")?;
    }

    if let Some(postgap) = positive(track.postgap) {
        writeln!(writer, "    POSTGAP {postgap}")?;
    }

    for index in &track.indexes {
        writeln!(writer, "    INDEX {:02} {}", index.number, index.position)?;
    }

    Ok(())
}

/// A text field counts as set only when it is present and non-empty
fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.is_empty())
}

/// A gap field counts as set only when it is present and non-zero
fn positive(field: Option<Frame>) -> Option<Frame> {
    field.filter(|frame| frame.0 > 0)
}
