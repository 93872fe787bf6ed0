//! A library for reading, writing and validating [CUE sheets](https://en.wikipedia.org/wiki/Cue_sheet_(computing)),
//! the plain-text track listings that accompany disc images and gapless
//! album rips.
//!
//! The entry point is [`CueSheet`], which parses from any buffered reader or
//! a path and serializes back to canonical text:
//!
//! ```rust
//! use cuesheet::CueSheet;
//!
//! let source = "FILE \"album.wav\" WAVE\n  TRACK 01 AUDIO\n    INDEX 01 00:00:00\n";
//! let sheet = CueSheet::from_reader(source.as_bytes())?;
//!
//! assert_eq!(sheet.track_count(), 1);
//! # Ok::<(), cuesheet::ReadError>(())
//! ```
//!
//! Parsing is permissive and keeps unknown type tags and codes as-is;
//! [`CueSheet::validate()`] reports where a sheet strays from the rules of
//! the format.

pub mod field;
pub mod flags;
pub mod frame;
pub mod rem;
pub mod sheet;
pub mod validate;

mod read;
mod write;

pub use field::FieldError;
pub use flags::TrackFlags;
pub use frame::Frame;
pub use read::ReadError;
pub use rem::{RemField, RemType};
pub use sheet::{CueSheet, FileRef, FromPathError, Track, TrackIndex};
pub use validate::Violation;
