//! The 1/75th-second unit in which CUE sheets measure disc time

use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    time::Duration,
};

/// A position or length on a disc, counted in frames
///
/// Compact discs divide every second into 75 frames, and a CUE sheet expresses
/// all of its time positions as `mm:ss:ff` text over this one unit. [`Frame`]
/// is the stored form; the text form only exists at the read/write boundary.
///
/// ```
/// # use cuesheet::Frame;
/// let position = Frame::from_msf(1, 2, 3);
/// assert_eq!(position, Frame(4653));
/// assert_eq!(position.to_string(), "01:02:03");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frame(pub u64);

impl Frame {
    /// The number of frames that make up one second of disc time
    pub const PER_SECOND: u64 = 75;

    /// Combine minutes, seconds and leftover frames into a single count
    ///
    /// Seconds and frames beyond their conventional ranges (0-59 and 0-74)
    /// simply carry over into the next unit.
    pub fn from_msf(minutes: u32, seconds: u32, frames: u32) -> Self {
        Self((minutes as u64 * 60 + seconds as u64) * Self::PER_SECOND + frames as u64)
    }

    /// Split the count into the minutes, seconds and leftover frames of the text form
    ///
    /// Minutes are unbounded; seconds and frames are always within their
    /// conventional ranges.
    pub fn to_msf(self) -> (u64, u8, u8) {
        let seconds = self.0 / Self::PER_SECOND;
        (
            seconds / 60,
            (seconds % 60) as u8,
            (self.0 % Self::PER_SECOND) as u8,
        )
    }

    /// The position expressed in (fractional) seconds
    pub fn to_seconds(self) -> f64 {
        self.0 as f64 / Self::PER_SECOND as f64
    }

    /// The position expressed as a [`Duration`]
    pub fn to_duration(self) -> Duration {
        Duration::from_secs_f64(self.to_seconds())
    }

    /// The number of whole frames that fit in a [`Duration`]
    ///
    /// Durations have sub-frame precision; anything smaller than a single
    /// frame is truncated away, so this is not a lossless inverse of
    /// [`Frame::to_duration()`].
    pub fn from_duration(duration: Duration) -> Self {
        Self((duration.as_secs_f64() * Self::PER_SECOND as f64) as u64)
    }
}

impl Add for Frame {
    type Output = Frame;

    fn add(self, rhs: Frame) -> Frame {
        Frame(self.0 + rhs.0)
    }
}

impl AddAssign for Frame {
    fn add_assign(&mut self, rhs: Frame) {
        self.0 += rhs.0;
    }
}

impl Sub for Frame {
    type Output = Frame;

    fn sub(self, rhs: Frame) -> Frame {
        Frame(self.0 - rhs.0)
    }
}

impl SubAssign for Frame {
    fn sub_assign(&mut self, rhs: Frame) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (minutes, seconds, frames) = self.to_msf();
        write!(f, "{minutes:02}:{seconds:02}:{frames:02}")
    }
}
