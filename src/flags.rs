//! The boolean flags a track's FLAGS line can carry

use std::ops::{BitOr, BitOrAssign};

/// The set of flags on a [`Track`](crate::Track)
///
/// A FLAGS line lists any combination of the four flags defined for a track.
/// The set is written out in the fixed order DCP, 4CH, PRE, SCMS regardless
/// of the order it was read in.
///
/// ```
/// # use cuesheet::TrackFlags;
/// let flags = TrackFlags::DCP | TrackFlags::PRE;
/// assert!(flags.contains(TrackFlags::DCP));
/// assert!(!flags.contains(TrackFlags::SCMS));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TrackFlags(u8);

impl TrackFlags {
    /// The empty set
    pub const NONE: Self = Self(0);

    /// Digital copying is permitted
    pub const DCP: Self = Self(1);

    /// Four-channel audio
    pub const FOUR_CH: Self = Self(1 << 1);

    /// Recorded with pre-emphasis
    pub const PRE: Self = Self(1 << 2);

    /// Serial Copy Management System applies
    pub const SCMS: Self = Self(1 << 3);

    /// Are all of the given flags set?
    pub fn contains(self, flags: Self) -> bool {
        self.0 & flags.0 == flags.0
    }

    /// Add flags to the set
    pub fn insert(&mut self, flags: Self) {
        self.0 |= flags.0;
    }

    /// Take flags out of the set
    pub fn remove(&mut self, flags: Self) {
        self.0 &= !flags.0;
    }

    /// Is no flag set at all?
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TrackFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TrackFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_operations() {
        let mut flags = TrackFlags::NONE;
        assert!(flags.is_empty());
        assert!(!flags.contains(TrackFlags::DCP));

        flags |= TrackFlags::DCP;
        flags.insert(TrackFlags::SCMS);
        assert!(!flags.is_empty());
        assert!(flags.contains(TrackFlags::DCP));
        assert!(flags.contains(TrackFlags::SCMS));
        assert!(flags.contains(TrackFlags::DCP | TrackFlags::SCMS));
        assert!(!flags.contains(TrackFlags::PRE));

        flags.remove(TrackFlags::DCP);
        assert!(!flags.contains(TrackFlags::DCP));
        assert!(flags.contains(TrackFlags::SCMS));
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(TrackFlags::default(), TrackFlags::NONE);
    }
}
