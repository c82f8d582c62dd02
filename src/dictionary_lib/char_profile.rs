//! Per-character structural profile used by the scanner's bitmask filter.
//!
//! A [`CharProfile`] records, for one normalized character, *where* it may
//! occur inside dictionary entries and *how long* the entries starting with it
//! are. The facts are lossy on purpose: positions and lengths beyond
//! [`MAX_OFFSET`](crate::utils::MAX_OFFSET) share one bucket, so a profile can
//! say "plausible" for a combination no entry actually has. It never says
//! "impossible" for a combination that exists.

use crate::utils::{length_bit, offset_bit};

/// Structural facts about one character across the whole dictionary.
///
/// # Bit layout
/// - `start_offsets`: bit *i* ⇒ the character occurs at offset *i* of some entry
///   (offset ≥ 15 ⇒ bit 15).
/// - `lengths`: bit *L − 1* ⇒ some entry of length *L* **starts** with this
///   character (length ≥ 16 ⇒ bit 15).
///
/// # Invariants
/// - `start_offsets & 1 != 0` ⇔ the character begins at least one entry.
/// - `min_len <= max_len` once the character has started an entry; before that
///   `min_len == u16::MAX` and `max_len == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharProfile {
    /// Offsets at which the character occurs in any entry.
    pub start_offsets: u16,
    /// Lengths of the entries that start with the character.
    pub lengths: u16,
    /// Shortest entry starting with the character.
    pub min_len: u16,
    /// Longest entry starting with the character.
    pub max_len: u16,
    /// The character ends at least one entry.
    pub is_end: bool,
}

impl CharProfile {
    /// Creates an empty profile: no offsets, no lengths, `min_len = u16::MAX`.
    pub fn new() -> Self {
        Self {
            start_offsets: 0,
            lengths: 0,
            min_len: u16::MAX,
            max_len: 0,
            is_end: false,
        }
    }

    /// `true` if the character begins at least one entry.
    #[inline(always)]
    pub fn is_first(&self) -> bool {
        self.start_offsets & 1 == 1
    }

    #[inline(always)]
    pub fn set_offset(&mut self, offset: usize) {
        self.start_offsets |= offset_bit(offset);
    }

    /// Tests whether the character may occur at `offset` (clamped to the CAP bit).
    #[inline(always)]
    pub fn has_offset(&self, offset: usize) -> bool {
        self.start_offsets & offset_bit(offset) != 0
    }

    /// Records an entry of `len` characters starting with this character:
    /// widens `min_len`/`max_len` and sets the length bit.
    pub fn add_length(&mut self, len: u16) {
        if len < self.min_len {
            self.min_len = len;
        }
        if len > self.max_len {
            self.max_len = len;
        }
        self.lengths |= length_bit(len as usize);
    }

    /// Tests whether an entry of `len` characters may start with this character.
    #[inline(always)]
    pub fn has_length(&self, len: usize) -> bool {
        self.lengths & length_bit(len) != 0
    }
}

impl Default for CharProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CharProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:016b} {:016b} {} {} {}",
            self.start_offsets, self.lengths, self.max_len, self.min_len, self.is_end
        )
    }
}
