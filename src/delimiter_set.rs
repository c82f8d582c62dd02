use once_cell::sync::Lazy;

/// Characters ignored by the built-in skip predicate [`is_ignorable`].
///
/// ASCII punctuation plus the common CJK and full-width punctuation used to
/// break up marked words (`b.a.d`, `脏，话`). Whitespace is handled separately
/// by [`char::is_whitespace`] so every Unicode space qualifies.
pub const IGNORABLE_PUNCTUATION: &str =
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{}|~＝、。﹁﹂—－（）《》〈〉？！…／＼︒︑︔︓︿﹀︹︺︙︐［﹇］﹈︕︖︰︳︴︽︾︵︶｛︷｝︸﹃﹄【︻】︼～．，；：“”‘’「」『』·•";

/// Compact, hot-path friendly character set for per-character membership tests.
///
/// # Design
///
/// * **ASCII fast path**: `U+0000..=U+007F` live in a single [`u128`] mask.
/// * **BMP fast path**: `U+0000..=U+FFFF` live in a 65,536-bit table
///   (`[u64; 1024]`, ~8 KB); lookup is one shift and one AND.
/// * **Astral characters** (`U+10000..`) are never members.
///
/// Used as the backing store of the scanner's built-in skip predicate, where
/// it is called once per scanned character.
#[derive(Copy, Clone)]
pub struct DelimiterSet {
    ascii_mask: u128,      // bits 0..=127
    bmp_bits: [u64; 1024], // 0x0000..=0xFFFF
}

impl DelimiterSet {
    /// Builds a set from every character of `chars`. Astral characters are dropped.
    ///
    /// # Example
    /// ```
    /// use fastcheck_fmmseg::delimiter_set::DelimiterSet;
    ///
    /// let set = DelimiterSet::from_chars("-_~");
    /// assert!(set.contains('_'));
    /// assert!(!set.contains('a'));
    /// ```
    pub fn from_chars(chars: &str) -> Self {
        let mut ascii: u128 = 0;
        let mut bmp = [0u64; 1024];

        for ch in chars.chars() {
            let u = ch as u32;
            if u <= 0x7F {
                ascii |= 1u128 << u;
            }
            if u <= 0xFFFF {
                bmp[(u >> 6) as usize] |= 1u64 << (u & 63);
            }
        }

        DelimiterSet {
            ascii_mask: ascii,
            bmp_bits: bmp,
        }
    }

    /// Tests whether `c` belongs to this set.
    ///
    /// # Examples
    ///
    /// ```
    /// use fastcheck_fmmseg::delimiter_set::IGNORABLE_SET;
    /// assert!(IGNORABLE_SET.contains('。'));
    /// assert!(!IGNORABLE_SET.contains('脏'));
    /// ```
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        let u = c as u32;
        if u <= 0x7F {
            return ((self.ascii_mask >> u) & 1) == 1;
        }
        if u <= 0xFFFF {
            let i = (u >> 6) as usize;
            let b = u & 63;
            return ((self.bmp_bits[i] >> b) & 1) == 1;
        }
        false
    }
}

/// Global [`DelimiterSet`] built from [`IGNORABLE_PUNCTUATION`] on first use.
pub static IGNORABLE_SET: Lazy<DelimiterSet> =
    Lazy::new(|| DelimiterSet::from_chars(IGNORABLE_PUNCTUATION));

/// Built-in skip predicate: any Unicode whitespace or listed punctuation.
///
/// Pass it to the query operations as `Some(&is_ignorable)`.
///
/// ```
/// use fastcheck_fmmseg::delimiter_set::is_ignorable;
/// assert!(is_ignorable(' '));
/// assert!(is_ignorable('\u{3000}'));
/// assert!(is_ignorable('，'));
/// assert!(!is_ignorable('a'));
/// ```
#[inline]
pub fn is_ignorable(c: char) -> bool {
    c.is_whitespace() || IGNORABLE_SET.contains(c)
}

/// Skip predicate for whitespace only.
#[inline]
pub fn is_space(c: char) -> bool {
    c.is_whitespace()
}
