/// Highest structural offset a [`CharProfile`](crate::dictionary_lib::CharProfile)
/// can tell apart.
///
/// Profiles use `u16` masks, so offsets `0..=15` map to bits `0..=15`; any
/// offset **≥ 15** collapses onto bit 15 (the “CAP” bucket). The same bound
/// applies to entry lengths: length `L` maps to bit `L - 1`, and lengths
/// **≥ 16** share bit 15.
pub const MAX_OFFSET: usize = 15;

/// Longest entry (in characters, after normalization) the index accepts.
///
/// Per-starter length bounds are stored as `u16`.
pub const MAX_ENTRY_LEN: usize = u16::MAX as usize;

/// Returns the offset-mask bit for a 0-based position inside an entry.
///
/// # Bit layout
/// - offset 0 ⇒ bit 0 (the character starts an entry)
/// - offset 1 ⇒ bit 1
/// - …
/// - offset ≥ 15 ⇒ bit 15 (CAP)
///
/// # Example
/// ```
/// use fastcheck_fmmseg::utils::offset_bit;
/// assert_eq!(offset_bit(0), 0b1);
/// assert_eq!(offset_bit(3), 0b1000);
/// assert_eq!(offset_bit(40), 1 << 15);
/// ```
#[inline(always)]
pub fn offset_bit(offset: usize) -> u16 {
    1u16 << offset.min(MAX_OFFSET)
}

/// Returns the length-mask bit for an entry of `len` characters.
///
/// `len` must be at least 1. Lengths ≥ 16 share the CAP bit (bit 15).
///
/// # Example
/// ```
/// use fastcheck_fmmseg::utils::length_bit;
/// assert_eq!(length_bit(1), 0b1);
/// assert_eq!(length_bit(4), 0b1000);
/// assert_eq!(length_bit(16), length_bit(300));
/// ```
#[inline(always)]
pub fn length_bit(len: usize) -> u16 {
    debug_assert!(len >= 1, "entry length must be at least 1");
    1u16 << (len.saturating_sub(1)).min(MAX_OFFSET)
}

/// Case-folds a single character for case-insensitive matching.
///
/// The character is replaced by its uppercase form only when that form is a
/// single `char`. Expanding mappings (`'ß'` ⇒ `"SS"`) keep the original
/// character so that normalized text stays index-aligned with the input.
///
/// # Example
/// ```
/// use fastcheck_fmmseg::utils::fold_char;
/// assert_eq!(fold_char('a'), 'A');
/// assert_eq!(fold_char('é'), 'É');
/// assert_eq!(fold_char('ß'), 'ß');
/// assert_eq!(fold_char('脏'), '脏');
/// ```
#[inline]
pub fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Finds a valid UTF-8 boundary within the given string, limited by a maximum byte count.
///
/// Slicing the string at the returned index never splits a character. Used by the
/// command-line tools to clip long matches in log output.
///
/// # Example
/// ```rust
/// use fastcheck_fmmseg::utils::find_max_utf8_length;
///
/// let input = "敏感词过滤"; // Each character takes 3 bytes
/// let safe_index = find_max_utf8_length(input, 7);
/// assert_eq!(&input[..safe_index], "敏感");
/// ```
pub fn find_max_utf8_length(sv: &str, max_byte_count: usize) -> usize {
    if sv.len() <= max_byte_count {
        return sv.len();
    }
    let mut byte_count = max_byte_count;
    while byte_count > 0 && !sv.is_char_boundary(byte_count) {
        byte_count -= 1;
    }
    byte_count
}
