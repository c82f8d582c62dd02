//! The single forward scan shared by `has_word`, `find` and `replace`.
//!
//! The scan walks normalized text once. At every candidate start it extends a
//! window character by character, using [`CharProfile`] bitmasks to reject
//! impossible continuations early, and confirms a match only by exact lookup
//! in the entry set. Each confirmed match is handed to a sink closure as a
//! *span*: the absolute indices of the characters that form the entry.
//! Ignorable characters inside a match are stepped over and do not appear in
//! the span.

use crate::dictionary_lib::{CharProfile, WordIndex};

/// Optional ignorable-character predicate.
///
/// Characters for which the predicate returns `true` never start a match, do
/// not break one, and do not count toward an entry's offsets or length.
/// `None` means no character is ignorable.
///
/// The predicate must be `Sync` so batch operations can share it across threads.
///
/// # Example
/// ```
/// use fastcheck_fmmseg::scanner::SkipFn;
/// use fastcheck_fmmseg::delimiter_set::is_ignorable;
///
/// let is_space = |c: char| c.is_whitespace();
///
/// let none: SkipFn = None;
/// let spaces: SkipFn = Some(&is_space);
/// let builtin: SkipFn = Some(&is_ignorable);
/// # let _ = (none, spaces, builtin);
/// ```
pub type SkipFn<'a> = Option<&'a (dyn Fn(char) -> bool + Sync)>;

/// Scans `chars` (already normalized) for dictionary entries.
///
/// `on_match(span)` is called once per confirmed match, left to right. If it
/// returns `true`, scanning stops immediately.
///
/// # Algorithm
/// 1. **Seek** the next character that is not ignorable and starts an entry
///    (profile bit 0). The last character of the input is a valid start.
/// 2. **Single-character entries**: if the starter's `min_len == 1`, the
///    character alone is an entry; it is reported unless whitelisted, and the
///    scan moves one position on.
/// 3. **Extend** the window over offsets `j = 1..=min(n - start - 1, max_len + ignored)`.
///    Ignorable characters bump `ignored`. A character with no profile, or whose
///    profile lacks the structural offset `j - ignored`, ends the window. When the
///    effective length is at least `min_len`, the starter's length mask allows it
///    and the character can end an entry, the span is spelled out and checked
///    against the exact entry set (then the whitelist).
/// 4. **Advance**: the first confirmed match from a start consumes the cursor up
///    to its last character. Without a match, the cursor moves over the examined
///    characters that precede the first entry-starting character in the window.
///
/// Spans never overlap, and the bitmask stage never hides an entry that fits
/// the window; it can only let false candidates through to the exact check.
pub fn scan<F>(index: &WordIndex, chars: &[char], skip: SkipFn<'_>, mut on_match: F)
where
    F: FnMut(&[usize]) -> bool,
{
    let length = chars.len();
    let is_skipped = |c: char| skip.map_or(false, |f| f(c));

    let mut span: Vec<usize> = Vec::with_capacity(length.min(64));
    let mut word = String::new();
    let mut cursor = 0usize;

    while cursor < length {
        let Some((start, first)) = seek_start(index, chars, cursor, &is_skipped) else {
            break;
        };

        span.clear();
        span.push(start);

        if first.min_len == 1 {
            let mut buf = [0u8; 4];
            if !index.is_whitelisted(chars[start].encode_utf8(&mut buf)) && on_match(&span) {
                return;
            }
            cursor = start + 1;
            continue;
        }

        let remaining = length - start - 1;
        let mut ignored = 0usize;
        // Positions to move past when nothing matches; stops growing at the
        // first entry-starting character inside the window.
        let mut advance = 1usize;
        let mut counting = true;
        let mut consumed_to: Option<usize> = None;

        let mut j = 1usize;
        while j <= remaining.min(first.max_len as usize + ignored) {
            let pos = start + j;
            let current = chars[pos];
            j += 1;

            if is_skipped(current) {
                if counting {
                    advance += 1;
                }
                ignored += 1;
                continue;
            }

            let Some(letter) = index.profile(current) else {
                break;
            };

            counting = counting && !letter.is_first();
            if counting {
                advance += 1;
            }

            let offset = pos - start - ignored;
            if !letter.has_offset(offset) {
                break;
            }
            span.push(pos);

            let len = offset + 1;
            if len >= first.min_len as usize && first.has_length(len) && letter.is_end {
                word.clear();
                word.extend(span.iter().map(|&i| chars[i]));
                if index.is_entry(&word) && !index.is_whitelisted(&word) {
                    if on_match(&span) {
                        return;
                    }
                    consumed_to = Some(pos);
                    break;
                }
            }
        }

        cursor = match consumed_to {
            Some(last) => last + 1,
            None => start + advance,
        };
    }
}

/// Returns the first position at or after `from` holding a non-ignorable
/// character that starts an entry, with its profile.
#[inline]
fn seek_start<'i>(
    index: &'i WordIndex,
    chars: &[char],
    from: usize,
    is_skipped: &impl Fn(char) -> bool,
) -> Option<(usize, &'i CharProfile)> {
    chars[from..].iter().enumerate().find_map(|(k, &c)| {
        if is_skipped(c) {
            return None;
        }
        index
            .profile(c)
            .filter(|p| p.is_first())
            .map(|p| (from + k, p))
    })
}
