//! Dictionary index: exact entry set, whitelist, and per-character profiles.
//!
//! [`WordIndex`] is the single-threaded core behind [`FastCheck`](crate::FastCheck).
//! It owns three pieces of data:
//!
//! - **entries** — the exact set of normalized dictionary strings. This is the
//!   only thing allowed to confirm a match.
//! - **whitelist** — normalized strings that are never reported.
//! - **profiles** — a [`CharProfile`] per character seen in any entry, used by
//!   the scanner as a cheap structural filter before the exact check.
//!
//! ## Example
//! ```
//! use fastcheck_fmmseg::dictionary_lib::WordIndex;
//!
//! let mut index = WordIndex::new(true);
//! assert!(index.insert("BadWord").unwrap());
//! assert!(!index.insert("badword").unwrap()); // same entry once normalized
//!
//! let (found, ok) = index.has_word("this has badword in it", None);
//! assert!(ok);
//! assert_eq!(found, "badword");
//! ```

mod persistence;

use std::borrow::Cow;
use std::io::BufRead;

use log::{debug, trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dictionary_lib::CharProfile;
use crate::scanner::{scan, SkipFn};
use crate::utils::{fold_char, MAX_ENTRY_LEN};

/// Exact dictionary plus the structural profiles the scanner filters with.
///
/// # Serialization
///
/// Only `ignore_case`, `entries` and `whitelist` are serialized.
/// Profiles are derived data; deserializing with any serde format rebuilds
/// them, so a loaded index is always queryable.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(from = "WordIndexData")]
pub struct WordIndex {
    /// Uppercase all inserted and queried text before indexing / scanning.
    ignore_case: bool,

    /// Normalized dictionary entries; exact membership confirms a match.
    entries: FxHashSet<Box<str>>,

    /// Normalized strings that must never be reported.
    whitelist: FxHashSet<Box<str>>,

    /// Runtime-only: structural profile per normalized character.
    #[serde(skip)]
    profiles: FxHashMap<char, CharProfile>,
}

/// Serialized form of a [`WordIndex`], without profiles.
#[derive(Deserialize)]
struct WordIndexData {
    #[serde(default)]
    ignore_case: bool,
    #[serde(default)]
    entries: FxHashSet<Box<str>>,
    #[serde(default)]
    whitelist: FxHashSet<Box<str>>,
}

impl From<WordIndexData> for WordIndex {
    fn from(data: WordIndexData) -> Self {
        let mut index = WordIndex {
            ignore_case: data.ignore_case,
            entries: data.entries,
            whitelist: data.whitelist,
            profiles: FxHashMap::default(),
        };
        index.populate_profiles();
        index
    }
}

impl WordIndex {
    /// Creates an empty index. `ignore_case` is fixed for the index's lifetime.
    pub fn new(ignore_case: bool) -> Self {
        Self {
            ignore_case,
            ..Self::default()
        }
    }

    #[inline]
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Number of distinct entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Structural profile of a normalized character, if it occurs in any entry.
    #[inline(always)]
    pub fn profile(&self, c: char) -> Option<&CharProfile> {
        self.profiles.get(&c)
    }

    /// Iterates over the normalized entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(AsRef::as_ref)
    }

    /// Iterates over the normalized whitelist, in no particular order.
    pub fn whitelist(&self) -> impl Iterator<Item = &str> + '_ {
        self.whitelist.iter().map(AsRef::as_ref)
    }

    /// Iterates over every character profile, in no particular order.
    pub fn profiles(&self) -> impl Iterator<Item = (char, &CharProfile)> + '_ {
        self.profiles.iter().map(|(&c, p)| (c, p))
    }

    /// Normalizes `text` the same way entries were normalized at insertion.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.ignore_case {
            Cow::Owned(text.chars().map(fold_char).collect())
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Exact membership test for `word` after normalization.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains(self.normalize(word).as_ref())
    }

    /// Exact membership test for an already normalized string.
    #[inline]
    pub(crate) fn is_entry(&self, normalized: &str) -> bool {
        self.entries.contains(normalized)
    }

    /// Whitelist test for an already normalized string.
    #[inline]
    pub(crate) fn is_whitelisted(&self, normalized: &str) -> bool {
        !self.whitelist.is_empty() && self.whitelist.contains(normalized)
    }

    /// Inserts one dictionary entry.
    ///
    /// Returns `Ok(true)` when the entry is new, `Ok(false)` when `text` is empty
    /// or already present (entries form a set).
    ///
    /// # Errors
    /// [`DictionaryError::EntryTooLong`] if the normalized entry is longer than
    /// [`MAX_ENTRY_LEN`] characters. The index is left untouched.
    ///
    /// # Example
    /// ```
    /// use fastcheck_fmmseg::dictionary_lib::{DictionaryError, WordIndex};
    ///
    /// let mut index = WordIndex::new(false);
    /// assert!(index.insert("spam").unwrap());
    /// assert!(!index.insert("spam").unwrap());
    /// assert!(!index.insert("").unwrap());
    ///
    /// let huge = "x".repeat(70_000);
    /// assert!(matches!(index.insert(&huge), Err(DictionaryError::EntryTooLong { .. })));
    /// ```
    pub fn insert(&mut self, text: &str) -> Result<bool, DictionaryError> {
        if text.is_empty() {
            return Ok(false);
        }

        let normalized = self.normalize(text);
        let chars: Vec<char> = normalized.chars().collect();
        if chars.len() > MAX_ENTRY_LEN {
            return Err(DictionaryError::EntryTooLong {
                len: chars.len(),
                max: MAX_ENTRY_LEN,
            });
        }

        if self.entries.contains(normalized.as_ref()) {
            trace!("duplicate entry ignored: {:?}", normalized);
            return Ok(false);
        }

        self.index_chars(&chars);
        self.entries.insert(normalized.into_owned().into_boxed_str());
        Ok(true)
    }

    /// Adds words to the whitelist. Whitelisted strings are never reported,
    /// whether or not they are dictionary entries.
    pub fn add_whitelist<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let normalized = self.normalize(word.as_ref()).into_owned();
            self.whitelist.insert(normalized.into_boxed_str());
        }
    }

    /// Updates the profiles for one normalized entry.
    ///
    /// Callers guarantee `chars` is non-empty and at most [`MAX_ENTRY_LEN`] long.
    fn index_chars(&mut self, chars: &[char]) {
        let (Some(&first), Some(&last)) = (chars.first(), chars.last()) else {
            return;
        };
        let len = chars.len() as u16;

        self.profiles.entry(last).or_default().is_end = true;
        self.profiles.entry(first).or_default().add_length(len);
        for (offset, &c) in chars.iter().enumerate() {
            self.profiles.entry(c).or_default().set_offset(offset);
        }
    }

    /// (Re)builds every [`CharProfile`] from `entries`.
    ///
    /// Deserialization calls this already.
    pub fn populate_profiles(&mut self) {
        self.profiles.clear();

        let entries = std::mem::take(&mut self.entries);
        for entry in entries.iter() {
            let chars: Vec<char> = entry.chars().collect();
            self.index_chars(&chars);
        }
        self.entries = entries;

        debug!(
            "profiles rebuilt: entries={}, characters={}",
            self.entries.len(),
            self.profiles.len()
        );
    }

    /// Inserts every non-blank line of `reader` as an entry.
    ///
    /// Surrounding whitespace (including `\r`) is trimmed. Returns the number of
    /// newly inserted entries. Lines read before an error stay inserted.
    ///
    /// # Errors
    /// I/O failures, or [`DictionaryError::EntryTooLong`] for the first oversized line.
    pub fn load_words<R: BufRead>(&mut self, reader: R) -> Result<usize, DictionaryError> {
        let mut added = 0usize;
        let mut seen = 0usize;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            seen += 1;
            match self.insert(word) {
                Ok(true) => added += 1,
                Ok(false) => {}
                Err(err) => {
                    warn!("word list line {}: {}", line_no + 1, err);
                    return Err(err);
                }
            }
        }
        debug!("word list loaded: lines={}, inserted={}", seen, added);
        Ok(added)
    }

    /// Adds every non-blank line of `reader` to the whitelist.
    pub fn load_whitelist<R: BufRead>(&mut self, reader: R) -> Result<usize, DictionaryError> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }
        let count = words.len();
        self.add_whitelist(words);
        debug!("whitelist loaded: words={}", count);
        Ok(count)
    }

    /// Normalized view of a query, index-aligned with `original`.
    fn query_chars<'a>(&self, original: &'a [char]) -> Cow<'a, [char]> {
        if self.ignore_case {
            Cow::Owned(original.iter().map(|&c| fold_char(c)).collect())
        } else {
            Cow::Borrowed(original)
        }
    }

    /// Returns the first match in `text`, spelled as it appears in `text`.
    ///
    /// `("", false)` when nothing matches.
    pub fn has_word(&self, text: &str, skip: SkipFn<'_>) -> (String, bool) {
        let original: Vec<char> = text.chars().collect();
        let normalized = self.query_chars(&original);

        let mut found: Option<String> = None;
        scan(self, &normalized, skip, |span| {
            found = Some(span.iter().map(|&i| original[i]).collect());
            true
        });

        match found {
            Some(word) => (word, true),
            None => (String::new(), false),
        }
    }

    /// Returns every match in `text`, left to right, spelled as in `text`.
    ///
    /// Matches never share a character. Empty when nothing matches.
    pub fn find(&self, text: &str, skip: SkipFn<'_>) -> Vec<String> {
        let original: Vec<char> = text.chars().collect();
        let normalized = self.query_chars(&original);

        let mut found = Vec::new();
        scan(self, &normalized, skip, |span| {
            found.push(span.iter().map(|&i| original[i]).collect());
            false
        });
        found
    }

    /// Overwrites every matched character with `replacement`.
    ///
    /// Ignored characters inside a match are kept, and the output has the same
    /// number of characters as `text`.
    pub fn replace(&self, text: &str, replacement: char, skip: SkipFn<'_>) -> String {
        let original: Vec<char> = text.chars().collect();
        let normalized = self.query_chars(&original);

        let mut output = original.clone();
        scan(self, &normalized, skip, |span| {
            for &i in span {
                output[i] = replacement;
            }
            false
        });
        output.into_iter().collect()
    }
}

/// Errors raised while building, loading, or saving a [`WordIndex`].
///
/// # Variants
/// - `EntryTooLong` — an entry exceeds [`MAX_ENTRY_LEN`]; a configuration limit,
///   not something retried.
/// - `IoError(String)` — file access, reading, or writing failed.
/// - `ParseError(String)` — CBOR / JSON (de)serialization failed.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("entry has {len} characters, longer than the maximum of {max}")]
    EntryTooLong { len: usize, max: usize },
    #[error("I/O Error: {0}")]
    IoError(String),
    #[error("Parse Error: {0}")]
    ParseError(String),
}

impl From<std::io::Error> for DictionaryError {
    fn from(err: std::io::Error) -> Self {
        DictionaryError::IoError(err.to_string())
    }
}

impl From<serde_cbor::Error> for DictionaryError {
    fn from(err: serde_cbor::Error) -> Self {
        DictionaryError::ParseError(err.to_string())
    }
}
