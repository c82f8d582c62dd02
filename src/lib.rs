//! Fast sensitive-word detection and redaction.
//!
//! `fastcheck-fmmseg` finds, lists and masks dictionary entries ("marked"
//! words such as profanity lists) inside arbitrary text. Matching can be
//! case-insensitive, can step over characters the caller wants ignored
//! (`b.a.d w-o-r-d`), and a whitelist can veto otherwise positive hits.
//!
//! Lookups go through a per-character bitmask filter ([`dictionary_lib::CharProfile`])
//! and are confirmed by exact set membership, so reported matches are never
//! false positives.
//!
//! ## Example
//! ```
//! use fastcheck_fmmseg::FastCheck;
//! use fastcheck_fmmseg::delimiter_set::is_ignorable;
//!
//! let fc = FastCheck::new(true);
//! fc.insert("badword").unwrap();
//!
//! assert_eq!(fc.has_word("This has BadWord in it", None), ("BadWord".to_string(), true));
//! assert_eq!(fc.replace("b a d w o r d", '*', Some(&is_ignorable)), "* * * * * * *");
//! assert!(fc.find("nothing here", None).is_empty());
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use rayon::prelude::*;

use crate::dictionary_lib::{DictionaryError, WordIndex};
use crate::scanner::SkipFn;

pub mod delimiter_set;
pub mod dictionary_lib;
pub mod scanner;
pub mod utils;

/// Thread-safe sensitive-word checker.
///
/// Wraps a [`WordIndex`] in a reader–writer lock: insertion takes the write
/// lock, queries share the read lock and may run concurrently.
///
/// Skip predicates passed to the queries run inline during the scan and only
/// see characters; they cannot reach the index.
pub struct FastCheck {
    index: RwLock<WordIndex>,
    is_parallel: bool,
}

impl FastCheck {
    /// Creates an empty checker. `ignore_case` is fixed for its lifetime.
    pub fn new(ignore_case: bool) -> Self {
        Self::from_index(WordIndex::new(ignore_case))
    }

    /// Wraps an existing index (e.g. one loaded from a snapshot).
    pub fn from_index(index: WordIndex) -> Self {
        FastCheck {
            index: RwLock::new(index),
            is_parallel: true,
        }
    }

    /// Builds a checker from a word list file, one entry per line.
    pub fn from_word_file<P: AsRef<Path>>(path: P, ignore_case: bool) -> Result<Self, DictionaryError> {
        let file = File::open(&path).map_err(|err| {
            DictionaryError::IoError(format!(
                "Failed to open word list {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        let fc = Self::new(ignore_case);
        fc.load_words(BufReader::new(file))?;
        Ok(fc)
    }

    /// Loads a checker from a Zstd-compressed CBOR snapshot.
    pub fn load_compressed<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        Ok(Self::from_index(WordIndex::load_compressed(path)?))
    }

    /// Loads a checker from a CBOR snapshot.
    pub fn deserialize_from_cbor<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        Ok(Self::from_index(WordIndex::deserialize_from_cbor(path)?))
    }

    /// Saves a Zstd-compressed CBOR snapshot.
    pub fn save_compressed<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        self.read().save_compressed(path)
    }

    /// Saves a CBOR snapshot.
    pub fn serialize_to_cbor<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        self.read().serialize_to_cbor(path)
    }

    /// Consumes the checker and returns its index.
    pub fn into_index(self) -> WordIndex {
        self.index.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // Insertion validates before mutating, so a poisoned lock still guards a
    // consistent index.
    fn read(&self) -> RwLockReadGuard<'_, WordIndex> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, WordIndex> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_parallel(&mut self, is_parallel: bool) {
        self.is_parallel = is_parallel;
    }

    pub fn get_parallel(&self) -> bool {
        self.is_parallel
    }

    pub fn ignore_case(&self) -> bool {
        self.read().ignore_case()
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Exact (normalized) membership test; no scanning.
    pub fn contains(&self, word: &str) -> bool {
        self.read().contains(word)
    }

    /// Inserts an entry. See [`WordIndex::insert`].
    ///
    /// # Errors
    /// [`DictionaryError::EntryTooLong`] when the entry exceeds
    /// [`utils::MAX_ENTRY_LEN`] characters.
    pub fn insert(&self, text: &str) -> Result<bool, DictionaryError> {
        self.write().insert(text)
    }

    /// Adds words to the whitelist.
    pub fn add_whitelist<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write().add_whitelist(words)
    }

    /// Inserts every non-blank line of `reader`. Returns the number of new entries.
    pub fn load_words<R: BufRead>(&self, reader: R) -> Result<usize, DictionaryError> {
        self.write().load_words(reader)
    }

    /// Adds every non-blank line of `reader` to the whitelist.
    pub fn load_whitelist<R: BufRead>(&self, reader: R) -> Result<usize, DictionaryError> {
        self.write().load_whitelist(reader)
    }

    /// Returns the first match, as spelled in `text`, and whether one was found.
    pub fn has_word(&self, text: &str, skip: SkipFn<'_>) -> (String, bool) {
        self.read().has_word(text, skip)
    }

    /// Returns every non-overlapping match, left to right, as spelled in `text`.
    pub fn find(&self, text: &str, skip: SkipFn<'_>) -> Vec<String> {
        self.read().find(text, skip)
    }

    /// Replaces every matched character with `replacement`, keeping ignored
    /// characters and the character count of `text`.
    pub fn replace(&self, text: &str, replacement: char, skip: SkipFn<'_>) -> String {
        self.read().replace(text, replacement, skip)
    }

    /// Runs [`find`](Self::find) over many texts under one read lock.
    ///
    /// Texts are processed with rayon when parallel mode is on. Results keep
    /// the input order.
    pub fn find_batch(&self, texts: &[&str], skip: SkipFn<'_>) -> Vec<Vec<String>> {
        let guard = self.read();
        let index: &WordIndex = &guard;
        debug!("find_batch: texts={}, parallel={}", texts.len(), self.is_parallel);
        if self.is_parallel {
            texts.par_iter().map(|text| index.find(text, skip)).collect()
        } else {
            texts.iter().map(|text| index.find(text, skip)).collect()
        }
    }

    /// Runs [`replace`](Self::replace) over many texts under one read lock.
    ///
    /// Texts are processed with rayon when parallel mode is on. Results keep
    /// the input order.
    pub fn replace_batch(&self, texts: &[&str], replacement: char, skip: SkipFn<'_>) -> Vec<String> {
        let guard = self.read();
        let index: &WordIndex = &guard;
        debug!("replace_batch: texts={}, parallel={}", texts.len(), self.is_parallel);
        if self.is_parallel {
            texts
                .par_iter()
                .map(|text| index.replace(text, replacement, skip))
                .collect()
        } else {
            texts
                .iter()
                .map(|text| index.replace(text, replacement, skip))
                .collect()
        }
    }
}

impl Default for FastCheck {
    fn default() -> Self {
        Self::new(false)
    }
}

impl From<WordIndex> for FastCheck {
    fn from(index: WordIndex) -> Self {
        Self::from_index(index)
    }
}
