//! Dictionary data structures: character profiles and the word index.
//!
//! - [`CharProfile`] — per-character offset/length bitmasks.
//! - [`WordIndex`] — exact entries + whitelist + profiles, with insertion,
//!   word-list loading, CBOR/Zstd snapshots and the three query operations.
//! - [`DictionaryError`] — errors from building, loading or saving an index.

mod char_profile;
mod word_index;

pub use self::char_profile::CharProfile;
pub use self::word_index::{DictionaryError, WordIndex};
