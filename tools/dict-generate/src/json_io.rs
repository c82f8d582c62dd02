// json_io.rs (CLI only; fastcheck-rs pulls it in with #[path])
use fastcheck_fmmseg::dictionary_lib::{CharProfile, WordIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet}; // stable order for diffs
use std::io::{self, Read};

/// Reads a reference JSON artifact written by `dict-generate --format json`.
pub fn read_reference_json<R: Read>(reader: R) -> io::Result<WordIndex> {
    let dto: WordIndexSerde = serde_json::from_reader(reader)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(dto.into_internal())
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CharProfileSerde {
    pub start_offsets: u16,
    pub lengths: u16,
    pub min_len: u16,
    pub max_len: u16,
    pub is_end: bool,
}

impl From<&CharProfile> for CharProfileSerde {
    fn from(p: &CharProfile) -> Self {
        Self {
            start_offsets: p.start_offsets,
            lengths: p.lengths,
            min_len: p.min_len,
            max_len: p.max_len,
            is_end: p.is_end,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WordIndexSerde {
    #[serde(default)]
    pub ignore_case: bool,

    pub entries: BTreeSet<String>,

    #[serde(default)]
    pub whitelist: BTreeSet<String>,

    // reference only; keys are 1-char strings, rebuilt from entries on load
    #[serde(default)]
    pub profiles: BTreeMap<String, CharProfileSerde>,
}

impl WordIndexSerde {
    /// Rebuilds a runtime index. Profiles are recomputed from the entries.
    pub fn into_internal(self) -> WordIndex {
        let mut out = WordIndex::new(self.ignore_case);
        for entry in &self.entries {
            if let Err(err) = out.insert(entry) {
                log::warn!("skipping entry {:?}: {}", entry, err);
            }
        }
        out.add_whitelist(self.whitelist);
        out
    }
}

impl From<&WordIndex> for WordIndexSerde {
    fn from(index: &WordIndex) -> Self {
        let profiles = index
            .profiles()
            .map(|(c, p)| (c.to_string(), CharProfileSerde::from(p)))
            .collect();

        Self {
            ignore_case: index.ignore_case(),
            entries: index.entries().map(str::to_owned).collect(),
            whitelist: index.whitelist().map(str::to_owned).collect(),
            profiles,
        }
    }
}
