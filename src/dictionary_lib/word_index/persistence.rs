//! Internal: CBOR and Zstd-compressed CBOR snapshots of a [`WordIndex`].

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

use log::debug;
use serde_cbor::{from_reader, from_slice};
use zstd::{decode_all, Decoder, Encoder};

use super::{DictionaryError, WordIndex};

/// Zstd level used for saved snapshots; load speed does not depend on it.
const ZSTD_LEVEL: i32 = 19;

impl WordIndex {
    /// Serializes the index to a CBOR file.
    pub fn serialize_to_cbor<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let cbor_data = serde_cbor::to_vec(self)?;
        fs::write(&path, cbor_data).map_err(|err| {
            DictionaryError::IoError(format!("Failed to write CBOR file: {}", err))
        })?;
        debug!("index saved as CBOR: {}", path.as_ref().display());
        Ok(())
    }

    /// Deserializes an index from a CBOR file and rebuilds its profiles.
    pub fn deserialize_from_cbor<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let cbor_data = fs::read(&path).map_err(|err| {
            DictionaryError::IoError(format!("Failed to read CBOR file: {}", err))
        })?;
        Self::from_cbor_bytes(&cbor_data)
    }

    /// Deserializes an index from in-memory CBOR bytes and rebuilds its profiles.
    pub fn from_cbor_bytes(bytes: &[u8]) -> Result<Self, DictionaryError> {
        from_slice(bytes)
            .map_err(|err| DictionaryError::ParseError(format!("Failed to parse CBOR: {}", err)))
    }

    /// Deserializes an index from in-memory Zstd-compressed CBOR bytes.
    pub fn from_zstd_bytes(bytes: &[u8]) -> Result<Self, DictionaryError> {
        let decompressed = decode_all(Cursor::new(bytes)).map_err(|err| {
            DictionaryError::IoError(format!("Failed to decompress Zstd: {}", err))
        })?;
        Self::from_cbor_bytes(&decompressed)
    }

    /// Saves the index to a Zstd-compressed CBOR file on disk.
    pub fn save_compressed<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let file = File::create(&path)?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, ZSTD_LEVEL)?;
        serde_cbor::to_writer(&mut encoder, self)?;
        encoder.finish()?;
        debug!(
            "index saved as Zstd: {} (entries={})",
            path.as_ref().display(),
            self.len()
        );
        Ok(())
    }

    /// Loads an index from a Zstd-compressed CBOR file on disk.
    pub fn load_compressed<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        let mut decoder = Decoder::new(reader)?;
        let index: WordIndex = from_reader(&mut decoder)?;
        debug!(
            "index loaded from Zstd: {} (entries={})",
            path.as_ref().display(),
            index.len()
        );
        Ok(index)
    }
}
