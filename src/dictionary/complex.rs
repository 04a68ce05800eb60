//! The "complex" data block: string pools and paradigm tables.
//!
//! Everything that does not flatten well into fixed records lives here.
//! The block is stored gzip-compressed and is fully decoded into the heap
//! at load time; it is small compared to the record arrays.

use std::io::Read;

use flate2::read::GzDecoder;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, RumorphError};

/// One stem anchor of a paradigm.
///
/// `stem` spelled from the main-graph root ends exactly at `node_id`.
/// Suppletive paradigms carry several anchors (идти/шёл).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParadigmInfo {
    /// The stem string itself.
    pub stem: String,
    /// Main-graph node where the stem ends.
    pub node_id: u32,
}

/// The decoded complex block.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ComplexData {
    /// Pool of all lemmas; payloads reference it by index.
    pub lemma_pool: Vec<String>,
    /// Pool of all tag strings; payloads reference it by index.
    pub tags_pool: Vec<String>,
    /// Stem anchors per paradigm.
    pub paradigms: HashMap<u32, Vec<ParadigmInfo>>,
    /// Dictionary-form lemma per paradigm.
    pub paradigm_to_lemma: HashMap<u32, u32>,
}

impl ComplexData {
    /// Decompresses and deserializes the block.
    pub fn from_gzip(block: &[u8]) -> Result<Self> {
        let mut decoder = GzDecoder::new(block);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|source| RumorphError::DecompressFailed { source })?;
        serde_json::from_slice(&decompressed)
            .map_err(|source| RumorphError::DeserializeFailed { source })
    }
}
