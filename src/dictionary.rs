//! Lexicon container and zero-copy loader.
//!
//! The packed lexicon pairs two flat word graphs with string pools and
//! paradigm tables. This module locates the file, maps it read-only,
//! validates the header and exposes typed views over the record regions.
//! The record arrays are never copied out of the mapping; only the small
//! compressed "complex" block is decoded into the heap.

pub(crate) mod complex;
pub(crate) mod dawg;
pub(crate) mod header;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::dictionary::complex::{ComplexData, ParadigmInfo};
use crate::dictionary::dawg::{
    DawgView, EdgeView, MorphPayloadView, NodeView, PredictPayloadView, EDGE_RECORD_LEN,
    MORPH_RECORD_LEN, NODE_RECORD_LEN, PREDICT_RECORD_LEN,
};
use crate::dictionary::header::{Header, Region};
use crate::errors::{Result, RumorphError};

/// Magic signature identifying a packed lexicon file.
pub const MAGIC: &[u8; 4] = b"DAW7";

/// Environment variable overriding the lexicon path.
pub const ENV_DICT_PATH: &str = "RUMORPH_DICT_PATH";

/// Default file name of the merged lexicon.
pub const DICT_FILE_NAME: &str = "morph.dawg";

/// Name prefix of the split distribution parts (`morph_aa`, `morph_ab`, ...).
pub(crate) const PART_PREFIX: &str = "morph_";

/// A loaded, read-only lexicon.
///
/// Owns the memory mapping for its whole lifetime; the graph views handed
/// out by the accessors borrow from it and cannot outlive it.
#[derive(Debug)]
pub struct Dictionary {
    mmap: Mmap,
    header: Header,
    complex: ComplexData,
}

impl Dictionary {
    /// Maps and validates a lexicon file.
    ///
    /// The file is mapped read-only; the header is checked against the file
    /// length, the complex block is decompressed and decoded, and the six
    /// record regions become available through the typed view accessors.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing, cannot be mapped, carries
    /// a wrong magic signature, declares regions that do not fit the file,
    /// or holds a corrupt complex block.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RumorphError::FileNotFound { path: path.to_path_buf() },
            _ => RumorphError::Io(e),
        })?;
        // SAFETY: the mapping is read-only and lives inside this Dictionary;
        // all region accesses go through bounds-checked views.
        let mmap =
            unsafe { Mmap::map(&file) }.map_err(|source| RumorphError::MmapFailed { source })?;

        let header = Header::parse(&mmap)?;
        let complex_block = &mmap[header.complex_offset..header.complex_offset + header.complex_len];
        let complex = ComplexData::from_gzip(complex_block)?;

        log::info!(
            "loaded lexicon '{}': {} nodes, {} lemmas, {} paradigms",
            path.display(),
            header.nodes.count,
            complex.lemma_pool.len(),
            complex.paradigms.len(),
        );

        Ok(Self { mmap, header, complex })
    }

    #[inline(always)]
    fn region_bytes(&self, region: Region, record_len: usize) -> &[u8] {
        // Validated against the file length when the header was parsed.
        &self.mmap[region.offset..region.offset + region.count * record_len]
    }

    /// View over the main word graph.
    #[inline(always)]
    pub(crate) fn dawg(&self) -> DawgView<'_> {
        DawgView::new(
            NodeView::new(self.region_bytes(self.header.nodes, NODE_RECORD_LEN)),
            EdgeView::new(self.region_bytes(self.header.edges, EDGE_RECORD_LEN)),
        )
    }

    /// View over the main-graph payloads.
    #[inline(always)]
    pub(crate) fn payloads(&self) -> MorphPayloadView<'_> {
        MorphPayloadView::new(self.region_bytes(self.header.payloads, MORPH_RECORD_LEN))
    }

    /// View over the prediction word graph.
    #[inline(always)]
    pub(crate) fn predict_dawg(&self) -> DawgView<'_> {
        DawgView::new(
            NodeView::new(self.region_bytes(self.header.predict_nodes, NODE_RECORD_LEN)),
            EdgeView::new(self.region_bytes(self.header.predict_edges, EDGE_RECORD_LEN)),
        )
    }

    /// View over the prediction-graph payloads.
    #[inline(always)]
    pub(crate) fn predict_payloads(&self) -> PredictPayloadView<'_> {
        PredictPayloadView::new(self.region_bytes(self.header.predict_payloads, PREDICT_RECORD_LEN))
    }

    #[inline(always)]
    pub(crate) fn lemma(&self, id: u32) -> Option<&str> {
        self.complex.lemma_pool.get(id as usize).map(String::as_str)
    }

    #[inline(always)]
    pub(crate) fn tags(&self, id: u32) -> Option<&str> {
        self.complex.tags_pool.get(id as usize).map(String::as_str)
    }

    /// Stem anchors of a paradigm, or `None` for an unknown paradigm.
    #[inline(always)]
    pub(crate) fn paradigm(&self, id: u32) -> Option<&[ParadigmInfo]> {
        self.complex.paradigms.get(&id).map(Vec::as_slice)
    }

    /// Pool index of a paradigm's dictionary-form lemma.
    #[inline(always)]
    pub(crate) fn paradigm_lemma_id(&self, id: u32) -> Option<u32> {
        self.complex.paradigm_to_lemma.get(&id).copied()
    }
}

/// Resolves the lexicon path: the environment override when set, otherwise
/// the default data directory (merging split parts if necessary).
pub(crate) fn locate_lexicon() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(ENV_DICT_PATH) {
        return Ok(PathBuf::from(path));
    }
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| RumorphError::FileNotFound { path: PathBuf::from(DICT_FILE_NAME) })?;
    locate_in_dir(&data_dir.join("rumorph"))
}

/// Resolves the lexicon inside `dir`, merging `morph_*` parts into
/// `morph.dawg` when the merged file does not exist yet.
pub(crate) fn locate_in_dir(dir: &Path) -> Result<PathBuf> {
    let dict_path = dir.join(DICT_FILE_NAME);
    if dict_path.exists() {
        return Ok(dict_path);
    }
    log::info!(
        "merged lexicon '{}' not found, looking for parts to merge",
        dict_path.display()
    );
    merge_parts(dir, PART_PREFIX, &dict_path)?;
    Ok(dict_path)
}

/// Concatenates all files in `dir` whose names start with `prefix`, in
/// lexicographic order, into `output`.
///
/// `split` produces parts suffixed `aa`, `ab`, ... so lexicographic order
/// restores the original byte order.
pub(crate) fn merge_parts(dir: &Path, prefix: &str, output: &Path) -> Result<()> {
    let merge_err =
        |source| RumorphError::PartsMergeFailed { path: output.to_path_buf(), source };

    let entries = std::fs::read_dir(dir)
        .map_err(|_| RumorphError::FileNotFound { path: output.to_path_buf() })?;
    let mut parts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(merge_err)?;
        let path = entry.path();
        if path.is_file() && entry.file_name().to_string_lossy().starts_with(prefix) {
            parts.push(path);
        }
    }
    if parts.is_empty() {
        return Err(RumorphError::FileNotFound { path: output.to_path_buf() });
    }
    parts.sort();

    log::info!("merging {} lexicon parts into '{}'", parts.len(), output.display());
    let mut out = File::create(output).map_err(merge_err)?;
    for part in &parts {
        let mut input = File::open(part).map_err(merge_err)?;
        io::copy(&mut input, &mut out).map_err(merge_err)?;
    }
    Ok(())
}
