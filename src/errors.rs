//! Error types.
//!
//! All failures surface during loading; query operations never fail and
//! report "no result" as an empty list instead.

use std::path::PathBuf;

/// The crate-wide Result type.
///
/// Uses [`RumorphError`] as the default error.
pub type Result<T, E = RumorphError> = std::result::Result<T, E>;

/// Errors raised while locating, mapping or decoding the binary lexicon.
#[derive(Debug, thiserror::Error)]
pub enum RumorphError {
    /// The lexicon file (and any mergeable parts) could not be found.
    #[error(
        "lexicon not found at '{path}'; install the dictionary files or point \
         the {env} environment variable at a lexicon",
        env = crate::dictionary::ENV_DICT_PATH
    )]
    FileNotFound {
        /// Path that was probed.
        path: PathBuf,
    },

    /// Concatenating the distribution parts into one lexicon file failed.
    #[error("failed to merge lexicon parts into '{path}': {source}")]
    PartsMergeFailed {
        /// Target path of the merged lexicon.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is smaller than the fixed header.
    #[error("lexicon file is too short to contain a header ({len} bytes)")]
    HeaderTooShort {
        /// Actual file length in bytes.
        len: usize,
    },

    /// The magic signature does not match `DAW7`.
    #[error("bad magic signature in lexicon header")]
    BadMagic,

    /// The gzip stream of the complex data block is invalid.
    #[error("failed to decompress the complex data block: {source}")]
    DecompressFailed {
        #[source]
        source: std::io::Error,
    },

    /// The decompressed complex data block is not a valid serialization.
    #[error("failed to deserialize the complex data block: {source}")]
    DeserializeFailed {
        #[source]
        source: serde_json::Error,
    },

    /// A header region does not fit the file or its record size.
    #[error("corrupt region layout: {what}")]
    CorruptLayout {
        /// Description of the offending region.
        what: String,
    },

    /// Memory-mapping the lexicon file failed.
    #[error("failed to memory-map the lexicon: {source}")]
    MmapFailed {
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RumorphError {
    pub(crate) fn corrupt_layout<S>(what: S) -> Self
    where
        S: Into<String>,
    {
        Self::CorruptLayout { what: what.into() }
    }
}
