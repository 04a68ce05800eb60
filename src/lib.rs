//! # rumorph
//!
//! Morphological analysis for Russian over a packed, memory-mapped lexicon.
//!
//! The lexicon pairs two flat word graphs (a main DAWG holding every known
//! surface form and a suffix DAWG driving out-of-vocabulary prediction)
//! with string pools and paradigm tables. The file is mapped read-only and
//! the record arrays are read in place, so loading costs one `mmap` plus the
//! decompression of a small metadata block, regardless of dictionary size.
//!
//! ## Main features
//!
//! - **Dictionary lookup**: every parse of a known word form, with the lemma
//!   and the decomposed grammatical tags.
//! - **Paradigm expansion**: the full inflection table of a known word,
//!   including suppletive paradigms spanning several stems.
//! - **OOV prediction**: suffix-based analogy against a template word for
//!   words absent from the dictionary.
//! - **Batch processing**: chunked analysis of word lists over a worker pool.
//!
//! ## Usage
//!
//! ```no_run
//! # fn main() -> Result<(), rumorph::errors::RumorphError> {
//! use rumorph::MorphAnalyzer;
//!
//! let analyzer = MorphAnalyzer::load()?;
//!
//! let (parses, forms) = analyzer.analyze("стали");
//! for p in &parses {
//!     println!("{} -> {} [{}]", p.word, p.lemma, p.part_of_speech);
//! }
//! assert!(forms.iter().any(|f| f.word == "стать"));
//! # Ok(())
//! # }
//! ```
//!
//! The lexicon is looked up under the directory reported by the operating
//! system for local application data, or wherever the `RUMORPH_DICT_PATH`
//! environment variable points.

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("`target_pointer_width` must be 32 or 64");

/// The analyzer and its query operations.
pub mod analyzer;

/// Lexicon container, loader and graph views.
pub mod dictionary;

/// Error types.
pub mod errors;

/// Parse records and grammatical tag decomposition.
pub mod tagset;


// Re-exports
pub use analyzer::MorphAnalyzer;
pub use tagset::Parsed;

/// Version number of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
