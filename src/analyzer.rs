//! The query engine: dictionary lookup and paradigm expansion.
//!
//! All operations are read-only walks over the loaded lexicon. A word is
//! looked up character by character in the main graph; a hit yields one
//! parse per payload entry at the final node, and the word's full inflection
//! table is produced by depth-first expansion from the stem anchors of every
//! paradigm attached to it. Misses are handed to the suffix predictor.

pub(crate) mod batch;
pub(crate) mod predictor;

use hashbrown::HashMap;

use crate::dictionary::dawg::{DawgView, MorphPayloadView, Node};
use crate::dictionary::{self, Dictionary};
use crate::errors::Result;
use crate::tagset::Parsed;

/// A morphological analyzer over a loaded lexicon.
///
/// Instantiated once from a lexicon file; every query borrows it read-only,
/// so one analyzer can serve any number of threads concurrently.
#[derive(Debug)]
pub struct MorphAnalyzer {
    dict: Dictionary,
}

impl MorphAnalyzer {
    /// Loads the analyzer from the default lexicon location.
    ///
    /// The `RUMORPH_DICT_PATH` environment variable overrides the path.
    /// Without it, the lexicon is expected under the user data directory;
    /// when only split distribution parts are present there, they are merged
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error when no lexicon can be located or the located file
    /// fails validation.
    pub fn load() -> Result<Self> {
        let path = dictionary::locate_lexicon()?;
        Self::from_path(path)
    }

    /// Loads the analyzer from an explicit lexicon file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing or fails validation.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<std::path::Path>,
    {
        Ok(Self { dict: Dictionary::from_path(path)? })
    }

    /// Disposes the analyzer and unmaps the lexicon.
    ///
    /// Dropping the analyzer has the same effect; this method exists to make
    /// the unmap point explicit. Ownership rules make any use after release
    /// impossible.
    pub fn release(self) {}

    /// Analyzes a word: its parses plus its full inflection table.
    ///
    /// A dictionary hit returns the dictionary parses and forms. A miss goes
    /// through the suffix predictor; when even prediction fails, both lists
    /// come back empty.
    pub fn analyze(&self, word: &str) -> (Vec<Parsed>, Vec<Parsed>) {
        let parses = self.parse(word);
        if !parses.is_empty() {
            let forms = self.inflect(word);
            return (parses, forms);
        }
        let predicted = self.parse_predicted(word);
        if predicted.is_empty() {
            return (Vec::new(), Vec::new());
        }
        let forms = self.predict(word, &predicted[0].lemma);
        (predicted, forms)
    }

    /// Looks the word up in the main graph.
    ///
    /// Returns one parse per payload entry at the word's final node, in
    /// on-disk payload order; an unknown word yields an empty list. Lookup
    /// is case-insensitive, the returned records carry the caller's
    /// spelling.
    pub fn parse(&self, word: &str) -> Vec<Parsed> {
        let lower = word.to_lowercase();
        let Some(node) = self.lookup(&lower) else {
            return Vec::new();
        };
        if !node.is_final {
            return Vec::new();
        }

        let mut results = Vec::with_capacity(usize::from(node.payload_len));
        for info in self.dict.payloads().window(node.payload_idx, node.payload_len) {
            let Some(lemma) = self.dict.lemma(info.lemma_id) else { continue };
            let Some(tags) = self.dict.tags(info.tags_id) else { continue };
            results.push(Parsed::new(word, lemma, tags));
        }
        results
    }

    /// Generates every surface form of a known word.
    ///
    /// Each distinct paradigm at the word's final node is expanded by
    /// depth-first traversal from all of its stem anchors. Forms are
    /// deduplicated within a paradigm (suppletive stems can spell the same
    /// form twice) but kept separately across paradigms. The result is
    /// sorted ascending by surface form; an unknown word yields an empty
    /// list.
    pub fn inflect(&self, word: &str) -> Vec<Parsed> {
        let lower = word.to_lowercase();
        let Some(node) = self.lookup(&lower) else {
            return Vec::new();
        };
        if !node.is_final {
            return Vec::new();
        }

        // Distinct paradigms in payload order; the first entry fixes the lemma.
        let mut paradigm_order: Vec<(u32, u32)> = Vec::new();
        for info in self.dict.payloads().window(node.payload_idx, node.payload_len) {
            if !paradigm_order.iter().any(|&(pid, _)| pid == info.paradigm_id) {
                paradigm_order.push((info.paradigm_id, info.lemma_id));
            }
        }

        let mut results = Vec::new();
        for (paradigm_id, lemma_id) in paradigm_order {
            let Some(lemma) = self.dict.lemma(lemma_id) else { continue };
            let Some(stems) = self.dict.paradigm(paradigm_id) else { continue };

            let mut forms: HashMap<String, u32> = HashMap::new();
            for stem in stems {
                self.dfs_generate(stem.node_id, &stem.stem, paradigm_id, &mut forms);
            }

            let mut entries: Vec<(String, u32)> = forms.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (form, tags_id) in entries {
                let Some(tags) = self.dict.tags(tags_id) else { continue };
                results.push(Parsed::new(&form, lemma, tags));
            }
        }

        results.sort_by(|a, b| a.word.cmp(&b.word));
        results
    }

    /// Walks the main graph along the lowercased word.
    fn lookup(&self, lower: &str) -> Option<Node> {
        let dawg = self.dict.dawg();
        let idx = dawg.walk(0, lower)?;
        dawg.node(idx)
    }

    /// Collects every `(form, tags)` of `paradigm_id` reachable from
    /// `start`, spelling forms as `stem` plus the traversed edge labels.
    ///
    /// Duplicate forms overwrite earlier entries, which keeps one tag set
    /// per surface form within a paradigm.
    pub(crate) fn dfs_generate(
        &self,
        start: u32,
        stem: &str,
        paradigm_id: u32,
        out: &mut HashMap<String, u32>,
    ) {
        let dawg = self.dict.dawg();
        let payloads = self.dict.payloads();
        let mut prefix: Vec<char> = stem.chars().collect();
        self.dfs_visit(&dawg, &payloads, start, &mut prefix, paradigm_id, out);
    }

    fn dfs_visit(
        &self,
        dawg: &DawgView<'_>,
        payloads: &MorphPayloadView<'_>,
        node_idx: u32,
        prefix: &mut Vec<char>,
        paradigm_id: u32,
        out: &mut HashMap<String, u32>,
    ) {
        let Some(node) = dawg.node(node_idx) else { return };

        if node.is_final {
            for info in payloads.window(node.payload_idx, node.payload_len) {
                if info.paradigm_id == paradigm_id {
                    out.insert(prefix.iter().collect(), info.tags_id);
                }
            }
        }

        for edge in dawg.edge_window(node) {
            let Some(label) = char::from_u32(edge.label) else { continue };
            prefix.push(label);
            self.dfs_visit(dawg, payloads, edge.node_id, prefix, paradigm_id, out);
            prefix.pop();
        }
    }

    /// The canonical form list of a paradigm: all unique surface forms from
    /// every stem anchor, sorted ascending.
    ///
    /// Prediction rules record their template form as an index into this
    /// list, so the order must match the one used at build time (plain
    /// code-point comparison).
    pub(crate) fn paradigm_forms(&self, paradigm_id: u32) -> Vec<String> {
        let Some(stems) = self.dict.paradigm(paradigm_id) else {
            return Vec::new();
        };
        let mut collected: HashMap<String, u32> = HashMap::new();
        for stem in stems {
            self.dfs_generate(stem.node_id, &stem.stem, paradigm_id, &mut collected);
        }
        let mut forms: Vec<String> = collected.into_keys().collect();
        forms.sort();
        forms
    }
}
