//! Suffix-based prediction for out-of-vocabulary words.
//!
//! The prediction graph indexes word tails: walking it along the last `k`
//! characters of a word lands on the rules recorded for that suffix. A rule
//! names a template paradigm, a template form inside it and the form's
//! tags. The unknown word is then inflected by proportional substitution:
//! the template's prefix is swapped for the unknown word's prefix while the
//! shared suffix stays fixed.
//!
//! Every compatibility check degrades silently: to `lemma == word` when
//! deriving the lemma, and to an empty list when generating forms. A failed
//! analogy is an expected outcome, not an error.

use hashbrown::HashMap;

use crate::analyzer::MorphAnalyzer;
use crate::dictionary::dawg::PredictPayload;
use crate::tagset::Parsed;

/// Longest suffix probed against the prediction graph.
const MAX_SUFFIX_LEN: usize = 5;

/// A rule pulled out of the prediction graph, with the suffix length it
/// matched at.
struct PredictionCandidate {
    info: PredictPayload,
    suffix_len: usize,
}

impl MorphAnalyzer {
    /// Predicts the parse of an out-of-vocabulary word.
    ///
    /// Returns a single parse carrying the analogically derived lemma and
    /// the tags of the winning rule, or an empty list when no suffix of the
    /// word is known to the prediction graph. When the analogy is unsafe
    /// (suppletive template, mismatched suffix, out-of-range template
    /// index), the word itself stands in as the lemma.
    pub fn parse_predicted(&self, word: &str) -> Vec<Parsed> {
        let lower = word.to_lowercase();
        let Some(best) = self.find_best_prediction(&lower) else {
            return Vec::new();
        };
        let Some(tags) = self.dict.tags(best.info.tags_id) else {
            return Vec::new();
        };
        let lemma = self.derive_lemma(&lower, &best);
        vec![Parsed::new(word, &lemma, tags)]
    }

    /// Generates the full inflection table of an out-of-vocabulary word.
    ///
    /// `lemma` is attached to every produced form; callers pass the lemma
    /// predicted by [`parse_predicted`](Self::parse_predicted). Returns an
    /// empty list when no rule matches or the analogy is unsafe.
    pub fn predict(&self, word: &str, lemma: &str) -> Vec<Parsed> {
        let lower = word.to_lowercase();
        let Some(best) = self.find_best_prediction(&lower) else {
            return Vec::new();
        };

        let template_forms = self.paradigm_forms(best.info.paradigm_id);
        let Some(template_word) = template_forms.get(best.info.form_idx as usize) else {
            return Vec::new();
        };
        if template_word.chars().count() < best.suffix_len {
            return Vec::new();
        }
        let (input_prefix, common_suffix) = split_at_suffix(&lower, best.suffix_len);
        let Some(dict_prefix) = template_word.strip_suffix(common_suffix) else {
            return Vec::new();
        };

        let mut forms_and_tags: HashMap<String, u32> = HashMap::new();
        if let Some(stems) = self.dict.paradigm(best.info.paradigm_id) {
            for stem in stems {
                self.dfs_generate(stem.node_id, &stem.stem, best.info.paradigm_id, &mut forms_and_tags);
            }
        }

        let mut results = Vec::with_capacity(forms_and_tags.len());
        for (dict_form, tags_id) in forms_and_tags {
            // A form from a stem that does not align with the template is skipped.
            let Some(ending) = dict_form.strip_prefix(dict_prefix) else { continue };
            let Some(tags) = self.dict.tags(tags_id) else { continue };
            let new_form = format!("{input_prefix}{ending}");
            results.push(Parsed::new(&new_form, lemma, tags));
        }

        results.sort_by(|a, b| a.word.cmp(&b.word));
        results
    }

    /// Derives the lemma by proportional substitution against the rule's
    /// template word, falling back to the word itself whenever the analogy
    /// does not hold.
    fn derive_lemma(&self, lower: &str, best: &PredictionCandidate) -> String {
        let template_forms = self.paradigm_forms(best.info.paradigm_id);
        let Some(lemma_id) = self.dict.paradigm_lemma_id(best.info.paradigm_id) else {
            return lower.to_string();
        };
        let Some(template_lemma) = self.dict.lemma(lemma_id) else {
            return lower.to_string();
        };
        let Some(template_word) = template_forms.get(best.info.form_idx as usize) else {
            return lower.to_string();
        };

        if template_word.chars().count() < best.suffix_len {
            // The template is shorter than the matched suffix.
            return lower.to_string();
        }
        let (oov_prefix, common_suffix) = split_at_suffix(lower, best.suffix_len);
        let Some(template_prefix) = template_word.strip_suffix(common_suffix) else {
            // The analogy does not extend to the template form.
            return lower.to_string();
        };
        let Some(lemma_ending) = template_lemma.strip_prefix(template_prefix) else {
            // Suppletive lemma; substitution would fabricate a stem.
            return lower.to_string();
        };
        format!("{oov_prefix}{lemma_ending}")
    }

    /// Probes the prediction graph with the word's suffixes of length 5
    /// down to 1 and returns the best-scored rule.
    ///
    /// Every matching suffix length contributes its rules; the winner is the
    /// one with the longest suffix, ties broken by the highest frequency.
    /// The sort is stable, so rules tied on both keys keep the probing
    /// order.
    fn find_best_prediction(&self, lower: &str) -> Option<PredictionCandidate> {
        let runes: Vec<char> = lower.chars().collect();
        let dawg = self.dict.predict_dawg();
        let payloads = self.dict.predict_payloads();

        let mut candidates: Vec<PredictionCandidate> = Vec::new();
        for suffix_len in (1..=MAX_SUFFIX_LEN).rev() {
            if suffix_len > runes.len() {
                continue;
            }

            let suffix = &runes[runes.len() - suffix_len..];
            let mut node_idx = 0u32;
            let mut found = true;
            for &ch in suffix {
                match dawg.find_child(node_idx, ch) {
                    Some(child) => node_idx = child,
                    None => {
                        found = false;
                        break;
                    }
                }
            }
            if !found {
                continue;
            }
            let Some(node) = dawg.node(node_idx) else { continue };
            if !node.is_final {
                continue;
            }

            for info in payloads.window(node.payload_idx, node.payload_len) {
                candidates.push(PredictionCandidate { info, suffix_len });
            }
        }

        if candidates.is_empty() {
            return None;
        }
        candidates.sort_by(|a, b| {
            b.suffix_len
                .cmp(&a.suffix_len)
                .then_with(|| b.info.frequency.cmp(&a.info.frequency))
        });
        candidates.into_iter().next()
    }
}

/// Splits `s` before its last `suffix_len` characters.
///
/// `suffix_len` must not exceed the character count of `s`; callers take
/// the suffix from `s` itself, which guarantees that.
fn split_at_suffix(s: &str, suffix_len: usize) -> (&str, &str) {
    let total = s.chars().count();
    let split = s
        .char_indices()
        .nth(total - suffix_len)
        .map_or(0, |(at, _)| at);
    s.split_at(split)
}
