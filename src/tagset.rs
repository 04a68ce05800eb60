//! Parse records and grammatical tag decomposition.
//!
//! A tag string is a comma-separated list of grammemes. The first token
//! names the part of speech; the rest are dispatched into fixed categories
//! (animacy, aspect, case, ...). The vocabularies are closed enumerations
//! defined by the dictionary's linguistic schema, so dispatch is a plain
//! set membership test per category.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use hashbrown::HashSet;
use serde::Serialize;

static POS_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from_iter([
        "Существительное",
        "Прилагательное",
        "Глагол",
        "Наречие",
        "Причастие",
        "Деепричастие",
        "Местоимение",
        "Числительное",
        "Предлог",
        "Частица",
        "Союз",
        "Междометие",
        "Вводное слово",
    ])
});

static ANIMACY_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from_iter([
        "Одушевленное",
        "Неодушевленное",
        "одушевленное и неодушевленное",
    ])
});

static ASPECT_TAGS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from_iter(["Совершенный", "Несовершенный", "Двувидовой"]));

static CASE_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from_iter([
        "Именительный",
        "Родительный",
        "Дательный",
        "Винительный",
        "Творительный",
        "Предложный",
        "Звательный",
        "Местный",
        "Счетный",
        "Партитивный",
        "Несклоняемый",
        "Ждательный",
    ])
});

static GENDER_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from_iter(["Мужской", "Женский", "Средний", "Общий", "Парный"])
});

static MOOD_TAGS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from_iter(["Повелительное"]));

static NUMBER_TAGS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from_iter(["Единственное число", "Множественное число"]));

static PERSON_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from_iter(["1-е лицо", "2-е лицо", "3-е лицо", "нет лица"])
});

static TENSE_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from_iter(["Прошедшее", "Настоящее", "Будущее", "Будущее аналитическое"])
});

static TRANSITIVITY_TAGS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from_iter(["Переходный", "Непереходный", "Лабильный"]));

static VOICE_TAGS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from_iter(["Действительный", "Страдательный"]));

/// One morphological interpretation of a surface word.
///
/// Carries the raw tag string next to its decomposition into named
/// grammatical fields; grammemes outside the fixed categories accumulate in
/// `other_tags`. Serializes to the JSON shape hosts expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parsed {
    /// The surface word as passed by the caller.
    pub word: String,
    /// Dictionary form.
    pub lemma: String,
    /// The raw comma-separated tag string.
    pub tags: String,
    pub part_of_speech: String,
    pub animacy: String,
    pub aspect: String,
    pub case: String,
    pub gender: String,
    pub mood: String,
    pub number: String,
    pub person: String,
    pub tense: String,
    pub transitivity: String,
    pub voice: String,
    /// Grammemes that match no fixed category.
    pub other_tags: BTreeSet<String>,
}

impl Parsed {
    /// Builds a parse record, decomposing `tags` into the named fields.
    pub(crate) fn new(word: &str, lemma: &str, tags: &str) -> Self {
        let mut parsed = Self {
            word: word.to_string(),
            lemma: lemma.to_string(),
            tags: tags.to_string(),
            ..Self::default()
        };

        let grammemes: Vec<&str> = tags.split(',').collect();

        // The part of speech always comes first.
        if let Some(&first) = grammemes.first() {
            if POS_TAGS.contains(first) {
                parsed.part_of_speech = first.to_string();
            }
        }

        for &grammeme in &grammemes {
            if grammeme == parsed.part_of_speech {
                // Already handled above.
            } else if ANIMACY_TAGS.contains(grammeme) {
                parsed.animacy = grammeme.to_string();
            } else if ASPECT_TAGS.contains(grammeme) {
                parsed.aspect = grammeme.to_string();
            } else if CASE_TAGS.contains(grammeme) {
                parsed.case = grammeme.to_string();
            } else if GENDER_TAGS.contains(grammeme) {
                parsed.gender = grammeme.to_string();
            } else if MOOD_TAGS.contains(grammeme) {
                parsed.mood = grammeme.to_string();
            } else if NUMBER_TAGS.contains(grammeme) {
                parsed.number = grammeme.to_string();
            } else if PERSON_TAGS.contains(grammeme) {
                parsed.person = grammeme.to_string();
            } else if TENSE_TAGS.contains(grammeme) {
                parsed.tense = grammeme.to_string();
            } else if TRANSITIVITY_TAGS.contains(grammeme) {
                parsed.transitivity = grammeme.to_string();
            } else if VOICE_TAGS.contains(grammeme) {
                parsed.voice = grammeme.to_string();
            } else {
                parsed.other_tags.insert(grammeme.to_string());
            }
        }
        parsed
    }
}
