// Lemmatization with an irregular-form lookup and tag-aware suffix rules.
// This is a lightweight rule-based implementation; it covers regular
// inflection and the common irregular verbs, not the long tail a trained
// model would.
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::nlp::doc::Doc;

static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        // be / have / do
        ("am", "be"),
        ("is", "be"),
        ("are", "be"),
        ("was", "be"),
        ("were", "be"),
        ("been", "be"),
        ("being", "be"),
        ("has", "have"),
        ("had", "have"),
        ("having", "have"),
        ("does", "do"),
        ("did", "do"),
        ("done", "do"),
        ("doing", "do"),
        // common irregular verbs
        ("went", "go"),
        ("gone", "go"),
        ("goes", "go"),
        ("said", "say"),
        ("made", "make"),
        ("took", "take"),
        ("taken", "take"),
        ("came", "come"),
        ("coming", "come"),
        ("saw", "see"),
        ("seen", "see"),
        ("got", "get"),
        ("gotten", "get"),
        ("gave", "give"),
        ("given", "give"),
        ("knew", "know"),
        ("known", "know"),
        ("thought", "think"),
        ("found", "find"),
        ("told", "tell"),
        ("became", "become"),
        ("left", "leave"),
        ("felt", "feel"),
        ("brought", "bring"),
        ("began", "begin"),
        ("begun", "begin"),
        ("kept", "keep"),
        ("held", "hold"),
        ("wrote", "write"),
        ("written", "write"),
        ("stood", "stand"),
        ("heard", "hear"),
        ("meant", "mean"),
        ("met", "meet"),
        ("ran", "run"),
        ("paid", "pay"),
        ("sat", "sit"),
        ("spoke", "speak"),
        ("spoken", "speak"),
        ("led", "lead"),
        ("grew", "grow"),
        ("grown", "grow"),
        ("lost", "lose"),
        ("fell", "fall"),
        ("fallen", "fall"),
        ("sent", "send"),
        ("built", "build"),
        ("understood", "understand"),
        ("drew", "draw"),
        ("drawn", "draw"),
        ("broke", "break"),
        ("broken", "break"),
        ("spent", "spend"),
        // irregular plurals
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "person"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        // irregular comparison
        ("better", "good"),
        ("best", "good"),
        ("worse", "bad"),
        ("worst", "bad"),
    ]
    .iter()
    .copied()
    .collect()
});

/// Stem endings that take back a silent `e` after `-ing`/`-ed` stripping
/// (organiz- -> organize, situat- -> situate).
const E_RESTORE: [&str; 11] = [
    "at", "iz", "ak", "uc", "tl", "iv", "ut", "id", "ir", "ur", "om",
];

/// Final consonants that get doubled before `-ing`/`-ed` (run -> running).
/// `l` is excluded so `enrolled` keeps its double `l`.
const UNDOUBLE: [char; 8] = ['b', 'd', 'g', 'm', 'n', 'p', 'r', 't'];

pub fn lemmatize(doc: &mut Doc) {
    let lemmas: Vec<String> = doc
        .tokens
        .iter()
        .map(|t| lemma_of(&t.text, &t.tag))
        .collect();
    for (token, lemma) in doc.tokens.iter_mut().zip(lemmas) {
        token.lemma = lemma;
    }
}

/// Lemma of a single word given its fine-grained tag. Proper nouns keep
/// their case; everything else lemmatizes to lowercase.
pub fn lemma_of(text: &str, tag: &str) -> String {
    match tag {
        "NNP" => return text.to_string(),
        "NNPS" => return strip_plural(text),
        _ => {}
    }
    let lower = text.to_lowercase();
    if let Some(lemma) = IRREGULAR.get(lower.as_str()) {
        return (*lemma).to_string();
    }
    if tag.starts_with("VB") {
        return verb_lemma(&lower);
    }
    if tag == "NNS" {
        return strip_plural(&lower);
    }
    lower
}

fn verb_lemma(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ing") {
        if stem.len() > 1 {
            return restore_stem(stem);
        }
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if stem.len() > 1 {
            if let Some(base) = stem.strip_suffix('i') {
                return format!("{base}y");
            }
            return restore_stem(stem);
        }
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if ends_in_sibilant(stem) {
            return stem.to_string();
        }
    }
    if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n >= 2 && chars[n - 1] == chars[n - 2] && UNDOUBLE.contains(&chars[n - 1]) {
        return stem[..stem.len() - chars[n - 1].len_utf8()].to_string();
    }
    if E_RESTORE.iter().any(|suffix| stem.ends_with(suffix)) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn strip_plural(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if ends_in_sibilant(stem) {
            return stem.to_string();
        }
    }
    if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn ends_in_sibilant(stem: &str) -> bool {
    stem.ends_with("ss")
        || stem.ends_with('x')
        || stem.ends_with('z')
        || stem.ends_with("ch")
        || stem.ends_with("sh")
}
