// Part-of-speech tagging with a closed-class lexicon and suffix heuristics.
// Emits Penn Treebank tags plus a coarse UPOS class per token; `explain`
// turns a tag into a human-readable description.
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::nlp::doc::Doc;

type TagPair = (&'static str, &'static str);

static LEXICON: Lazy<HashMap<&'static str, TagPair>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let classes: [(&[&str], TagPair); 14] = [
        (
            &[
                "a", "an", "the", "this", "that", "these", "those", "each", "every", "either",
                "neither", "some", "any", "no", "all", "both",
            ],
            ("DT", "DET"),
        ),
        (
            &[
                "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "himself",
                "herself", "itself", "themselves", "myself", "yourself", "yourselves", "ourselves",
            ],
            ("PRP", "PRON"),
        ),
        (
            &[
                "my", "your", "his", "her", "its", "our", "their", "mine", "yours", "hers",
                "ours", "theirs",
            ],
            ("PRP$", "PRON"),
        ),
        (
            &[
                "in", "on", "at", "by", "of", "off", "over", "under", "with", "within", "without",
                "about", "against", "between", "among", "into", "through", "during", "before",
                "after", "above", "below", "from", "since", "until", "upon", "across", "around",
                "behind", "beyond", "near", "because", "while", "than", "whether", "although",
                "though", "if", "as", "per", "up", "down", "out",
            ],
            ("IN", "ADP"),
        ),
        (&["and", "but", "or", "nor", "so", "yet"], ("CC", "CCONJ")),
        (&["to"], ("TO", "PART")),
        (
            &[
                "will", "would", "can", "could", "shall", "should", "may", "might", "must",
            ],
            ("MD", "AUX"),
        ),
        (&["there"], ("EX", "PRON")),
        (
            &[
                "not", "very", "also", "just", "never", "always", "often", "currently", "here",
                "now", "then", "too", "again", "still", "already", "soon", "perhaps", "maybe",
                "really", "quite", "rather", "almost", "away",
            ],
            ("RB", "ADV"),
        ),
        (&["who", "whom", "what"], ("WP", "PRON")),
        (&["which"], ("WDT", "DET")),
        (&["whose"], ("WP$", "PRON")),
        (&["when", "where", "why", "how"], ("WRB", "ADV")),
        (&["oh", "yes", "hey", "wow", "hello"], ("UH", "INTJ")),
    ];
    for (words, pair) in classes {
        for word in words {
            m.insert(*word, pair);
        }
    }
    // auxiliaries carry their inflected fine tag
    let aux: [(&str, &str); 16] = [
        ("am", "VBP"),
        ("is", "VBZ"),
        ("are", "VBP"),
        ("was", "VBD"),
        ("were", "VBD"),
        ("be", "VB"),
        ("been", "VBN"),
        ("being", "VBG"),
        ("has", "VBZ"),
        ("have", "VBP"),
        ("had", "VBD"),
        ("having", "VBG"),
        ("do", "VBP"),
        ("does", "VBZ"),
        ("did", "VBD"),
        ("doing", "VBG"),
    ];
    for (word, tag) in aux {
        m.insert(word, (tag, "AUX"));
    }
    m
});

static TAG_EXPLANATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("CC", "conjunction, coordinating"),
        ("CD", "cardinal number"),
        ("DT", "determiner"),
        ("EX", "existential there"),
        ("FW", "foreign word"),
        ("HYPH", "punctuation mark, hyphen"),
        ("IN", "conjunction, subordinating or preposition"),
        ("JJ", "adjective"),
        ("JJR", "adjective, comparative"),
        ("JJS", "adjective, superlative"),
        ("MD", "verb, modal auxiliary"),
        ("NN", "noun, singular or mass"),
        ("NNS", "noun, plural"),
        ("NNP", "noun, proper singular"),
        ("NNPS", "noun, proper plural"),
        ("PDT", "predeterminer"),
        ("PRP", "pronoun, personal"),
        ("PRP$", "pronoun, possessive"),
        ("RB", "adverb"),
        ("RBR", "adverb, comparative"),
        ("RBS", "adverb, superlative"),
        ("RP", "adverb, particle"),
        ("SYM", "symbol"),
        ("TO", "infinitival \"to\""),
        ("UH", "interjection"),
        ("VB", "verb, base form"),
        ("VBD", "verb, past tense"),
        ("VBG", "verb, gerund or present participle"),
        ("VBN", "verb, past participle"),
        ("VBP", "verb, non-3rd person singular present"),
        ("VBZ", "verb, 3rd person singular present"),
        ("WDT", "wh-determiner"),
        ("WP", "wh-pronoun, personal"),
        ("WP$", "wh-pronoun, possessive"),
        ("WRB", "wh-adverb"),
        (".", "punctuation mark, sentence closer"),
        (",", "punctuation mark, comma"),
        (":", "punctuation mark, colon or ellipsis"),
        ("``", "opening quotation mark"),
        ("''", "closing quotation mark"),
        ("-LRB-", "left round bracket"),
        ("-RRB-", "right round bracket"),
        ("$", "symbol, currency"),
        ("NFP", "superfluous punctuation"),
    ]
    .iter()
    .copied()
    .collect()
});

/// Human-readable description of a fine-grained tag.
pub fn explain(tag: &str) -> Option<&'static str> {
    TAG_EXPLANATIONS.get(tag).copied()
}

pub fn tag(doc: &mut Doc) {
    let mut quote_open = false;
    let mut results: Vec<TagPair> = Vec::with_capacity(doc.tokens.len());
    for i in 0..doc.tokens.len() {
        let token = &doc.tokens[i];
        let pair = if token.is_punct {
            punct_tag(&token.text, &mut quote_open)
        } else if is_numeric(&token.text) {
            ("CD", "NUM")
        } else {
            let lower = token.text.to_lowercase();
            if let Some(pair) = LEXICON.get(lower.as_str()) {
                *pair
            } else if is_proper(doc, i) {
                ("NNP", "PROPN")
            } else {
                suffix_tag(&lower)
            }
        };
        results.push(pair);
    }
    for (token, (tag, pos)) in doc.tokens.iter_mut().zip(results) {
        token.tag = tag.to_string();
        token.pos = pos.to_string();
    }
}

/// Capitalized words are proper nouns, except at a sentence start where the
/// capitalization is ambiguous; there the word only counts as proper when
/// the following token is capitalized too ("Great Piano Academy").
fn is_proper(doc: &Doc, i: usize) -> bool {
    let token = &doc.tokens[i];
    if !token.is_alpha || !starts_upper(&token.text) {
        return false;
    }
    if !token.is_sent_start {
        return true;
    }
    doc.tokens
        .get(i + 1)
        .map(|next| next.is_alpha && starts_upper(&next.text))
        .unwrap_or(false)
}

fn starts_upper(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_uppercase())
}

fn is_numeric(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_digit())
        && text.replace(',', "").parse::<f64>().is_ok()
}

fn punct_tag(text: &str, quote_open: &mut bool) -> TagPair {
    match text {
        "." | "!" | "?" => (".", "PUNCT"),
        "," => (",", "PUNCT"),
        ";" | ":" | "..." | "…" => (":", "PUNCT"),
        "-" | "–" | "—" | "--" => ("HYPH", "PUNCT"),
        "(" | "[" | "{" => ("-LRB-", "PUNCT"),
        ")" | "]" | "}" => ("-RRB-", "PUNCT"),
        "\"" | "'" | "`" | "“" | "”" | "‘" | "’" => {
            *quote_open = !*quote_open;
            if *quote_open {
                ("``", "PUNCT")
            } else {
                ("''", "PUNCT")
            }
        }
        "$" | "€" | "£" | "#" => ("$", "SYM"),
        _ => ("SYM", "SYM"),
    }
}

fn suffix_tag(lower: &str) -> TagPair {
    if lower.len() > 4 && lower.ends_with("ing") {
        return ("VBG", "VERB");
    }
    if lower.len() > 3 && lower.ends_with("ed") {
        return ("VBD", "VERB");
    }
    if lower.len() > 3 && lower.ends_with("ly") {
        return ("RB", "ADV");
    }
    const NOUN_SUFFIXES: [&str; 10] = [
        "tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship", "ism", "ure",
    ];
    if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return ("NN", "NOUN");
    }
    const ADJ_SUFFIXES: [&str; 8] = ["ous", "ful", "ble", "ive", "ic", "ish", "ary", "al"];
    if lower.len() > 4 && ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return ("JJ", "ADJ");
    }
    if lower.len() > 4 && lower.ends_with("ies") {
        return ("NNS", "NOUN");
    }
    if lower.len() > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return ("NNS", "NOUN");
    }
    ("NN", "NOUN")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::sentences;
    use crate::nlp::tokenizer::Tokenizer;

    fn tagged(text: &str) -> Doc {
        let mut doc = Tokenizer::new().tokenize(text);
        sentences::segment(&mut doc);
        tag(&mut doc);
        doc
    }

    fn tag_of<'a>(doc: &'a Doc, text: &str) -> &'a str {
        &doc.tokens.iter().find(|t| t.text == text).unwrap().tag
    }

    #[test]
    fn test_closed_class_words() {
        let doc = tagged("The developer works for a company.");
        assert_eq!(tag_of(&doc, "The"), "DT");
        assert_eq!(tag_of(&doc, "for"), "IN");
        assert_eq!(tag_of(&doc, "a"), "DT");
    }

    #[test]
    fn test_auxiliaries() {
        let doc = tagged("He is interested and they were helping.");
        let is = doc.tokens.iter().find(|t| t.text == "is").unwrap();
        assert_eq!(is.tag, "VBZ");
        assert_eq!(is.pos, "AUX");
        assert_eq!(tag_of(&doc, "were"), "VBD");
    }

    #[test]
    fn test_suffix_heuristics() {
        let doc = tagged("she was quickly organizing wonderful conferences");
        assert_eq!(tag_of(&doc, "quickly"), "RB");
        assert_eq!(tag_of(&doc, "organizing"), "VBG");
        assert_eq!(tag_of(&doc, "wonderful"), "JJ");
        assert_eq!(tag_of(&doc, "conferences"), "NNS");
    }

    #[test]
    fn test_proper_noun_mid_sentence() {
        let doc = tagged("a developer from London");
        let london = doc.tokens.iter().find(|t| t.text == "London").unwrap();
        assert_eq!(london.tag, "NNP");
        assert_eq!(london.pos, "PROPN");
    }

    #[test]
    fn test_sentence_initial_name_pair() {
        let doc = tagged("Mara Voss is a developer.");
        assert_eq!(tag_of(&doc, "Mara"), "NNP");
        assert_eq!(tag_of(&doc, "Voss"), "NNP");
    }

    #[test]
    fn test_sentence_initial_plain_word_is_not_proper() {
        let doc = tagged("Developers write code.");
        assert_eq!(tag_of(&doc, "Developers"), "NNS");
    }

    #[test]
    fn test_cardinal_numbers() {
        let doc = tagged("a conference on 21 July 2019");
        assert_eq!(tag_of(&doc, "21"), "CD");
        assert_eq!(tag_of(&doc, "2019"), "CD");
        assert_eq!(tag_of(&doc, "July"), "NNP");
    }

    #[test]
    fn test_punctuation_tags() {
        let doc = tagged("Wait, stop: now!");
        assert_eq!(tag_of(&doc, ","), ",");
        assert_eq!(tag_of(&doc, ":"), ":");
        assert_eq!(tag_of(&doc, "!"), ".");
    }

    #[test]
    fn test_ellipsis_tag() {
        let doc = tagged("well ... fine");
        assert_eq!(tag_of(&doc, "..."), ":");
    }

    #[test]
    fn test_quote_pairing() {
        let doc = tagged("titled \"Use cases\" today");
        let quotes: Vec<&str> = doc
            .tokens
            .iter()
            .filter(|t| t.text == "\"")
            .map(|t| t.tag.as_str())
            .collect();
        assert_eq!(quotes, vec!["``", "''"]);
    }

    #[test]
    fn test_default_is_noun() {
        let doc = tagged("the glorp");
        assert_eq!(tag_of(&doc, "glorp"), "NN");
    }

    #[test]
    fn test_explain_known_tags() {
        assert_eq!(explain("VBZ"), Some("verb, 3rd person singular present"));
        assert_eq!(explain("NNP"), Some("noun, proper singular"));
        assert_eq!(explain("DT"), Some("determiner"));
    }

    #[test]
    fn test_explain_unknown_tag() {
        assert_eq!(explain("XYZ"), None);
    }
}
