// Sentence boundary detection. The default segmenter only splits after
// sentence-final punctuation; extra delimiters (e.g. "...") come in as
// pipeline components built by `delimiter_boundary`.
use crate::nlp::doc::Doc;

const TERMINALS: [&str; 3] = [".", "!", "?"];

/// Default segmenter. Marks the first token and, after sentence-final
/// punctuation, the next non-punctuation token (so closing quotes and
/// brackets stay attached to the sentence they end). Marks set by earlier
/// components are kept.
pub fn segment(doc: &mut Doc) {
    if let Some(first) = doc.tokens.first_mut() {
        first.is_sent_start = true;
    }
    let mut pending = false;
    for i in 0..doc.tokens.len() {
        if i > 0 && pending && !doc.tokens[i].is_punct {
            doc.tokens[i].is_sent_start = true;
            pending = false;
        }
        if TERMINALS.contains(&doc.tokens[i].text.as_str()) {
            pending = true;
        }
    }
}

/// Build a boundary rule that treats `delimiter` as the end of a sentence:
/// whenever a token's text equals the delimiter, the next token is marked as
/// a sentence start. A trailing delimiter has no token to mark.
pub fn delimiter_boundary(delimiter: &str) -> impl Fn(&mut Doc) + Send + Sync {
    let delimiter = delimiter.to_string();
    move |doc: &mut Doc| {
        let len = doc.tokens.len();
        if len < 2 {
            return;
        }
        for i in 0..len - 1 {
            if doc.tokens[i].text == delimiter {
                doc.tokens[i + 1].is_sent_start = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tokenizer::Tokenizer;

    fn sentence_strings(doc: &Doc) -> Vec<String> {
        doc.sentences().iter().map(|s| Doc::span_text(s)).collect()
    }

    #[test]
    fn test_split_on_periods() {
        let mut doc = Tokenizer::new().tokenize("One here. Two here. Three.");
        segment(&mut doc);
        let sents = sentence_strings(&doc);
        assert_eq!(sents, vec!["One here.", "Two here.", "Three."]);
    }

    #[test]
    fn test_split_on_question_and_exclamation() {
        let mut doc = Tokenizer::new().tokenize("Really? Yes! Good.");
        segment(&mut doc);
        assert_eq!(doc.sentences().len(), 3);
    }

    #[test]
    fn test_ellipsis_not_a_default_boundary() {
        let mut doc =
            Tokenizer::new().tokenize("Can you, ... never mind, I forgot. So, do you think so?");
        segment(&mut doc);
        let sents = sentence_strings(&doc);
        assert_eq!(
            sents,
            vec!["Can you, ... never mind, I forgot.", "So, do you think so?"]
        );
    }

    #[test]
    fn test_delimiter_boundary_splits_at_ellipsis() {
        let mut doc =
            Tokenizer::new().tokenize("Can you, ... never mind, I forgot. So, we should ...");
        let rule = delimiter_boundary("...");
        rule(&mut doc);
        segment(&mut doc);
        let sents = sentence_strings(&doc);
        assert_eq!(
            sents,
            vec!["Can you, ...", "never mind, I forgot.", "So, we should ..."]
        );
    }

    #[test]
    fn test_trailing_delimiter_marks_nothing() {
        let mut doc = Tokenizer::new().tokenize("and so on ...");
        let rule = delimiter_boundary("...");
        rule(&mut doc);
        segment(&mut doc);
        assert_eq!(doc.sentences().len(), 1);
    }

    #[test]
    fn test_punctuation_after_terminal_does_not_start_sentence() {
        let mut doc = Tokenizer::new().tokenize("He left. \"Stay,\" she said.");
        segment(&mut doc);
        // The boundary lands on the first word, never on intervening
        // punctuation.
        let sents = doc.sentences();
        assert_eq!(sents.len(), 2);
        assert_eq!(sents[1][0].text, "Stay");
    }

    #[test]
    fn test_segment_empty_doc() {
        let mut doc = Tokenizer::new().tokenize("");
        segment(&mut doc);
        assert!(doc.sentences().is_empty());
    }
}
