// Processed-document model: a Doc owns its source text and the tokens
// produced by the pipeline. Tokens are plain records; downstream stages
// fill in tags and lemmas in place.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Surface form, exactly as it appears in the source text.
    pub text: String,
    /// Whitespace between this token and the next one.
    pub whitespace: String,
    /// Byte offset of the token in the source text.
    pub idx: usize,
    /// Position of the token within the document.
    pub i: usize,
    pub is_alpha: bool,
    pub is_punct: bool,
    pub is_stop: bool,
    pub is_sent_start: bool,
    /// Fine-grained part-of-speech tag (Penn Treebank).
    pub tag: String,
    /// Coarse part-of-speech class (UPOS).
    pub pos: String,
    /// Dictionary base form.
    pub lemma: String,
}

impl Token {
    pub fn text_with_ws(&self) -> String {
        format!("{}{}", self.text, self.whitespace)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doc {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Doc {
    /// Sentences as token slices. A sentence runs from one token marked
    /// `is_sent_start` up to (excluding) the next such token.
    pub fn sentences(&self) -> Vec<&[Token]> {
        let mut out = Vec::new();
        let mut start = 0;
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 && token.is_sent_start {
                out.push(&self.tokens[start..i]);
                start = i;
            }
        }
        if start < self.tokens.len() {
            out.push(&self.tokens[start..]);
        }
        out
    }

    /// Reassemble the surface text of a span of tokens.
    pub fn span_text(span: &[Token]) -> String {
        let mut s = String::new();
        for token in span {
            s.push_str(&token.text_with_ws());
        }
        s.trim_end().to_string()
    }
}
