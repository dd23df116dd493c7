// Rule-based tokenizer: whitespace segmentation, then per-chunk splitting of
// prefix/suffix punctuation and infix separators. Every token keeps its byte
// offset and trailing whitespace, so concatenating `text_with_ws` reproduces
// the input.
use anyhow::Result;
use regex::Regex;

use crate::nlp::doc::{Doc, Token};
use crate::nlp::stopwords;

pub struct Tokenizer {
    /// Patterns that split a chunk from the inside, keeping the separator as
    /// its own token. Matches only apply between alphanumeric neighbors.
    infixes: Vec<Regex>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            infixes: vec![Regex::new(r"[-\u{2013}\u{2014}]").expect("default infix pattern")],
        }
    }

    /// Register an extra infix pattern, e.g. `"@"` to split `user@host`.
    pub fn add_infix(&mut self, pattern: &str) -> Result<()> {
        self.infixes.push(Regex::new(pattern)?);
        Ok(())
    }

    pub fn tokenize(&self, text: &str) -> Doc {
        let mut pieces: Vec<(usize, String)> = Vec::new();
        for (start, chunk) in whitespace_spans(text) {
            self.split_chunk(start, chunk, &mut pieces);
        }

        let mut tokens = Vec::with_capacity(pieces.len());
        for (i, (idx, piece)) in pieces.iter().enumerate() {
            let end = idx + piece.len();
            let ws_end = pieces.get(i + 1).map(|(next, _)| *next).unwrap_or(text.len());
            let is_alpha = !piece.is_empty() && piece.chars().all(|c| c.is_alphabetic());
            let is_punct = !piece.is_empty() && piece.chars().all(is_punct_char);
            tokens.push(Token {
                text: piece.clone(),
                whitespace: text[end..ws_end].to_string(),
                idx: *idx,
                i,
                is_alpha,
                is_punct,
                is_stop: stopwords::is_stop(piece),
                is_sent_start: i == 0,
                tag: String::new(),
                pos: String::new(),
                lemma: String::new(),
            });
        }
        Doc {
            text: text.to_string(),
            tokens,
        }
    }

    fn split_chunk(&self, start: usize, chunk: &str, out: &mut Vec<(usize, String)>) {
        let mut lo = 0usize;
        let mut hi = chunk.len();
        let mut suffixes: Vec<(usize, String)> = Vec::new();

        // Trailing punctuation, innermost last. An ellipsis comes off as one
        // piece so `wait...` becomes [wait, ...] and never [wait, ., ., .].
        loop {
            let core = &chunk[lo..hi];
            if core.is_empty() || core == "..." {
                break;
            }
            if core.ends_with("...") && core.len() > 3 {
                hi -= 3;
                suffixes.push((start + hi, "...".to_string()));
                continue;
            }
            let c = core.chars().last().unwrap();
            if is_punct_char(c) && core.chars().count() > 1 {
                hi -= c.len_utf8();
                suffixes.push((start + hi, c.to_string()));
                continue;
            }
            break;
        }

        // Leading punctuation, one character at a time.
        loop {
            let core = &chunk[lo..hi];
            if core.is_empty() || core == "..." {
                break;
            }
            if core.starts_with("...") && core.len() > 3 {
                out.push((start + lo, "...".to_string()));
                lo += 3;
                continue;
            }
            let c = core.chars().next().unwrap();
            if is_punct_char(c) && core.chars().count() > 1 {
                out.push((start + lo, c.to_string()));
                lo += c.len_utf8();
                continue;
            }
            break;
        }

        self.split_infixes(start + lo, &chunk[lo..hi], out);
        out.extend(suffixes.into_iter().rev());
    }

    fn split_infixes(&self, start: usize, core: &str, out: &mut Vec<(usize, String)>) {
        for re in &self.infixes {
            for m in re.find_iter(core) {
                if m.start() == 0 || m.end() == core.len() {
                    continue;
                }
                let before = &core[..m.start()];
                let after = &core[m.end()..];
                let prev_ok = before.chars().last().is_some_and(|c| c.is_alphanumeric());
                let next_ok = after.chars().next().is_some_and(|c| c.is_alphanumeric());
                if !prev_ok || !next_ok {
                    continue;
                }
                self.split_infixes(start, before, out);
                out.push((start + m.start(), m.as_str().to_string()));
                self.split_infixes(start + m.end(), after, out);
                return;
            }
        }
        if !core.is_empty() {
            out.push((start, core.to_string()));
        }
    }
}

fn whitespace_spans(text: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, &text[s..]));
    }
    spans
}

pub(crate) fn is_punct_char(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '…' | '“' | '”' | '‘' | '’' | '«' | '»' | '–' | '—' | '¿' | '¡'
        )
}
