// Pipeline assembly: tokenizer, then an ordered list of named components.
// The stock order is sentencizer -> tagger -> lemmatizer; callers can slot
// custom components in front of any named stage.
use anyhow::{anyhow, Result};
use std::collections::HashSet;

use crate::nlp::doc::Doc;
use crate::nlp::tokenizer::Tokenizer;
use crate::nlp::{lemmatizer, sentences, tagger};

type Component = Box<dyn Fn(&mut Doc) + Send + Sync>;

/// Ruleset names accepted by `Pipeline::load`.
pub const KNOWN_PIPELINES: [&str; 3] = ["en", "english", "en_core_rules"];

pub struct Pipeline {
    tokenizer: Tokenizer,
    components: Vec<(String, Component)>,
    extra_stops: HashSet<String>,
}

impl Pipeline {
    /// Load a pipeline by ruleset name. Unknown names are the one failure a
    /// caller has to handle; the error lists what exists.
    pub fn load(name: &str) -> Result<Self> {
        if !KNOWN_PIPELINES.contains(&name.to_lowercase().as_str()) {
            return Err(anyhow!(
                "unknown pipeline '{}' (available: {})",
                name,
                KNOWN_PIPELINES.join(", ")
            ));
        }
        Ok(Self {
            tokenizer: Tokenizer::new(),
            components: vec![
                ("sentencizer".to_string(), component(sentences::segment)),
                ("tagger".to_string(), component(tagger::tag)),
                ("lemmatizer".to_string(), component(lemmatizer::lemmatize)),
            ],
            extra_stops: HashSet::new(),
        })
    }

    pub fn tokenizer_mut(&mut self) -> &mut Tokenizer {
        &mut self.tokenizer
    }

    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Append a component to the end of the pipeline.
    pub fn add_component<F>(&mut self, name: &str, f: F)
    where
        F: Fn(&mut Doc) + Send + Sync + 'static,
    {
        self.components.push((name.to_string(), Box::new(f)));
    }

    /// Insert a component in front of the stage called `before`.
    pub fn add_component_before<F>(&mut self, name: &str, before: &str, f: F) -> Result<()>
    where
        F: Fn(&mut Doc) + Send + Sync + 'static,
    {
        let pos = self
            .components
            .iter()
            .position(|(n, _)| n == before)
            .ok_or_else(|| anyhow!("no pipeline stage named '{}'", before))?;
        self.components.insert(pos, (name.to_string(), Box::new(f)));
        Ok(())
    }

    /// Flag extra words as stop words for documents from this pipeline.
    pub fn add_stop_words(&mut self, words: &[&str]) {
        for word in words {
            self.extra_stops.insert(word.to_lowercase());
        }
    }

    pub fn process(&self, text: &str) -> Doc {
        let mut doc = self.tokenizer.tokenize(text);
        if !self.extra_stops.is_empty() {
            for token in &mut doc.tokens {
                if self.extra_stops.contains(&token.text.to_lowercase()) {
                    token.is_stop = true;
                }
            }
        }
        for (_, f) in &self.components {
            f(&mut doc);
        }
        doc
    }
}

fn component(f: fn(&mut Doc)) -> Component {
    Box::new(f)
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("components", &self.component_names())
            .field("extra_stops", &self.extra_stops)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::sentences::delimiter_boundary;

    #[test]
    fn test_load_known_names() {
        assert!(Pipeline::load("en").is_ok());
        assert!(Pipeline::load("english").is_ok());
        assert!(Pipeline::load("EN").is_ok());
    }

    #[test]
    fn test_load_unknown_name() {
        let err = Pipeline::load("de_core_news_sm").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("de_core_news_sm"));
        assert!(msg.contains("en"));
    }

    #[test]
    fn test_process_fills_every_attribute() {
        let pipeline = Pipeline::load("en").unwrap();
        let doc = pipeline.process("Mara is organizing talks in London.");
        let organizing = doc.tokens.iter().find(|t| t.text == "organizing").unwrap();
        assert_eq!(organizing.tag, "VBG");
        assert_eq!(organizing.pos, "VERB");
        assert_eq!(organizing.lemma, "organize");
        let is = doc.tokens.iter().find(|t| t.text == "is").unwrap();
        assert!(is.is_stop);
        assert_eq!(is.lemma, "be");
        assert!(doc.tokens[0].is_sent_start);
    }

    #[test]
    fn test_default_component_order() {
        let pipeline = Pipeline::load("en").unwrap();
        assert_eq!(
            pipeline.component_names(),
            vec!["sentencizer", "tagger", "lemmatizer"]
        );
    }

    #[test]
    fn test_custom_boundary_before_sentencizer() {
        let mut pipeline = Pipeline::load("en").unwrap();
        pipeline
            .add_component_before("boundaries", "sentencizer", delimiter_boundary("..."))
            .unwrap();
        assert_eq!(pipeline.component_names()[0], "boundaries");

        let doc = pipeline.process("Can you, ... never mind. So, we should ...");
        let sents: Vec<String> = doc.sentences().iter().map(|s| Doc::span_text(s)).collect();
        assert_eq!(
            sents,
            vec!["Can you, ...", "never mind.", "So, we should ..."]
        );
    }

    #[test]
    fn test_without_custom_boundary_ellipsis_does_not_split() {
        let pipeline = Pipeline::load("en").unwrap();
        let doc = pipeline.process("Can you, ... never mind. So, we should ...");
        assert_eq!(doc.sentences().len(), 2);
    }

    #[test]
    fn test_add_component_before_unknown_stage() {
        let mut pipeline = Pipeline::load("en").unwrap();
        let result = pipeline.add_component_before("x", "parser", |_doc: &mut Doc| {});
        assert!(result.is_err());
    }

    #[test]
    fn test_appended_component_runs_last() {
        let mut pipeline = Pipeline::load("en").unwrap();
        pipeline.add_component("upper_lemmas", |doc: &mut Doc| {
            for token in &mut doc.tokens {
                token.lemma = token.lemma.to_uppercase();
            }
        });
        let doc = pipeline.process("she runs");
        assert_eq!(doc.tokens[1].lemma, "RUN");
    }

    #[test]
    fn test_custom_tokenizer_infix() {
        let mut pipeline = Pipeline::load("en").unwrap();
        pipeline.tokenizer_mut().add_infix("@").unwrap();
        let doc = pipeline.process("a London@based company");
        let texts: Vec<&str> = doc.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "London", "@", "based", "company"]);
    }

    #[test]
    fn test_extra_stop_words() {
        let mut pipeline = Pipeline::load("en").unwrap();
        pipeline.add_stop_words(&["piano"]);
        let doc = pipeline.process("the piano instructor");
        assert!(doc.tokens[1].is_stop);
        assert!(!doc.tokens[2].is_stop);
    }
}
