//! Canonical poem record.
//!
//! Every reader produces [Poem]s, whatever the markup dialect of its corpus.
//! A poem owns its stanzas, a stanza its lines and a line its words, so that
//! any finer element can always be traced back to its ancestors.
use itertools::Itertools;
use serde::Serialize;

use crate::scansion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Poem {
    #[serde(rename = "poem_title")]
    pub title: String,
    pub author: String,
    pub manually_checked: bool,
    pub stanzas: Vec<Stanza>,
}

impl Poem {
    /// Build a poem, numbering `stanzas` by position starting at 1.
    pub fn new(
        title: String,
        author: String,
        manually_checked: bool,
        stanzas: Vec<(String, Vec<Line>)>,
    ) -> Self {
        let stanzas = stanzas
            .into_iter()
            .enumerate()
            .map(|(idx, (kind, lines))| Stanza::new(idx + 1, kind, lines))
            .collect();
        Self {
            title,
            author,
            manually_checked,
            stanzas,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stanza {
    #[serde(rename = "stanza_number")]
    number: String,
    #[serde(rename = "stanza_type")]
    kind: String,
    lines: Vec<Line>,
    #[serde(rename = "stanza_text")]
    text: String,
}

impl Stanza {
    fn new(number: usize, kind: String, lines: Vec<Line>) -> Self {
        let text = lines.iter().map(|line| line.text.as_str()).join("\n");
        Self {
            number: number.to_string(),
            kind,
            lines,
            text,
        }
    }

    /// 1-based position of the stanza in its poem.
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Lines joined by newlines.
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// Verbatim from the source, may be non numeric.
    #[serde(rename = "line_number")]
    pub number: String,
    #[serde(rename = "line_text")]
    pub text: String,
    pub metrical_pattern: String,
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    #[serde(rename = "word_text")]
    text: String,
    syllables: Vec<String>,
    has_synalepha: bool,
}

impl Word {
    pub fn from_syllables(syllables: Vec<String>) -> Self {
        let text = syllables.concat();
        let has_synalepha = scansion::has_synalepha(&text);
        Self {
            text,
            syllables,
            has_synalepha,
        }
    }

    /// Parse a word annotated with syllable boundaries (eg. `|ro|sa`).
    pub fn from_annotated(annotated: &str) -> Self {
        Self::from_syllables(scansion::split_syllables(annotated))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn syllables(&self) -> &[String] {
        &self.syllables
    }

    pub fn has_synalepha(&self) -> bool {
        self.has_synalepha
    }
}
