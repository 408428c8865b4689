/*! Granularity reduction

Flattens a canonical [Poem] into rows at a given level of its hierarchy.
Each row repeats the context of its ancestors (poem title, author, manual check flag, and so on)
so that it can be consumed on its own.

Rows are derived by walking the poem tree, so a word row is always attached to the line that owns
the word, whatever the line numbering found in the source.
!*/
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::poem::{Line, Poem, Stanza, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Stanza,
    Line,
    Word,
    Syllable,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Stanza,
        Granularity::Line,
        Granularity::Word,
        Granularity::Syllable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Stanza => "stanza",
            Granularity::Line => "line",
            Granularity::Word => "word",
            Granularity::Syllable => "syllable",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Granularity::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| Error::Custom(format!("unknown granularity '{}'", s)))
    }
}

/// Poem level fields, repeated on every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoemContext {
    pub poem_title: String,
    pub author: String,
    pub manually_checked: bool,
}

impl From<&Poem> for PoemContext {
    fn from(poem: &Poem) -> Self {
        Self {
            poem_title: poem.title.clone(),
            author: poem.author.clone(),
            manually_checked: poem.manually_checked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StanzaRow {
    pub stanza_number: String,
    pub stanza_type: String,
    pub stanza_text: String,
    #[serde(flatten)]
    pub poem: PoemContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRow {
    pub line_number: String,
    pub line_text: String,
    pub metrical_pattern: String,
    /// Only set (and empty) for lines without words.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
    #[serde(flatten)]
    pub stanza: StanzaRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRow {
    pub word_text: String,
    pub line_number: String,
    pub line_text: String,
    pub metrical_pattern: String,
    pub stanza_number: String,
    pub stanza_type: String,
    #[serde(flatten)]
    pub poem: PoemContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyllableRow {
    pub syllable: String,
    #[serde(flatten)]
    pub word: WordRow,
}

/// Rows of a single poem at one granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rows {
    Stanza(Vec<StanzaRow>),
    Line(Vec<LineRow>),
    Word(Vec<WordRow>),
    Syllable(Vec<SyllableRow>),
}

impl Rows {
    pub fn granularity(&self) -> Granularity {
        match self {
            Rows::Stanza(_) => Granularity::Stanza,
            Rows::Line(_) => Granularity::Line,
            Rows::Word(_) => Granularity::Word,
            Rows::Syllable(_) => Granularity::Syllable,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Rows::Stanza(r) => r.len(),
            Rows::Line(r) => r.len(),
            Rows::Word(r) => r.len(),
            Rows::Syllable(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reduce `poem` to rows of the given granularity.
pub fn reduce(poem: &Poem, granularity: Granularity) -> Rows {
    match granularity {
        Granularity::Stanza => Rows::Stanza(stanza_rows(poem)),
        Granularity::Line => Rows::Line(line_rows(poem)),
        Granularity::Word => Rows::Word(word_rows(poem)),
        Granularity::Syllable => Rows::Syllable(syllable_rows(poem)),
    }
}

fn stanza_row(context: &PoemContext, stanza: &Stanza) -> StanzaRow {
    StanzaRow {
        stanza_number: stanza.number().to_string(),
        stanza_type: stanza.kind().to_string(),
        stanza_text: stanza.text().to_string(),
        poem: context.clone(),
    }
}

fn word_row(context: &PoemContext, stanza: &Stanza, line: &Line, word: &Word) -> WordRow {
    WordRow {
        word_text: word.text().to_string(),
        line_number: line.number.clone(),
        line_text: line.text.clone(),
        metrical_pattern: line.metrical_pattern.clone(),
        stanza_number: stanza.number().to_string(),
        stanza_type: stanza.kind().to_string(),
        poem: context.clone(),
    }
}

/// One row per stanza.
pub fn stanza_rows(poem: &Poem) -> Vec<StanzaRow> {
    let context = PoemContext::from(poem);
    poem.stanzas
        .iter()
        .map(|stanza| stanza_row(&context, stanza))
        .collect()
}

/// One row per line, carrying its stanza row.
pub fn line_rows(poem: &Poem) -> Vec<LineRow> {
    let context = PoemContext::from(poem);
    poem.stanzas
        .iter()
        .flat_map(|stanza| {
            let stanza_row = stanza_row(&context, stanza);
            stanza.lines().iter().map(move |line| LineRow {
                line_number: line.number.clone(),
                line_text: line.text.clone(),
                metrical_pattern: line.metrical_pattern.clone(),
                words: line.words.is_empty().then(Vec::new),
                stanza: stanza_row.clone(),
            })
        })
        .collect()
}

/// Words of the poem in document order, each with its row.
fn word_entries(poem: &Poem) -> Vec<(&Word, WordRow)> {
    let context = PoemContext::from(poem);
    let mut entries = Vec::new();
    for stanza in &poem.stanzas {
        for line in stanza.lines() {
            for word in &line.words {
                entries.push((word, word_row(&context, stanza, line, word)));
            }
        }
    }
    entries
}

/// One row per word. Stanza text is not repeated at this level.
pub fn word_rows(poem: &Poem) -> Vec<WordRow> {
    word_entries(poem).into_iter().map(|(_, row)| row).collect()
}

/// One row per syllable, carrying its word row.
pub fn syllable_rows(poem: &Poem) -> Vec<SyllableRow> {
    word_entries(poem)
        .into_iter()
        .flat_map(|(word, row)| {
            word.syllables().iter().map(move |syllable| SyllableRow {
                syllable: syllable.clone(),
                word: row.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(number: &str, text: &str, met: &str, words: &[&str]) -> Line {
        Line {
            number: number.to_string(),
            text: text.to_string(),
            metrical_pattern: met.to_string(),
            words: words.iter().map(|w| Word::from_annotated(w)).collect(),
        }
    }

    fn rosa() -> Poem {
        Poem::new(
            "La rosa".to_string(),
            "Anónimo".to_string(),
            true,
            vec![
                (
                    "copla".to_string(),
                    vec![line("1", "Soy una rosa", "++++", &["Soy", "u|na", "ro|sa"])],
                ),
                (
                    "copla".to_string(),
                    vec![line("2", "que muere", "++", &["que", "mue|re"])],
                ),
            ],
        )
    }

    #[test]
    fn granularity_names() {
        assert_eq!("syllable".parse::<Granularity>().unwrap(), Granularity::Syllable);
        assert!("verse".parse::<Granularity>().is_err());
        assert_eq!(Granularity::Line.to_string(), "line");
    }

    #[test]
    fn stanzas() {
        let rows = stanza_rows(&rosa());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].stanza_number, "1");
        assert_eq!(rows[1].stanza_number, "2");
        assert_eq!(rows[0].stanza_text, "Soy una rosa");
        assert_eq!(rows[1].stanza_text, "que muere");
        assert_eq!(rows[0].poem, rows[1].poem);
        assert!(rows[0].poem.manually_checked);
    }

    #[test]
    fn lines() {
        let rows = line_rows(&rosa());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].line_text, "que muere");
        assert_eq!(rows[1].stanza.stanza_number, "2");
        assert!(rows[0].words.is_none());
    }

    #[test]
    fn line_without_words() {
        let poem = Poem::new(
            "t".to_string(),
            "a".to_string(),
            false,
            vec![("x".to_string(), vec![line("1", "…", "+", &[])])],
        );
        let rows = line_rows(&poem);
        assert_eq!(rows[0].words, Some(vec![]));
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["words"], serde_json::json!([]));
        assert!(word_rows(&poem).is_empty());
    }

    #[test]
    fn words_follow_owning_line() {
        let rows = word_rows(&rosa());
        let texts: Vec<&str> = rows.iter().map(|r| r.word_text.as_str()).collect();
        assert_eq!(texts, vec!["Soy", "una", "rosa", "que", "muere"]);
        assert_eq!(rows[3].line_text, "que muere");
        assert_eq!(rows[3].stanza_number, "2");
    }

    #[test]
    fn words_with_sparse_line_numbers() {
        let poem = Poem::new(
            "t".to_string(),
            "a".to_string(),
            false,
            vec![(
                "x".to_string(),
                vec![
                    line("10", "uno", "+", &["u|no"]),
                    line("v", "dos", "+", &["dos"]),
                ],
            )],
        );
        let rows = word_rows(&poem);
        assert_eq!(rows[0].line_text, "uno");
        assert_eq!(rows[1].line_number, "v");
        assert_eq!(rows[1].line_text, "dos");
    }

    #[test]
    fn syllables() {
        let rows = syllable_rows(&rosa());
        let syllables: Vec<&str> = rows.iter().map(|r| r.syllable.as_str()).collect();
        assert_eq!(syllables, vec!["Soy", "u", "na", "ro", "sa", "que", "mue", "re"]);
        assert_eq!(rows[4].word.word_text, "rosa");
        assert_eq!(rows[7].word.line_number, "2");
    }

    #[test]
    fn context_never_drifts() {
        let poem = rosa();
        let context = PoemContext::from(&poem);
        assert!(syllable_rows(&poem).iter().all(|r| r.word.poem == context));
        assert!(line_rows(&poem).iter().all(|r| r.stanza.poem == context));
    }

    #[test]
    fn flattened_keys() {
        let rows = syllable_rows(&rosa());
        let json = serde_json::to_value(&rows[0]).unwrap();
        for key in [
            "syllable",
            "word_text",
            "line_number",
            "stanza_type",
            "poem_title",
            "author",
            "manually_checked",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json.get("stanza_text").is_none());
    }

    #[test]
    fn reduce_dispatch() {
        let poem = rosa();
        for g in Granularity::ALL {
            assert_eq!(reduce(&poem, g).granularity(), g);
        }
        assert_eq!(reduce(&poem, Granularity::Word).len(), 5);
    }
}
