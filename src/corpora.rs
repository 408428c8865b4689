//! Corpus registry.
//!
//! The registry lists every corpus that can be downloaded and parsed, the reader to use,
//! and the granularities it can be reduced to. A default registry is embedded in the binary,
//! and another one can be loaded from a TOML file.
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::granularity::Granularity;
use crate::readers::ReaderKind;

const DEFAULT_CORPORA: &str = include_str!("../corpora.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusDescriptor {
    pub name: String,
    pub folder_name: String,
    pub url: String,
    pub reader: ReaderKind,
    #[serde(rename = "granularity")]
    pub granularities: Vec<Granularity>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub doc_quantity: Option<u64>,
    #[serde(default)]
    pub word_quantity: Option<u64>,
}

impl CorpusDescriptor {
    /// Get the requested granularity if this corpus supports it.
    ///
    /// Unknown granularity names are simply unsupported.
    pub fn granularity(&self, name: &str) -> Option<Granularity> {
        name.parse::<Granularity>()
            .ok()
            .filter(|g| self.granularities.contains(g))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpora {
    #[serde(rename = "corpus", default)]
    corpora: Vec<CorpusDescriptor>,
}

impl Corpora {
    pub fn new(corpora: Vec<CorpusDescriptor>) -> Self {
        Self { corpora }
    }

    pub fn from_toml(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        debug!("loading corpora registry from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Get a corpus by its 1-based identifier.
    pub fn get(&self, id: usize) -> Option<&CorpusDescriptor> {
        id.checked_sub(1).and_then(|idx| self.corpora.get(idx))
    }

    /// Iterate over `(id, corpus)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &CorpusDescriptor)> {
        self.corpora.iter().enumerate().map(|(idx, c)| (idx + 1, c))
    }

    pub fn len(&self) -> usize {
        self.corpora.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpora.is_empty()
    }
}

impl Default for CorpusDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            folder_name: String::new(),
            url: String::new(),
            reader: ReaderKind::Plsdo,
            granularities: Granularity::ALL.to_vec(),
            license: None,
            size: None,
            doc_quantity: None,
            word_quantity: None,
        }
    }
}

/// Registry shipped with the binary.
pub fn default_corpora() -> Result<Corpora, Error> {
    Corpora::from_toml(DEFAULT_CORPORA)
}
