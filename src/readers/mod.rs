/*! Corpus readers

A reader turns the source documents of one corpus dialect into canonical [Poem]s.
Readers are selected statically through [ReaderKind], which is what the corpus registry stores.
!*/
mod plsdo;

use std::path::{Path, PathBuf};

use log::{debug, error};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::poem::Poem;

pub use plsdo::Plsdo;

/// Identifies a reader implementation in the corpus registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderKind {
    /// TEI verse from "Poesía Lírica Castellana del Siglo de Oro".
    Plsdo,
}

impl ReaderKind {
    pub fn reader(&self) -> &'static dyn Reader {
        match self {
            ReaderKind::Plsdo => &Plsdo,
        }
    }
}

/// Poems read from a corpus folder, along with documents that could not be parsed.
#[derive(Debug, Default)]
pub struct Features {
    pub poems: Vec<Poem>,
    pub failures: Vec<(PathBuf, Error)>,
}

pub trait Reader: Sync {
    /// File name pattern of source documents, matched at any depth.
    fn extension_pattern(&self) -> &'static str;

    /// Parse a single source document.
    fn parse_file(&self, path: &Path) -> Result<Poem, Error>;

    /// List source documents under `src`, sorted by path.
    fn source_files(&self, src: &Path) -> Result<Vec<PathBuf>, Error> {
        let root = src
            .to_str()
            .ok_or_else(|| Error::Custom(format!("{:?} is not valid unicode", src)))?;
        let pattern = format!(
            "{}/**/{}",
            glob::Pattern::escape(root),
            self.extension_pattern()
        );
        debug!("looking for documents matching {}", pattern);

        let mut files = glob::glob(&pattern)?.collect::<Result<Vec<_>, _>>()?;
        files.sort();
        Ok(files)
    }

    /// Parse every source document under `src`.
    ///
    /// A document failing to parse does not stop the others:
    /// its error is logged and kept in [Features::failures].
    fn get_features(&self, src: &Path) -> Result<Features, Error> {
        let files = self.source_files(src)?;
        debug!("{} documents found in {:?}", files.len(), src);

        // par_iter keeps the file order on collect
        let results: Vec<(PathBuf, Result<Poem, Error>)> = files
            .into_par_iter()
            .map(|path| {
                let poem = self.parse_file(&path);
                (path, poem)
            })
            .collect();

        let mut features = Features::default();
        for (path, result) in results {
            match result {
                Ok(poem) => features.poems.push(poem),
                Err(e) => {
                    error!("could not parse {:?}: {}", path, e);
                    features.failures.push((path, e));
                }
            }
        }
        Ok(features)
    }
}
