//! Export pipeline.
//!
//! For each requested corpus:
//! 1. Check that the corpus is registered and that its folder exists (optionally downloading it first).
//! 1. Parse every document with the corpus reader.
//! 1. Write full poems under the `parser` scope.
//! 1. If a granularity is requested and supported, reduce each poem and write the rows under the granularity scope.
//!
//! Nothing in here is fatal: problems are logged, collected as [Diagnostic]s, and the corpus
//! (or document) at fault is skipped. An unsupported granularity only skips the reduction.
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use serde::Serialize;

use crate::corpora::{Corpora, CorpusDescriptor};
use crate::download;
use crate::error::Error;
use crate::granularity::{reduce, Granularity, Rows};
use crate::poem::Poem;
use crate::writing::{self, PARSER_SCOPE};

/// This trait must be implemented for each Pipeline,
/// and is generic over the return type.
/// Pipelines report their problems inside `T` rather than failing.
pub trait Pipeline<T> {
    fn run(&self) -> T;
}

/// A non fatal problem met while exporting.
#[derive(Debug)]
pub enum Diagnostic {
    NoCorpusSelected,
    OutputFolderNotFound(PathBuf),
    UnknownCorpus(usize),
    CorpusFolderNotFound { name: String, output: PathBuf },
    UnsupportedGranularity { corpus: String, granularity: String },
    Download { id: usize, error: Error },
    Read { corpus: String, error: Error },
    Document { path: PathBuf, error: Error },
    Write { path: PathBuf, error: Error },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoCorpusSelected => write!(f, "No CORPUS ID selected"),
            Diagnostic::OutputFolderNotFound(path) => {
                write!(f, "Corpora folder not found: \"{}\"", path.display())
            }
            Diagnostic::UnknownCorpus(id) => write!(f, "ID {} not in corpora list", id),
            Diagnostic::CorpusFolderNotFound { name, output } => {
                write!(f, "\"{}\" not found in \"{}\" folder", name, output.display())
            }
            Diagnostic::UnsupportedGranularity {
                corpus,
                granularity,
            } => write!(
                f,
                "'{}' granularity not found on '{}' properties",
                granularity, corpus
            ),
            Diagnostic::Download { id, error } => {
                write!(f, "could not download corpus {}: {}", id, error)
            }
            Diagnostic::Read { corpus, error } => {
                write!(f, "could not read corpus \"{}\": {}", corpus, error)
            }
            Diagnostic::Document { path, error } => {
                write!(f, "could not parse \"{}\": {}", path.display(), error)
            }
            Diagnostic::Write { path, error } => {
                write!(f, "could not write \"{}\": {}", path.display(), error)
            }
        }
    }
}

/// Exported features: all the poems of a corpus, or the rows of a single poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Exported {
    Poems(Vec<Poem>),
    Rows(Rows),
}

/// Outcome of an export. Always returned, possibly empty.
#[derive(Debug, Default)]
pub struct Report {
    pub features: Vec<Exported>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Log and keep a diagnostic.
    fn report(&mut self, diagnostic: Diagnostic) {
        error!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

/// Reduce a poem of `corpus` at the granularity named `granularity`.
///
/// Fails with [Diagnostic::UnsupportedGranularity] if the name is unknown
/// or not declared by the corpus.
pub fn filter_features(
    poem: &Poem,
    corpus: &CorpusDescriptor,
    granularity: &str,
) -> Result<Rows, Diagnostic> {
    corpus
        .granularity(granularity)
        .map(|g| reduce(poem, g))
        .ok_or_else(|| Diagnostic::UnsupportedGranularity {
            corpus: corpus.name.clone(),
            granularity: granularity.to_string(),
        })
}

pub struct Export {
    corpora: Corpora,
    output: PathBuf,
    ids: Vec<usize>,
    granularity: Option<String>,
    download: bool,
}

impl Export {
    pub fn new(
        corpora: Corpora,
        output: PathBuf,
        ids: Vec<usize>,
        granularity: Option<String>,
        download: bool,
    ) -> Self {
        debug!(
            "export of {:?} at granularity {:?} into {:?}",
            ids, granularity, output
        );
        Self {
            corpora,
            output,
            ids,
            granularity,
            download,
        }
    }

    /// Write `value` at `path`, reporting failures.
    fn write<T: Serialize + ?Sized>(value: &T, path: &Path, report: &mut Report) {
        if let Err(error) = writing::write_json(value, path) {
            report.report(Diagnostic::Write {
                path: path.to_path_buf(),
                error,
            });
        }
    }

    /// Parse, write and optionally reduce a single corpus.
    fn export_corpus(&self, corpus: &CorpusDescriptor, report: &mut Report) {
        let corpus_root = self.output.join(&corpus.folder_name);
        if !corpus_root.is_dir() {
            report.report(Diagnostic::CorpusFolderNotFound {
                name: corpus.name.clone(),
                output: self.output.clone(),
            });
            return;
        }

        // `Some(None)`: a granularity was requested but the corpus does not support it
        let selected: Option<Option<Granularity>> = self
            .granularity
            .as_deref()
            .map(|name| corpus.granularity(name));
        if let (Some(name), Some(None)) = (&self.granularity, selected) {
            report.report(Diagnostic::UnsupportedGranularity {
                corpus: corpus.name.clone(),
                granularity: name.clone(),
            });
        }

        info!("[{}] parsing documents in {:?}", corpus.name, corpus_root);
        let features = match corpus.reader.reader().get_features(&corpus_root) {
            Ok(features) => features,
            Err(error) => {
                report.report(Diagnostic::Read {
                    corpus: corpus.name.clone(),
                    error,
                });
                return;
            }
        };
        for (path, error) in features.failures {
            // already logged by the reader
            report.diagnostics.push(Diagnostic::Document { path, error });
        }
        info!("[{}] {} poems parsed", corpus.name, features.poems.len());

        for poem in &features.poems {
            let path =
                writing::poem_path(&corpus_root, PARSER_SCOPE, &poem.author, &poem.title);
            Self::write(poem, &path, report);
        }

        match selected {
            Some(Some(g)) => {
                for poem in &features.poems {
                    let rows = reduce(poem, g);
                    if rows.is_empty() {
                        debug!("[{}] no {} rows for {:?}", corpus.name, g, poem.title);
                        continue;
                    }
                    let path =
                        writing::poem_path(&corpus_root, g.as_str(), &poem.author, &poem.title);
                    Self::write(&rows, &path, report);
                    report.features.push(Exported::Rows(rows));
                }
            }
            // full poems are written, but nothing is exported
            Some(None) => {}
            None => report.features.push(Exported::Poems(features.poems)),
        }
    }
}

impl Pipeline<Report> for Export {
    fn run(&self) -> Report {
        let mut report = Report::default();

        if self.ids.is_empty() {
            report.report(Diagnostic::NoCorpusSelected);
            return report;
        }

        if self.download {
            let (_, failures) = download::download_corpora(&self.corpora, &self.ids, &self.output);
            // unknown ids are reported below
            for (id, error) in failures {
                if self.corpora.get(id).is_some() {
                    report.report(Diagnostic::Download { id, error });
                }
            }
        }

        if !self.output.is_dir() {
            report.report(Diagnostic::OutputFolderNotFound(self.output.clone()));
            return report;
        }

        for id in &self.ids {
            match self.corpora.get(*id) {
                Some(corpus) => self.export_corpus(corpus, &mut report),
                None => report.report(Diagnostic::UnknownCorpus(*id)),
            }
        }

        info!(
            "export done: {} feature sets, {} problems",
            report.features.len(),
            report.diagnostics.len()
        );
        report
    }
}
