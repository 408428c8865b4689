//! # Versekit
//!
//! Versekit downloads poetry corpora, parses their TEI documents into a single poem schema
//! and exports them as JSON, optionally flattened at stanza, line, word or syllable level.
//!
//! ## Getting started
//!
//! ```sh
//! versekit 0.1.0
//! poetry corpora acquisition and reshaping tool.
//!
//! USAGE:
//!     versekit [OPTIONS] <SUBCOMMAND>
//!
//! OPTIONS:
//!         --corpora <corpora>    corpora registry (TOML). Defaults to the embedded one.
//!
//! SUBCOMMANDS:
//!     download    Download and extract corpora
//!     export      Parse corpora and export them as JSON
//!     help        Prints this message or the help of the given subcommand(s)
//!     list        List registered corpora
//! ```
//!
use structopt::StructOpt;

use versekit::corpora::{self, Corpora};
use versekit::download;
use versekit::error::Error;
use versekit::pipeline::{Export, Pipeline};

#[macro_use]
extern crate log;

mod cli;

fn list(corpora: &Corpora) {
    println!(
        "{:<4}{:<45}{:<10}{:<8}{:<10}granularity",
        "id", "name", "size", "docs", "words"
    );
    for (id, corpus) in corpora.iter() {
        let granularities: Vec<&str> = corpus.granularities.iter().map(|g| g.as_str()).collect();
        println!(
            "{:<4}{:<45}{:<10}{:<8}{:<10}{}",
            id,
            corpus.name,
            corpus.size.as_deref().unwrap_or("-"),
            corpus.doc_quantity.map_or("-".to_string(), |q| q.to_string()),
            corpus.word_quantity.map_or("-".to_string(), |q| q.to_string()),
            granularities.join(", ")
        );
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Versekit::from_args();
    debug!("cli args\n{:#?}", opt);

    let corpora = match &opt.corpora {
        Some(path) => Corpora::from_path(path)?,
        None => corpora::default_corpora()?,
    };

    match opt.cmd {
        cli::Command::List => list(&corpora),
        cli::Command::Download(d) => {
            let (folders, failures) = download::download_corpora(&corpora, &d.ids, &d.output);
            info!("{} corpora downloaded", folders.len());
            for (id, e) in failures {
                error!("Error during download of corpus {}: {}", id, e);
            }
        }
        cli::Command::Export(e) => {
            let p = Export::new(corpora, e.output, e.ids, e.granularity, e.download);
            let report = p.run();
            if !report.diagnostics.is_empty() {
                warn!("{} problems during export", report.diagnostics.len());
            }
        }
    };
    Ok(())
}
