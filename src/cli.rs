//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "versekit", about = "poetry corpora acquisition and reshaping tool.")]
pub struct Versekit {
    #[structopt(
        parse(from_os_str),
        long = "corpora",
        help = "corpora registry (TOML). Defaults to the embedded one."
    )]
    pub corpora: Option<PathBuf>,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
/// Holds every command that is callable by the `versekit` command.
pub enum Command {
    #[structopt(about = "List registered corpora")]
    List,
    #[structopt(about = "Download and extract corpora")]
    Download(Download),
    #[structopt(about = "Parse corpora and export them as JSON")]
    Export(Export),
}

#[derive(Debug, StructOpt)]
/// Download command and parameters.
/// ```sh
/// versekit-download 0.1.0
/// Download and extract corpora
///
/// USAGE:
///     versekit download [OPTIONS] <ids>...
///
/// OPTIONS:
///     -o, --output <output>    corpora folder [default: corpora]
///
/// ARGS:
///     <ids>...    corpus identifiers (see `versekit list`)
/// ```
pub struct Download {
    #[structopt(required = true, help = "corpus identifiers (see `versekit list`)")]
    pub ids: Vec<usize>,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output",
        default_value = "corpora",
        help = "corpora folder"
    )]
    pub output: PathBuf,
}

#[derive(Debug, StructOpt)]
/// Export command and parameters.
///
/// ```sh
/// versekit-export 0.1.0
/// Parse corpora and export them as JSON
///
/// USAGE:
///     versekit export [FLAGS] [OPTIONS] <ids>...
///
/// FLAGS:
///     -d, --download    download missing corpora first
///
/// OPTIONS:
///     -g, --granularity <granularity>    stanza, line, word or syllable
///     -o, --output <output>              corpora folder [default: corpora]
///
/// ARGS:
///     <ids>...    corpus identifiers (see `versekit list`)
/// ```
pub struct Export {
    #[structopt(help = "corpus identifiers (see `versekit list`)")]
    pub ids: Vec<usize>,
    #[structopt(
        short = "g",
        long = "granularity",
        help = "stanza, line, word or syllable"
    )]
    pub granularity: Option<String>,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output",
        default_value = "corpora",
        help = "corpora folder"
    )]
    pub output: PathBuf,
    #[structopt(short = "d", long = "download", help = "download missing corpora first")]
    pub download: bool,
}
