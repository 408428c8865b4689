/*! Corpus archive acquisition

Corpora are distributed as zip archives. They are downloaded next to the output folder,
extracted there and then removed.
!*/
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::corpora::Corpora;
use crate::error::Error;

/// attempt to download `url` into `dst`, keeping the last url segment as file name.
pub fn download_corpus(
    client: &reqwest::blocking::Client,
    url: &str,
    dst: &Path,
) -> Result<PathBuf, Error> {
    let filename = url
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .ok_or_else(|| Error::Custom(format!("no file name in url {}", url)))?;
    let path = dst.join(filename);

    //fire blocking request, create out file,
    //load content into buffer and copy buffer into file.
    debug!("downloading {} into {:?}", url, path);
    let response = client.get(url).send()?.error_for_status()?;
    std::fs::create_dir_all(dst)?;
    let mut out = File::create(&path)?;
    let mut buf = BufReader::new(response);
    std::io::copy(&mut buf, &mut out)?;

    Ok(path)
}

/// Extract a zip archive into `dst` then remove the archive.
pub fn uncompress_corpus(archive: &Path, dst: &Path) -> Result<(), Error> {
    debug!("extracting {:?} into {:?}", archive, dst);
    let f = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(BufReader::new(f))?;
    zip.extract(dst)?;
    std::fs::remove_file(archive)?;
    Ok(())
}

/// Download and extract the corpora matching `ids` into `output`.
///
/// Corpora whose folder already exists are skipped.
/// Returns the folders of the newly extracted corpora, and the errors of the failed ones.
/// Failures are not logged here, callers report them.
pub fn download_corpora(
    corpora: &Corpora,
    ids: &[usize],
    output: &Path,
) -> (Vec<PathBuf>, Vec<(usize, Error)>) {
    let mut folders = Vec::new();
    let mut failures = Vec::new();

    if ids.is_empty() {
        error!("No corpus selected. Nothing will be downloaded");
        return (folders, failures);
    }

    let client = reqwest::blocking::Client::new();
    let nb_ids = ids.len();
    for (idx, id) in ids.iter().enumerate() {
        let corpus = match corpora.get(*id) {
            Some(c) => c,
            None => {
                failures.push((*id, Error::Custom(format!("ID {} not in corpora list", id))));
                continue;
            }
        };

        let folder = output.join(&corpus.folder_name);
        if folder.exists() {
            info!("Corpus {} already downloaded", corpus.name);
            continue;
        }

        info!("downloading {} ({}/{})", corpus.name, idx + 1, nb_ids);
        let result = download_corpus(&client, &corpus.url, output)
            .and_then(|archive| uncompress_corpus(&archive, output));
        match result {
            Ok(()) => folders.push(folder),
            Err(e) => failures.push((*id, e)),
        }
    }

    (folders, failures)
}
