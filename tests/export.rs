use std::path::{Path, PathBuf};

use versekit::corpora::{Corpora, CorpusDescriptor};
use versekit::granularity::{Granularity, Rows};
use versekit::pipeline::{filter_features, Diagnostic, Export, Exported, Pipeline};
use versekit::readers::{Plsdo, Reader};

fn copy_dir(src: &Path, dst: &Path) {
    std::fs::create_dir_all(dst).unwrap();
    for entry in std::fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}

fn corpora() -> Corpora {
    Corpora::new(vec![
        CorpusDescriptor {
            name: "testing".to_string(),
            folder_name: "plsdo".to_string(),
            url: "http://localhost/plsdo.zip".to_string(),
            granularities: vec![Granularity::Stanza, Granularity::Word],
            ..CorpusDescriptor::default()
        },
        CorpusDescriptor {
            name: "testing2".to_string(),
            folder_name: "not-folder".to_string(),
            url: "http://localhost/missing.zip".to_string(),
            ..CorpusDescriptor::default()
        },
    ])
}

/// Output folder holding the fixture corpus.
fn output() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    copy_dir(Path::new("tests/fixtures/plsdo"), &dir.path().join("plsdo"));
    dir
}

fn run(output: &Path, ids: Vec<usize>, granularity: Option<&str>) -> versekit::pipeline::Report {
    Export::new(
        corpora(),
        PathBuf::from(output),
        ids,
        granularity.map(String::from),
        false,
    )
    .run()
}

#[test_log::test]
fn download_reports_unknown_id_once() {
    let dir = output();
    // corpus 1 is already present, so nothing is fetched
    let report = Export::new(
        corpora(),
        dir.path().to_path_buf(),
        vec![500000, 1],
        None,
        true,
    )
    .run();
    assert_eq!(report.features.len(), 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(report.diagnostics[0], Diagnostic::UnknownCorpus(500000)));
}

#[test_log::test]
fn stanza_granularity() {
    let dir = output();
    let report = run(dir.path(), vec![1], Some("stanza"));
    assert!(report.diagnostics.is_empty());
    // one entry per poem
    assert_eq!(report.features.len(), 2);

    let rows = match &report.features[1] {
        Exported::Rows(Rows::Stanza(rows)) => rows,
        other => panic!("unexpected features {:?}", other),
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].stanza_number, "1");
    assert_eq!(rows[1].stanza_number, "2");
    assert_eq!(rows[0].stanza_text, "Soy una rosa");
    assert_eq!(rows[1].stanza_text, "que muere");
    assert_eq!(rows[0].poem, rows[1].poem);
    assert_eq!(rows[0].poem.author, "Garcilaso de la Vega");
    assert!(rows[0].poem.manually_checked);

    let written = dir
        .path()
        .join("plsdo/stanza/GarcilasodelaVega/SoyUnaRosa.json");
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();
    assert_eq!(json[1]["stanza_text"], "que muere");
    assert_eq!(json[1]["poem_title"], "soy una rosa");

    // full poems are always written
    assert!(dir
        .path()
        .join("plsdo/parser/Anónimo/RomanceDelPrisionero.json")
        .exists());
}

#[test_log::test]
fn no_granularity_returns_poems() {
    let dir = output();
    let report = run(dir.path(), vec![1], None);
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.features.len(), 1);
    match &report.features[0] {
        Exported::Poems(poems) => assert_eq!(poems.len(), 2),
        other => panic!("unexpected features {:?}", other),
    }

    let written = dir
        .path()
        .join("plsdo/parser/GarcilasodelaVega/SoyUnaRosa.json");
    let content = std::fs::read_to_string(written).unwrap();
    assert!(content.contains("\"stanza_type\": \"cuarteto\""));
    assert!(content.contains("\"has_synalepha\": true"));

    // non-ASCII is not escaped
    let written = dir
        .path()
        .join("plsdo/parser/Anónimo/RomanceDelPrisionero.json");
    let content = std::fs::read_to_string(written).unwrap();
    assert!(content.contains("\"author\": \"Anónimo\""));
}

#[test_log::test]
fn unknown_id() {
    let dir = output();
    let report = run(dir.path(), vec![500000], Some("stanza"));
    assert!(report.features.is_empty());
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(report.diagnostics[0], Diagnostic::UnknownCorpus(500000)));
    assert!(report.diagnostics[0]
        .to_string()
        .contains("not in corpora list"));
}

#[test_log::test]
fn unknown_id_does_not_stop_the_batch() {
    let dir = output();
    let report = run(dir.path(), vec![500000, 1], None);
    assert_eq!(report.features.len(), 1);
    assert_eq!(report.diagnostics.len(), 1);
}

#[test_log::test]
fn no_ids() {
    let dir = output();
    let report = run(dir.path(), vec![], Some("line"));
    assert!(report.features.is_empty());
    assert_eq!(report.diagnostics[0].to_string(), "No CORPUS ID selected");
}

#[test_log::test]
fn output_folder_not_found() {
    let report = run(Path::new("kgalsjlkjsadfhk"), vec![1], Some("stanza"));
    assert!(report.features.is_empty());
    assert!(report.diagnostics[0]
        .to_string()
        .contains("Corpora folder not found"));
}

#[test_log::test]
fn corpus_not_downloaded() {
    let dir = output();
    let report = run(dir.path(), vec![2], Some("stanza"));
    assert!(report.features.is_empty());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].to_string(),
        format!("\"testing2\" not found in \"{}\" folder", dir.path().display())
    );
}

#[test_log::test]
fn unsupported_granularity() {
    let dir = output();
    for granularity in ["kfajdgah", "line"] {
        let report = run(dir.path(), vec![1], Some(granularity));
        assert!(report.features.is_empty());
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(
            report.diagnostics[0].to_string(),
            format!(
                "'{}' granularity not found on 'testing' properties",
                granularity
            )
        );
    }
    // documents are still parsed and written in full
    assert!(dir
        .path()
        .join("plsdo/parser/GarcilasodelaVega/SoyUnaRosa.json")
        .exists());
    assert!(!dir.path().join("plsdo/line").exists());
}

#[test_log::test]
fn word_granularity_skips_nothing() {
    let dir = output();
    let report = run(dir.path(), vec![1], Some("word"));
    let counts: Vec<usize> = report
        .features
        .iter()
        .map(|f| match f {
            Exported::Rows(rows) => rows.len(),
            Exported::Poems(_) => 0,
        })
        .collect();
    assert_eq!(counts, vec![6, 5]);
    assert!(dir
        .path()
        .join("plsdo/word/Anónimo/RomanceDelPrisionero.json")
        .exists());
}

#[test]
fn filter_features_selection() {
    let poems = Plsdo
        .get_features(Path::new("tests/fixtures/plsdo/garcilaso"))
        .unwrap()
        .poems;
    let corpora = corpora();
    let corpus = corpora.get(1).unwrap();

    let rows = filter_features(&poems[0], corpus, "stanza").unwrap();
    assert_eq!(rows.len(), 2);

    let diagnostic = filter_features(&poems[0], corpus, "syllable").unwrap_err();
    assert_eq!(
        diagnostic.to_string(),
        "'syllable' granularity not found on 'testing' properties"
    );
}
