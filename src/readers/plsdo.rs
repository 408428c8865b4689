//! TEI reader for the "Poesía Lírica Castellana del Siglo de Oro" corpus.
//!
//! Each document holds a single poem:
//! - `bibl/title` and `bibl/author` give title and author,
//! - the `metDecl/p` description tells whether scansion was checked manually,
//! - each `lg` is a stanza, each `l` a line carrying `n` and `met` attributes,
//! - each `w` is a word whose text marks syllable boundaries with `|`.
//!
//! Comments are kept in the parsed tree (some documents annotate the metrical
//! declaration with them) but never contribute text.
use std::path::Path;

use log::debug;
use roxmltree::{Document, Node, ParsingOptions};

use crate::error::Error;
use crate::poem::{Line, Poem, Word};
use crate::scansion;

use super::Reader;

const TEI_NAMESPACE: &str = "http://www.tei-c.org/ns/1.0";

/// Substring of the analysis description flagging manual verification.
const MANUAL_CHECK_MARKER: &str = "manual";

pub struct Plsdo;

impl Reader for Plsdo {
    fn extension_pattern(&self) -> &'static str {
        "*.xml"
    }

    fn parse_file(&self, path: &Path) -> Result<Poem, Error> {
        debug!("parsing {:?}", path);
        let content = std::fs::read_to_string(path)?;
        parse_tei(&content)
    }
}

/// `true` if `node` is the TEI element `name`.
fn is_tei(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(TEI_NAMESPACE)
}

fn tei_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| is_tei(n, name))
}

/// First `child` element of any `parent` element under `root` (`.//parent/child`).
fn find_nested<'a, 'input>(
    root: Node<'a, 'input>,
    parent: &'static str,
    child: &'static str,
) -> Option<Node<'a, 'input>> {
    root.descendants()
        .filter(|n| is_tei(n, parent))
        .find_map(|n| tei_children(n, child).next())
}

/// Concatenated text nodes under `node`, comments excluded.
fn inner_text(node: Node) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

/// Parse a TEI document into a [Poem].
pub fn parse_tei(content: &str) -> Result<Poem, Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(content, options)?;
    let root = doc.root_element();

    let analysis_description = find_nested(root, "metDecl", "p")
        .map(inner_text)
        .ok_or(Error::MissingField("metDecl/p"))?;
    let title = find_nested(root, "bibl", "title")
        .and_then(|n| n.text())
        .ok_or(Error::MissingField("bibl/title"))?;
    let author = find_nested(root, "bibl", "author")
        .and_then(|n| n.text())
        .ok_or(Error::MissingField("bibl/author"))?;

    let manually_checked = analysis_description.contains(MANUAL_CHECK_MARKER);

    let stanzas = root
        .descendants()
        .filter(|n| is_tei(n, "lg"))
        .map(|line_group| -> Result<(String, Vec<Line>), Error> {
            let kind = line_group
                .attribute("type")
                .ok_or(Error::MissingField("lg/@type"))?;
            let lines = tei_children(line_group, "l")
                .map(parse_line)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((kind.to_string(), lines))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Poem::new(
        title.to_string(),
        author.to_string(),
        manually_checked,
        stanzas,
    ))
}

fn parse_line(line: Node) -> Result<Line, Error> {
    let number = line.attribute("n").ok_or(Error::MissingField("l/@n"))?;
    let met = line.attribute("met").ok_or(Error::MissingField("l/@met"))?;
    let text = line
        .children()
        .find(Node::is_element)
        .and_then(|n| n.text())
        .ok_or(Error::MissingField("l text"))?;

    let words = line
        .descendants()
        .filter(|n| is_tei(n, "w"))
        .map(|w| Word::from_annotated(w.text().unwrap_or_default()))
        .collect();

    Ok(Line {
        number: number.to_string(),
        text: text.to_string(),
        metrical_pattern: scansion::normalize_metrical_pattern(met),
        words,
    })
}
