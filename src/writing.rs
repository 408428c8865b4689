/*! JSON output

Each poem (or each poem's rows at a given granularity) is written in its own file:

```text
<output>/<corpus folder>/<scope>/<Author>/<TitleCase>.json
```

where `scope` is [PARSER_SCOPE] for full poems or the granularity name.
!*/
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::error::Error;

/// Scope of full, non-reduced poems.
pub const PARSER_SCOPE: &str = "parser";

/// Title case: each alphabetic run starts upper case, the rest is lower case.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Remove spaces and replace path separators.
/// Empty and dot-only names (`.`, `..`) become `_`.
fn path_component(s: &str) -> String {
    let component: String = s
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    if component.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        component
    }
}

/// Forge the destination path of a poem.
pub fn poem_path(corpus_root: &Path, scope: &str, author: &str, title: &str) -> PathBuf {
    let mut path = corpus_root.join(scope).join(path_component(author));
    path.push(format!("{}.json", path_component(&title_case(title))));
    path
}

/// Write `value` as pretty printed JSON (4 spaces indent, non-ASCII kept as is),
/// creating parent folders if needed.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    debug!("writing {:?}", path);
    let f = File::create(path)?;
    let mut writer = BufWriter::new(f);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut ser)?;
    writer.flush()?;
    Ok(())
}
