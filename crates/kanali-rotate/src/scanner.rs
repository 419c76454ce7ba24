//! Config file discovery and multi-document stream splitting.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use kanali_spec::TypeMeta;
use tracing::trace;
use walkdir::WalkDir;

use crate::error::EngineError;

/// File extensions considered config candidates.
const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Recursively discovers config files under `root`.
///
/// A non-directory root is treated as a single candidate file. Only
/// `.yaml`, `.yml` and `.json` files are returned, in lexical tree-walk
/// order so repeated runs report identically.
///
/// # Errors
///
/// Returns [`EngineError::Discovery`] on any walk failure (missing root,
/// permission denied, broken symlink); a partial listing would silently
/// narrow the rotation's coverage.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| EngineError::Discovery {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.path().extension().and_then(OsStr::to_str) {
            Some(extension) if CONFIG_EXTENSIONS.contains(&extension) => {
                trace!(path = %entry.path().display(), "discovered config file");
                files.push(entry.into_path());
            }
            _ => {}
        }
    }
    Ok(files)
}

/// Splits a config stream into its documents.
///
/// Documents are delimited by lines consisting of `---`; the separator
/// lines belong to no document. Whitespace-only chunks are skipped. Each
/// yielded slice is the document's exact original bytes, which is what
/// makes byte-for-byte rewrites of untouched documents possible. A stream
/// with no separator (every `.json` file, most single-document YAML files)
/// is one document.
pub fn split(data: &[u8]) -> DocumentSplitter<'_> {
    DocumentSplitter { data, offset: 0 }
}

/// Iterator over the documents of a config stream. Re-invoke [`split`] on
/// the same buffer to restart.
#[derive(Debug, Clone)]
pub struct DocumentSplitter<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for DocumentSplitter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let data = self.data;
        while self.offset < data.len() {
            let start = self.offset;
            let mut cursor = start;
            let mut document = None;

            while cursor < data.len() {
                let (line, next_cursor) = match data[cursor..].iter().position(|&b| b == b'\n') {
                    Some(i) => (&data[cursor..cursor + i], cursor + i + 1),
                    None => (&data[cursor..], data.len()),
                };
                if line.trim_ascii_end() == b"---" {
                    document = Some(&data[start..cursor]);
                    self.offset = next_cursor;
                    break;
                }
                cursor = next_cursor;
            }

            let document = match document {
                Some(found) => found,
                None => {
                    self.offset = data.len();
                    &data[start..]
                }
            };

            if !document.trim_ascii().is_empty() {
                return Some(document);
            }
        }
        None
    }
}

/// Probes a document for its `kind` discriminant.
///
/// Returns `None` when the document does not parse as a keyed mapping at
/// all; such documents are treated as kind-unknown and copied through
/// untouched rather than failing their file.
#[must_use]
pub fn probe_kind(document: &[u8]) -> Option<String> {
    serde_yaml::from_slice::<TypeMeta>(document)
        .ok()
        .map(|meta| meta.kind)
}
