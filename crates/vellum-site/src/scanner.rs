//! Markdown source discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

/// A markdown file that becomes one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// URL path relative to the site root (e.g. "", "guide", "guide/setup").
    pub url_path: String,
    /// Directory of the source file relative to the source root.
    ///
    /// Relative `.md` links in the document resolve against this.
    pub dir: String,
    /// Path to the markdown file.
    pub source_path: PathBuf,
}

/// Walk `source_dir` and return every page, sorted by URL path.
///
/// Hidden files and directories are skipped. `index.md` maps to its
/// directory's URL. When both `guide.md` and `guide/index.md` exist, the
/// latter wins.
#[must_use]
pub fn scan(source_dir: &Path) -> Vec<SourceDocument> {
    let mut docs = Vec::new();
    scan_directory(source_dir, "", &mut docs);
    docs.sort_by(|a, b| {
        a.url_path
            .cmp(&b.url_path)
            .then_with(|| is_index(b).cmp(&is_index(a)))
    });
    docs.dedup_by(|later, earlier| later.url_path == earlier.url_path);
    docs
}

fn is_index(doc: &SourceDocument) -> bool {
    doc.source_path
        .file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case("index.md"))
}

fn scan_directory(dir_path: &Path, url_prefix: &str, docs: &mut Vec<SourceDocument>) {
    let Ok(entries) = fs::read_dir(dir_path) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            let child_url = join_url(url_prefix, &name);
            scan_directory(&path, &child_url, docs);
        } else if path.extension().is_some_and(|e| e == "md") {
            docs.push(SourceDocument {
                url_path: file_path_to_url(Path::new(&name), url_prefix),
                dir: url_prefix.to_owned(),
                source_path: path,
            });
        }
    }
}

fn join_url(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Convert a file path to a URL path under `base`.
///
/// - `index.md` -> `""`
/// - `guide.md` -> `"guide"`
/// - `index.md`, base `"guide"` -> `"guide"`
/// - `setup.md`, base `"guide"` -> `"guide/setup"`
pub(crate) fn file_path_to_url(rel_path: &Path, base: &str) -> String {
    let path_str = rel_path.to_string_lossy();
    let without_ext = path_str.strip_suffix(".md").unwrap_or(&path_str);

    let path_part = if without_ext.eq_ignore_ascii_case("index") {
        ""
    } else if let Some(without_index) = without_ext.strip_suffix("/index") {
        without_index
    } else {
        without_ext
    };

    match (base.is_empty(), path_part.is_empty()) {
        (true, _) => path_part.to_owned(),
        (false, true) => base.to_owned(),
        (false, false) => format!("{base}/{path_part}"),
    }
}
