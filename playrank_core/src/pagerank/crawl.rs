//! Builds a [`LinkGraph`] from a directory of HTML pages.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::graph::LinkGraph;
use crate::error::{Error, Result};

fn anchor() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| {
        Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("anchor pattern is valid")
    })
}

/// Every `href` target of an `<a>` tag in `html`.
pub fn extract_links(html: &str) -> BTreeSet<String> {
    anchor()
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Reads every `*.html` file directly inside `dir`. Links from a page to
/// itself and links to files outside the corpus are dropped.
pub fn crawl(dir: impl AsRef<Path>) -> Result<LinkGraph> {
    let dir = dir.as_ref();
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| Error::Io { path, source }
    };

    let mut pages = BTreeMap::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let entry = entry.map_err(io_error(dir))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".html") || !path.is_file() {
            continue;
        }
        let contents = fs::read_to_string(&path).map_err(io_error(&path))?;
        let mut links = extract_links(&contents);
        links.remove(&name);
        pages.insert(name, links);
    }

    let known = pages.keys().cloned().collect::<BTreeSet<_>>();
    for links in pages.values_mut() {
        links.retain(|link| known.contains(link));
    }
    log::info!("crawled {} pages from {}", pages.len(), dir.display());
    LinkGraph::new(pages)
}
