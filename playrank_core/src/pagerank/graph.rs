use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// Which pages each page links to.
///
/// Built once and read-only afterwards. Construction guarantees that the
/// corpus is non-empty, that every link points at a page of the corpus and
/// that no page links to itself. A page without links is a dead end; the
/// rankers treat it as linking to every page, the graph itself is not
/// changed. Each page may appear only once. Pages iterate in lexicographic
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkGraph {
    pages: BTreeMap<String, BTreeSet<String>>,
}

impl LinkGraph {
    pub fn new<I, P, L>(pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        let mut graph: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, links) in pages {
            let page: String = page.into();
            let links = links.into_iter().map(Into::into).collect::<BTreeSet<String>>();
            if graph.contains_key(&page) {
                return Err(Error::DuplicatePage(page));
            }
            graph.insert(page, links);
        }
        let pages = graph;

        if pages.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        for (page, links) in &pages {
            if links.contains(page) {
                return Err(Error::SelfLink(page.clone()));
            }
            if let Some(link) = links.iter().find(|link| !pages.contains_key(*link)) {
                return Err(Error::DanglingLink {
                    page: page.clone(),
                    link: link.clone(),
                });
            }
        }
        Ok(Self { pages })
    }

    /// Number of pages in the corpus.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.pages.contains_key(page)
    }

    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn links(&self, page: &str) -> Option<&BTreeSet<String>> {
        self.pages.get(page)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.pages.iter().map(|(page, links)| (page.as_str(), links))
    }
}
