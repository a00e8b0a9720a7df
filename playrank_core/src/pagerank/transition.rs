use super::graph::LinkGraph;
use super::Ranks;
use crate::error::{Error, Result};

/// Probability of visiting each page next when the surfer is on `page`.
///
/// With probability `damping` the surfer follows one of the page's links,
/// otherwise it jumps to any page of the corpus. A dead end spreads its mass
/// evenly over the whole corpus, itself included.
pub fn transition_model(graph: &LinkGraph, page: &str, damping: f64) -> Result<Ranks> {
    let links = graph
        .links(page)
        .ok_or_else(|| Error::UnknownPage(page.to_string()))?;
    let n = graph.len() as f64;

    let model = if links.is_empty() {
        graph.pages().map(|p| (p.to_string(), 1.0 / n)).collect()
    } else {
        let teleport = (1.0 - damping) / n;
        let follow = damping / links.len() as f64;
        graph
            .pages()
            .map(|p| {
                let probability = if links.contains(p) {
                    follow + teleport
                } else {
                    teleport
                };
                (p.to_string(), probability)
            })
            .collect()
    };
    Ok(model)
}
