use rand::{seq::SliceRandom, Rng};

use super::graph::LinkGraph;
use super::transition::transition_model;
use super::{RankOptions, Ranks};
use crate::error::{Error, Result};

/// Estimates ranks with a random walk of `options.samples` steps, starting
/// from a uniformly chosen page.
pub fn sample_rank(graph: &LinkGraph, options: &RankOptions) -> Result<Ranks> {
    sample_rank_with(graph, options, &mut rand::thread_rng())
}

/// Same as [`sample_rank`] with a caller supplied source of randomness.
///
/// Every step adds the whole transition distribution of the current page to
/// the tally, not just the page that gets drawn. The start page is drawn
/// uniformly, so it contributes the uniform distribution as the first of the
/// `samples` steps and the tally always sums to one.
pub fn sample_rank_with<R: Rng + ?Sized>(
    graph: &LinkGraph,
    options: &RankOptions,
    rng: &mut R,
) -> Result<Ranks> {
    options.validate()?;
    let pages = graph.pages().collect::<Vec<_>>();
    let n = pages.len() as f64;

    let mut ranks = pages
        .iter()
        .map(|&p| (p.to_string(), 1.0 / n))
        .collect::<Ranks>();
    let mut page = *pages.choose(rng).ok_or(Error::EmptyCorpus)?;

    for _ in 1..options.samples {
        let model = transition_model(graph, page, options.damping)?;
        for (p, probability) in &model {
            if let Some(rank) = ranks.get_mut(p) {
                *rank += probability;
            }
        }
        page = *pages
            .choose_weighted(rng, |p| model.get(*p).copied().unwrap_or(0.0))
            .map_err(|e| Error::InvalidOptions(format!("cannot draw next page: {e}")))?;
    }

    let samples = options.samples as f64;
    for rank in ranks.values_mut() {
        *rank /= samples;
    }
    log::debug!("sampled {} steps over {} pages", options.samples, pages.len());
    Ok(ranks)
}
