use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::graph::LinkGraph;
use super::{RankOptions, Ranks};
use crate::error::{Error, Result};

/// The link structure flattened to page indices, fixed for a whole run.
struct Recurrence {
    // inbound[p] lists every page with a link to p
    inbound: Vec<Vec<usize>>,
    out_degree: Vec<usize>,
    dead_ends: Vec<usize>,
    damping: f64,
}

impl Recurrence {
    fn new(graph: &LinkGraph, damping: f64) -> Self {
        let n = graph.len();
        let index = graph
            .pages()
            .enumerate()
            .map(|(i, p)| (p, i))
            .collect::<HashMap<&str, usize>>();

        let mut inbound = vec![Vec::new(); n];
        let mut out_degree = vec![0usize; n];
        let mut dead_ends = Vec::new();
        for (l, (_, links)) in graph.iter().enumerate() {
            out_degree[l] = links.len();
            if links.is_empty() {
                dead_ends.push(l);
            }
            for link in links {
                if let Some(&p) = index.get(link.as_str()) {
                    inbound[p].push(l);
                }
            }
        }
        Self {
            inbound,
            out_degree,
            dead_ends,
            damping,
        }
    }

    fn len(&self) -> usize {
        self.out_degree.len()
    }

    /// Closure computing one page's next rank from the frozen `ranks`.
    fn update<'a>(&'a self, ranks: &'a [f64]) -> impl Fn(usize) -> f64 + Sync + Send + 'a {
        let n = self.len() as f64;
        let teleport = (1.0 - self.damping) / n;
        let dead_mass = self.dead_ends.iter().map(|&l| ranks[l]).sum::<f64>() / n;
        move |p| {
            let followed = self.inbound[p]
                .iter()
                .map(|&l| ranks[l] / self.out_degree[l] as f64)
                .sum::<f64>();
            teleport + self.damping * (dead_mass + followed)
        }
    }

    #[cfg_attr(feature = "parallel", allow(dead_code))]
    fn next(&self, ranks: &[f64]) -> Vec<f64> {
        (0..self.len()).map(self.update(ranks)).collect()
    }

    #[cfg(feature = "parallel")]
    fn next_par(&self, ranks: &[f64]) -> Vec<f64> {
        (0..self.len())
            .into_par_iter()
            .map(self.update(ranks))
            .collect()
    }
}

/// Computes ranks by repeatedly applying the PageRank recurrence
///
/// `PR(p) = (1 - d) / N + d * sum(PR(l) / out(l))`
///
/// over every page `l` linking to `p`, where a dead end counts as linking to
/// all `N` pages. Each round reads only the previous round's ranks. Stops as
/// soon as no page moved by more than `options.tolerance`, or fails with
/// [`Error::NotConverged`] after `options.max_iterations` rounds.
pub fn iterate_rank(graph: &LinkGraph, options: &RankOptions) -> Result<Ranks> {
    options.validate()?;
    let recurrence = Recurrence::new(graph, options.damping);
    let mut ranks = vec![1.0 / graph.len() as f64; graph.len()];
    let mut delta = f64::INFINITY;

    for iteration in 1..=options.max_iterations {
        #[cfg(feature = "parallel")]
        let next = recurrence.next_par(&ranks);
        #[cfg(not(feature = "parallel"))]
        let next = recurrence.next(&ranks);

        delta = next
            .iter()
            .zip(&ranks)
            .map(|(new, old)| (new - old).abs())
            .fold(0.0, f64::max);
        ranks = next;
        log::debug!("iteration {:>4}: max delta {:.6}", iteration, delta);

        if delta <= options.tolerance {
            log::info!("ranks converged after {} iterations", iteration);
            return Ok(graph
                .pages()
                .zip(ranks)
                .map(|(p, rank)| (p.to_string(), rank))
                .collect());
        }
    }

    Err(Error::NotConverged {
        iterations: options.max_iterations,
        delta,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn corpus() -> LinkGraph {
        LinkGraph::new([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html"]),
            ("4.html", vec!["2.html"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_known_corpus() {
        let ranks = iterate_rank(&corpus(), &RankOptions::default()).unwrap();
        let expected = [
            ("1.html", 0.2198),
            ("2.html", 0.4294),
            ("3.html", 0.2198),
            ("4.html", 0.1311),
        ];
        for (page, rank) in expected {
            assert!((ranks[page] - rank).abs() < 1e-3, "{page}: {}", ranks[page]);
        }
    }

    #[test]
    fn test_sums_to_one_and_is_deterministic() {
        let graph = corpus();
        let options = RankOptions::default();
        let first = iterate_rank(&graph, &options).unwrap();
        let total: f64 = first.values().sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert_eq!(first, iterate_rank(&graph, &options).unwrap());
    }

    #[test]
    fn test_symmetric_pair() {
        let graph = LinkGraph::new([("a", vec!["b"]), ("b", vec!["a"])]).unwrap();
        let ranks = iterate_rank(&graph, &RankOptions::default()).unwrap();
        assert!((ranks["a"] - 0.5).abs() < 1e-12);
        assert!((ranks["b"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_dead_end_spreads_mass() {
        let graph = LinkGraph::new([
            ("a", vec!["b", "c"]),
            ("b", vec!["c"]),
            ("c", vec![]),
        ])
        .unwrap();
        let ranks = iterate_rank(&graph, &RankOptions::default()).unwrap();
        let total: f64 = ranks.values().sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!(ranks["c"] > ranks["b"]);
        assert!(ranks["b"] > ranks["a"]);
    }

    #[test]
    fn test_tighter_tolerance_agrees() {
        let graph = corpus();
        let loose = iterate_rank(&graph, &RankOptions::default()).unwrap();
        let tight = iterate_rank(&graph, &RankOptions::default().with_tolerance(1e-12)).unwrap();
        for (page, rank) in &tight {
            assert!((loose[page] - rank).abs() < 5e-3);
        }
    }

    #[test]
    fn test_reports_non_convergence() {
        let options = RankOptions::default().with_max_iterations(1);
        match iterate_rank(&corpus(), &options) {
            Err(Error::NotConverged { iterations, delta }) => {
                assert_eq!(iterations, 1);
                assert!(delta > 0.001);
            }
            other => panic!("expected non-convergence, got {:?}", other),
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_update_matches_sequential() {
        let graph = LinkGraph::new([
            ("a", vec!["b", "c"]),
            ("b", vec!["c"]),
            ("c", vec![]),
            ("d", vec!["a", "c"]),
        ])
        .unwrap();
        let recurrence = Recurrence::new(&graph, 0.85);
        let mut ranks = vec![0.25; 4];
        for _ in 0..20 {
            let sequential = recurrence.next(&ranks);
            let parallel = recurrence.next_par(&ranks);
            assert_eq!(sequential, parallel);
            ranks = parallel;
        }
        let total: f64 = iterate_rank(&graph, &RankOptions::default())
            .unwrap()
            .values()
            .sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}
