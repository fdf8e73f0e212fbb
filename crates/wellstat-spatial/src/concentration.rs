//! # Market Concentration
//!
//! Herfindahl–Hirschman Index over a categorical share distribution, plus
//! the per-category tallies it is computed from.
//!
//! For N categories the HHI lies in [1/N, 1]: 1 means a single category
//! holds everything, 1/N means equal shares.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One category's share of the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CategoryShare {
    /// Category label.
    pub label: String,
    /// Members in this category.
    pub count: u64,
    /// `count / total`, 0 when the population is empty.
    pub share: f64,
}

/// Shares sorted by descending count, and the HHI over them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationReport {
    /// Per-category shares, largest first.
    pub shares: Vec<CategoryShare>,
    /// Σ share²; `None` for an empty population.
    pub hhi: Option<f64>,
}

/// Count occurrences of each key, largest count first.
///
/// Keys are expected to be normalized already (absent values mapped to
/// `"Unknown"`). Equal counts keep key order so output is deterministic.
pub fn tally<K, I>(keys: I) -> Vec<(K, u64)>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: BTreeMap<K, u64> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    let mut tallies: Vec<(K, u64)> = counts.into_iter().collect();
    // Stable sort keeps the BTreeMap's key order among ties.
    tallies.sort_by(|a, b| b.1.cmp(&a.1));
    tallies
}

/// Build the concentration report for `counts` out of `total`.
pub fn concentration(counts: &[(String, u64)], total: u64) -> ConcentrationReport {
    let share_of = |count: u64| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    };

    let mut shares: Vec<CategoryShare> = counts
        .iter()
        .map(|(label, count)| CategoryShare {
            label: label.clone(),
            count: *count,
            share: share_of(*count),
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));

    let hhi = (total > 0).then(|| shares.iter().map(|s| s.share * s.share).sum());

    ConcentrationReport { shares, hhi }
}
