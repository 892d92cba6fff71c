//! Pure reducing functions over extracted ideas. Everything here is a fold
//! producing a fresh map, so cohort results are independent of the order
//! cities or idea details arrive in.

use std::collections::HashMap;
use std::fmt;

use anyhow::Result;

use crate::topics::Idea;

/// Normalization was asked for a map whose counts sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroTotalSupport;

impl fmt::Display for ZeroTotalSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no support recorded for any topic; cannot convert to percentages")
    }
}

impl std::error::Error for ZeroTotalSupport {}

/// Sum support counts per topic. An idea tagged with N topics contributes
/// its full support count to each of the N totals; support is deliberately
/// not split, so topic totals generally exceed the per-idea total.
pub fn accumulate_support<'a, I>(ideas: I) -> HashMap<String, u64>
where
    I: IntoIterator<Item = &'a Idea>,
{
    let mut totals = HashMap::new();
    for idea in ideas {
        for topic in &idea.topics {
            *totals.entry(topic.clone()).or_insert(0) += idea.support_count;
        }
    }
    totals
}

/// Express each topic's count as a percentage of the map's total.
pub fn convert_to_percentages(counts: &HashMap<String, u64>) -> Result<HashMap<String, f64>> {
    let total: u64 = counts.values().sum();
    if total == 0 {
        return Err(ZeroTotalSupport.into());
    }
    Ok(counts
        .iter()
        .map(|(topic, count)| (topic.clone(), *count as f64 / total as f64 * 100.0))
        .collect())
}

/// Fold one city's percentages into a running cohort total.
pub fn add_into(acc: &mut HashMap<String, f64>, percentages: &HashMap<String, f64>) {
    for (topic, pct) in percentages {
        *acc.entry(topic.clone()).or_insert(0.0) += pct;
    }
}

/// Transpose {outer -> {inner -> v}} into {inner -> {outer -> v}}. A given
/// (inner, outer) pair exists in the output only if the original outer map
/// contained that inner key; absent pairs are not zero-filled.
pub fn pivot(outer: &HashMap<String, HashMap<String, f64>>) -> HashMap<String, HashMap<String, f64>> {
    let mut transposed: HashMap<String, HashMap<String, f64>> = HashMap::new();
    for (outer_key, inner) in outer {
        for (inner_key, value) in inner {
            transposed
                .entry(inner_key.clone())
                .or_default()
                .insert(outer_key.clone(), *value);
        }
    }
    transposed
}
