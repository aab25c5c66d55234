//! Weighted-degree accumulation over the surviving similarity edges.
//!
//! Weighted degree per node is just the sum of incident edge weights, so
//! a running-total map does the job of a graph library. Nodes exist only
//! once an edge touches them.

use std::collections::HashMap;

use crate::report::DegreeDistribution;

/// Incremental weighted-degree accumulator for the similarity graph.
#[derive(Debug, Default)]
pub struct DegreeAccumulator {
    degrees: HashMap<String, f64>,
    edges: u64,
    total_weight: f64,
}

impl DegreeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one surviving edge; weight is the absolute similarity.
    /// The engine emits each unordered pair exactly once, so multi-edges
    /// cannot occur.
    pub fn add_edge(&mut self, left: &str, right: &str, similarity: f64) {
        let weight = similarity.abs();
        *self.degrees.entry(left.to_string()).or_insert(0.0) += weight;
        *self.degrees.entry(right.to_string()).or_insert(0.0) += weight;
        self.edges += 1;
        self.total_weight += weight;
    }

    /// Nodes touched by at least one surviving edge.
    pub fn node_count(&self) -> usize {
        self.degrees.len()
    }

    /// Surviving edges recorded so far.
    pub fn edge_count(&self) -> u64 {
        self.edges
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Weighted degree of one node, if it appeared.
    pub fn degree(&self, id: &str) -> Option<f64> {
        self.degrees.get(id).copied()
    }

    /// Consume the accumulator into the rank-ordered degree dataset.
    pub fn into_distribution(self) -> DegreeDistribution {
        let mut degrees: Vec<f64> = self.degrees.into_values().collect();
        degrees.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        DegreeDistribution::new(degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_sum_incident_weights() {
        let mut acc = DegreeAccumulator::new();
        acc.add_edge("A", "B", 1.0);
        acc.add_edge("A", "C", 0.5);
        assert_eq!(acc.degree("A"), Some(1.5));
        assert_eq!(acc.degree("B"), Some(1.0));
        assert_eq!(acc.degree("C"), Some(0.5));
        assert_eq!(acc.node_count(), 3);
        assert_eq!(acc.edge_count(), 2);
    }

    #[test]
    fn weight_is_absolute_similarity() {
        let mut acc = DegreeAccumulator::new();
        acc.add_edge("A", "B", -0.4);
        assert_eq!(acc.degree("A"), Some(0.4));
        assert_eq!(acc.total_weight(), 0.4);
    }

    #[test]
    fn degree_sum_is_twice_total_weight() {
        let mut acc = DegreeAccumulator::new();
        acc.add_edge("A", "B", 0.9);
        acc.add_edge("B", "C", -0.2);
        acc.add_edge("A", "C", 0.7);
        let total = acc.total_weight();
        let degree_sum: f64 = ["A", "B", "C"]
            .iter()
            .map(|id| acc.degree(id).unwrap())
            .sum();
        assert!((degree_sum - 2.0 * total).abs() < 1e-12);
    }

    #[test]
    fn absent_node_has_no_degree() {
        let acc = DegreeAccumulator::new();
        assert_eq!(acc.degree("A"), None);
        assert_eq!(acc.node_count(), 0);
    }

    #[test]
    fn distribution_is_descending() {
        let mut acc = DegreeAccumulator::new();
        acc.add_edge("A", "B", 1.0);
        acc.add_edge("A", "C", 0.5);
        let dist = acc.into_distribution();
        assert_eq!(dist.degrees(), &[1.5, 1.0, 0.5]);
    }
}
