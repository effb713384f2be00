use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::matrix::CostMatrix;

/// Column chosen for each row of a cost matrix.
///
/// `columns()[row]` is the column assigned to `row`. Every row is assigned and
/// no column appears twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(Vec<usize>);

/// A single row-to-column pairing with its cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssignedPair {
    pub row: usize,
    pub column: usize,
    pub cost: f64,
}

impl Assignment {
    #[must_use]
    pub fn new(columns: Vec<usize>) -> Self {
        Self(columns)
    }

    #[must_use]
    pub fn columns(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// (row, column) pairs in row order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().copied().enumerate()
    }

    /// Pairs annotated with their cost in `cost`
    #[must_use]
    pub fn priced_pairs(&self, cost: &CostMatrix) -> Vec<AssignedPair> {
        self.pairs()
            .map(|(row, column)| AssignedPair {
                row,
                column,
                cost: cost[(row, column)],
            })
            .collect()
    }

    /// Sum of the assigned cells of `cost`
    #[must_use]
    pub fn total_cost(&self, cost: &CostMatrix) -> f64 {
        self.pairs().map(|(row, column)| cost[(row, column)]).sum()
    }

    /// Check that this is a complete assignment for `cost`: one in-range,
    /// distinct column per row.
    #[must_use]
    pub fn is_valid_for(&self, cost: &CostMatrix) -> bool {
        if self.0.len() != cost.rows() {
            return false;
        }
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0
            .iter()
            .all(|&column| column < cost.cols() && seen.insert(column))
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl From<Assignment> for Vec<usize> {
    fn from(assignment: Assignment) -> Self {
        assignment.0
    }
}

impl AsRef<[usize]> for Assignment {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost() -> CostMatrix {
        CostMatrix::from_rows(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_total_cost() {
        let assignment = Assignment::new(vec![2, 0, 1]);
        assert_eq!(assignment.total_cost(&cost()), 3.0 + 4.0 + 8.0);
    }

    #[test]
    fn test_priced_pairs() {
        let assignment = Assignment::new(vec![1, 2, 0]);
        let pairs = assignment.priced_pairs(&cost());
        assert_eq!(pairs.len(), 3);
        assert_eq!(
            pairs[1],
            AssignedPair {
                row: 1,
                column: 2,
                cost: 6.0
            }
        );
    }

    #[test]
    fn test_is_valid_for() {
        let cost = cost();
        assert!(Assignment::new(vec![0, 1, 2]).is_valid_for(&cost));
        assert!(!Assignment::new(vec![0, 0, 2]).is_valid_for(&cost)); // reused column
        assert!(!Assignment::new(vec![0, 1, 3]).is_valid_for(&cost)); // out of range
        assert!(!Assignment::new(vec![0, 1]).is_valid_for(&cost)); // missing row
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_total_cost_rejects_out_of_range_column() {
        // Column 3 of row 0 must not read row 1's first cell
        let _ = Assignment::new(vec![3, 0, 1]).total_cost(&cost());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let assignment = Assignment::new(vec![1, 0]);
        assert_eq!(serde_json::to_string(&assignment).unwrap(), "[1,0]");
    }
}
