//! Zero resolution: turning the zeros of a reduced matrix into assignments.
//!
//! A zero at (row, col) means the pair can be assigned at no extra cost. The
//! resolution step collapses rows and columns that have a single zero into
//! forced assignments, breaks the ties that remain, and finally grows the
//! resulting assignment with alternating paths until no more rows can be
//! matched on zeros.

use crate::core::matrix::CostMatrix;
use crate::utils::validation::is_zero;

/// Zero positions of a reduced matrix.
///
/// `row_zeros[r]` lists the columns still holding a candidate zero in row `r`
/// and `col_zeros[c]` lists the rows for column `c`; both describe the same set
/// of positions. `original_row_zeros` is the adjacency as first scanned, before
/// any zero was collapsed away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroIndex {
    pub row_zeros: Vec<Vec<usize>>,
    pub col_zeros: Vec<Vec<usize>>,
    pub original_row_zeros: Vec<Vec<usize>>,
}

impl ZeroIndex {
    /// Scan `matrix` for entries within `tolerance` of zero.
    #[must_use]
    pub fn scan(matrix: &CostMatrix, tolerance: f64) -> Self {
        let mut row_zeros = vec![Vec::new(); matrix.rows()];
        let mut col_zeros = vec![Vec::new(); matrix.cols()];

        for (row, columns) in row_zeros.iter_mut().enumerate() {
            for (col, &value) in matrix.row(row).iter().enumerate() {
                if is_zero(value, tolerance) {
                    columns.push(col);
                    col_zeros[col].push(row);
                }
            }
        }

        Self {
            original_row_zeros: row_zeros.clone(),
            row_zeros,
            col_zeros,
        }
    }

    /// The column assigned to `row`, when exactly one zero survives in it
    #[must_use]
    pub fn assigned_column(&self, row: usize) -> Option<usize> {
        match self.row_zeros[row].as_slice() {
            [col] => Some(*col),
            _ => None,
        }
    }

    /// The row assigned to `col`, when exactly one zero survives in it
    #[must_use]
    pub fn assigned_row(&self, col: usize) -> Option<usize> {
        match self.col_zeros[col].as_slice() {
            [row] => Some(*row),
            _ => None,
        }
    }

    /// Number of rows holding a surviving zero
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.row_zeros.iter().filter(|zeros| !zeros.is_empty()).count()
    }

    /// Check that the row and column views describe the same positions
    #[must_use]
    pub fn is_mirrored(&self) -> bool {
        let rows_ok = self.row_zeros.iter().enumerate().all(|(row, columns)| {
            columns
                .iter()
                .all(|&col| self.col_zeros.get(col).is_some_and(|rows| rows.contains(&row)))
        });
        let cols_ok = self.col_zeros.iter().enumerate().all(|(col, rows)| {
            rows.iter()
                .all(|&row| self.row_zeros.get(row).is_some_and(|cols| cols.contains(&col)))
        });
        rows_ok && cols_ok
    }

    /// Make (row, col) the only surviving zero of its row and of its column.
    ///
    /// Returns true if any other zero was removed.
    fn force(&mut self, row: usize, col: usize) -> bool {
        let mut removed = false;

        let dropped_cols: Vec<usize> = self.row_zeros[row]
            .iter()
            .copied()
            .filter(|&c| c != col)
            .collect();
        for c in dropped_cols {
            self.col_zeros[c].retain(|&r| r != row);
            removed = true;
        }
        self.row_zeros[row].retain(|&c| c == col);

        let dropped_rows: Vec<usize> = self.col_zeros[col]
            .iter()
            .copied()
            .filter(|&r| r != row)
            .collect();
        for r in dropped_rows {
            self.row_zeros[r].retain(|&c| c != col);
            removed = true;
        }
        self.col_zeros[col].retain(|&r| r == row);

        removed
    }

    /// Force every single-zero row and column until a full pass changes nothing.
    fn collapse_singletons(&mut self) {
        loop {
            let mut found_new_removal = false;

            for row in 0..self.row_zeros.len() {
                if let Some(col) = self.assigned_column(row) {
                    found_new_removal |= self.force(row, col);
                }
            }
            for col in 0..self.col_zeros.len() {
                if let Some(row) = self.assigned_row(col) {
                    found_new_removal |= self.force(row, col);
                }
            }

            if !found_new_removal {
                break;
            }
        }
    }

    /// Force the first surviving zero of the first row that still has several.
    ///
    /// Returns false when every row has at most one surviving zero.
    fn break_tie(&mut self) -> bool {
        let Some(row) = self.row_zeros.iter().position(|zeros| zeros.len() > 1) else {
            return false;
        };
        let col = self.row_zeros[row][0];
        self.force(row, col);
        true
    }

    /// Grow the surviving one-to-one assignment along alternating paths of the
    /// original zero adjacency until no unassigned row can be matched.
    fn augment(&mut self) {
        let cols = self.col_zeros.len();
        let mut matching = Matching::from_zeros(self);

        for row in 0..self.row_zeros.len() {
            if matching.row_match[row].is_none() {
                let mut visited = vec![false; cols];
                find_augmenting_path(
                    &self.original_row_zeros,
                    row,
                    &mut visited,
                    &mut matching.row_match,
                    &mut matching.col_match,
                );
            }
        }

        self.row_zeros = matching.row_match.into_iter().map(|m| m.into_iter().collect()).collect();
        self.col_zeros = matching.col_match.into_iter().map(|m| m.into_iter().collect()).collect();
    }
}

/// One-to-one pairing of rows with columns along zeros.
///
/// Carried across cost adjustments: a matched zero always lies in a row and
/// column that are either both marked or both unmarked, so adjusting never
/// moves it away from zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    row_match: Vec<Option<usize>>,
    col_match: Vec<Option<usize>>,
}

impl Matching {
    /// Take the surviving single zeros of a resolved index as the matching
    #[must_use]
    pub fn from_zeros(zeros: &ZeroIndex) -> Self {
        Self {
            row_match: (0..zeros.row_zeros.len())
                .map(|row| zeros.assigned_column(row))
                .collect(),
            col_match: (0..zeros.col_zeros.len())
                .map(|col| zeros.assigned_row(col))
                .collect(),
        }
    }

    #[must_use]
    pub fn column_for(&self, row: usize) -> Option<usize> {
        self.row_match[row]
    }

    #[must_use]
    pub fn row_for(&self, col: usize) -> Option<usize> {
        self.col_match[col]
    }

    /// Number of matched rows
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.row_match.iter().flatten().count()
    }

    /// Pair `row` with `col`, returning the column `row` held before.
    ///
    /// The caller re-seats whichever row previously held `col`.
    pub fn assign(&mut self, row: usize, col: usize) -> Option<usize> {
        self.col_match[col] = Some(row);
        self.row_match[row].replace(col)
    }
}

/// Try to give `row` a column, re-seating previously matched rows as needed.
fn find_augmenting_path(
    adjacency: &[Vec<usize>],
    row: usize,
    visited: &mut [bool],
    row_match: &mut [Option<usize>],
    col_match: &mut [Option<usize>],
) -> bool {
    for &col in &adjacency[row] {
        if visited[col] {
            continue;
        }
        visited[col] = true;

        let reachable = match col_match[col] {
            None => true,
            Some(other) => find_augmenting_path(adjacency, other, visited, row_match, col_match),
        };
        if reachable {
            row_match[row] = Some(col);
            col_match[col] = Some(row);
            return true;
        }
    }
    false
}

/// Resolve the zeros of a reduced matrix into a one-to-one assignment.
///
/// On return each row and each column of `row_zeros`/`col_zeros` holds at most
/// one zero, the assignment they describe is maximum over the zeros of
/// `matrix`, and `original_row_zeros` still holds every zero.
#[must_use]
pub fn resolve_single_zeros(matrix: &CostMatrix, tolerance: f64) -> ZeroIndex {
    let mut zeros = ZeroIndex::scan(matrix, tolerance);

    loop {
        zeros.collapse_singletons();
        if !zeros.break_tie() {
            break;
        }
    }
    zeros.augment();

    debug_assert!(zeros.is_mirrored());
    zeros
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::sample_cost;
    use crate::solver::reduction::reduce;

    fn matrix(rows: Vec<Vec<f64>>) -> CostMatrix {
        CostMatrix::from_rows(rows).unwrap()
    }

    fn assert_one_to_one(zeros: &ZeroIndex) {
        assert!(zeros.is_mirrored());
        assert!(zeros.row_zeros.iter().all(|z| z.len() <= 1));
        assert!(zeros.col_zeros.iter().all(|z| z.len() <= 1));
    }

    #[test]
    fn test_scan() {
        let zeros = ZeroIndex::scan(&matrix(vec![vec![0.0, 1.0], vec![0.0, 0.0]]), 1e-9);
        assert_eq!(zeros.row_zeros, vec![vec![0], vec![0, 1]]);
        assert_eq!(zeros.col_zeros, vec![vec![0, 1], vec![1]]);
        assert_eq!(zeros.original_row_zeros, zeros.row_zeros);
        assert!(zeros.is_mirrored());
    }

    #[test]
    fn test_scan_uses_tolerance() {
        let m = matrix(vec![vec![1e-12, 0.5]]);
        assert_eq!(ZeroIndex::scan(&m, 1e-9).row_zeros, vec![vec![0]]);
        assert_eq!(ZeroIndex::scan(&m, 0.0).row_zeros, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_singletons_collapse() {
        // Row 0 has a single zero in column 0, which forces row 1 onto column 1
        let zeros = resolve_single_zeros(&matrix(vec![vec![0.0, 1.0], vec![0.0, 0.0]]), 1e-9);
        assert_eq!(zeros.row_zeros, vec![vec![0], vec![1]]);
        assert_eq!(zeros.col_zeros, vec![vec![0], vec![1]]);
        assert_eq!(zeros.original_row_zeros, vec![vec![0], vec![0, 1]]);
    }

    #[test]
    fn test_ties_are_broken() {
        let zeros = resolve_single_zeros(&matrix(vec![vec![0.0; 3]; 3]), 1e-9);
        assert_one_to_one(&zeros);
        assert_eq!(zeros.assigned_count(), 3);
    }

    #[test]
    fn test_unassignable_row_stays_empty() {
        // Rows 0 and 1 compete for column 0 only
        let zeros = resolve_single_zeros(
            &matrix(vec![
                vec![0.0, 1.0, 1.0],
                vec![0.0, 1.0, 1.0],
                vec![0.0, 0.0, 0.0],
            ]),
            1e-9,
        );
        assert_one_to_one(&zeros);
        assert_eq!(zeros.assigned_count(), 2);
    }

    #[test]
    fn test_augmentation_reaches_maximum() {
        // Breaking the first tie puts row 0 on column 0, after which collapsing
        // leaves row 3 without a zero; an alternating path re-seats rows 0 and 2.
        let m = matrix(vec![
            vec![0.0, 0.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0, 0.0],
        ]);
        let zeros = resolve_single_zeros(&m, 1e-9);
        assert_one_to_one(&zeros);
        assert_eq!(zeros.assigned_count(), 4);
    }

    #[test]
    fn test_resolve_sample() {
        let zeros = resolve_single_zeros(&reduce(&sample_cost()), 1e-9);
        assert_one_to_one(&zeros);
        // Rows 2 and 4 can only use column 0, so one of them is left out
        assert_eq!(zeros.assigned_count(), 4);
        assert_eq!(zeros.original_row_zeros[1], vec![2, 3, 4]);
    }

    #[test]
    fn test_matching_from_resolved_zeros() {
        let zeros = resolve_single_zeros(&matrix(vec![vec![0.0, 1.0], vec![0.0, 0.0]]), 1e-9);
        let matching = Matching::from_zeros(&zeros);
        assert_eq!(matching.column_for(0), Some(0));
        assert_eq!(matching.row_for(1), Some(1));
        assert_eq!(matching.matched_count(), 2);
    }

    #[test]
    fn test_matching_assign_returns_previous_column() {
        let zeros = resolve_single_zeros(&matrix(vec![vec![0.0, 1.0], vec![1.0, 1.0]]), 1e-9);
        let mut matching = Matching::from_zeros(&zeros);
        assert_eq!(matching.matched_count(), 1);

        assert_eq!(matching.assign(0, 1), Some(0));
        assert_eq!(matching.assign(1, 0), None);
        assert_eq!(matching.column_for(0), Some(1));
        assert_eq!(matching.row_for(0), Some(1));
        assert_eq!(matching.matched_count(), 2);
    }
}
