use crate::solver::cover::ZeroGroups;

/// Pick one distinct column per row from `groups`.
///
/// Row `i` is decided at depth `i`, trying its candidates in order and skipping
/// columns taken by earlier rows, so the result is the first complete choice a
/// depth-first search would reach. Instead of backtracking blindly, a
/// complete assignment is kept as a witness and each tentative choice is
/// checked against it with an alternating-path search, which keeps the search
/// polynomial. Returns `None` if no complete choice exists.
#[must_use]
pub fn extract_assignment(groups: &ZeroGroups) -> Option<Vec<usize>> {
    let groups = groups.as_slice();
    let width = groups
        .iter()
        .flatten()
        .max()
        .map_or(0, |&col| col + 1);

    let mut witness = Witness::complete(groups, width)?;
    for (row, candidates) in groups.iter().enumerate() {
        for &col in candidates {
            if witness.row_to_col[row] == Some(col) || witness.reseat(groups, row, col) {
                break;
            }
        }
    }

    witness.row_to_col.into_iter().collect()
}

/// A complete assignment over the candidate columns.
struct Witness {
    row_to_col: Vec<Option<usize>>,
    col_to_row: Vec<Option<usize>>,
}

impl Witness {
    fn complete(groups: &[Vec<usize>], width: usize) -> Option<Self> {
        let mut witness = Self {
            row_to_col: vec![None; groups.len()],
            col_to_row: vec![None; width],
        };
        for row in 0..groups.len() {
            let mut visited = vec![false; width];
            if !witness.find_path(groups, row, 0, &mut visited) {
                return None;
            }
        }
        Some(witness)
    }

    /// Try to give `row` a column, re-seating rows at or after `floor`.
    fn find_path(
        &mut self,
        groups: &[Vec<usize>],
        row: usize,
        floor: usize,
        visited: &mut [bool],
    ) -> bool {
        for &col in &groups[row] {
            if visited[col] {
                continue;
            }
            visited[col] = true;

            let reachable = match self.col_to_row[col] {
                None => true,
                Some(other) => other >= floor && self.find_path(groups, other, floor, visited),
            };
            if reachable {
                self.row_to_col[row] = Some(col);
                self.col_to_row[col] = Some(row);
                return true;
            }
        }
        false
    }

    /// Move `row` onto `col` if the rows after it can still be completed.
    ///
    /// Rows before `row` are settled and keep their columns.
    fn reseat(&mut self, groups: &[Vec<usize>], row: usize, col: usize) -> bool {
        let before = (self.row_to_col.clone(), self.col_to_row.clone());

        let displaced = self.col_to_row[col];
        if displaced.is_some_and(|other| other < row) {
            return false;
        }
        if let Some(old) = self.row_to_col[row] {
            self.col_to_row[old] = None;
        }
        self.row_to_col[row] = Some(col);
        self.col_to_row[col] = Some(row);

        let Some(other) = displaced else {
            return true;
        };
        self.row_to_col[other] = None;

        let mut visited = vec![false; self.col_to_row.len()];
        visited[col] = true;
        if self.find_path(groups, other, row + 1, &mut visited) {
            true
        } else {
            (self.row_to_col, self.col_to_row) = before;
            false
        }
    }
}
