use crate::core::matrix::CostMatrix;

/// Subtract each row's minimum, then each column's minimum of the result.
///
/// Every row and every column of the returned matrix contains an exact zero
/// and no entry is negative. The input is left untouched.
#[must_use]
pub fn reduce(cost: &CostMatrix) -> CostMatrix {
    let mut reduced = cost.clone();
    if reduced.is_empty() {
        return reduced;
    }

    for row in 0..reduced.rows() {
        let min = reduced.row_min(row);
        for value in reduced.row_mut(row) {
            *value -= min;
        }
    }

    for col in 0..reduced.cols() {
        let min = reduced.col_min(col);
        if min == 0.0 {
            continue;
        }
        for row in 0..reduced.rows() {
            reduced[(row, col)] -= min;
        }
    }

    reduced
}
