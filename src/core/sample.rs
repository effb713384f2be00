use crate::core::matrix::CostMatrix;

const SAMPLE_COST: [[f64; 5]; 5] = [
    [12.0, 7.0, 9.0, 7.0, 9.0],
    [8.0, 9.0, 6.0, 6.0, 6.0],
    [7.0, 17.0, 12.0, 14.0, 9.0],
    [15.0, 14.0, 6.0, 6.0, 10.0],
    [4.0, 10.0, 7.0, 10.0, 9.0],
];

/// The fixed 5x5 reference matrix used for demonstrations and tests.
///
/// Its minimum total cost is 32, reached by assigning rows 0..5 to columns
/// `[1, 2, 4, 3, 0]` (and by one other tie).
#[must_use]
pub fn sample_cost() -> CostMatrix {
    CostMatrix::from_fn(5, 5, |row, col| SAMPLE_COST[row][col])
}
