//! Depletion matrix results

// crate modules
use crate::error::{Error, Result};

// external crates
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Sparse matrix in coordinate format
///
/// Stores the declared dimensions and one `(row, col, value)` triplet per
/// explicit entry. Entries keep the order they were pushed in, and explicit
/// zeros are kept as entries rather than being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooMatrix {
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
}

impl CooMatrix {
    /// Initialise an empty `nrows` x `ncols` matrix
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            rows: Vec::new(),
            cols: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Collect the non-zero entries of a dense matrix
    pub fn from_dense(matrix: &DMatrix<f64>) -> Self {
        let mut coo = Self::new(matrix.nrows(), matrix.ncols());
        // row-major walk so entries read in the order a file would list them
        for row in 0..matrix.nrows() {
            for col in 0..matrix.ncols() {
                let value = matrix[(row, col)];
                if value != 0.0 {
                    coo.rows.push(row);
                    coo.cols.push(col);
                    coo.values.push(value);
                }
            }
        }
        coo
    }

    /// Add an explicit entry at `(row, col)`
    pub fn push(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= self.nrows || col >= self.ncols {
            return Err(Error::EntryOutOfBounds {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        self.rows.push(row);
        self.cols.push(col);
        self.values.push(value);
        Ok(())
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of explicit entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterator over `(row, col, value)` triplets in insertion order
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((&row, &col), &value)| (row, col, value))
    }

    /// Expand to a dense matrix, filling implicit entries with zero
    ///
    /// Duplicate triplets overwrite in insertion order, so the last explicit
    /// value at a position wins.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut matrix = DMatrix::zeros(self.nrows, self.ncols);
        for (row, col, value) in self.triplets() {
            matrix[(row, col)] = value;
        }
        matrix
    }
}

/// Storage mode of a depletion matrix, decided at read time
///
/// Readers keep the matrix in whichever form the file was read into, so this
/// is a runtime union rather than separate record types. Anything consuming
/// a [DepletionMatrix] must handle both arms.
#[derive(Debug, Clone, PartialEq)]
pub enum DepmtxStorage {
    /// Full dense matrix
    Dense(DMatrix<f64>),
    /// Coordinate-format triplets
    Sparse(CooMatrix),
}

impl DepmtxStorage {
    /// Number of rows
    pub fn nrows(&self) -> usize {
        match self {
            Self::Dense(matrix) => matrix.nrows(),
            Self::Sparse(coo) => coo.nrows(),
        }
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        match self {
            Self::Dense(matrix) => matrix.ncols(),
            Self::Sparse(coo) => coo.ncols(),
        }
    }

    /// Check for the sparse storage mode
    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }

    /// Expand either arm to a dense matrix
    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            Self::Dense(matrix) => matrix.clone(),
            Self::Sparse(coo) => coo.to_dense(),
        }
    }
}

/// Depletion data for a single time step
///
/// Holds the nuclide identifiers, densities before and after the step, the
/// step length, and the `N x N` burnup matrix in whichever [DepmtxStorage]
/// form it was read. All fields are validated against each other once at
/// construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DepletionMatrix {
    zai: DVector<i64>,
    n0: DVector<f64>,
    n1: DVector<f64>,
    delta_t: f64,
    matrix: DepmtxStorage,
}

impl DepletionMatrix {
    /// Construct a record, checking every field against the nuclide count
    ///
    /// The number of nuclides is taken from `zai`, and `n0`, `n1`, and both
    /// matrix dimensions must match it exactly.
    pub fn new(
        zai: DVector<i64>,
        n0: DVector<f64>,
        n1: DVector<f64>,
        delta_t: f64,
        matrix: DepmtxStorage,
    ) -> Result<Self> {
        let expected = zai.len();
        for (field, found) in [
            ("n0", n0.len()),
            ("n1", n1.len()),
            ("depmtx rows", matrix.nrows()),
            ("depmtx cols", matrix.ncols()),
        ] {
            if found != expected {
                return Err(Error::InconsistentLength {
                    field: field.to_string(),
                    expected,
                    found,
                });
            }
        }

        Ok(Self {
            zai,
            n0,
            n1,
            delta_t,
            matrix,
        })
    }

    /// Isotope ZAI identifiers
    pub fn zai(&self) -> &DVector<i64> {
        &self.zai
    }

    /// Nuclide densities before the step
    pub fn n0(&self) -> &DVector<f64> {
        &self.n0
    }

    /// Nuclide densities after the step
    pub fn n1(&self) -> &DVector<f64> {
        &self.n1
    }

    /// Length of the time step
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Burnup matrix in its storage form
    pub fn matrix(&self) -> &DepmtxStorage {
        &self.matrix
    }

    /// Number of nuclides tracked by this record
    pub fn number_of_nuclides(&self) -> usize {
        self.zai.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_coo() -> CooMatrix {
        let mut coo = CooMatrix::new(3, 3);
        coo.push(0, 0, -1.5).unwrap();
        coo.push(1, 2, 2.5e-4).unwrap();
        coo.push(2, 2, 0.0).unwrap();
        coo
    }

    #[test]
    fn coo_expands_with_implicit_zeros() {
        let dense = example_coo().to_dense();
        assert_eq!(dense[(0, 0)], -1.5);
        assert_eq!(dense[(1, 2)], 2.5e-4);
        assert_eq!(dense[(0, 1)], 0.0);
        assert_eq!(dense.sum(), -1.5 + 2.5e-4);
    }

    #[test]
    fn coo_round_trips_through_dense() {
        let dense = example_coo().to_dense();
        let rebuilt = CooMatrix::from_dense(&dense);
        // the explicit zero is dropped, values are not
        assert_eq!(rebuilt.nnz(), 2);
        assert_eq!(rebuilt.to_dense(), dense);
    }

    #[test]
    fn coo_rejects_out_of_bounds_entries() {
        let mut coo = CooMatrix::new(2, 2);
        assert!(matches!(
            coo.push(2, 0, 1.0),
            Err(Error::EntryOutOfBounds { row: 2, .. })
        ));
    }

    #[test]
    fn record_rejects_inconsistent_lengths() {
        let result = DepletionMatrix::new(
            DVector::from_vec(vec![541350, 922350]),
            DVector::from_vec(vec![1.0, 2.0]),
            DVector::from_vec(vec![1.0]),
            0.5,
            DepmtxStorage::Dense(DMatrix::zeros(2, 2)),
        );
        assert!(matches!(
            result,
            Err(Error::InconsistentLength { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn record_rejects_non_square_matrix() {
        let result = DepletionMatrix::new(
            DVector::from_vec(vec![541350, 922350]),
            DVector::from_vec(vec![1.0, 2.0]),
            DVector::from_vec(vec![3.0, 4.0]),
            0.5,
            DepmtxStorage::Dense(DMatrix::zeros(2, 3)),
        );
        assert!(result.is_err());
    }
}
