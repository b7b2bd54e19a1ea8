//! Result and Error types for the result objects

/// Type alias for `Result<T, objects::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `sertools-objects`
pub enum Error {
    /// Inconsistent length of a depletion field against the nuclide count
    #[error("inconsistent \"{field}\" length (expected {expected:?}, found {found:?})")]
    InconsistentLength {
        /// Name of the offending field
        field: String,
        /// Expected number of nuclides
        expected: usize,
        /// Length actually provided
        found: usize,
    },

    /// Sparse entry indexed outside of the declared matrix dimensions
    #[error("entry ({row:?}, {col:?}) outside of {nrows:?}x{ncols:?} matrix")]
    EntryOutOfBounds {
        /// Row index of the entry
        row: usize,
        /// Column index of the entry
        col: usize,
        /// Declared number of rows
        nrows: usize,
        /// Declared number of columns
        ncols: usize,
    },
}
