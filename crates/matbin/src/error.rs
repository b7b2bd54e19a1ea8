//! Result and Error types for the archive export module

/// Type alias for `Result<T, matbin::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `sertools-matbin`
pub enum Error {
    /// Asked to resolve a key for an attribute the record does not declare
    #[error("\"{attribute}\" is not an attribute of {record}")]
    UnknownAttribute {
        /// Record the attribute was resolved against
        record: String,
        /// The undeclared attribute
        attribute: String,
    },

    /// Record is missing data a complete export requires
    #[error("record \"{record}\" has no \"{field}\" data to export")]
    IncompleteRecord {
        /// Name of the record
        record: String,
        /// The missing field
        field: String,
    },

    /// Grid row count does not match the tally bins of its detector
    #[error("grid \"{grid}\" of detector \"{detector}\" has {found} rows, expected {expected}")]
    InconsistentGrid {
        /// Name of the detector
        detector: String,
        /// Name of the offending grid
        grid: String,
        /// Row count of the bins array
        expected: usize,
        /// Row count of the grid array
        found: usize,
    },

    /// Sparse pass-through requested but the codec cannot represent it
    #[error("archive codec cannot represent sparse matrices and densification was disabled")]
    UnsupportedSparseFormat,

    /// The archive codec backend is not compiled in
    #[error("archive serialization backend is not available")]
    SerializationUnsupported,

    /// Destination could not be opened or accessed
    #[error("destination \"{target}\" unavailable")]
    DestinationUnavailable {
        /// Path or description of the destination
        target: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Failure to serialize/deserialize a byte stream
    #[cfg(feature = "bincode")]
    #[error("failed binary (de)serialization")]
    FailedBinaryOp(#[from] Box<bincode::ErrorKind>),
}
