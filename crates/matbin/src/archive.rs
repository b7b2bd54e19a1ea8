//! Flat key to array container written by the codec

// external crates
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

// sertools modules
use sertools_objects::CooMatrix;

/// A single value stored under an archive key
///
/// The container is matrix-oriented: scalars are the degenerate `1 x 1` case
/// and read back as such, vectors are stored as `1 x N` rows by the packer,
/// and sparse matrices keep their coordinate structure rather than being
/// expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatData {
    /// A single value, equivalent to a `1 x 1` array
    Scalar(f64),
    /// Dense 2D array
    Dense(DMatrix<f64>),
    /// Sparse matrix in coordinate format
    Sparse(CooMatrix),
}

impl MatData {
    /// Shape of the stored value as `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Scalar(_) => (1, 1),
            Self::Dense(matrix) => (matrix.nrows(), matrix.ncols()),
            Self::Sparse(coo) => (coo.nrows(), coo.ncols()),
        }
    }

    /// Expand any variant to a dense matrix
    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            Self::Scalar(value) => DMatrix::from_element(1, 1, *value),
            Self::Dense(matrix) => matrix.clone(),
            Self::Sparse(coo) => coo.to_dense(),
        }
    }

    /// The scalar value, if this is the scalar variant
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Reference to the dense array, if this is the dense variant
    pub fn as_dense(&self) -> Option<&DMatrix<f64>> {
        match self {
            Self::Dense(matrix) => Some(matrix),
            _ => None,
        }
    }

    /// Reference to the sparse structure, if this is the sparse variant
    pub fn as_sparse(&self) -> Option<&CooMatrix> {
        match self {
            Self::Sparse(coo) => Some(coo),
            _ => None,
        }
    }
}

impl From<f64> for MatData {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<DMatrix<f64>> for MatData {
    fn from(matrix: DMatrix<f64>) -> Self {
        Self::Dense(matrix)
    }
}

impl From<CooMatrix> for MatData {
    fn from(coo: CooMatrix) -> Self {
        Self::Sparse(coo)
    }
}

/// Ordered mapping of keys to stored arrays
///
/// Keys keep their insertion order, which is contractual: downstream tools
/// see variables in the order the packer emitted them. Inserting under an
/// existing key replaces the value in place.
///
/// ```rust
/// # use sertools_matbin::{Archive, MatData};
/// let mut archive = Archive::new();
/// archive.insert("t", MatData::Scalar(0.5));
/// assert_eq!(archive.get("t").and_then(MatData::as_scalar), Some(0.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Archive {
    entries: Vec<(String, MatData)>,
}

impl Archive {
    /// Initialise an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `key`, replacing any existing value in place
    pub fn insert(&mut self, key: impl Into<String>, data: impl Into<MatData>) {
        let key = key.into();
        let data = data.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = data,
            None => self.entries.push((key, data)),
        }
    }

    /// Value stored under `key`, if any
    pub fn get(&self, key: &str) -> Option<&MatData> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, data)| data)
    }

    /// Check whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterator over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterator over `(key, data)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MatData)> {
        self.entries.iter().map(|(k, data)| (k.as_str(), data))
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for an empty archive
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `incoming` into this archive
    ///
    /// Values from `incoming` win on key collision. Keys only present here
    /// are preserved, and new keys are appended in `incoming`'s order.
    pub fn merge(&mut self, incoming: Archive) {
        for (key, data) in incoming.entries {
            self.insert(key, data);
        }
    }
}
