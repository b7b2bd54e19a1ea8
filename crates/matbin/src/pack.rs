//! Packing of result objects into archives

// crate modules
use crate::archive::{Archive, MatData};
use crate::codec;
use crate::convention::Convention;
use crate::error::{Error, Result};

// sertools modules
use sertools_objects::{DepletionMatrix, DepmtxStorage, Detector};

// external crates
use log::debug;
use nalgebra::{DMatrix, DVector};

/// Conversion of a result object to a flat key to array mapping
///
/// One call walks every declared attribute of the record, resolves each key
/// under the given [Convention], and returns a fresh [Archive]. Nothing is
/// dropped silently: attributes the record declares but cannot provide fail
/// the whole pack.
pub trait ToArchive {
    /// Pack the record into a fresh archive under `convention`
    fn to_archive(&self, convention: Convention) -> Result<Archive>;
}

impl ToArchive for Detector {
    /// Emits the `bins` entry followed by every grid in insertion order,
    /// each array stored exactly as held by the detector.
    fn to_archive(&self, convention: Convention) -> Result<Archive> {
        let bins = self.bins().ok_or_else(|| Error::IncompleteRecord {
            record: self.name().to_string(),
            field: "bins".to_string(),
        })?;

        let mut archive = Archive::new();
        archive.insert(convention.detector_key(self.name(), "bins"), bins.clone());

        for (grid, values) in self.grids() {
            if values.nrows() != bins.nrows() {
                return Err(Error::InconsistentGrid {
                    detector: self.name().to_string(),
                    grid: grid.to_string(),
                    expected: bins.nrows(),
                    found: values.nrows(),
                });
            }
            archive.insert(convention.detector_key(self.name(), grid), values.clone());
        }

        debug!(
            "packed detector \"{}\" into {} entries",
            self.name(),
            archive.len()
        );
        Ok(archive)
    }
}

impl ToArchive for DepletionMatrix {
    /// Emits the `n0`, `n1`, and `zai` vectors as `1 x N` rows, the time
    /// step as a scalar, and the burnup matrix in its storage form.
    fn to_archive(&self, convention: Convention) -> Result<Archive> {
        let mut archive = Archive::new();

        archive.insert(convention.depletion_key("n0")?, row_vector(self.n0()));
        archive.insert(convention.depletion_key("n1")?, row_vector(self.n1()));
        archive.insert(convention.depletion_key("zai")?, zai_row_vector(self.zai()));
        archive.insert(convention.depletion_key("deltaT")?, self.delta_t());
        archive.insert(
            convention.depletion_key("depmtx")?,
            to_storable(self.matrix(), SparsePolicy::Preserve)?,
        );

        debug!(
            "packed depletion matrix for {} nuclides (sparse: {})",
            self.number_of_nuclides(),
            self.matrix().is_sparse()
        );
        Ok(archive)
    }
}

/// Resolve a key against a detector's declared attribute set
///
/// The checked counterpart of [Convention::detector_key], useful for looking
/// up stored data by attribute after an export. The declared set is `bins`
/// plus the detector's grid names.
pub fn detector_key(detector: &Detector, attribute: &str, convention: Convention) -> Result<String> {
    if !detector.has_attribute(attribute) {
        return Err(Error::UnknownAttribute {
            record: detector.name().to_string(),
            attribute: attribute.to_string(),
        });
    }
    Ok(convention.detector_key(detector.name(), attribute))
}

/// How sparse storage should be adapted for the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SparsePolicy {
    /// Keep the storage mode of the record, densifying only if the codec
    /// cannot represent sparse structures
    #[default]
    Preserve,
    /// Always expand to a dense array
    Densify,
    /// Keep sparse structures and fail if the codec cannot represent them
    RequireSparse,
}

/// Adapt a depletion matrix to a storable archive value
///
/// Densifying materialises every implicit zero with values unchanged, so
/// expanding the preserved sparse form always equals the densified form
/// elementwise. Dense storage passes through regardless of policy.
pub fn to_storable(matrix: &DepmtxStorage, policy: SparsePolicy) -> Result<MatData> {
    match matrix {
        DepmtxStorage::Dense(dense) => Ok(MatData::Dense(dense.clone())),
        DepmtxStorage::Sparse(coo) => match policy {
            SparsePolicy::Densify => Ok(MatData::Dense(coo.to_dense())),
            SparsePolicy::Preserve => {
                if codec::supports_sparse() {
                    Ok(MatData::Sparse(coo.clone()))
                } else {
                    Ok(MatData::Dense(coo.to_dense()))
                }
            }
            SparsePolicy::RequireSparse => {
                if codec::supports_sparse() {
                    Ok(MatData::Sparse(coo.clone()))
                } else {
                    Err(Error::UnsupportedSparseFormat)
                }
            }
        },
    }
}

/// Reshape a vector to the `1 x N` row form the container stores
fn row_vector(values: &DVector<f64>) -> DMatrix<f64> {
    DMatrix::from_row_slice(1, values.len(), values.as_slice())
}

/// Reshape the integer ZAI vector to a `1 x N` row
///
/// ZAI identifiers are far below 2^53, so widening to f64 is lossless.
fn zai_row_vector(values: &DVector<i64>) -> DMatrix<f64> {
    DMatrix::from_iterator(1, values.len(), values.iter().map(|&zai| zai as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sertools_objects::CooMatrix;

    fn sparse_storage() -> DepmtxStorage {
        let mut coo = CooMatrix::new(3, 3);
        coo.push(0, 0, -2.5e-4).unwrap();
        coo.push(2, 1, 1.0e-9).unwrap();
        DepmtxStorage::Sparse(coo)
    }

    #[test]
    fn densify_matches_preserved_sparse_elementwise() {
        let storage = sparse_storage();
        let densified = to_storable(&storage, SparsePolicy::Densify).unwrap();
        let preserved = to_storable(&storage, SparsePolicy::Preserve).unwrap();
        assert_eq!(preserved.to_dense(), densified.to_dense());
    }

    #[test]
    fn dense_storage_passes_through() {
        let storage = DepmtxStorage::Dense(DMatrix::repeat(2, 2, 4.0));
        let storable = to_storable(&storage, SparsePolicy::RequireSparse).unwrap();
        assert_eq!(storable, MatData::Dense(DMatrix::repeat(2, 2, 4.0)));
    }

    #[cfg(feature = "bincode")]
    #[test]
    fn preserve_keeps_sparse_structure() {
        let storage = sparse_storage();
        let storable = to_storable(&storage, SparsePolicy::Preserve).unwrap();
        assert_eq!(storable.as_sparse().unwrap().nnz(), 2);
    }

    #[test]
    fn unknown_detector_attribute_is_rejected() {
        let detector = Detector::new("spectrum");
        let result = detector_key(&detector, "E", Convention::Disambiguated);
        assert!(matches!(result, Err(Error::UnknownAttribute { .. })));
    }
}
