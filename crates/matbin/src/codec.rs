//! Binary codec behind the archive container
//!
//! The container layout itself is delegated to a serde backend, treated as a
//! trusted black box: archives go in, bit-identical archives come out. The
//! backend is optional behind the default `bincode` feature so the rest of
//! the toolkit builds without it; callers should branch on
//! [serialization_available()] once rather than handling the error per call.

// crate modules
#[cfg(not(feature = "bincode"))]
use crate::error::Error;
use crate::error::Result;

use crate::archive::Archive;

// standard library
use std::io::{Read, Write};

/// Check whether the codec backend is compiled in
///
/// Determined once at compile time. When this returns `false` every write
/// fails with [Error::SerializationUnsupported](crate::Error), so exporting
/// code should use this to skip gracefully instead.
pub fn serialization_available() -> bool {
    cfg!(feature = "bincode")
}

/// Check whether the codec can store sparse structures without expansion
///
/// Sparse entries are native to the container, so this only depends on the
/// backend being present at all.
pub fn supports_sparse() -> bool {
    serialization_available()
}

#[cfg(feature = "bincode")]
pub(crate) fn encode_into<W: Write>(writer: W, archive: &Archive) -> Result<()> {
    Ok(bincode::serialize_into(writer, archive)?)
}

#[cfg(feature = "bincode")]
pub(crate) fn decode_from<R: Read>(reader: R) -> Result<Archive> {
    Ok(bincode::deserialize_from(reader)?)
}

#[cfg(not(feature = "bincode"))]
pub(crate) fn encode_into<W: Write>(_writer: W, _archive: &Archive) -> Result<()> {
    Err(Error::SerializationUnsupported)
}

#[cfg(not(feature = "bincode"))]
pub(crate) fn decode_from<R: Read>(_reader: R) -> Result<Archive> {
    Err(Error::SerializationUnsupported)
}
