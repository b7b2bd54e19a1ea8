//! Module for exporting result objects to portable matrix archives
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod archive;
mod codec;
mod convention;
mod error;
mod pack;
mod write;

// Inline anything important for a nice public API
#[doc(inline)]
pub use archive::{Archive, MatData};

#[doc(inline)]
pub use codec::{serialization_available, supports_sparse};

#[doc(inline)]
pub use convention::Convention;

#[doc(inline)]
pub use pack::{detector_key, to_storable, SparsePolicy, ToArchive};

#[doc(inline)]
pub use write::{export, export_to_file, write_archive, Destination, FileDestination, StreamDestination};

#[doc(inline)]
pub use error::{Error, Result};
