//! Core result objects for detector tallies and depletion matrices
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod depletion;
mod detector;
mod error;

// Inline anything important for a nice public API
#[doc(inline)]
pub use detector::Detector;

#[doc(inline)]
pub use depletion::{CooMatrix, DepletionMatrix, DepmtxStorage};

#[doc(inline)]
pub use error::{Error, Result};
