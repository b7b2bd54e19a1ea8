//! `sertools` is a modular toolkit for exporting reactor physics results to
//! portable matrix archives
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use sertools_objects as objects;

#[cfg(feature = "matbin")]
#[cfg_attr(docsrs, doc(cfg(feature = "matbin")))]
#[doc(inline)]
pub use sertools_matbin as matbin;
