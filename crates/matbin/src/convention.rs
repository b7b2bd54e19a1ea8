//! Naming conventions for archive keys

// crate modules
use crate::error::{Error, Result};

/// Naming convention applied to every key of one export call
///
/// Exactly one convention applies per export, never a mixture. Scripts tend
/// to be written against one of two worlds:
///
/// - [Convention::Canonical] reproduces the native variable names of the
///   upstream code, so anything keyed to the original output files keeps
///   working. Detectors become `DET<name>` with the grid letter appended,
///   depletion fields use the fixed `ZAI`/`N0`/`N1`/`t`/`A` names.
/// - [Convention::Disambiguated] derives keys from the record's own name and
///   attribute (`<name>_bins`, `<name>_E`), so multiple records can share a
///   destination without colliding.
///
/// ```rust
/// # use sertools_matbin::Convention;
/// assert_eq!(Convention::Canonical.detector_key("spectrum", "E"), "DETspectrumE");
/// assert_eq!(Convention::Disambiguated.detector_key("spectrum", "E"), "spectrum_E");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convention {
    /// Native variable names of the upstream code
    #[default]
    Canonical,
    /// Keys derived from the record name and attribute
    Disambiguated,
}

impl Convention {
    /// Resolve the key for a detector attribute
    ///
    /// The `bins` attribute is the detector results themselves; any other
    /// attribute is treated as a grid name and appended to the key. This is
    /// the raw, unchecked mapping; resolution against a detector's declared
    /// attribute set lives with the packer.
    pub fn detector_key(&self, name: &str, attribute: &str) -> String {
        match self {
            Self::Canonical => {
                let mut key = format!("DET{name}");
                if attribute != "bins" {
                    key.push_str(attribute);
                }
                key
            }
            Self::Disambiguated => format!("{}_{attribute}", sanitize(name)),
        }
    }

    /// Resolve the key for a depletion matrix attribute
    ///
    /// The attribute set is closed: `zai`, `n0`, `n1`, `deltaT`, and
    /// `depmtx`. The time step maps to `t` under both conventions since the
    /// native name is already unambiguous.
    pub fn depletion_key(&self, attribute: &str) -> Result<String> {
        let key = match (self, attribute) {
            (Self::Canonical, "zai") => "ZAI",
            (Self::Canonical, "n0") => "N0",
            (Self::Canonical, "n1") => "N1",
            (Self::Canonical, "depmtx") => "A",
            (_, "deltaT") => "t",
            (Self::Disambiguated, "zai" | "n0" | "n1" | "depmtx") => attribute,
            _ => {
                return Err(Error::UnknownAttribute {
                    record: "depletion matrix".to_string(),
                    attribute: attribute.to_string(),
                })
            }
        };
        Ok(key.to_string())
    }
}

/// Reduce a record name to a valid storage identifier
///
/// Identifiers are ASCII alphanumerics and underscores, starting with a
/// letter. Anything else is replaced with an underscore, and a leading
/// non-letter gets an `x` prefix.
fn sanitize(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    match out.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => (),
        _ => out.insert(0, 'x'),
    }
    out
}
