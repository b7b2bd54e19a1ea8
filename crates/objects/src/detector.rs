//! Detector tally results

// external crates
use nalgebra::DMatrix;

/// Results and bin structure for a single named detector
///
/// The raw tally results are a dense 2D array with one row per tally bin and
/// one column per response value (mean, relative error, bin indices, and so
/// on). Each grid describes the bin boundaries and midpoints of one binned
/// dimension as an `n x 3` array sharing its row count with the bins.
///
/// Detectors follow the lifecycle of the output files they come from: the
/// parser constructs an empty detector by name and then populates the bins
/// and grids once. Everything downstream treats them as read-only.
///
/// ```rust
/// # use sertools_objects::Detector;
/// # use nalgebra::DMatrix;
/// let mut detector = Detector::new("spectrum");
/// detector.set_bins(DMatrix::zeros(10, 12));
/// detector.add_grid("E", DMatrix::zeros(10, 3));
///
/// assert_eq!(detector.grid_names().collect::<Vec<_>>(), vec!["E"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Detector {
    /// Unique detector name from the output file
    name: String,
    /// Raw tally results, `None` until populated by the parser
    bins: Option<DMatrix<f64>>,
    /// Grids keyed by name, in the order they were read
    grids: Vec<(String, DMatrix<f64>)>,
}

impl Detector {
    /// Initialise an empty detector for `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bins: None,
            grids: Vec::new(),
        }
    }

    /// Name of the detector
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw tally results, if populated
    pub fn bins(&self) -> Option<&DMatrix<f64>> {
        self.bins.as_ref()
    }

    /// Set the raw tally results
    pub fn set_bins(&mut self, bins: DMatrix<f64>) {
        self.bins = Some(bins);
    }

    /// Add a bin structure grid under `name`
    ///
    /// Grids keep their insertion order. Adding a grid under an existing name
    /// replaces the stored values without changing the order.
    pub fn add_grid(&mut self, name: impl Into<String>, values: DMatrix<f64>) {
        let name = name.into();
        match self.grids.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = values,
            None => self.grids.push((name, values)),
        }
    }

    /// Grid values stored under `name`, if any
    pub fn grid(&self, name: &str) -> Option<&DMatrix<f64>> {
        self.grids
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values)
    }

    /// Iterator over `(name, values)` grid pairs in insertion order
    pub fn grids(&self) -> impl Iterator<Item = (&str, &DMatrix<f64>)> {
        self.grids.iter().map(|(n, values)| (n.as_str(), values))
    }

    /// Iterator over grid names in insertion order
    pub fn grid_names(&self) -> impl Iterator<Item = &str> {
        self.grids.iter().map(|(n, _)| n.as_str())
    }

    /// Check whether `attribute` is declared by this detector
    ///
    /// The declared set is `bins` plus every stored grid name.
    pub fn has_attribute(&self, attribute: &str) -> bool {
        attribute == "bins" || self.grid(attribute).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids_keep_insertion_order() {
        let mut detector = Detector::new("spectrum");
        detector.add_grid("E", DMatrix::zeros(2, 3));
        detector.add_grid("T", DMatrix::zeros(2, 3));
        let names = detector.grid_names().collect::<Vec<_>>();
        assert_eq!(names, vec!["E", "T"]);
    }

    #[test]
    fn adding_existing_grid_replaces_values() {
        let mut detector = Detector::new("spectrum");
        detector.add_grid("E", DMatrix::zeros(2, 3));
        detector.add_grid("T", DMatrix::zeros(2, 3));
        detector.add_grid("E", DMatrix::repeat(2, 3, 1.0));

        assert_eq!(detector.grids().count(), 2);
        assert_eq!(detector.grid("E"), Some(&DMatrix::repeat(2, 3, 1.0)));
        assert_eq!(detector.grid_names().next(), Some("E"));
    }

    #[test]
    fn declared_attributes() {
        let mut detector = Detector::new("spectrum");
        detector.add_grid("E", DMatrix::zeros(2, 3));
        assert!(detector.has_attribute("bins"));
        assert!(detector.has_attribute("E"));
        assert!(!detector.has_attribute("T"));
    }
}
