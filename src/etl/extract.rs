//! Extractor trait for streaming records out of a source

use eyre::Result;

/// Extractor trait for pulling items from a source one at a time
///
/// Implementors open the source in `extract` and hand back a lazy iterator.
/// Structural failures found while reading surface as `Err` items; the
/// pipeline stops at the first one.
///
/// # Example
/// ```
/// use restaurant_inspections::etl::Extractor;
/// use eyre::Result;
///
/// struct LinesExtractor {
///     text: String,
/// }
///
/// impl Extractor for LinesExtractor {
///     type Item = String;
///     type Iter = std::vec::IntoIter<Result<String>>;
///
///     fn extract(&self) -> Result<Self::Iter> {
///         let lines: Vec<Result<String>> =
///             self.text.lines().map(|l| Ok(l.to_string())).collect();
///         Ok(lines.into_iter())
///     }
/// }
///
/// let extractor = LinesExtractor { text: "a\nb".to_string() };
/// assert_eq!(extractor.extract().unwrap().count(), 2);
/// ```
pub trait Extractor {
    /// The type of items extracted
    type Item;

    /// Lazy sequence of items in source order
    type Iter: Iterator<Item = Result<Self::Item>>;

    /// Open the source and start a fresh pass over it
    ///
    /// # Errors
    /// Returns an error if the source cannot be opened
    fn extract(&self) -> Result<Self::Iter>;
}
